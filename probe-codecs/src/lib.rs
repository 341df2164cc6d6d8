// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `probe-codecs` implements every decoder the engine knows about and assembles them into a
//! [`probe_core::CodecRegistry`] via [`register_all`]: standard-library-backed codecs first
//! (when their Cargo feature is enabled), then the custom decoders.

pub mod dpcm;
pub mod ecg;
pub mod huffman;
pub mod lz77;
pub mod rice;
pub mod simple;
pub mod standard;
pub mod wavelet;

use dpcm::Predictor;
use probe_core::CodecRegistry;

/// Registers every codec this crate implements, in a fixed, documented order. Registration order
/// is report order: callers that depend on where a given tag lands in a `Report`'s `results`
/// should treat this function's body as the authority on that ordering.
pub fn register_all(registry: &mut CodecRegistry) {
    #[cfg(feature = "zlib")]
    registry.register("zlib", standard::decompress_zlib);
    #[cfg(feature = "gzip")]
    registry.register("gzip", standard::decompress_gzip);
    #[cfg(feature = "bzip2-codec")]
    registry.register("bz2", standard::decompress_bzip2);
    #[cfg(feature = "lzma")]
    registry.register("lzma", standard::decompress_lzma);
    #[cfg(feature = "deflate")]
    registry.register("deflate", standard::decompress_deflate);
    #[cfg(feature = "lz4")]
    registry.register("lz4", standard::decompress_lz4);
    #[cfg(feature = "zstd-codec")]
    registry.register("zstd", standard::decompress_zstd);

    registry.register("rle", simple::decompress_rle);
    registry.register("delta", simple::decompress_delta);
    registry.register("delta_signed", simple::decompress_delta_signed);
    registry.register("nibble_signed", simple::decompress_nibble_signed);
    registry.register("lzw", simple::decompress_lzw);

    registry.register("huffman", huffman::decompress_huffman);
    registry.register("huffman_standard", huffman::decompress_huffman_standard);
    registry.register("huffman_canonical", huffman::decompress_huffman_canonical);
    registry.register("huffman_simple", huffman::decompress_huffman_simple);

    registry.register("lz77", lz77::decompress_lz77);

    registry.register("dpcm", dpcm_previous);
    registry.register("dpcm_average", dpcm_average);
    registry.register("dpcm_linear", dpcm_linear);

    registry.register("rice", rice_default);
    registry.register("vlq", simple::decompress_vlq);

    registry.register("wavelet_haar", wavelet::decompress_wavelet_haar);
    registry.register("wavelet_haar_int16", wavelet_haar_int16);

    registry.register("ecg_leads", ecg::decompress_ecg_leads);
    registry.register("ecg_leads_3lead", ecg::decompress_ecg_leads_3lead);
    registry.register("ecg_leads_8lead", ecg::decompress_ecg_leads_8lead);
}

// The registry stores bare `fn` pointers, so codecs with a parameter (the DPCM predictor, the
// Rice divisor, the wavelet data type) get a thin wrapper fixing that parameter to the tag's
// documented default.

fn dpcm_previous(data: &[u8]) -> probe_core::error::Result<Vec<u8>> {
    dpcm::decompress_dpcm(data, Predictor::Previous)
}

fn dpcm_average(data: &[u8]) -> probe_core::error::Result<Vec<u8>> {
    dpcm::decompress_dpcm(data, Predictor::Average)
}

fn dpcm_linear(data: &[u8]) -> probe_core::error::Result<Vec<u8>> {
    dpcm::decompress_dpcm(data, Predictor::Linear)
}

fn rice_default(data: &[u8]) -> probe_core::error::Result<Vec<u8>> {
    rice::decompress_rice(data, 4)
}

fn wavelet_haar_int16(data: &[u8]) -> probe_core::error::Result<Vec<u8>> {
    // Forces the data_type byte to 2 (i16-LE) before delegating to the general decoder.
    if data.len() < 6 {
        return probe_core::error::too_short("wavelet header requires 6 bytes");
    }
    let mut forced = data.to_vec();
    forced[5] = 2;
    wavelet::decompress_wavelet_haar(&forced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_all_preserves_the_documented_order() {
        let mut registry = CodecRegistry::new();
        register_all(&mut registry);

        let tags: Vec<&str> = registry.iter().map(|d| d.tag).collect();
        let rle_pos = tags.iter().position(|&t| t == "rle").unwrap();
        let huffman_pos = tags.iter().position(|&t| t == "huffman").unwrap();
        let ecg_pos = tags.iter().position(|&t| t == "ecg_leads").unwrap();

        assert!(rle_pos < huffman_pos);
        assert!(huffman_pos < ecg_pos);
    }

    #[test]
    fn every_registered_tag_is_unique() {
        let mut registry = CodecRegistry::new();
        register_all(&mut registry);

        let tags: Vec<&str> = registry.iter().map(|d| d.tag).collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(tags.len(), sorted.len());
    }
}
