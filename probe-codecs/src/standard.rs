// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapters over standard, platform-provided compression libraries. Each adapter is gated behind
//! a Cargo feature; when the feature is off the codec is simply never registered, not an error.

use probe_core::error::{DecodeError, Result};
use std::io::Read;

#[cfg(feature = "zlib")]
pub fn decompress_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    flate2::read::ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| backend_error("zlib", e))?;
    Ok(out)
}

#[cfg(feature = "gzip")]
pub fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    flate2::read::GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| backend_error("gzip", e))?;
    Ok(out)
}

#[cfg(feature = "deflate")]
pub fn decompress_deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    flate2::read::DeflateDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| backend_error("deflate", e))?;
    Ok(out)
}

#[cfg(feature = "bzip2-codec")]
pub fn decompress_bzip2(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    bzip2::read::BzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| backend_error("bzip2", e))?;
    Ok(out)
}

#[cfg(feature = "lzma")]
pub fn decompress_lzma(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    xz2::read::XzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| backend_error("lzma", e))?;
    Ok(out)
}

#[cfg(feature = "lz4")]
pub fn decompress_lz4(data: &[u8]) -> Result<Vec<u8>> {
    lz4_flex::decompress_size_prepended(data)
        .map_err(|e| DecodeError::Backend { codec: "lz4", message: e.to_string() })
}

#[cfg(feature = "zstd-codec")]
pub fn decompress_zstd(data: &[u8]) -> Result<Vec<u8>> {
    zstd::decode_all(data).map_err(|e| backend_error("zstd", e))
}

#[cfg(any(
    feature = "zlib",
    feature = "gzip",
    feature = "deflate",
    feature = "bzip2-codec",
    feature = "lzma",
    feature = "zstd-codec"
))]
fn backend_error(codec: &'static str, err: std::io::Error) -> DecodeError {
    DecodeError::Backend { codec, message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_round_trips_through_flate2_encoder() {
        use std::io::Write;
        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"hello compression probing").unwrap();
        let compressed = encoder.finish().unwrap();

        let out = decompress_zlib(&compressed).unwrap();
        assert_eq!(out, b"hello compression probing");
    }

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_rejects_garbage_input() {
        assert!(decompress_zlib(&[0xFF, 0x00, 0x11, 0x22]).is_err());
    }

    #[cfg(feature = "zstd-codec")]
    #[test]
    fn zstd_round_trips_through_encoder() {
        let compressed = zstd::encode_all(&b"zstd probing payload"[..], 0).unwrap();
        let out = decompress_zstd(&compressed).unwrap();
        assert_eq!(out, b"zstd probing payload");
    }
}
