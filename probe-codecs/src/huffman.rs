// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The three Huffman header layouts (standard, canonical, simple) plus a combined entry point
//! that tries all three in order.

use probe_core::bits::BitReader;
use probe_core::error::{too_short, Result};
use probe_core::huffman::{decode_symbols, generate_canonical_codes, Code, HuffmanTable};

const STANDARD_MIN_LEN: usize = 16;
const CANONICAL_MIN_LEN: usize = 2;
const SIMPLE_MIN_LEN: usize = 512;

/// Byte 0 is the table size `T` (0 means `min(256, |data|-1)`); bytes `1..=T` are a code-length
/// vector, right-padded with zeros to 256; the remainder is the bitstream.
pub fn decompress_huffman_standard(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < STANDARD_MIN_LEN {
        return too_short("Huffman standard header requires at least 16 bytes");
    }

    let declared = data[0] as usize;
    let table_size = if declared == 0 { (data.len() - 1).min(256) } else { declared };

    if 1 + table_size > data.len() {
        return too_short("Huffman standard length vector runs past input");
    }

    let mut lengths = [0u8; 256];
    lengths[..table_size].copy_from_slice(&data[1..1 + table_size]);

    let table = generate_canonical_codes(&lengths);
    let mut reader = BitReader::new(&data[1 + table_size..]);
    Ok(decode_symbols(&mut reader, &table))
}

/// Identical layout and semantics to the standard variant.
pub fn decompress_huffman_canonical(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < CANONICAL_MIN_LEN {
        return too_short("Huffman canonical header requires at least 2 bytes");
    }
    decompress_huffman_standard(data)
}

/// A variable-length table: for each symbol 0..255, one length byte `l`; if `l == 0` or `l > 24`
/// the symbol has no code, else `ceil(l/8)` bytes follow, big-endian, as the code value directly
/// (no canonicalization).
pub fn decompress_huffman_simple(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < SIMPLE_MIN_LEN {
        return too_short("Huffman simple header requires at least 512 bytes");
    }

    let mut pos = 0;
    let mut codes: Vec<(u8, Code)> = Vec::new();

    for symbol in 0..=255u16 {
        if pos >= data.len() {
            return too_short("Huffman simple header runs past input");
        }

        let length = data[pos];
        pos += 1;

        if length == 0 || length > 24 {
            continue;
        }

        let byte_count = ((length as usize) + 7) / 8;
        if pos + byte_count > data.len() {
            return too_short("Huffman simple code value runs past input");
        }

        let mut value: u32 = 0;
        for &b in &data[pos..pos + byte_count] {
            value = (value << 8) | u32::from(b);
        }
        pos += byte_count;

        codes.push((symbol as u8, Code { value, length }));
    }

    let table = HuffmanTable::from_explicit_codes(codes);
    let mut reader = BitReader::new(&data[pos..]);
    Ok(decode_symbols(&mut reader, &table))
}

/// Tries canonical, then standard, then simple, returning the first layout that produces
/// non-empty output.
pub fn decompress_huffman(data: &[u8]) -> Result<Vec<u8>> {
    if let Ok(out) = decompress_huffman_canonical(data) {
        if !out.is_empty() {
            return Ok(out);
        }
    }
    if let Ok(out) = decompress_huffman_standard(data) {
        if !out.is_empty() {
            return Ok(out);
        }
    }
    decompress_huffman_simple(data)
}
