// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rice/Golomb decoding: a unary-prefix, fixed-width-remainder integer code.

use probe_core::bits::BitReader;
use probe_core::error::Result;

/// Unary runs longer than this are treated as a malformed stream and the run stops there,
/// bounding per-value work regardless of input.
const MAX_UNARY_RUN: u32 = 255;

/// Decodes a Rice/Golomb stream with parameter `m`, emitting each recovered value as a
/// little-endian u16.
pub fn decompress_rice(data: &[u8], m: u32) -> Result<Vec<u8>> {
    let k = bit_width_for_remainder(m);
    let mut reader = BitReader::new(data);
    let mut out = Vec::new();

    while reader.has_any_bits() {
        let mut unary = 0u32;
        while unary < MAX_UNARY_RUN && reader.has_any_bits() && reader.read_bit() == 1 {
            unary += 1;
        }

        let remainder = if k > 0 { reader.read_bits(k) as u32 } else { 0 };
        let value = unary * m + remainder;
        out.extend_from_slice(&(value as u16).to_le_bytes());
    }

    Ok(out)
}

/// `k = ceil(log2(m))`, the bit width of the binary remainder.
fn bit_width_for_remainder(m: u32) -> u32 {
    if m <= 1 {
        return 0;
    }
    32 - (m - 1).leading_zeros()
}
