// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flagged LZ77 decoding: one flag byte followed by up to eight literal-or-reference tokens.

use log::trace;
use probe_core::error::Result;

/// Decodes a flagged LZ77 stream. A reference token with an invalid offset terminates decoding
/// at that frame rather than failing the whole stream.
pub fn decompress_lz77(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 0;

    'frames: while pos < data.len() {
        let flag = data[pos];
        pos += 1;

        for bit in 0..8 {
            if pos >= data.len() {
                break 'frames;
            }

            let is_literal = (flag >> (7 - bit)) & 1 == 1;

            if is_literal {
                out.push(data[pos]);
                pos += 1;
            } else {
                if pos + 3 > data.len() {
                    break 'frames;
                }

                let offset = (u16::from(data[pos]) << 8) | u16::from(data[pos + 1]);
                let len = data[pos + 2] as usize;
                pos += 3;

                let offset = offset as usize;
                if offset == 0 || offset > out.len() {
                    trace!("lz77: invalid reference offset {} at output length {}", offset, out.len());
                    break 'frames;
                }

                let start = out.len() - offset;
                for i in 0..len {
                    let byte = out[start + i];
                    out.push(byte);
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_literal_frame_copies_bytes_verbatim() {
        let out = decompress_lz77(&[0xFF, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H']).unwrap();
        assert_eq!(out, b"ABCDEFGH");
    }

    #[test]
    fn reference_token_copies_from_earlier_output() {
        let mut input = vec![0xFF, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H'];
        input.extend_from_slice(&[0x00, 0x00, 0x04, 0x04]);
        let out = decompress_lz77(&input).unwrap();
        assert_eq!(out, b"ABCDEFGHEFGH");
    }

    #[test]
    fn invalid_offset_terminates_without_erroring() {
        let input = vec![0x00, 0x00, 0x01, 0x01];
        let out = decompress_lz77(&input).unwrap();
        assert!(out.is_empty());
    }
}
