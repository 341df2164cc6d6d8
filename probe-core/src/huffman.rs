// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical Huffman code generation and the symbol-matching decode loop shared by every
//! Huffman variant in `probe-codecs`.
//!
//! A [`HuffmanTable`] maps each of the 256 possible symbols to an optional `(code, length)`.
//! Symbols with no code (length 0) are simply absent from the stream. The decode loop in
//! [`decode_symbols`] is intentionally a naive one: for every symbol
//! position it peeks the longest code length present and compares against every table entry in
//! ascending symbol order. A canonical table never has two codes share a peeked value at the
//! same length, so the iteration order only matters for tie-breaking codes of different lengths
//! that happen to share a bit pattern, which a valid (Kraft-sum <= 1) table does not produce.

use crate::bits::BitReader;

/// A single symbol's Huffman code: its bit pattern and bit length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Code {
    pub value: u32,
    pub length: u8,
}

/// A mapping from symbol (0..=255) to its optional Huffman code.
#[derive(Clone)]
pub struct HuffmanTable {
    entries: [Option<Code>; 256],
}

impl HuffmanTable {
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.entries[symbol as usize]
    }

    /// Iterates over `(symbol, code)` pairs that have an assigned code, in ascending symbol
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Builds a table directly from pre-computed `(symbol, code, length)` triples, used by
    /// decoders (like the "simple" Huffman variant) that store codes explicitly rather than
    /// deriving them canonically.
    pub fn from_explicit_codes(codes: impl IntoIterator<Item = (u8, Code)>) -> Self {
        let mut entries = [None; 256];
        for (symbol, code) in codes {
            entries[symbol as usize] = Some(code);
        }
        HuffmanTable { entries }
    }
}

/// Generates canonical Huffman codes from a length vector.
///
/// `lengths[symbol] == 0` means the symbol is absent. Present symbols are grouped by
/// `(length, symbol)` ascending; the running code starts at 0, increments by one per symbol
/// within a length group, and is shifted left by the *full* gap between consecutive present
/// lengths when the length group changes, not by a single bit regardless of gap size.
pub fn generate_canonical_codes(lengths: &[u8; 256]) -> HuffmanTable {
    let mut present: Vec<(u8, u8)> =
        lengths.iter().enumerate().filter(|&(_, &len)| len > 0).map(|(s, &len)| (len, s as u8)).collect();

    present.sort_unstable();

    let mut entries = [None; 256];
    let mut code: u32 = 0;
    let mut prev_length: Option<u8> = None;

    for (length, symbol) in present {
        if let Some(prev) = prev_length {
            code <<= u32::from(length - prev);
        }

        entries[symbol as usize] = Some(Code { value: code, length });
        code += 1;
        prev_length = Some(length);
    }

    HuffmanTable { entries }
}

/// Decodes a byte stream from `reader` using `table`'s symbol-matching loop.
///
/// Stops and returns what has been decoded so far as soon as no table entry's code matches the
/// bits remaining (including simply running out of bits).
pub fn decode_symbols(reader: &mut BitReader<'_>, table: &HuffmanTable) -> Vec<u8> {
    let mut out = Vec::new();

    while reader.has_any_bits() {
        let mut matched = false;

        for (symbol, code) in table.iter() {
            if code.length == 0 {
                continue;
            }
            // `peek_bits`/`read_bits` return 0 for bits past the end of the stream rather than
            // erroring, so a code can still match against this zero-padded tail.
            if reader.peek_bits(u32::from(code.length)) as u32 == code.value {
                reader.read_bits(u32::from(code.length));
                out.push(symbol);
                matched = true;
                break;
            }
        }

        if !matched {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_codes_are_prefix_free() {
        // Three symbols of length 2, one of length 1 (Kraft sum = 3/4 + 1/2 = 1.25... use a
        // valid Kraft-exact example instead: lengths 1,2,3,3).
        let mut lengths = [0u8; 256];
        lengths[0] = 1;
        lengths[1] = 2;
        lengths[2] = 3;
        lengths[3] = 3;

        let table = generate_canonical_codes(&lengths);

        let codes: Vec<Code> = table.iter().map(|(_, c)| c).collect();
        for i in 0..codes.len() {
            for j in 0..codes.len() {
                if i == j {
                    continue;
                }
                let (a, b) = (codes[i], codes[j]);
                let min_len = a.length.min(b.length);
                let a_prefix = a.value >> (a.length - min_len);
                let b_prefix = b.value >> (b.length - min_len);
                assert_ne!(a_prefix, b_prefix, "codes {:?} and {:?} share a prefix", a, b);
            }
        }
    }

    #[test]
    fn canonical_assignment_matches_worked_example() {
        // symbol 0: length 2, symbol 1: length 1, symbol 2: length 3, symbol 3: length 3.
        let mut lengths = [0u8; 256];
        lengths[1] = 1;
        lengths[0] = 2;
        lengths[2] = 3;
        lengths[3] = 3;

        let table = generate_canonical_codes(&lengths);

        assert_eq!(table.get(1), Some(Code { value: 0, length: 1 }));
        assert_eq!(table.get(0), Some(Code { value: 2, length: 2 }));
        assert_eq!(table.get(2), Some(Code { value: 6, length: 3 }));
        assert_eq!(table.get(3), Some(Code { value: 7, length: 3 }));
    }
}
