// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The plausibility validator (C8): a heuristic test deciding whether a decode's output looks
//! like a real decompression rather than noise.

use crate::entropy::shannon_entropy;

/// Validates `decompressed` against the size of the original input it came from.
///
/// Returns `(is_valid, message)`. The checks run in a fixed order and the first one that fails
/// wins.
pub fn validate_decompressed(decompressed: &[u8], original_size: usize) -> (bool, &'static str) {
    if decompressed.is_empty() {
        return (false, "Empty output");
    }

    let ratio = if original_size > 0 { decompressed.len() as f64 / original_size as f64 } else { 0.0 };

    if ratio > 100.0 {
        return (false, "Suspicious expansion");
    }

    if ratio < 0.5 {
        return (false, "Suspicious compression");
    }

    if shannon_entropy(decompressed) < 1.0 {
        return (false, "Entropy too low");
    }

    let null_count = decompressed.iter().filter(|&&b| b == 0).count();
    let null_ratio = null_count as f64 / decompressed.len() as f64;
    if null_ratio > 0.95 {
        return (false, "Too many null bytes");
    }

    (true, "Validation passed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_output() {
        assert_eq!(validate_decompressed(&[], 10), (false, "Empty output"));
    }

    #[test]
    fn rejects_excessive_expansion() {
        let data: Vec<u8> = (0..=255u8).cycle().take(200).collect(); // varied bytes, high entropy
        assert_eq!(validate_decompressed(&data, 1).1, "Suspicious expansion");
    }

    #[test]
    fn zero_original_size_yields_zero_ratio_by_convention() {
        // original_size == 0 means ratio is 0 (not the expansion check), so a nonempty,
        // high-entropy, non-null output still fails on the "suspicious compression" branch.
        let data: Vec<u8> = (0..=255u8).cycle().take(200).collect();
        assert_eq!(validate_decompressed(&data, 0).1, "Suspicious compression");
    }

    #[test]
    fn rejects_excessive_compression() {
        let data: Vec<u8> = (0..10u8).collect();
        assert_eq!(validate_decompressed(&data, 100), (false, "Suspicious compression"));
    }

    #[test]
    fn rejects_low_entropy() {
        let data = vec![5u8; 1000];
        assert_eq!(validate_decompressed(&data, 1000), (false, "Entropy too low"));
    }

    #[test]
    fn rejects_null_dominated_output() {
        let mut data = vec![0u8; 1000];
        data[0] = 1;
        data[1] = 2;
        data[2] = 3;
        assert_eq!(validate_decompressed(&data, 1000), (false, "Too many null bytes"));
    }

    #[test]
    fn accepts_plausible_output() {
        let data: Vec<u8> = (0..=255u8).cycle().take(2000).collect();
        assert_eq!(validate_decompressed(&data, 1000), (true, "Validation passed"));
    }
}
