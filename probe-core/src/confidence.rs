// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The confidence scorer (C9): a weighted heuristic combining ratio, entropy drop, validation,
//! and output size into a single `[0, 1]` score.
//!
//! The weights encode the analyst's prior that a correct decompression (i) expands moderately,
//! (ii) drops entropy noticeably, (iii) looks structured, and (iv) produces a sensibly sized
//! artifact. Each factor is scored independently and summed, then clamped.

/// The inputs a confidence score is derived from. Kept separate from [`crate::model::Outcome`]
/// so the scorer has no dependency on how an outcome is assembled.
pub struct ScoreInputs {
    pub ratio: f64,
    pub entropy_in: f64,
    pub entropy_out: f64,
    pub validation_ok: bool,
    pub decompressed_size: usize,
}

pub fn score(inputs: &ScoreInputs) -> f64 {
    let mut score = 0.0;

    if (1.5..=10.0).contains(&inputs.ratio) {
        score += 0.30;
    } else if (1.2..=15.0).contains(&inputs.ratio) {
        score += 0.15;
    }

    let entropy_drop = inputs.entropy_in - inputs.entropy_out;
    if entropy_drop > 1.0 {
        score += 0.30;
    } else if entropy_drop > 0.5 {
        score += 0.15;
    }

    if inputs.validation_ok {
        score += 0.20;
    }

    if (1000..=100_000_000).contains(&inputs.decompressed_size) {
        score += 0.20;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_candidate_scores_near_one() {
        let inputs = ScoreInputs {
            ratio: 3.0,
            entropy_in: 7.9,
            entropy_out: 4.0,
            validation_ok: true,
            decompressed_size: 5000,
        };
        assert_eq!(score(&inputs), 1.0);
    }

    #[test]
    fn weak_candidate_scores_zero() {
        let inputs = ScoreInputs {
            ratio: 50.0,
            entropy_in: 5.0,
            entropy_out: 5.0,
            validation_ok: false,
            decompressed_size: 10,
        };
        assert_eq!(score(&inputs), 0.0);
    }

    #[test]
    fn score_is_always_clamped() {
        let inputs = ScoreInputs {
            ratio: 2.0,
            entropy_in: 8.0,
            entropy_out: 0.0,
            validation_ok: true,
            decompressed_size: 50_000,
        };
        let s = score(&inputs);
        assert!((0.0..=1.0).contains(&s));
    }
}
