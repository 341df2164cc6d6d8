// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `model` module defines the data shared across every stage of a probe: a single decode
//! [`Outcome`] and the aggregate [`Report`] produced by [`crate::driver::probe`].

#[cfg(feature = "serde")]
use serde::Serialize;

/// The standard 12-lead ECG ordering used by the lead reconstructor and by anything that
/// serializes a full lead set.
pub const STANDARD_LEAD_ORDER: [&str; 12] =
    ["I", "II", "III", "aVR", "aVL", "aVF", "V1", "V2", "V3", "V4", "V5", "V6"];

/// The result of a single decoder's attempt against a blob.
///
/// `payload` is never serialized: it exists so a caller that wants the recovered bytes (e.g. to
/// write them to `--output-dir`) can get at them, without forcing every consumer of a `Report` to
/// carry every candidate's decompressed bytes in memory.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Outcome {
    pub method: &'static str,
    pub success: bool,
    pub original_size: usize,
    pub decompressed_size: usize,
    #[cfg_attr(feature = "serde", serde(rename = "compression_ratio"))]
    pub ratio: f64,
    #[cfg_attr(feature = "serde", serde(rename = "entropy_original"))]
    pub entropy_in: f64,
    #[cfg_attr(feature = "serde", serde(rename = "entropy_decompressed"))]
    pub entropy_out: f64,
    #[cfg_attr(feature = "serde", serde(rename = "checksum_valid"))]
    pub validation_ok: bool,
    pub validation_msg: &'static str,
    pub confidence: f64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub payload: Option<Vec<u8>>,
}

impl Outcome {
    /// Builds the canonical failed outcome: zeroed metrics, no validation, no confidence, and the
    /// decoder's failure message preserved for the report.
    pub fn failed(method: &'static str, original_size: usize, entropy_in: f64, error: String) -> Self {
        Outcome {
            method,
            success: false,
            original_size,
            decompressed_size: 0,
            ratio: 0.0,
            entropy_in,
            entropy_out: 0.0,
            validation_ok: false,
            validation_msg: "Decompression failed",
            confidence: 0.0,
            error: Some(error),
            payload: None,
        }
    }
}

/// The full set of outcomes for a single input blob.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    #[cfg_attr(feature = "serde", serde(rename = "file_path"))]
    pub input_id: String,
    pub file_size: usize,
    pub total_tests: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub best_method: Option<&'static str>,
    pub best_ratio: f64,
    pub best_confidence: f64,
    pub results: Vec<Outcome>,
}

impl Report {
    /// Selects the best outcome: lexicographic max of `(confidence, ratio)` among outcomes with
    /// `success && validation_ok`, ties broken by earlier registry position (`max_by` keeps the
    /// first maximal element it sees when scanning left to right via `>` comparisons, so we scan
    /// and only replace on strict improvement).
    pub fn select_best(results: &[Outcome]) -> Option<&Outcome> {
        let mut best: Option<&Outcome> = None;

        for outcome in results {
            if !(outcome.success && outcome.validation_ok) {
                continue;
            }

            let candidate_key = (outcome.confidence, outcome.ratio);
            let improves = match best {
                None => true,
                Some(current) => candidate_key > (current.confidence, current.ratio),
            };

            if improves {
                best = Some(outcome);
            }
        }

        best
    }

    pub fn from_outcomes(input_id: String, file_size: usize, results: Vec<Outcome>) -> Self {
        let success_count = results.iter().filter(|o| o.success).count();
        let failed_count = results.len() - success_count;

        let (best_method, best_ratio, best_confidence) = match Self::select_best(&results) {
            Some(best) => (Some(best.method), best.ratio, best.confidence),
            None => (None, 0.0, 0.0),
        };

        Report {
            input_id,
            file_size,
            total_tests: results.len(),
            success_count,
            failed_count,
            best_method,
            best_ratio,
            best_confidence,
            results,
        }
    }
}

/// A decoded ECG lead set: 16-bit signed samples per standard lead name, all equal length.
#[derive(Debug, Clone, Default)]
pub struct LeadSet {
    leads: Vec<(&'static str, Vec<i16>)>,
}

impl LeadSet {
    pub fn new() -> Self {
        LeadSet::default()
    }

    pub fn insert(&mut self, name: &'static str, samples: Vec<i16>) {
        if let Some(entry) = self.leads.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = samples;
        } else {
            self.leads.push((name, samples));
        }
    }

    pub fn get(&self, name: &str) -> Option<&[i16]> {
        self.leads.iter().find(|(n, _)| *n == name).map(|(_, s)| s.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.leads.iter().any(|(n, _)| *n == name)
    }

    /// The sample count shared by every lead currently present, or 0 if none are present.
    pub fn sample_count(&self) -> usize {
        self.leads.first().map(|(_, s)| s.len()).unwrap_or(0)
    }

    /// Serializes all twelve standard leads, in [`STANDARD_LEAD_ORDER`], as little-endian i16
    /// samples. Leads that were never inserted are simply skipped.
    pub fn serialize_standard_order(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for &name in &STANDARD_LEAD_ORDER {
            if let Some(samples) = self.get(name) {
                for &sample in samples {
                    out.extend_from_slice(&sample.to_le_bytes());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_upholds_invariant() {
        let outcome = Outcome::failed("rle", 10, 3.2, "bad input".to_string());
        assert!(!outcome.success);
        assert_eq!(outcome.decompressed_size, 0);
        assert_eq!(outcome.confidence, 0.0);
        assert!(!outcome.validation_ok);
    }

    #[test]
    fn select_best_prefers_higher_confidence_then_ratio() {
        let low = Outcome {
            method: "a",
            success: true,
            original_size: 10,
            decompressed_size: 20,
            ratio: 5.0,
            entropy_in: 1.0,
            entropy_out: 1.0,
            validation_ok: true,
            validation_msg: "ok",
            confidence: 0.5,
            error: None,
            payload: None,
        };
        let high = Outcome { method: "b", confidence: 0.9, ratio: 1.0, ..low.clone() };

        let results = vec![low, high];
        let best = Report::select_best(&results).unwrap();
        assert_eq!(best.method, "b");
    }

    #[test]
    fn select_best_ignores_unsuccessful_or_invalid() {
        let invalid = Outcome {
            method: "x",
            success: true,
            original_size: 10,
            decompressed_size: 20,
            ratio: 5.0,
            entropy_in: 1.0,
            entropy_out: 1.0,
            validation_ok: false,
            validation_msg: "nope",
            confidence: 0.9,
            error: None,
            payload: None,
        };
        assert!(Report::select_best(&[invalid]).is_none());
    }

    #[test]
    fn lead_set_serializes_in_standard_order() {
        let mut leads = LeadSet::new();
        leads.insert("II", vec![1, 2]);
        leads.insert("I", vec![3, 4]);

        let bytes = leads.serialize_standard_order();
        // I comes before II in standard order.
        assert_eq!(bytes, [3, 0, 4, 0, 1, 0, 2, 0]);
    }
}
