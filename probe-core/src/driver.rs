// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The probe driver (C10): runs every registered codec against a blob, scores each outcome, and
//! aggregates the results into a [`Report`].
//!
//! Each decoder operates on an immutable `&[u8]` view of the blob and produces an independent,
//! owned output, so the driver may fan decoders out across threads; outcomes are still collected
//! into a registry-order-indexed slot so the report's order never depends on completion order.

use log::{debug, trace, warn};

use crate::confidence::{self, ScoreInputs};
use crate::entropy::shannon_entropy;
use crate::model::{Outcome, Report};
use crate::registry::{CodecDescriptor, CodecRegistry};
use crate::validate::validate_decompressed;

/// Options controlling a single [`probe`] run.
#[derive(Clone, Copy, Debug)]
pub struct ProbeOptions {
    /// Dispatch codecs across a thread per decoder instead of sequentially. Does not change the
    /// result, only how it's computed.
    pub parallel: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        ProbeOptions { parallel: true }
    }
}

/// Runs a single codec against `blob` and converts any failure into a failed [`Outcome`].
///
/// This is the library's `decode(tag, blob) -> outcome` surface: callers who only want one
/// codec's result (rather than a full probe) can look the descriptor up in a [`CodecRegistry`]
/// and call this directly.
pub fn decode(descriptor: &CodecDescriptor, blob: &[u8]) -> Outcome {
    let original_size = blob.len();
    let entropy_in = shannon_entropy(blob);

    trace!("probing codec '{}' against {} byte blob", descriptor.tag, original_size);

    match (descriptor.decode)(blob) {
        Ok(payload) => {
            let decompressed_size = payload.len();
            let ratio = if original_size > 0 { decompressed_size as f64 / original_size as f64 } else { 0.0 };
            let entropy_out = shannon_entropy(&payload);
            let (validation_ok, validation_msg) = validate_decompressed(&payload, original_size);

            let confidence = confidence::score(&ScoreInputs {
                ratio,
                entropy_in,
                entropy_out,
                validation_ok,
                decompressed_size,
            });

            if !validation_ok {
                debug!("codec '{}' decoded but failed validation: {}", descriptor.tag, validation_msg);
            }

            Outcome {
                method: descriptor.tag,
                success: true,
                original_size,
                decompressed_size,
                ratio,
                entropy_in,
                entropy_out,
                validation_ok,
                validation_msg,
                confidence,
                error: None,
                payload: Some(payload),
            }
        }
        Err(err) => {
            warn!("codec '{}' failed: {}", descriptor.tag, err);
            Outcome::failed(descriptor.tag, original_size, entropy_in, err.to_string())
        }
    }
}

/// Runs every codec in `registry` against `blob` and aggregates the results.
///
/// `input_id` is an opaque caller-supplied identifier (typically a file path) copied verbatim
/// into the report.
pub fn probe(registry: &CodecRegistry, blob: &[u8], input_id: String, opts: ProbeOptions) -> Report {
    let results = if opts.parallel && registry.len() > 1 {
        probe_parallel(registry, blob)
    } else {
        registry.iter().map(|descriptor| decode(descriptor, blob)).collect()
    };

    Report::from_outcomes(input_id, blob.len(), results)
}

fn probe_parallel(registry: &CodecRegistry, blob: &[u8]) -> Vec<Outcome> {
    let descriptors: Vec<&CodecDescriptor> = registry.iter().collect();
    let mut slots: Vec<Option<Outcome>> = (0..descriptors.len()).map(|_| None).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = descriptors
            .iter()
            .map(|descriptor| scope.spawn(move || decode(descriptor, blob)))
            .collect();

        for (slot, handle) in slots.iter_mut().zip(handles) {
            *slot = Some(handle.join().expect("codec decode thread panicked"));
        }
    });

    slots.into_iter().map(|o| o.expect("every slot is filled before threads::scope returns")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_fails(_: &[u8]) -> crate::error::Result<Vec<u8>> {
        crate::error::malformed("never succeeds")
    }

    fn passthrough(blob: &[u8]) -> crate::error::Result<Vec<u8>> {
        Ok(blob.to_vec())
    }

    #[test]
    fn report_length_always_equals_registry_length() {
        let mut registry = CodecRegistry::new();
        registry.register("fails", always_fails);
        registry.register("passthrough", passthrough);

        let report = probe(&registry, b"hello world", "test".to_string(), ProbeOptions { parallel: false });
        assert_eq!(report.total_tests, registry.len());
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].method, "fails");
        assert_eq!(report.results[1].method, "passthrough");
    }

    #[test]
    fn parallel_and_sequential_dispatch_agree_on_order_and_content() {
        let mut registry = CodecRegistry::new();
        registry.register("fails", always_fails);
        registry.register("passthrough", passthrough);

        let seq = probe(&registry, b"hello world", "x".to_string(), ProbeOptions { parallel: false });
        let par = probe(&registry, b"hello world", "x".to_string(), ProbeOptions { parallel: true });

        assert_eq!(seq.results.len(), par.results.len());
        for (s, p) in seq.results.iter().zip(par.results.iter()) {
            assert_eq!(s.method, p.method);
            assert_eq!(s.success, p.success);
            assert_eq!(s.decompressed_size, p.decompressed_size);
        }
    }

    #[test]
    fn failed_decoder_does_not_abort_the_run() {
        let mut registry = CodecRegistry::new();
        registry.register("fails", always_fails);

        let report = probe(&registry, b"data", "x".to_string(), ProbeOptions::default());
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.success_count, 0);
        assert!(report.results[0].error.is_some());
    }
}
