// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Differential Pulse Code Modulation decoding with three predictors.

use probe_core::error::{too_short, Result};

/// Which prior-sample combination predicts the next value before the delta is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Predictor {
    Previous,
    Average,
    Linear,
}

/// Decodes a DPCM stream: the first byte is an unmodified seed, and each following byte is a
/// delta applied on top of `predictor`'s estimate of the next sample. Every result is clamped to
/// `[0, 255]`.
pub fn decompress_dpcm(data: &[u8], predictor: Predictor) -> Result<Vec<u8>> {
    if data.is_empty() {
        return too_short("DPCM input is empty");
    }

    let mut out: Vec<i32> = Vec::with_capacity(data.len());
    out.push(data[0] as i32);

    for (i, &delta_byte) in data.iter().enumerate().skip(1) {
        let delta = delta_byte as i32;
        let predicted = match predictor {
            Predictor::Previous => out[i - 1],
            Predictor::Average => {
                if i < 2 {
                    out[i - 1]
                } else {
                    (out[i - 1] + out[i - 2]) / 2
                }
            }
            Predictor::Linear => {
                if i < 2 {
                    out[i - 1]
                } else {
                    2 * out[i - 1] - out[i - 2]
                }
            }
        };

        out.push((predicted + delta).clamp(0, 255));
    }

    Ok(out.into_iter().map(|v| v as u8).collect())
}
