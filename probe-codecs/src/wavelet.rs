// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Haar wavelet reconstruction over a coefficient grid described by a small header.
//!
//! The level ordering here (coarsest step first, `step = 2^level` descending as `level` counts
//! up from 0) is kept as documented rather than reordered to a conventional inverse DWT
//! sequence; see the worked test vectors below.

use probe_core::error::{malformed, too_short, Result};

const HEADER_LEN: usize = 6;
const SQRT_2: f64 = std::f64::consts::SQRT_2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DataType {
    U8,
    I16,
    F32,
}

impl DataType {
    fn from_byte(b: u8) -> Result<Self> {
        match b {
            1 => Ok(DataType::U8),
            2 => Ok(DataType::I16),
            4 => Ok(DataType::F32),
            _ => malformed("wavelet header has an unrecognized data_type"),
        }
    }

    fn byte_width(self) -> usize {
        match self {
            DataType::U8 => 1,
            DataType::I16 => 2,
            DataType::F32 => 4,
        }
    }
}

pub fn decompress_wavelet_haar(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < HEADER_LEN {
        return too_short("wavelet header requires 6 bytes");
    }

    let height = u16::from_le_bytes([data[0], data[1]]) as usize;
    let width = u16::from_le_bytes([data[2], data[3]]) as usize;
    let levels = data[4];
    let data_type = DataType::from_byte(data[5])?;

    if !(1..=5).contains(&levels) {
        return malformed("wavelet levels must be between 1 and 5");
    }

    let coeff_count = height * width;
    let payload = &data[HEADER_LEN..];
    let needed = coeff_count * data_type.byte_width();
    if payload.len() < needed {
        return too_short("wavelet payload shorter than height*width coefficients");
    }

    let mut grid = parse_coefficients(payload, coeff_count, data_type);
    inverse_haar_transform_2d(&mut grid, height, width, levels);

    Ok(flatten_result(&grid, data_type))
}

fn parse_coefficients(payload: &[u8], count: usize, data_type: DataType) -> Vec<f64> {
    let width = data_type.byte_width();
    (0..count)
        .map(|i| {
            let chunk = &payload[i * width..i * width + width];
            match data_type {
                DataType::U8 => chunk[0] as f64,
                DataType::I16 => i16::from_le_bytes([chunk[0], chunk[1]]) as f64,
                DataType::F32 => f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64,
            }
        })
        .collect()
}

/// `levels` passes of inverse Haar over a row-major `height x width` grid. For level `l`,
/// `step = 2^l`; pairs `(j, j + step/2)` along a row are combined `a' = floor((a+d)/sqrt2)`,
/// `d' = floor((a-d)/sqrt2)`, then the same pairwise combination runs along columns.
fn inverse_haar_transform_2d(grid: &mut [f64], height: usize, width: usize, levels: u8) {
    for level in 0..levels {
        let step = 1usize << level;
        let half = step / 2;

        // Row pass: only rows at multiples of `step` participate, and within such a row only
        // column pairs `(j, j + half)` at multiples of `step` are combined.
        let mut i = 0;
        while i < height {
            let mut j = 0;
            while j < width {
                if j + half < width {
                    let base = i * width;
                    let a = grid[base + j];
                    let d = grid[base + j + half];
                    grid[base + j] = ((a + d) / SQRT_2).floor();
                    grid[base + j + half] = ((a - d) / SQRT_2).floor();
                }
                j += step;
            }
            i += step;
        }

        // Column pass, same subsampling, along columns instead of rows.
        let mut j = 0;
        while j < width {
            let mut i = 0;
            while i < height {
                if i + half < height {
                    let a = grid[i * width + j];
                    let d = grid[(i + half) * width + j];
                    grid[i * width + j] = ((a + d) / SQRT_2).floor();
                    grid[(i + half) * width + j] = ((a - d) / SQRT_2).floor();
                }
                i += step;
            }
            j += step;
        }
    }
}

fn flatten_result(grid: &[f64], data_type: DataType) -> Vec<u8> {
    let mut out = Vec::with_capacity(grid.len() * data_type.byte_width());
    for &value in grid {
        match data_type {
            DataType::U8 => out.push(value.clamp(0.0, 255.0) as u8),
            DataType::I16 => out.extend_from_slice(&(value.clamp(-32768.0, 32767.0) as i16).to_le_bytes()),
            DataType::F32 => out.extend_from_slice(&(value as f32).to_le_bytes()),
        }
    }
    out
}
