// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the error type shared by every decoder.
//!
//! A decoder never panics and never propagates an error past the registry driver: any
//! `DecodeError` it returns is converted into a failed [`crate::model::Outcome`] by
//! [`crate::driver::probe`]. The taxonomy exists so decoders can describe *why* they gave up
//! without resorting to ad hoc strings scattered through the codebase.

use thiserror::Error;

/// Reasons a decoder can give up on an input without that failure propagating further.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is shorter than the minimum a decoder's header or encoding requires.
    #[error("input too short: {0}")]
    TooShort(&'static str),

    /// A header field held a value the decoder does not accept (magic byte, size out of range,
    /// reserved value, etc).
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// A code, back-reference, or table entry referred to data that does not exist.
    #[error("invalid reference at byte {offset}: {reason}")]
    InvalidReference { offset: usize, reason: &'static str },

    /// The bitstream or byte stream ended before a complete symbol/value could be read.
    #[error("unexpected end of stream while {0}")]
    Truncated(&'static str),

    /// A parameter outside of the decoder's supported range was requested.
    #[error("unsupported parameter: {0}")]
    Unsupported(&'static str),

    /// The underlying platform codec (zlib, zstd, ...) rejected the input.
    #[error("{codec} rejected input: {message}")]
    Backend { codec: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Convenience constructor mirroring the `*_error` free functions decoders call at their
/// earliest bail-out point.
pub fn too_short<T>(reason: &'static str) -> Result<T> {
    Err(DecodeError::TooShort(reason))
}

pub fn malformed<T>(reason: &'static str) -> Result<T> {
    Err(DecodeError::MalformedHeader(reason))
}

pub fn truncated<T>(reason: &'static str) -> Result<T> {
    Err(DecodeError::Truncated(reason))
}

pub fn unsupported<T>(reason: &'static str) -> Result<T> {
    Err(DecodeError::Unsupported(reason))
}
