// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `probe-core` holds the data model, primitives, and scoring machinery shared by every codec in
//! the compression-probing engine: a bit-level reader, Shannon entropy, canonical Huffman table
//! construction, the plausibility validator and confidence scorer, the codec registry, and the
//! driver that ties them together into a [`Report`].
//!
//! Codec implementations live in a separate crate and depend on this one; `probe-core` itself
//! knows nothing about any specific compression format.

pub mod bits;
pub mod confidence;
pub mod driver;
pub mod entropy;
pub mod error;
pub mod huffman;
pub mod model;
pub mod registry;
pub mod validate;

pub use bits::BitReader;
pub use driver::{decode, probe, ProbeOptions};
pub use entropy::shannon_entropy;
pub use error::{DecodeError, Result};
pub use huffman::{generate_canonical_codes, Code, HuffmanTable};
pub use model::{LeadSet, Outcome, Report, STANDARD_LEAD_ORDER};
pub use registry::{CodecDescriptor, CodecRegistry, DecodeFn};
