// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry for codecs to support lookup and iteration over all registered decoders.
//!
//! The registry is an ordered, process-wide list of codec descriptors. Registration order is
//! report order (C10): a [`crate::driver::probe`] run always produces exactly `registry.len()`
//! outcomes, in the order the codecs were registered, regardless of how the driver schedules the
//! actual decode work.

use crate::error::Result;

/// A decoder factory function: a pure function of an immutable blob to a decoded byte vector or
/// a [`crate::error::DecodeError`] describing why it gave up.
pub type DecodeFn = fn(&[u8]) -> Result<Vec<u8>>;

/// Registration details for a single codec.
#[derive(Copy, Clone)]
pub struct CodecDescriptor {
    /// The stable textual tag reported in outcomes (e.g. `"huffman_canonical"`).
    pub tag: &'static str,
    pub decode: DecodeFn,
}

/// An ordered, append-only collection of codec descriptors.
#[derive(Default)]
pub struct CodecRegistry {
    entries: Vec<CodecDescriptor>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        CodecRegistry { entries: Vec::new() }
    }

    /// Registers a codec under `tag`. If `tag` was already registered, the new entry is
    /// appended and the old one remains; callers should not register the same tag twice.
    pub fn register(&mut self, tag: &'static str, decode: DecodeFn) {
        self.entries.push(CodecDescriptor { tag, decode });
    }

    /// Looks up a codec's registration by tag, if present.
    pub fn get(&self, tag: &str) -> Option<&CodecDescriptor> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Iterates all registered codecs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CodecDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(blob: &[u8]) -> Result<Vec<u8>> {
        Ok(blob.to_vec())
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = CodecRegistry::new();
        registry.register("a", identity);
        registry.register("b", identity);
        registry.register("c", identity);

        let tags: Vec<&str> = registry.iter().map(|d| d.tag).collect();
        assert_eq!(tags, ["a", "b", "c"]);
    }

    #[test]
    fn get_finds_registered_tag() {
        let mut registry = CodecRegistry::new();
        registry.register("rle", identity);
        assert!(registry.get("rle").is_some());
        assert!(registry.get("missing").is_none());
    }
}
