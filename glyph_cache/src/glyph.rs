// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use crate::Bitmap;

/// One rasterized code point of a font instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    ch: char,
    bitmap: Bitmap,
    offset: (i32, i32),
    advance: f32,
    pub(crate) kerning: HashMap<char, f32>,
}

impl Glyph {
    /// Creates a glyph with an empty kerning table.
    pub fn new(ch: char, bitmap: Bitmap, offset: (i32, i32), advance: f32) -> Self {
        Self {
            ch,
            bitmap,
            offset,
            advance,
            kerning: HashMap::new(),
        }
    }

    /// The code point this glyph represents.
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Coverage values, exactly `height × width`.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// `(left, top)` position of the bitmap origin relative to the pen, in
    /// pixels. `top` grows upwards from the baseline.
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Horizontal pen advance in pixels, before kerning.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Kerning against the other glyphs of the same font instance, in pixels.
    ///
    /// The entry for `other` is the adjustment applied when this glyph directly
    /// follows `other`.
    pub fn kerning(&self) -> &HashMap<char, f32> {
        &self.kerning
    }

    /// Returns the adjustment for this glyph following `previous`, if known.
    pub fn kerning_after(&self, previous: char) -> Option<f32> {
        self.kerning.get(&previous).copied()
    }
}
