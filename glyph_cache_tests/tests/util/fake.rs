// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rasterizer that draws predictable boxes.

use std::sync::{Arc, Mutex};

use glyph_cache::{
    GlyphSlot, KerningMode, LoadFlags, PixelMode, RasterFace, NATIVE_UNITS_PER_PIXEL,
};

/// Kerning pairs served by [`FakeFace`], in native units.
///
/// `(A, T)` rounds to zero when grid fitted.
pub(crate) const KERNING_PAIRS: &[(char, char, i64)] = &[
    ('A', 'V', -128),
    ('V', 'A', -96),
    ('T', 'A', -64),
    ('A', 'T', -16),
];

/// Width and height in pixels of the box drawn for `ch`.
///
/// Boxes grow with the character size so that instances of different sizes are
/// told apart by their bitmaps.
pub(crate) fn expected_size(ch: char, char_size: i64) -> (usize, usize) {
    let px = (char_size / NATIVE_UNITS_PER_PIXEL) as usize;
    (px / 2 + (ch as usize % 3), px)
}

/// A face covering the ASCII letters and the space.
///
/// Rows are padded to four bytes and stored bottom-up, the way some
/// rasterizers hand out bitmaps. Every visible sample is `0xFF`.
#[derive(Debug)]
pub(crate) struct FakeFace {
    char_size: i64,
    queries: Arc<Mutex<Vec<(char, char)>>>,
}

impl FakeFace {
    pub(crate) fn new(queries: Arc<Mutex<Vec<(char, char)>>>) -> Self {
        Self {
            char_size: 0,
            queries,
        }
    }
}

impl RasterFace for FakeFace {
    fn set_char_size(&mut self, char_size: i64) {
        self.char_size = char_size;
    }

    fn load_glyph(&mut self, ch: char, flags: LoadFlags) -> Option<GlyphSlot> {
        if !(ch.is_ascii_alphabetic() || ch == ' ') {
            return None;
        }
        let advance_x = self.char_size * 3 / 5;
        if ch == ' ' || !flags.contains(LoadFlags::RENDER) {
            return Some(GlyphSlot {
                advance_x,
                ..GlyphSlot::default()
            });
        }
        let (width, rows) = expected_size(ch, self.char_size);
        let stride = width.div_ceil(4) * 4;
        let mut buffer = vec![0; stride * rows];
        for row in buffer.chunks_mut(stride) {
            row[..width].fill(0xFF);
        }
        Some(GlyphSlot {
            buffer,
            width: width as u32,
            rows: rows as u32,
            pitch: -(stride as i32),
            pixel_mode: PixelMode::Gray,
            left: 1,
            top: rows as i32,
            advance_x,
        })
    }

    fn kerning(&self, left: char, right: char, mode: KerningMode) -> i64 {
        self.queries.lock().unwrap().push((left, right));
        let value = KERNING_PAIRS
            .iter()
            .find(|&&(l, r, _)| l == left && r == right)
            .map_or(0, |&(_, _, value)| value);
        match mode {
            KerningMode::GridFitted => {
                (value + NATIVE_UNITS_PER_PIXEL / 2).div_euclid(NATIVE_UNITS_PER_PIXEL)
                    * NATIVE_UNITS_PER_PIXEL
            }
            KerningMode::Unfitted => value,
        }
    }
}
