// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the unit tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use hashbrown::HashMap;

use crate::{
    FontInstance, FontKey, GlyphSlot, KerningMode, LoadFlags, PixelMode, RasterFace, ResolvedFont,
};

/// Everything a [`ScriptedFace`] was asked to do.
#[derive(Debug, Default)]
pub(crate) struct FaceLog {
    pub(crate) char_sizes: Vec<i64>,
    pub(crate) loads: Vec<(char, LoadFlags)>,
    pub(crate) kerning_queries: Vec<(char, char)>,
}

/// A face that serves canned glyphs and kerning pairs.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFace {
    glyphs: HashMap<char, GlyphSlot>,
    kerning: HashMap<(char, char), i64>,
    log: Arc<Mutex<FaceLog>>,
}

impl ScriptedFace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn glyph(mut self, ch: char, slot: GlyphSlot) -> Self {
        self.glyphs.insert(ch, slot);
        self
    }

    pub(crate) fn kern(mut self, left: char, right: char, value: i64) -> Self {
        self.kerning.insert((left, right), value);
        self
    }

    pub(crate) fn log(&self) -> Arc<Mutex<FaceLog>> {
        Arc::clone(&self.log)
    }
}

impl RasterFace for ScriptedFace {
    fn set_char_size(&mut self, char_size: i64) {
        self.log.lock().unwrap().char_sizes.push(char_size);
    }

    fn load_glyph(&mut self, ch: char, flags: LoadFlags) -> Option<GlyphSlot> {
        self.log.lock().unwrap().loads.push((ch, flags));
        self.glyphs.get(&ch).cloned()
    }

    fn kerning(&self, left: char, right: char, _mode: KerningMode) -> i64 {
        self.log.lock().unwrap().kerning_queries.push((left, right));
        self.kerning.get(&(left, right)).copied().unwrap_or(0)
    }
}

/// A gray slot whose visible samples are `y * 16 + x` and whose padding is `0xEE`.
pub(crate) fn gray_slot(width: u32, rows: u32, pitch: i32, advance_x: i64) -> GlyphSlot {
    let stride = pitch.unsigned_abs() as usize;
    let mut buffer = vec![0xEE; stride * rows as usize];
    for y in 0..rows as usize {
        for x in 0..width as usize {
            buffer[y * stride + x] = (y * 16 + x) as u8;
        }
    }
    GlyphSlot {
        buffer,
        width,
        rows,
        pitch,
        pixel_mode: PixelMode::Gray,
        left: 0,
        top: rows as i32,
        advance_x,
    }
}

/// A 12 point instance over `face`.
pub(crate) fn instance(face: ScriptedFace) -> FontInstance {
    FontInstance::new(
        FontKey::new("Scripted", 12.0, false, false),
        ResolvedFont::new(PathBuf::from("/fonts/scripted.ttf"), 0),
        Box::new(face),
        KerningMode::GridFitted,
    )
}
