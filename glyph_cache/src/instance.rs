// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font instances and their kerned glyph dictionaries.

use core::fmt;
use std::sync::Mutex;

use hashbrown::HashMap;
use log::trace;

use crate::face::native_to_pixels;
use crate::util::lock;
use crate::{
    rasterize, Error, FontKey, Glyph, KerningMode, RasterFace, ResolvedFont,
    NATIVE_UNITS_PER_PIXEL,
};

/// The glyphs loaded for one font instance.
///
/// Every pair of distinct glyphs in the dictionary has kerning entries in both
/// directions. Each ordered pair is computed once, when the second glyph of the
/// pair is inserted, and never recomputed.
#[derive(Clone, Debug, Default)]
pub struct GlyphDictionary {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `glyph` and kerns it against every glyph already present.
    ///
    /// For each existing glyph `other`, `glyph.kerning[other]` receives the
    /// kerning of `(other, glyph)` and `other.kerning[glyph]` the kerning of
    /// `(glyph, other)`. Zero kerning is stored explicitly.
    ///
    /// Fails with [`Error::DuplicateGlyph`] and leaves the dictionary unchanged
    /// if the character is already present.
    pub fn insert_and_kern(
        &mut self,
        face: &dyn RasterFace,
        mode: KerningMode,
        mut glyph: Glyph,
    ) -> Result<(), Error> {
        let ch = glyph.ch();
        if self.glyphs.contains_key(&ch) {
            return Err(Error::DuplicateGlyph { ch });
        }
        for (&other_ch, other) in &mut self.glyphs {
            let before = native_to_pixels(face.kerning(other_ch, ch, mode));
            glyph.kerning.insert(other_ch, before);
            let after = native_to_pixels(face.kerning(ch, other_ch, mode));
            let previous = other.kerning.insert(ch, after);
            debug_assert!(previous.is_none(), "pair ({ch:?}, {other_ch:?}) kerned twice");
        }
        trace!("kerned {ch:?} against {} glyphs", self.glyphs.len());
        self.glyphs.insert(ch, glyph);
        Ok(())
    }

    /// Returns the glyph for `ch`, if loaded.
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Returns true if `ch` has been loaded.
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Number of loaded glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if no glyph has been loaded.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterates over the loaded glyphs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    /// Kerning for `right` directly following `left`, if both are loaded.
    pub fn kerning(&self, left: char, right: char) -> Option<f32> {
        self.glyphs.get(&right)?.kerning_after(left)
    }
}

struct InstanceState {
    face: Box<dyn RasterFace>,
    glyphs: GlyphDictionary,
}

/// A loaded font face at one size together with its glyph dictionary.
///
/// Glyph insertion is serialized per instance, so the kerning sweep always sees
/// a complete dictionary. Instances are shared through `Arc` and can be used
/// from several threads.
pub struct FontInstance {
    key: FontKey,
    source: ResolvedFont,
    char_size: i64,
    kerning_mode: KerningMode,
    state: Mutex<InstanceState>,
}

impl FontInstance {
    /// Wraps a loaded face, sizing it for `key`.
    pub fn new(
        key: FontKey,
        source: ResolvedFont,
        mut face: Box<dyn RasterFace>,
        kerning_mode: KerningMode,
    ) -> Self {
        let char_size = char_size_for(key.size());
        face.set_char_size(char_size);
        Self {
            key,
            source,
            char_size,
            kerning_mode,
            state: Mutex::new(InstanceState {
                face,
                glyphs: GlyphDictionary::new(),
            }),
        }
    }

    /// The key this instance was loaded for.
    pub fn key(&self) -> &FontKey {
        &self.key
    }

    /// The font file backing this instance.
    pub fn source(&self) -> &ResolvedFont {
        &self.source
    }

    /// The character size in native units.
    pub fn char_size(&self) -> i64 {
        self.char_size
    }

    /// How kerning values are rounded.
    pub fn kerning_mode(&self) -> KerningMode {
        self.kerning_mode
    }

    /// Returns the glyph for `ch`, rasterizing and kerning it first if it has
    /// not been loaded yet.
    pub fn glyph(&self, ch: char) -> Result<Glyph, Error> {
        let mut state = lock(&self.state);
        if let Some(glyph) = state.glyphs.get(ch) {
            return Ok(glyph.clone());
        }
        let InstanceState { face, glyphs } = &mut *state;
        let glyph = rasterize(&mut **face, ch, self.char_size)?;
        glyphs.insert_and_kern(&**face, self.kerning_mode, glyph)?;
        glyphs.get(ch).cloned().ok_or(Error::GlyphLoad { ch })
    }

    /// Loads every character of `text` that is not loaded yet, in order.
    ///
    /// Returns the number of newly loaded glyphs. Stops at the first character
    /// that cannot be rasterized; glyphs loaded before it stay loaded.
    pub fn load_text(&self, text: &str) -> Result<usize, Error> {
        let mut state = lock(&self.state);
        let InstanceState { face, glyphs } = &mut *state;
        let mut loaded = 0;
        for ch in text.chars() {
            if glyphs.contains(ch) {
                continue;
            }
            let glyph = rasterize(&mut **face, ch, self.char_size)?;
            glyphs.insert_and_kern(&**face, self.kerning_mode, glyph)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Rasterizes `ch` without touching the dictionary.
    pub fn rasterize(&self, ch: char) -> Result<Glyph, Error> {
        let mut state = lock(&self.state);
        rasterize(&mut *state.face, ch, self.char_size)
    }

    /// Inserts a glyph produced by [`FontInstance::rasterize`] and kerns it
    /// against the loaded glyphs.
    ///
    /// Fails with [`Error::DuplicateGlyph`] if the character is already loaded.
    pub fn insert_and_kern(&self, glyph: Glyph) -> Result<(), Error> {
        let mut state = lock(&self.state);
        let InstanceState { face, glyphs } = &mut *state;
        glyphs.insert_and_kern(&**face, self.kerning_mode, glyph)
    }

    /// Returns the loaded glyph for `ch` without rasterizing it.
    pub fn get(&self, ch: char) -> Option<Glyph> {
        lock(&self.state).glyphs.get(ch).cloned()
    }

    /// Returns true if `ch` has been loaded.
    pub fn contains(&self, ch: char) -> bool {
        lock(&self.state).glyphs.contains(ch)
    }

    /// Number of loaded glyphs.
    pub fn len(&self) -> usize {
        lock(&self.state).glyphs.len()
    }

    /// Returns true if no glyph has been loaded.
    pub fn is_empty(&self) -> bool {
        lock(&self.state).glyphs.is_empty()
    }

    /// The loaded characters in arbitrary order.
    pub fn chars(&self) -> Vec<char> {
        lock(&self.state).glyphs.iter().map(Glyph::ch).collect()
    }

    /// Kerning in pixels for `right` directly following `left`.
    ///
    /// Returns `None` unless both characters are loaded. The dictionary only
    /// relates distinct characters, so a character following itself is looked
    /// up on the face.
    pub fn kerning(&self, left: char, right: char) -> Option<f32> {
        let state = lock(&self.state);
        if left == right {
            return state
                .glyphs
                .contains(left)
                .then(|| native_to_pixels(state.face.kerning(left, right, self.kerning_mode)));
        }
        state.glyphs.kerning(left, right)
    }

    /// Runs `f` with the glyph dictionary locked.
    pub fn with_glyphs<R>(&self, f: impl FnOnce(&GlyphDictionary) -> R) -> R {
        f(&lock(&self.state).glyphs)
    }
}

impl fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontInstance")
            .field("key", &self.key)
            .field("source", &self.source)
            .field("char_size", &self.char_size)
            .field("kerning_mode", &self.kerning_mode)
            .finish_non_exhaustive()
    }
}

/// Converts a nominal size to native units.
#[expect(
    clippy::cast_possible_truncation,
    reason = "font sizes are orders of magnitude below i64::MAX / 64"
)]
fn char_size_for(size: f32) -> i64 {
    (f64::from(size) * NATIVE_UNITS_PER_PIXEL as f64).round() as i64
}
