// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rasterizer resource consumed by the cache.

use core::ops::BitOr;

use crate::{Error, ResolvedFont};

/// Native sub-pixel units per pixel (26.6 fixed point).
///
/// Character sizes, advances and kerning values cross the [`RasterFace`]
/// boundary in these units.
pub const NATIVE_UNITS_PER_PIXEL: i64 = 64;

/// Flags controlling how [`RasterFace::load_glyph`] produces a glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadFlags(u8);

impl LoadFlags {
    /// Load the outline only.
    pub const DEFAULT: Self = Self(0);
    /// Render the loaded glyph into a bitmap.
    pub const RENDER: Self = Self(1 << 0);
    /// Do not apply the font's hinting instructions.
    pub const NO_HINTING: Self = Self(1 << 1);
    /// Do not fall back to the automatic hinter.
    pub const NO_AUTOHINT: Self = Self(1 << 2);

    /// Returns true if every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LoadFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// How kerning values are adjusted before they are reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KerningMode {
    /// Scaled kerning rounded to whole pixels.
    ///
    /// Below 25 pixels per em the value is first reduced in proportion to the
    /// size, so small text is kerned less than a plain rounding would give.
    #[default]
    GridFitted,
    /// Scaled kerning with sub-pixel precision.
    Unfitted,
}

/// Sample layout of a [`GlyphSlot`] buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// One byte of coverage per pixel.
    #[default]
    Gray,
    /// One bit per pixel, most significant bit first.
    Mono,
    /// Four bytes per pixel in blue, green, red, alpha order.
    Bgra,
}

/// A rendered glyph as the rasterizer hands it over.
///
/// Each row of `buffer` occupies `pitch.abs()` bytes, of which only the first
/// `width` pixels are meaningful. A negative pitch means the rows are stored
/// bottom-up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphSlot {
    /// Raw sample data, `rows * pitch.abs()` bytes.
    pub buffer: Vec<u8>,
    /// Width of the glyph in pixels.
    pub width: u32,
    /// Number of pixel rows.
    pub rows: u32,
    /// Bytes from the start of one row to the next.
    pub pitch: i32,
    /// Sample layout of `buffer`.
    pub pixel_mode: PixelMode,
    /// Horizontal distance from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Vertical distance from the baseline to the top row of the bitmap.
    pub top: i32,
    /// Horizontal advance in native units.
    pub advance_x: i64,
}

/// A loaded font face that can render glyphs and report kerning.
///
/// This is the native rasterizer resource owned by a
/// [`FontInstance`](crate::FontInstance). All sizes and distances are in
/// native units, see [`NATIVE_UNITS_PER_PIXEL`].
pub trait RasterFace: Send + core::fmt::Debug {
    /// Sets the nominal character size used by subsequent loads and kerning
    /// queries.
    fn set_char_size(&mut self, char_size: i64);

    /// Loads the glyph mapped to `ch`.
    ///
    /// Returns `None` if the face has no glyph for the code point.
    fn load_glyph(&mut self, ch: char, flags: LoadFlags) -> Option<GlyphSlot>;

    /// Returns the horizontal kerning to apply between `left` and `right` when
    /// `right` directly follows `left`.
    ///
    /// Pairs without kerning report zero.
    fn kerning(&self, left: char, right: char, mode: KerningMode) -> i64;
}

/// Constructs faces from resolved font files.
pub trait FaceLoader: Send + Sync {
    /// Loads the face described by `font`.
    fn load(&self, font: &ResolvedFont) -> Result<Box<dyn RasterFace>, Error>;
}

impl<F> FaceLoader for F
where
    F: Fn(&ResolvedFont) -> Result<Box<dyn RasterFace>, Error> + Send + Sync,
{
    fn load(&self, font: &ResolvedFont) -> Result<Box<dyn RasterFace>, Error> {
        self(font)
    }
}

/// Converts a distance in native units to pixels.
pub(crate) fn native_to_pixels(value: i64) -> f32 {
    value as f32 / NATIVE_UNITS_PER_PIXEL as f32
}
