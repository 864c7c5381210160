// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default rasterizer resource built on Swash and Skrifa.

use std::sync::Arc;

use linebender_resource_handle::Blob;
use log::{debug, warn};
use skrifa::instance::{LocationRef, Size};
use skrifa::raw::types::Tag;
use skrifa::MetadataProvider;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::CacheKey;

use crate::face::native_to_pixels;
use crate::kern::KernTable;
use crate::{
    Error, FaceLoader, GlyphSlot, KerningMode, LoadFlags, PixelMode, RasterFace, ResolvedFont,
    NATIVE_UNITS_PER_PIXEL,
};

/// Sources tried in order when rendering a glyph.
const SOURCES: &[Source] = &[Source::Outline, Source::Bitmap(StrikeWith::BestFit)];

/// Loads font files from disk into [`SwashFace`]s.
#[derive(Copy, Clone, Debug, Default)]
pub struct SwashLoader;

impl FaceLoader for SwashLoader {
    fn load(&self, font: &ResolvedFont) -> Result<Box<dyn RasterFace>, Error> {
        let bytes = std::fs::read(font.path()).map_err(|err| {
            warn!("could not read {}: {err}", font.path().display());
            Error::FontLoad {
                path: font.path().to_path_buf(),
                reason: err.to_string(),
            }
        })?;
        let face = SwashFace::new(Blob::new(Arc::new(bytes)), font.index()).ok_or_else(|| {
            warn!("{} #{} is not a usable font", font.path().display(), font.index());
            Error::FontLoad {
                path: font.path().to_path_buf(),
                reason: format!("face {} could not be parsed", font.index()),
            }
        })?;
        debug!(
            "loaded {} #{} ({} units per em)",
            font.path().display(),
            font.index(),
            face.units_per_em
        );
        Ok(Box::new(face))
    }
}

/// A font face that renders with Swash and reads metrics and kerning with
/// Skrifa.
///
/// Glyphs are rendered as 8-bit coverage masks; color bitmap strikes are
/// reduced to their alpha channel by the rasterizer. Kerning comes from the
/// `kern` table only.
pub struct SwashFace {
    data: Blob<u8>,
    index: u32,
    offset: u32,
    key: CacheKey,
    units_per_em: u16,
    kern: KernTable,
    context: ScaleContext,
    char_size: i64,
}

impl SwashFace {
    /// Creates a face for font `index` of `data`.
    ///
    /// Returns `None` if the data does not contain such a font.
    pub fn new(data: Blob<u8>, index: u32) -> Option<Self> {
        let swash_font = swash::FontRef::from_index(data.data(), usize::try_from(index).ok()?)?;
        let font = skrifa::FontRef::from_index(data.data(), index).ok()?;
        let units_per_em = font
            .metrics(Size::unscaled(), LocationRef::default())
            .units_per_em;
        let kern = font
            .table_data(Tag::new(b"kern"))
            .and_then(|table| KernTable::parse(table.as_bytes()))
            .unwrap_or_default();
        let (offset, key) = (swash_font.offset, swash_font.key);
        Some(Self {
            data,
            index,
            offset,
            key,
            units_per_em,
            kern,
            context: ScaleContext::new(),
            char_size: 0,
        })
    }

    /// Index of the face within its file.
    pub fn index(&self) -> u32 {
        self.index
    }

    fn font(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(self.data.data(), self.index).ok()
    }

    fn scale_font_units(&self, units: i32) -> i64 {
        if self.units_per_em == 0 {
            return 0;
        }
        round_to_native(
            f64::from(units) * self.char_size as f64 / f64::from(self.units_per_em),
        )
    }
}

impl RasterFace for SwashFace {
    fn set_char_size(&mut self, char_size: i64) {
        self.char_size = char_size;
    }

    fn load_glyph(&mut self, ch: char, flags: LoadFlags) -> Option<GlyphSlot> {
        let ppem = native_to_pixels(self.char_size);
        let (glyph_id, advance) = {
            let font = self.font()?;
            let glyph_id = font.charmap().map(ch)?;
            let advance = font
                .glyph_metrics(Size::new(ppem), LocationRef::default())
                .advance_width(glyph_id)
                .unwrap_or_default();
            (glyph_id, advance)
        };
        let mut slot = GlyphSlot {
            advance_x: round_to_native(f64::from(advance) * NATIVE_UNITS_PER_PIXEL as f64),
            ..GlyphSlot::default()
        };
        if !flags.contains(LoadFlags::RENDER) {
            return Some(slot);
        }

        let font = swash::FontRef {
            data: self.data.data(),
            offset: self.offset,
            key: self.key,
        };
        let mut scaler = self
            .context
            .builder(font)
            .size(ppem)
            .hint(!flags.contains(LoadFlags::NO_HINTING))
            .build();
        let swash_id = u16::try_from(glyph_id.to_u32()).ok()?;
        // Glyphs without contours, such as spaces, render nothing and keep an
        // empty bitmap.
        if let Some(image) = Render::new(SOURCES)
            .format(Format::Alpha)
            .render(&mut scaler, swash_id)
        {
            let (pixel_mode, bytes_per_pixel) = match image.content {
                Content::Mask => (PixelMode::Gray, 1),
                Content::SubpixelMask | Content::Color => (PixelMode::Bgra, 4),
            };
            slot.pitch = i32::try_from(image.placement.width.checked_mul(bytes_per_pixel)?).ok()?;
            slot.width = image.placement.width;
            slot.rows = image.placement.height;
            slot.left = image.placement.left;
            slot.top = image.placement.top;
            slot.pixel_mode = pixel_mode;
            slot.buffer = image.data;
        }
        Some(slot)
    }

    fn kerning(&self, left: char, right: char, mode: KerningMode) -> i64 {
        if self.kern.is_empty() {
            return 0;
        }
        let Some(font) = self.font() else {
            return 0;
        };
        let charmap = font.charmap();
        let (Some(left), Some(right)) = (charmap.map(left), charmap.map(right)) else {
            return 0;
        };
        let kerning = self.scale_font_units(self.kern.kerning(left, right));
        match mode {
            KerningMode::GridFitted => fit_kerning(kerning, self.char_size),
            KerningMode::Unfitted => kerning,
        }
    }
}

impl core::fmt::Debug for SwashFace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwashFace")
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("char_size", &self.char_size)
            .finish_non_exhaustive()
    }
}

/// Sizes below this many pixels per em get damped kerning.
const DAMPING_PPEM: i64 = 25;

/// Grid fits a scaled kerning value, damping it at small sizes.
fn fit_kerning(value: i64, char_size: i64) -> i64 {
    let ppem = (char_size + NATIVE_UNITS_PER_PIXEL / 2) / NATIVE_UNITS_PER_PIXEL;
    if (0..DAMPING_PPEM).contains(&ppem) {
        grid_fit(mul_div_round(value, ppem, DAMPING_PPEM))
    } else {
        grid_fit(value)
    }
}

/// Computes `value * num / den`, rounding the magnitude half up.
fn mul_div_round(value: i64, num: i64, den: i64) -> i64 {
    let magnitude = (value.abs() * num + den / 2) / den;
    if value < 0 { -magnitude } else { magnitude }
}

/// Rounds a native distance to the nearest whole pixel.
fn grid_fit(value: i64) -> i64 {
    (value + NATIVE_UNITS_PER_PIXEL / 2).div_euclid(NATIVE_UNITS_PER_PIXEL) * NATIVE_UNITS_PER_PIXEL
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "glyph metrics at any usable size fit comfortably in i64"
)]
fn round_to_native(value: f64) -> i64 {
    value.round() as i64
}
