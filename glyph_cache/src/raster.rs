// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph rasterization and bitmap repacking.

use log::trace;

use crate::face::native_to_pixels;
use crate::{Error, Glyph, GlyphSlot, LoadFlags, PixelMode, RasterFace};

/// A tightly packed, row-major grid of 8-bit coverage values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap from packed rows.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (width.checked_mul(height)? == data.len()).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Number of coverage values in each row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All coverage values, row after row.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns true if the bitmap contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns row `y`, counted from the top.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| &self.data[y * self.width..(y + 1) * self.width])
    }

    /// Returns the coverage at column `x` of row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x])
    }

    /// Repacks a rasterizer buffer into `rows × width` coverage values,
    /// dropping the padding at the end of each row.
    ///
    /// Returns `None` if the buffer is too short for the advertised layout.
    pub(crate) fn from_slot(slot: &GlyphSlot) -> Option<Self> {
        let width = slot.width as usize;
        let height = slot.rows as usize;
        if height == 0 {
            return Some(Self {
                width,
                height: 0,
                data: Vec::new(),
            });
        }
        let stride = slot.pitch.unsigned_abs() as usize;
        let row_bytes = match slot.pixel_mode {
            PixelMode::Gray => width,
            PixelMode::Mono => width.div_ceil(8),
            PixelMode::Bgra => width.checked_mul(4)?,
        };
        if stride < row_bytes || slot.buffer.len() < height.checked_mul(stride)? {
            return None;
        }
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            let source_row = if slot.pitch < 0 { height - 1 - y } else { y };
            let row = &slot.buffer[source_row * stride..][..row_bytes];
            match slot.pixel_mode {
                PixelMode::Gray => data.extend_from_slice(row),
                PixelMode::Mono => data.extend((0..width).map(|x| {
                    if row[x >> 3] & (0x80 >> (x & 7)) != 0 {
                        u8::MAX
                    } else {
                        0
                    }
                })),
                PixelMode::Bgra => data.extend(row.chunks_exact(4).map(|pixel| pixel[3])),
            }
        }
        Some(Self {
            width,
            height,
            data,
        })
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Rasterizes `ch` with `face` at `char_size` native units.
///
/// The returned glyph carries its bitmap, offset and advance; its kerning
/// table is empty until it is inserted into a
/// [`GlyphDictionary`](crate::GlyphDictionary).
pub fn rasterize(face: &mut dyn RasterFace, ch: char, char_size: i64) -> Result<Glyph, Error> {
    // Faces can be shared between requests, so the size is set on every load.
    face.set_char_size(char_size);
    let flags = LoadFlags::RENDER | LoadFlags::NO_HINTING | LoadFlags::NO_AUTOHINT;
    let slot = face.load_glyph(ch, flags).ok_or(Error::GlyphLoad { ch })?;
    let bitmap = Bitmap::from_slot(&slot).ok_or(Error::GlyphLoad { ch })?;
    trace!(
        "rasterized {ch:?}: {}x{} at ({}, {})",
        bitmap.width(),
        bitmap.height(),
        slot.left,
        slot.top
    );
    Ok(Glyph::new(
        ch,
        bitmap,
        (slot.left, slot.top),
        native_to_pixels(slot.advance_x),
    ))
}
