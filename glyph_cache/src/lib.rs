// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Cache rasterizes single code points and keeps a complete table of
//! pairwise kerning adjustments among every glyph loaded for a font instance.
//!
//! The entry point is [`FontCache`]. It maps a [`FontKey`] (family, size, bold,
//! italic) to a shared [`FontInstance`], resolving and loading the font face at
//! most once per key. A font instance rasterizes glyphs on demand and, each time
//! a new glyph is inserted, computes kerning in both directions against every
//! glyph already present.
//!
//! ```no_run
//! use glyph_cache::{FontCache, FontKey};
//!
//! # fn main() -> Result<(), glyph_cache::Error> {
//! let cache = FontCache::system();
//! let font = cache.get_font(&FontKey::new("Arial", 12.0, false, false))?;
//! font.load_text("AV")?;
//! let kerning = font.kerning('A', 'V');
//! let glyph = font.glyph('V')?;
//! assert_eq!(glyph.kerning().get(&'A').copied(), kerning);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `system` (enabled by default): Provides [`SystemResolver`] and
//!   [`FontCache::system`], which find font files through the platform font
//!   backends.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod error;
mod face;
mod glyph;
mod instance;
mod kern;
mod key;
mod raster;
mod resolve;
mod swash_face;
mod util;

#[cfg(test)]
mod tests;

pub use cache::{CachePolicy, CacheStats, FontCache, FontCacheOptions};
pub use error::Error;
pub use face::{
    FaceLoader, GlyphSlot, KerningMode, LoadFlags, PixelMode, RasterFace, NATIVE_UNITS_PER_PIXEL,
};
pub use glyph::Glyph;
pub use instance::{FontInstance, GlyphDictionary};
pub use key::FontKey;
pub use raster::{rasterize, Bitmap};
#[cfg(feature = "system")]
pub use resolve::SystemResolver;
pub use resolve::{FontResolver, ResolvedFont};
pub use swash_face::{SwashFace, SwashLoader};
