// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font instance cache key.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a sized font instance.
///
/// Two keys are equal exactly when their family, size, bold and italic fields
/// are equal. The size is compared by its bit pattern, so `12.0` and `12.000001`
/// name different instances and no quantization takes place.
#[derive(Clone)]
pub struct FontKey {
    family: Arc<str>,
    size: f32,
    bold: bool,
    italic: bool,
}

impl FontKey {
    /// Creates a new key for the given descriptor.
    ///
    /// `size` is the nominal size in points, which this crate renders at one
    /// pixel per point.
    pub fn new(family: impl Into<Arc<str>>, size: f32, bold: bool, italic: bool) -> Self {
        Self {
            family: family.into(),
            size,
            bold,
            italic,
        }
    }

    /// The family name as given to the resolver.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The nominal size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Whether a bold face was requested.
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Whether an italic face was requested.
    pub fn italic(&self) -> bool {
        self.italic
    }
}

impl Hash for FontKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
    }
}

impl PartialEq for FontKey {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.size.to_bits() == other.size.to_bits()
            && self.bold == other.bold
            && self.italic == other.italic
    }
}

impl Eq for FontKey {}

impl fmt::Debug for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontKey")
            .field("family", &&*self.family)
            .field("size", &self.size)
            .field("bold", &self.bold)
            .field("italic", &self.italic)
            .finish()
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family, self.size)?;
        if self.bold {
            f.write_str("-bold")?;
        }
        if self.italic {
            f.write_str("-italic")?;
        }
        Ok(())
    }
}
