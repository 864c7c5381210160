// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use crate::FontKey;

/// Errors produced while loading fonts and glyphs.
///
/// None of these are retried internally: resolution and rasterization are
/// deterministic, so repeating a failed request with the same inputs fails the
/// same way.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The resolver found no font file for the descriptor.
    FontNotFound {
        /// The descriptor that could not be resolved.
        key: FontKey,
    },
    /// A font file was found but could not be read or parsed.
    FontLoad {
        /// Location of the offending file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// The face has no outline or bitmap for the code point.
    GlyphLoad {
        /// The requested code point.
        ch: char,
    },
    /// The code point is already present in the glyph dictionary.
    ///
    /// Callers look a glyph up before rasterizing it, so this indicates a
    /// broken caller rather than a runtime condition.
    DuplicateGlyph {
        /// The code point that was inserted twice.
        ch: char,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FontNotFound { key } => write!(f, "no font file found for {key}"),
            Self::FontLoad { path, reason } => {
                write!(f, "failed to load font {}: {reason}", path.display())
            }
            Self::GlyphLoad { ch } => write!(f, "no glyph for {ch:?} (U+{:04X})", *ch as u32),
            Self::DuplicateGlyph { ch } => {
                write!(f, "glyph for {ch:?} is already in the dictionary")
            }
        }
    }
}

impl core::error::Error for Error {}
