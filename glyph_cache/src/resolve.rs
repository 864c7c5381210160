// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping font descriptors to font files.

use std::path::{Path, PathBuf};

/// A font file selected by a [`FontResolver`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedFont {
    path: PathBuf,
    index: u32,
}

impl ResolvedFont {
    /// Creates a new resolved font. `index` selects the face inside a
    /// collection file and is `0` for single-face files.
    pub fn new(path: impl Into<PathBuf>, index: u32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    /// Location of the font file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the face within the file.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Finds the font file for a descriptor.
///
/// Resolution must be deterministic for a given input. A missing match is
/// reported with `None`; resolvers must not silently fall back to another
/// family.
pub trait FontResolver: Send + Sync {
    /// Returns the font file for the descriptor, if one exists.
    fn resolve(&self, family: &str, size: f32, bold: bool, italic: bool) -> Option<ResolvedFont>;
}

impl<F> FontResolver for F
where
    F: Fn(&str, f32, bool, bool) -> Option<ResolvedFont> + Send + Sync,
{
    fn resolve(&self, family: &str, size: f32, bold: bool, italic: bool) -> Option<ResolvedFont> {
        self(family, size, bold, italic)
    }
}

#[cfg(feature = "system")]
pub use system::SystemResolver;

#[cfg(feature = "system")]
mod system {
    use std::sync::Mutex;

    use fontique::{Collection, CollectionOptions, FontStyle, FontWeight, FontWidth, SourceKind};
    use log::debug;

    use super::{FontResolver, ResolvedFont};
    use crate::util::lock;

    /// Resolves fonts through the platform font backends.
    ///
    /// Families are matched by exact name. Bold selects weight 700 and italic
    /// selects the italic style, each falling back to the closest face the
    /// family provides. Only fonts backed by a file are returned.
    pub struct SystemResolver {
        collection: Mutex<Collection>,
    }

    impl SystemResolver {
        /// Creates a resolver over the system font collection.
        pub fn new() -> Self {
            Self::with_collection(Collection::new(CollectionOptions {
                shared: false,
                system_fonts: true,
            }))
        }

        /// Creates a resolver over an existing collection.
        pub fn with_collection(collection: Collection) -> Self {
            Self {
                collection: Mutex::new(collection),
            }
        }
    }

    impl Default for SystemResolver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl core::fmt::Debug for SystemResolver {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.debug_struct("SystemResolver").finish_non_exhaustive()
        }
    }

    impl FontResolver for SystemResolver {
        fn resolve(
            &self,
            family: &str,
            _size: f32,
            bold: bool,
            italic: bool,
        ) -> Option<ResolvedFont> {
            let mut collection = lock(&self.collection);
            let info = collection.family_by_name(family)?;
            let weight = if bold {
                FontWeight::BOLD
            } else {
                FontWeight::NORMAL
            };
            let style = if italic {
                FontStyle::Italic
            } else {
                FontStyle::Normal
            };
            let font = info.match_font(FontWidth::NORMAL, style, weight, false)?;
            match &font.source().kind {
                SourceKind::Path(path) => {
                    debug!("resolved {family} to {} #{}", path.display(), font.index());
                    Some(ResolvedFont::new(path.to_path_buf(), font.index()))
                }
                SourceKind::Memory(_) => None,
            }
        }
    }
}
