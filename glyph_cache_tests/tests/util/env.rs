// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A font cache wired to the fake rasterizer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use glyph_cache::{Error, FontCache, FontCacheOptions, FontKey, RasterFace, ResolvedFont};

use super::FakeFace;

/// Families the test resolver knows about.
const FAMILIES: &[&str] = &["Arial", "Times"];

/// A [`FontCache`] over [`FakeFace`]s that counts resolver and loader calls.
pub(crate) struct TestEnv {
    pub(crate) cache: FontCache,
    resolves: Arc<AtomicUsize>,
    loads: Arc<AtomicUsize>,
    kerning_queries: Arc<Mutex<Vec<(char, char)>>>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_options(FontCacheOptions::default(), Duration::ZERO)
    }

    /// Creates an environment whose loader sleeps for `load_delay` before
    /// returning a face.
    pub(crate) fn with_options(options: FontCacheOptions, load_delay: Duration) -> Self {
        let resolves = Arc::new(AtomicUsize::new(0));
        let loads = Arc::new(AtomicUsize::new(0));
        let kerning_queries = Arc::new(Mutex::new(Vec::new()));

        let resolver = {
            let resolves = Arc::clone(&resolves);
            move |family: &str, _size: f32, bold: bool, italic: bool| {
                resolves.fetch_add(1, Ordering::SeqCst);
                if !FAMILIES.contains(&family) {
                    return None;
                }
                let style = match (bold, italic) {
                    (false, false) => "Regular",
                    (true, false) => "Bold",
                    (false, true) => "Italic",
                    (true, true) => "BoldItalic",
                };
                Some(ResolvedFont::new(format!("/fonts/{family}-{style}.ttf"), 0))
            }
        };
        let loader = {
            let loads = Arc::clone(&loads);
            let kerning_queries = Arc::clone(&kerning_queries);
            move |_font: &ResolvedFont| -> Result<Box<dyn RasterFace>, Error> {
                loads.fetch_add(1, Ordering::SeqCst);
                if !load_delay.is_zero() {
                    thread::sleep(load_delay);
                }
                Ok(Box::new(FakeFace::new(Arc::clone(&kerning_queries))))
            }
        };

        Self {
            cache: FontCache::new(resolver, loader, options),
            resolves,
            loads,
            kerning_queries,
        }
    }

    pub(crate) fn key(family: &str, size: f32) -> FontKey {
        FontKey::new(family, size, false, false)
    }

    pub(crate) fn resolves(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Kerning queries made by every face loaded so far.
    pub(crate) fn kerning_queries(&self) -> Vec<(char, char)> {
        self.kerning_queries.lock().unwrap().clone()
    }
}
