// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache of loaded font instances.

use core::fmt;
use std::sync::{Arc, Mutex};

use hashbrown::HashMap;
use log::{debug, trace, warn};

use crate::util::lock;
use crate::{Error, FaceLoader, FontInstance, FontKey, FontResolver, KerningMode, SwashLoader};

/// Decides which font instances a [`FontCache`] keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep every instance until the cache is cleared or dropped.
    ///
    /// Memory grows with the number of distinct keys requested.
    #[default]
    Unbounded,
    /// Keep at most `max_entries` instances, evicting the least recently
    /// requested one when a new key is loaded.
    Lru {
        /// Maximum number of cached instances. Zero behaves like one.
        max_entries: usize,
    },
}

/// Options for a font cache.
#[derive(Copy, Clone, Debug, Default)]
pub struct FontCacheOptions {
    /// Eviction policy.
    ///
    /// The default value is [`CachePolicy::Unbounded`].
    pub policy: CachePolicy,
    /// Rounding applied to kerning values of every instance.
    ///
    /// The default value is [`KerningMode::GridFitted`].
    pub kerning_mode: KerningMode,
}

/// Counters describing how a [`FontCache`] has been used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered with an already loaded instance, including requests
    /// that waited for a load started by another caller.
    pub hits: u64,
    /// Requests that had to resolve and load a font.
    pub misses: u64,
    /// Loads that produced an instance.
    pub loads: u64,
    /// Instances dropped by the eviction policy.
    pub evictions: u64,
}

enum SlotState {
    Empty,
    Ready(Arc<FontInstance>),
    Failed(Error),
}

type Slot = Mutex<SlotState>;

struct Entry {
    epoch: u64,
    /// Set once the slot holds an instance.
    ready: bool,
    slot: Arc<Slot>,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<FontKey, Entry>,
    epoch: u64,
    stats: CacheStats,
}

/// Maps font keys to loaded [`FontInstance`]s.
///
/// Each key is resolved and loaded at most once while it stays cached.
/// Concurrent requests for a key that is still loading wait for that load and
/// share its result. Loads of different keys run in parallel.
///
/// A failed resolution or load is reported to every caller waiting on it and
/// leaves no entry behind, so a later request tries again.
pub struct FontCache {
    resolver: Box<dyn FontResolver>,
    loader: Box<dyn FaceLoader>,
    options: FontCacheOptions,
    registry: Mutex<Registry>,
}

impl FontCache {
    /// Creates a cache that finds fonts with `resolver` and loads them with
    /// `loader`.
    pub fn new(
        resolver: impl FontResolver + 'static,
        loader: impl FaceLoader + 'static,
        options: FontCacheOptions,
    ) -> Self {
        Self {
            resolver: Box::new(resolver),
            loader: Box::new(loader),
            options,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Creates a cache with default options that loads fonts from disk with
    /// [`SwashLoader`].
    pub fn with_resolver(resolver: impl FontResolver + 'static) -> Self {
        Self::new(resolver, SwashLoader, FontCacheOptions::default())
    }

    /// Creates a cache with default options over the system fonts.
    #[cfg(feature = "system")]
    pub fn system() -> Self {
        Self::with_resolver(crate::SystemResolver::new())
    }

    /// The options this cache was created with.
    pub fn options(&self) -> &FontCacheOptions {
        &self.options
    }

    /// Returns the instance for `key`, loading it on first use.
    ///
    /// Fails with [`Error::FontNotFound`] if the resolver knows no file for the
    /// key, or with [`Error::FontLoad`] if the file cannot be loaded.
    pub fn get_font(&self, key: &FontKey) -> Result<Arc<FontInstance>, Error> {
        let slot = {
            let mut registry = lock(&self.registry);
            registry.epoch += 1;
            let epoch = registry.epoch;
            let entry = registry
                .entries
                .entry(key.clone())
                .or_insert_with(|| Entry {
                    epoch,
                    ready: false,
                    slot: Arc::new(Mutex::new(SlotState::Empty)),
                });
            entry.epoch = epoch;
            Arc::clone(&entry.slot)
        };

        let mut state = lock(&slot);
        match &*state {
            SlotState::Ready(instance) => {
                let instance = Arc::clone(instance);
                drop(state);
                trace!("font cache hit for {key}");
                lock(&self.registry).stats.hits += 1;
                return Ok(instance);
            }
            SlotState::Failed(err) => return Err(err.clone()),
            SlotState::Empty => {}
        }

        let loaded = self.load(key);
        *state = match &loaded {
            Ok(instance) => SlotState::Ready(Arc::clone(instance)),
            Err(err) => SlotState::Failed(err.clone()),
        };
        drop(state);

        let mut registry = lock(&self.registry);
        registry.stats.misses += 1;
        match &loaded {
            Ok(_) => {
                registry.stats.loads += 1;
                if let Some(entry) = registry
                    .entries
                    .get_mut(key)
                    .filter(|entry| Arc::ptr_eq(&entry.slot, &slot))
                {
                    entry.ready = true;
                }
                if let CachePolicy::Lru { max_entries } = self.options.policy {
                    registry.evict(key, max_entries.max(1));
                }
            }
            Err(_) => {
                // Only forget the slot this call filled; a newer one may
                // already be loading.
                if registry
                    .entries
                    .get(key)
                    .is_some_and(|entry| Arc::ptr_eq(&entry.slot, &slot))
                {
                    registry.entries.remove(key);
                }
            }
        }
        loaded
    }

    fn load(&self, key: &FontKey) -> Result<Arc<FontInstance>, Error> {
        let Some(font) = self
            .resolver
            .resolve(key.family(), key.size(), key.bold(), key.italic())
        else {
            warn!("no font found for {key}");
            return Err(Error::FontNotFound { key: key.clone() });
        };
        debug!("loading {key} from {}", font.path().display());
        let face = self.loader.load(&font)?;
        Ok(Arc::new(FontInstance::new(
            key.clone(),
            font,
            face,
            self.options.kerning_mode,
        )))
    }

    /// Returns true if an instance for `key` is loaded.
    pub fn contains(&self, key: &FontKey) -> bool {
        lock(&self.registry)
            .entries
            .get(key)
            .is_some_and(|entry| entry.ready)
    }

    /// Number of cached keys, including keys whose load is in progress.
    pub fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        lock(&self.registry).entries.is_empty()
    }

    /// Drops every cached instance.
    ///
    /// Instances still referenced by callers stay alive until released. Loads
    /// in progress complete for their waiting callers but are not cached.
    pub fn clear(&self) {
        lock(&self.registry).entries.clear();
    }

    /// Returns the usage counters.
    pub fn stats(&self) -> CacheStats {
        lock(&self.registry).stats
    }

    /// Resets the usage counters without touching cached instances.
    pub fn clear_stats(&self) {
        lock(&self.registry).stats = CacheStats::default();
    }
}

impl Registry {
    /// Evicts least recently requested instances until at most `max_entries`
    /// remain, never evicting `keep` or a load in progress.
    fn evict(&mut self, keep: &FontKey, max_entries: usize) {
        while self.entries.len() > max_entries {
            let victim = self
                .entries
                .iter()
                .filter(|(key, entry)| *key != keep && entry.ready)
                .min_by_key(|(_, entry)| entry.epoch)
                .map(|(key, _)| key.clone());
            let Some(victim) = victim else {
                break;
            };
            debug!("evicting {victim}");
            self.entries.remove(&victim);
            self.stats.evictions += 1;
        }
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("options", &self.options)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
