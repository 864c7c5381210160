// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pair kerning from the legacy `kern` table.

use skrifa::raw::FontData;
use skrifa::GlyphId;

/// Coverage bits of a version 0 subtable header.
const HORIZONTAL: u16 = 0x0001;
const MINIMUM: u16 = 0x0002;
const CROSS_STREAM: u16 = 0x0004;
const OVERRIDE: u16 = 0x0008;

/// Size of a version 0 subtable header: version, length, coverage.
const SUBTABLE_HEADER_LEN: usize = 6;
/// Size of the format 0 header that follows: pair count plus search hints.
const FORMAT0_HEADER_LEN: usize = 8;
/// Size of one kerning pair: left glyph, right glyph, value.
const PAIR_LEN: usize = 6;

/// Horizontal kerning pairs in font units.
#[derive(Clone, Debug, Default)]
pub(crate) struct KernTable {
    subtables: Vec<PairSubtable>,
}

#[derive(Clone, Debug)]
struct PairSubtable {
    /// Pairs keyed by `left << 16 | right`, sorted by key.
    pairs: Vec<(u32, i16)>,
    overrides: bool,
}

impl KernTable {
    /// Parses a version 0 `kern` table.
    ///
    /// Only format 0 subtables with horizontal, non cross-stream kerning values
    /// are kept. Returns `None` for other table versions or a malformed header.
    pub(crate) fn parse(data: &[u8]) -> Option<Self> {
        let data = FontData::new(data);
        let version = data.read_at::<u16>(0).ok()?;
        if version != 0 {
            return None;
        }
        let count = data.read_at::<u16>(2).ok()?;
        let mut subtables = Vec::new();
        let mut offset = 4;
        for _ in 0..count {
            let Ok(length) = data.read_at::<u16>(offset + 2) else {
                break;
            };
            let Ok(coverage) = data.read_at::<u16>(offset + 4) else {
                break;
            };
            let format = coverage >> 8;
            let mut next = offset + usize::from(length);
            let wanted = coverage & (HORIZONTAL | MINIMUM | CROSS_STREAM) == HORIZONTAL;
            if format == 0 {
                let start = offset + SUBTABLE_HEADER_LEN;
                let Ok(pair_count) = data.read_at::<u16>(start) else {
                    break;
                };
                let pairs_start = start + FORMAT0_HEADER_LEN;
                // Large subtables overflow the 16-bit length, so trust the pair count.
                next = next.max(pairs_start + usize::from(pair_count) * PAIR_LEN);
                if wanted {
                    subtables.push(PairSubtable {
                        pairs: read_pairs(&data, pairs_start, pair_count),
                        overrides: coverage & OVERRIDE != 0,
                    });
                }
            }
            if next <= offset {
                break;
            }
            offset = next;
        }
        Some(Self { subtables })
    }

    /// Returns the combined kerning for `right` following `left`, in font units.
    pub(crate) fn kerning(&self, left: GlyphId, right: GlyphId) -> i32 {
        let (Ok(left), Ok(right)) = (u16::try_from(left.to_u32()), u16::try_from(right.to_u32()))
        else {
            return 0;
        };
        let key = (u32::from(left) << 16) | u32::from(right);
        let mut value = 0;
        for subtable in &self.subtables {
            if let Ok(index) = subtable.pairs.binary_search_by_key(&key, |&(k, _)| k) {
                let pair_value = i32::from(subtable.pairs[index].1);
                if subtable.overrides {
                    value = pair_value;
                } else {
                    value += pair_value;
                }
            }
        }
        value
    }

    /// Returns true if no usable subtable was found.
    pub(crate) fn is_empty(&self) -> bool {
        self.subtables.iter().all(|subtable| subtable.pairs.is_empty())
    }
}

fn read_pairs(data: &FontData<'_>, start: usize, count: u16) -> Vec<(u32, i16)> {
    let mut pairs = Vec::with_capacity(usize::from(count));
    for i in 0..usize::from(count) {
        let at = start + i * PAIR_LEN;
        let (Ok(left), Ok(right), Ok(value)) = (
            data.read_at::<u16>(at),
            data.read_at::<u16>(at + 2),
            data.read_at::<i16>(at + 4),
        ) else {
            break;
        };
        pairs.push(((u32::from(left) << 16) | u32::from(right), value));
    }
    // Fonts are supposed to ship sorted pairs; not all of them do.
    pairs.sort_unstable_by_key(|&(key, _)| key);
    pairs
}
