// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `glyph_cache`.
//!
//! - The `util` module contains the fake rasterizer and resolver shared by the
//!   other modules.
//! - Tests that need real font files live in `system.rs` and return early when
//!   the machine has no usable font.
//! - For test naming, put the "topic" of the test at the start of the name,
//!   e.g. `kerning_is_directional` rather than `directional_kerning`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod util;
