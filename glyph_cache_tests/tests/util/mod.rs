// Copyright 2025 the Glyph Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod env;
mod fake;

pub(crate) use env::TestEnv;
pub(crate) use fake::{expected_size, FakeFace, KERNING_PAIRS};
