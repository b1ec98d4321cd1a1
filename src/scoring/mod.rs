// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking: how scored candidates get ordered.
//!
//! Scores come from [`crate::fuzzy::similarity`]. This module only decides
//! order and how many survive.

pub mod ranking;

pub use ranking::*;
