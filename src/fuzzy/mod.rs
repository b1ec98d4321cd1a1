// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! Candidates are ranked by `max(len) - levenshtein`, so a score is "how many
//! characters survived". Higher is better, a perfect match scores its length,
//! and nothing ever goes negative.

mod levenshtein;

pub use levenshtein::*;
