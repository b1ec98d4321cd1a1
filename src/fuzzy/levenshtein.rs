// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance and the similarity score built on it.
//!
//! Inputs are normalized ASCII, so bytes are characters here. The DP keeps two
//! rows instead of the full `(len1 + 1) × (len2 + 1)` table; the last cell is
//! the same either way.

/// Scores and lengths fit in a byte on the embedded target. Rankings stay
/// compatible as long as everyone saturates at the same place.
pub const MAX_SCORE: u8 = u8::MAX;

/// Classic Levenshtein distance: insert, delete, substitute, all cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `max(len(a), len(b)) - edit_distance(a, b)`, saturated to [`MAX_SCORE`].
///
/// Distance never exceeds the longer length, so the subtraction can't go
/// below zero.
pub fn similarity(a: &str, b: &str) -> u8 {
    let longest = a.len().max(b.len());
    let score = longest - edit_distance(a, b);
    u8::try_from(score).unwrap_or(MAX_SCORE)
}
