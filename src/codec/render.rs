// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning codes back into text.
//!
//! All three renderers append to a caller-owned `String` and report how many
//! bytes they wrote. The string grows as needed, so there is no capacity to
//! get wrong.

use super::packed::{PackedArray, TokenRef};
use crate::types::Code5;

/// Render a variable-length entry (city name, token). Separators are word
/// boundaries, not characters, so they're skipped.
pub fn render_codes(codes: &[Code5], out: &mut String) -> usize {
    let before = out.len();
    out.extend(codes.iter().filter_map(|c| c.letter()).map(char::from));
    out.len() - before
}

/// Render a fixed-width, zero-padded code (country code, zone abbreviation).
/// The first separator ends the code.
pub fn render_fixed(codes: &[Code5], out: &mut String) -> usize {
    let before = out.len();
    out.extend(
        codes
            .iter()
            .map_while(|c| c.letter())
            .map(char::from),
    );
    out.len() - before
}

/// Render a token-indexed name by concatenating its tokens. `None` if a
/// token index is out of range (can't happen for a loaded dataset).
pub fn render_tokens<T: TokenRef>(
    entry: &[T],
    tokens: &PackedArray<Code5>,
    out: &mut String,
) -> Option<usize> {
    let mut written = 0;
    for t in entry {
        written += render_codes(tokens.get(t.token())?, out);
    }
    Some(written)
}
