// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Packed string codec: offset-indexed arrays and the renderers on top.
//!
//! Every variable-length string in a dataset lives in one of three shapes:
//!
//! ```text
//! PackedArray<Code5>   cities, tokens         letters directly
//! PackedArray<u8>      country/official names token indices (≤256 tokens)
//! PackedArray<u16>     country/official names token indices (wide)
//! ```
//!
//! Entry `i` spans `data[offsets[i]..offsets[i + 1]]`. No per-entry length
//! prefixes, no terminators. Renderers turn entries into lowercase ASCII with
//! no spaces, the same alphabet the normalizer produces, so a rendered name
//! and a normalized query can be compared byte for byte.

mod packed;
mod render;

pub use packed::{NameTable, PackedArray, TokenRef};
pub use render::{render_codes, render_fixed, render_tokens};
