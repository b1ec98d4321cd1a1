// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Free-text lookups: query in, table index out.
//!
//! Two tiers. Codes (country, zone) only ever match exactly; a typo in "PST"
//! is more likely a different zone than a misspelling. Names (city, country)
//! try an exact match first and fall back to ranking every candidate by
//! [`similarity`](crate::fuzzy::similarity), so "Londn" still finds London.
//!
//! Queries go through [`normalize`](crate::util::normalize::normalize) before
//! anything is compared, which is what lets "the United Kingdom's" match the
//! rendered "unitedkingdom".

mod finder;

pub use finder::Finder;
