// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a dataset and of lookup results.
//!
//! Every table in a [`Dataset`](crate::Dataset) is addressed by a typed index.
//! A `CityIdx` cannot be handed to something expecting a `CountryIdx`, which
//! was the easiest mistake to make when every table was a bare `u16` array.
//!
//! # Invariants (checked at load, relied on everywhere else)
//!
//! - **Code5**: value `< 32`. Letters are `1..=26`, `0` is the separator.
//! - **Transition**: `zone < code_count ∧ city < city_count ∧ country < country_count`.
//! - **Transition table**: ascending by `start` across the whole table.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES: Type-safe indices
// =============================================================================

macro_rules! entity_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub u16);

        impl $name {
            /// Create an index, validating it against the table size.
            #[inline]
            pub fn new(idx: usize, count: usize) -> Option<Self> {
                if idx < count {
                    u16::try_from(idx).ok().map($name)
                } else {
                    None
                }
            }

            /// Convert to usize for table access.
            #[inline]
            pub fn get(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u16> for $name {
            fn from(idx: u16) -> Self {
                $name(idx)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_index!(
    /// Index into the country tables (names, official names, codes).
    CountryIdx
);
entity_index!(
    /// Index into the city name table.
    CityIdx
);
entity_index!(
    /// Index into the zone abbreviation table ("PST", "CEST", ...).
    ZoneIdx
);
entity_index!(
    /// Index into the token table that country names are spelled with.
    TokenIdx
);

/// Which table an index refers to. Only used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Country,
    City,
    Zone,
    Token,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Country => "country",
            EntityKind::City => "city",
            EntityKind::Zone => "zone",
            EntityKind::Token => "token",
        })
    }
}

// =============================================================================
// 5-BIT LETTER CODES
// =============================================================================

/// A 5-bit letter code: `a..=z` is `1..=26`, `0` separates words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Code5(u8);

impl Code5 {
    /// Word separator inside tokens, padding inside fixed-width codes.
    pub const SEPARATOR: Code5 = Code5(0);

    /// Largest value that fits in five bits.
    pub const MAX: u8 = 31;

    /// Wrap a raw value, rejecting anything that needs more than five bits.
    #[inline]
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Code5(value))
    }

    /// Encode a letter (either case). Everything else has no code.
    #[inline]
    pub fn from_letter(c: u8) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        c.is_ascii_lowercase().then(|| Code5(c - b'a' + 1))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The lowercase ASCII letter for this code, `None` for separators and
    /// the unused values `27..=31`.
    #[inline]
    pub fn letter(self) -> Option<u8> {
        matches!(self.0, 1..=26).then(|| b'a' + self.0 - 1)
    }

    #[inline]
    pub fn is_separator(self) -> bool {
        self.0 == 0
    }
}

/// Encode a string as 5-bit codes. Spaces become separators, other
/// non-letters are dropped.
pub fn encode_codes(s: &str) -> Vec<Code5> {
    s.bytes()
        .filter_map(|b| {
            if b == b' ' {
                Some(Code5::SEPARATOR)
            } else {
                Code5::from_letter(b)
            }
        })
        .collect()
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// One row of the transition table: from `start` onward, the zone/city/country
/// key observed `offset_minutes` until a later row for the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub zone: ZoneIdx,
    pub city: CityIdx,
    pub country: CountryIdx,
    /// Epoch seconds.
    pub start: i64,
    /// Signed offset from UTC in minutes.
    pub offset_minutes: i32,
    /// Whether the offset is daylight-saving time.
    #[serde(default)]
    pub is_dst: bool,
}

// =============================================================================
// LOOKUP RESULTS
// =============================================================================

/// How confident a lookup is in its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Nothing satisfied the match policy.
    None,
    /// The query equals a candidate's canonical form.
    Exact,
    /// No exact match; candidates ranked by similarity.
    Score,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchKind::None => "none",
            MatchKind::Exact => "exact",
            MatchKind::Score => "score",
        })
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scored<I> {
    pub index: I,
    pub score: u8,
}

/// Outcome of a free-text lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "matches", rename_all = "lowercase")]
pub enum Lookup<I> {
    None,
    Exact(I),
    Scored(Vec<Scored<I>>),
}

impl<I: Copy> Lookup<I> {
    pub fn kind(&self) -> MatchKind {
        match self {
            Lookup::None => MatchKind::None,
            Lookup::Exact(_) => MatchKind::Exact,
            Lookup::Scored(_) => MatchKind::Score,
        }
    }

    /// The exact match, if any.
    pub fn exact(&self) -> Option<I> {
        match self {
            Lookup::Exact(idx) => Some(*idx),
            _ => None,
        }
    }

    /// The best candidate: the exact match, or the top-ranked one.
    pub fn best(&self) -> Option<I> {
        match self {
            Lookup::None => None,
            Lookup::Exact(idx) => Some(*idx),
            Lookup::Scored(matches) => matches.first().map(|m| m.index),
        }
    }

    /// Indices in result order (a single index for exact matches).
    pub fn indices(&self) -> Vec<I> {
        match self {
            Lookup::None => Vec::new(),
            Lookup::Exact(idx) => vec![*idx],
            Lookup::Scored(matches) => matches.iter().map(|m| m.index).collect(),
        }
    }
}
