// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Knobs for lookups and dataset builds.
//!
//! Both structs deserialize with defaults for every missing field, so a
//! config file only needs to mention what it changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// When does a query count as an exact match for a candidate?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Query and candidate are equal.
    #[default]
    Exact,
    /// The candidate is a prefix of the query: "londonderry" matches
    /// "london". This is how the first generation of the C library compared,
    /// kept for datasets whose consumers depend on it.
    LegacyPrefix,
}

impl MatchPolicy {
    /// Does `query` match `candidate` under this policy?
    #[inline]
    pub fn matches(self, query: &str, candidate: &str) -> bool {
        match self {
            MatchPolicy::Exact => query == candidate,
            MatchPolicy::LegacyPrefix => query.starts_with(candidate),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchPolicy::Exact => "exact",
            MatchPolicy::LegacyPrefix => "legacy-prefix",
        })
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(MatchPolicy::Exact),
            "legacy-prefix" | "legacy" | "prefix" => Ok(MatchPolicy::LegacyPrefix),
            other => Err(format!(
                "unknown match policy '{}' (expected 'exact' or 'legacy-prefix')",
                other
            )),
        }
    }
}

/// Lookup settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinderConfig {
    pub match_policy: MatchPolicy,
    /// How many ranked candidates a fuzzy lookup returns when the caller
    /// doesn't say.
    pub default_count: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::Exact,
            default_count: 2,
        }
    }
}

/// Dataset build settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Keep only the first N countries of the input (input order is
    /// significance order). `None` keeps all.
    pub max_countries: Option<usize>,
    /// Transitions before this epoch second collapse into the latest one per
    /// city, so offsets at `since` are still answerable.
    pub since: Option<i64>,
    /// Transitions starting after this epoch second are dropped.
    pub until: Option<i64>,
}
