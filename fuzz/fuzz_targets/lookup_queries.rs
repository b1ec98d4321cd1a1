// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for free-text lookups.
//!
//! Queries come straight from users: any bytes, any length. Every lookup must
//! return, and scored results must be ranked and bounded by `k`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tinytz::testing::sample_dataset;
use tinytz::{normalize, Finder, FinderConfig, Lookup, MatchPolicy};

#[derive(Debug, Arbitrary)]
struct QueryInput {
    query_bytes: Vec<u8>,
    k: u8,
    legacy: bool,
}

fuzz_target!(|input: QueryInput| {
    let query = String::from_utf8_lossy(&input.query_bytes);
    // Cap length to avoid timeouts in the quadratic edit distance
    let query: String = query.chars().take(64).collect();
    let k = usize::from(input.k);

    let normalized = normalize(&query);
    assert_eq!(normalize(&normalized), normalized);

    let ds = sample_dataset();
    let config = FinderConfig {
        match_policy: if input.legacy {
            MatchPolicy::LegacyPrefix
        } else {
            MatchPolicy::Exact
        },
        ..FinderConfig::default()
    };
    let finder = Finder::with_config(&ds, config);

    let _ = finder.find_country_code(&query);
    let _ = finder.find_zone_code(&query);

    if normalized.is_empty() {
        assert!(finder.find_city(&query, k).exact().is_none());
        assert!(finder.find_country(&query, k).exact().is_none());
    }

    if let Lookup::Scored(matches) = finder.find_city(&query, k) {
        assert!(matches.len() <= k.min(ds.city_count()));
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }
    if let Lookup::Scored(matches) = finder.find_country(&query, k) {
        assert!(matches.len() <= k.min(ds.country_count()));
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }
});
