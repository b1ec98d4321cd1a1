// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The lookup engine.

use tracing::trace;

use crate::config::FinderConfig;
use crate::dataset::{Dataset, COUNTRY_CODE_WIDTH, ZONE_CODE_WIDTH};
use crate::fuzzy::similarity;
use crate::scoring::top_k;
use crate::types::{CityIdx, CountryIdx, Lookup, Scored, ZoneIdx};
use crate::util::normalize::normalize;

/// Lookups against one dataset.
///
/// Cheap to create and `Copy`; holds a borrow of the dataset and the config.
#[derive(Debug, Clone, Copy)]
pub struct Finder<'d> {
    dataset: &'d Dataset,
    config: FinderConfig,
}

impl<'d> Finder<'d> {
    pub fn new(dataset: &'d Dataset) -> Self {
        Self::with_config(dataset, FinderConfig::default())
    }

    pub fn with_config(dataset: &'d Dataset, config: FinderConfig) -> Self {
        Self { dataset, config }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn dataset(&self) -> &'d Dataset {
        self.dataset
    }

    /// Scratch buffer big enough for any name in the dataset.
    fn buffer(&self) -> String {
        String::with_capacity(self.dataset.name_capacity())
    }

    /// Exact two-letter country code lookup ("us", "GB").
    pub fn find_country_code(&self, query: &str) -> Lookup<CountryIdx> {
        let query = normalize(query);
        let mut result = Lookup::None;
        if query.len() == COUNTRY_CODE_WIDTH {
            let mut buf = self.buffer();
            for i in 0..self.dataset.country_count() {
                let idx = CountryIdx(i as u16);
                buf.clear();
                self.dataset.render_country_code_into(idx, &mut buf);
                if self.config.match_policy.matches(&query, &buf) {
                    result = Lookup::Exact(idx);
                    break;
                }
            }
        }
        trace!(query = %query, kind = %result.kind(), "find country code");
        result
    }

    /// Exact zone abbreviation lookup ("PST", "cest").
    pub fn find_zone_code(&self, query: &str) -> Lookup<ZoneIdx> {
        let query = normalize(query);
        let mut result = Lookup::None;
        if (1..=ZONE_CODE_WIDTH).contains(&query.len()) {
            let mut buf = self.buffer();
            for i in 0..self.dataset.zone_count() {
                let idx = ZoneIdx(i as u16);
                buf.clear();
                self.dataset.render_zone_code_into(idx, &mut buf);
                if self.config.match_policy.matches(&query, &buf) {
                    result = Lookup::Exact(idx);
                    break;
                }
            }
        }
        trace!(query = %query, kind = %result.kind(), "find zone code");
        result
    }

    /// City lookup: the exact match, or the `k` most similar cities. A query
    /// that normalizes to nothing is never exact.
    pub fn find_city(&self, query: &str, k: usize) -> Lookup<CityIdx> {
        let query = normalize(query);
        let mut buf = self.buffer();
        let mut scored = Vec::with_capacity(self.dataset.city_count());

        let result = 'search: {
            for i in 0..self.dataset.city_count() {
                let index = CityIdx(i as u16);
                buf.clear();
                self.dataset.render_city_into(index, &mut buf);
                if !query.is_empty() && self.config.match_policy.matches(&query, &buf) {
                    break 'search Lookup::Exact(index);
                }
                scored.push(Scored {
                    index,
                    score: similarity(&query, &buf),
                });
            }
            Lookup::Scored(top_k(scored, k))
        };

        trace!(query = %query, k, kind = %result.kind(), "find city");
        result
    }

    /// Country lookup by common or official name.
    ///
    /// An exact match on either name wins. Otherwise each country scores the
    /// mean of its two similarities, rounded down.
    pub fn find_country(&self, query: &str, k: usize) -> Lookup<CountryIdx> {
        let query = normalize(query);
        let mut common = self.buffer();
        let mut official = self.buffer();
        let mut scored = Vec::with_capacity(self.dataset.country_count());

        let result = 'search: {
            for i in 0..self.dataset.country_count() {
                let index = CountryIdx(i as u16);
                common.clear();
                official.clear();
                self.dataset.render_country_name_into(index, &mut common);
                self.dataset.render_official_name_into(index, &mut official);

                let policy = self.config.match_policy;
                if !query.is_empty()
                    && (policy.matches(&query, &common) || policy.matches(&query, &official))
                {
                    break 'search Lookup::Exact(index);
                }

                let sum = u16::from(similarity(&query, &common))
                    + u16::from(similarity(&query, &official));
                scored.push(Scored {
                    index,
                    // Mean of two u8 values fits in a u8
                    score: (sum / 2) as u8,
                });
            }
            Lookup::Scored(top_k(scored, k))
        };

        trace!(query = %query, k, kind = %result.kind(), "find country");
        result
    }
}
