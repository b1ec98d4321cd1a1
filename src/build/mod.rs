// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dataset builder: country and zone records in, validated [`Dataset`] out.
//!
//! The pipeline:
//!
//! 1. Countries: skip codes that aren't two letters, keep the first
//!    `max_countries`, split both names into tokens and intern them.
//! 2. Zones: skip records whose abbreviation isn't one to five letters or
//!    whose country wasn't kept, then derive the city from the zone name.
//! 3. Window: drop transitions after `until`; before `since`, keep only the
//!    latest transition per city so offsets at `since` still resolve.
//! 4. Intern cities and abbreviations in input order, sort transitions by
//!    start (stable), and hand everything to [`Dataset::from_parts`].

mod records;

pub use records::{CountryRecord, ZoneRecord};

use std::collections::HashMap;

use tracing::debug;

use crate::binary::MAX_ENTITY_COUNT;
use crate::codec::{NameTable, PackedArray};
use crate::config::BuildConfig;
use crate::dataset::{Dataset, DatasetParts, COUNTRY_CODE_WIDTH, ZONE_CODE_WIDTH};
use crate::error::DatasetError;
use crate::types::{encode_codes, CityIdx, Code5, CountryIdx, TokenIdx, Transition, ZoneIdx};
use crate::util::normalize::name_tokens;

/// Assigns dense indices to distinct values in first-seen order.
struct Interner {
    what: &'static str,
    values: Vec<String>,
    lookup: HashMap<String, u16>,
}

impl Interner {
    fn new(what: &'static str) -> Self {
        Self {
            what,
            values: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    fn intern(&mut self, value: &str) -> Result<u16, DatasetError> {
        if let Some(&idx) = self.lookup.get(value) {
            return Ok(idx);
        }
        let idx = u16::try_from(self.values.len())
            .ok()
            .filter(|&i| (i as usize) < MAX_ENTITY_COUNT)
            .ok_or(DatasetError::TooLarge {
                what: self.what,
                size: self.values.len() + 1,
                max: MAX_ENTITY_COUNT,
            })?;
        self.values.push(value.to_string());
        self.lookup.insert(value.to_string(), idx);
        Ok(idx)
    }

    fn encoded(&self) -> PackedArray<Code5> {
        PackedArray::from_entries(self.values.iter().map(|v| encode_codes(v)))
    }
}

/// Letters of `s`, uppercase-insensitive, as a zero-padded fixed code.
/// `None` unless `s` is one to `N` ASCII letters.
fn fixed_code<const N: usize>(s: &str) -> Option<[Code5; N]> {
    if s.is_empty() || s.len() > N || !s.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let mut code = [Code5::SEPARATOR; N];
    for (slot, b) in code.iter_mut().zip(s.bytes()) {
        *slot = Code5::from_letter(b)?;
    }
    Some(code)
}

/// A zone record that survived validation, before indices are assigned.
struct Candidate {
    city: String,
    abbreviation: String,
    country: CountryIdx,
    start: i64,
    offset_minutes: i32,
    is_dst: bool,
}

/// Collects records and builds a dataset from them.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    config: BuildConfig,
    countries: Vec<CountryRecord>,
    zones: Vec<ZoneRecord>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn add_country(&mut self, record: CountryRecord) -> &mut Self {
        self.countries.push(record);
        self
    }

    pub fn add_countries(&mut self, records: impl IntoIterator<Item = CountryRecord>) -> &mut Self {
        self.countries.extend(records);
        self
    }

    pub fn add_zone(&mut self, record: ZoneRecord) -> &mut Self {
        self.zones.push(record);
        self
    }

    pub fn add_zones(&mut self, records: impl IntoIterator<Item = ZoneRecord>) -> &mut Self {
        self.zones.extend(records);
        self
    }

    /// Build and validate.
    pub fn build(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_parts(self.build_parts()?)
    }

    /// Build the raw tables without validating them.
    pub fn build_parts(&self) -> Result<DatasetParts, DatasetError> {
        let mut tokens = Interner::new("token count");
        let mut country_names = Vec::new();
        let mut official_names = Vec::new();
        let mut country_codes = Vec::new();
        let mut country_lookup: HashMap<String, CountryIdx> = HashMap::new();

        let limit = self.config.max_countries.unwrap_or(usize::MAX);
        for record in &self.countries {
            if country_codes.len() >= limit {
                break;
            }
            let code_key = record.code.to_ascii_uppercase();
            let Some(code) = fixed_code::<COUNTRY_CODE_WIDTH>(&record.code)
                .filter(|_| record.code.len() == COUNTRY_CODE_WIDTH)
            else {
                debug!(code = %record.code, name = %record.name, "skipping country: bad code");
                continue;
            };
            if country_lookup.contains_key(&code_key) {
                debug!(code = %record.code, "skipping country: duplicate code");
                continue;
            }

            let common_words = name_tokens(&record.name);
            if common_words.is_empty() {
                debug!(code = %record.code, name = %record.name, "skipping country: name has no letters");
                continue;
            }
            let mut official_words = name_tokens(record.official_name());
            if official_words.is_empty() {
                debug!(code = %record.code, "official name has no letters, using common name");
                official_words = common_words.clone();
            }

            let mut intern_name = |words: &[String]| -> Result<Vec<TokenIdx>, DatasetError> {
                words.iter().map(|t| tokens.intern(t).map(TokenIdx)).collect()
            };
            let common = intern_name(&common_words)?;
            let official = intern_name(&official_words)?;

            let idx = CountryIdx::new(country_codes.len(), MAX_ENTITY_COUNT).ok_or(
                DatasetError::TooLarge {
                    what: "country count",
                    size: country_codes.len() + 1,
                    max: MAX_ENTITY_COUNT,
                },
            )?;
            country_lookup.insert(code_key, idx);
            country_names.push(common);
            official_names.push(official);
            country_codes.push(code);
        }

        let candidates = self.window(self.candidates(&country_lookup));

        let mut cities = Interner::new("city count");
        let mut abbreviations = Interner::new("zone code count");
        let mut zone_codes = Vec::new();
        let mut transitions = Vec::with_capacity(candidates.len());
        for c in &candidates {
            let city = CityIdx(cities.intern(&c.city)?);
            let before = abbreviations.values.len();
            let zone = ZoneIdx(abbreviations.intern(&c.abbreviation)?);
            if abbreviations.values.len() > before {
                // Validated by candidates()
                zone_codes.push(fixed_code::<ZONE_CODE_WIDTH>(&c.abbreviation).unwrap_or_default());
            }
            transitions.push(Transition {
                zone,
                city,
                country: c.country,
                start: c.start,
                offset_minutes: c.offset_minutes,
                is_dst: c.is_dst,
            });
        }
        transitions.sort_by_key(|t| t.start);

        debug!(
            countries = country_codes.len(),
            tokens = tokens.values.len(),
            cities = cities.values.len(),
            zone_codes = zone_codes.len(),
            transitions = transitions.len(),
            skipped_zones = self.zones.len() - transitions.len(),
            "built dataset tables"
        );

        Ok(DatasetParts {
            country_names: NameTable::from_names(&country_names, tokens.values.len()),
            official_names: NameTable::from_names(&official_names, tokens.values.len()),
            tokens: tokens.encoded(),
            country_codes,
            cities: cities.encoded(),
            zone_codes,
            transitions,
        })
    }

    /// Zone records with a usable abbreviation, city and country.
    fn candidates(&self, countries: &HashMap<String, CountryIdx>) -> Vec<Candidate> {
        self.zones
            .iter()
            .filter_map(|z| {
                let Some(&country) = countries.get(&z.country_code.to_ascii_uppercase()) else {
                    debug!(zone = %z.zone_name, country = %z.country_code, "skipping zone: unknown country");
                    return None;
                };
                if fixed_code::<ZONE_CODE_WIDTH>(&z.abbreviation).is_none() {
                    debug!(zone = %z.zone_name, abbreviation = %z.abbreviation, "skipping zone: bad abbreviation");
                    return None;
                }
                let city = z.city_name();
                if city.is_empty() {
                    debug!(zone = %z.zone_name, "skipping zone: no city name");
                    return None;
                }
                Some(Candidate {
                    city,
                    abbreviation: z.abbreviation.to_ascii_lowercase(),
                    country,
                    start: z.start,
                    offset_minutes: z.offset_minutes,
                    is_dst: z.is_dst,
                })
            })
            .collect()
    }

    /// Apply `until` and `since`.
    fn window(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        if let Some(until) = self.config.until {
            candidates.retain(|c| c.start <= until);
        }
        let Some(since) = self.config.since else {
            return candidates;
        };

        // Latest pre-window transition per city, ties to the later record
        let mut latest: HashMap<&str, (i64, usize)> = HashMap::new();
        for (i, c) in candidates.iter().enumerate() {
            if c.start < since {
                let entry = latest.entry(c.city.as_str()).or_insert((c.start, i));
                if c.start >= entry.0 {
                    *entry = (c.start, i);
                }
            }
        }
        let keep: Vec<bool> = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| c.start >= since || latest.get(c.city.as_str()).map(|e| e.1) == Some(i))
            .collect();

        candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(c, keep)| keep.then_some(c))
            .collect()
    }
}
