// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The immutable dataset handle.
//!
//! A [`Dataset`] can only be obtained through validation: [`Dataset::from_parts`]
//! (what the builder and the binary decoder both call) checks every invariant
//! the lookup and resolver code relies on. After that the handle is read-only
//! and `Send + Sync`, and any number of datasets can live side by side.
//!
//! # Checked at construction
//!
//! | What                       | Error                                |
//! |----------------------------|--------------------------------------|
//! | table sizes fit in u16     | `DatasetError::TooLarge`             |
//! | country tables line up     | `DatasetError::LengthMismatch`       |
//! | letters are `1..=26`       | `DatasetError::BadCode`              |
//! | names reference tokens     | `DatasetError::DanglingToken`        |
//! | nothing renders empty      | `DatasetError::EmptyEntry`           |
//! | codes are unique           | `DatasetError::DuplicateCode`        |
//! | transitions reference rows | `DatasetError::DanglingReference`    |
//! | transitions sorted by start| `DatasetError::UnsortedTransitions`  |

use tracing::debug;

use crate::binary::{MAX_ENTITY_COUNT, MAX_TRANSITION_COUNT};
use crate::codec::{render_codes, render_fixed, NameTable, PackedArray};
use crate::error::{DatasetError, Table};
use crate::resolve::TransitionIndex;
use crate::search::Finder;
use crate::types::{CityIdx, Code5, CountryIdx, EntityKind, TokenIdx, Transition, ZoneIdx};

/// Width of a zone abbreviation slot.
pub const ZONE_CODE_WIDTH: usize = 5;

/// Width of a country code.
pub const COUNTRY_CODE_WIDTH: usize = 2;

/// Raw tables, before validation.
#[derive(Debug, Clone)]
pub struct DatasetParts {
    pub tokens: PackedArray<Code5>,
    pub country_names: NameTable,
    pub official_names: NameTable,
    pub country_codes: Vec<[Code5; COUNTRY_CODE_WIDTH]>,
    pub cities: PackedArray<Code5>,
    pub zone_codes: Vec<[Code5; ZONE_CODE_WIDTH]>,
    pub transitions: Vec<Transition>,
}

/// A validated, read-only dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) tokens: PackedArray<Code5>,
    pub(crate) country_names: NameTable,
    pub(crate) official_names: NameTable,
    pub(crate) country_codes: Vec<[Code5; COUNTRY_CODE_WIDTH]>,
    pub(crate) cities: PackedArray<Code5>,
    pub(crate) zone_codes: Vec<[Code5; ZONE_CODE_WIDTH]>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) index: TransitionIndex,
    name_capacity: usize,
}

fn check_count(what: &'static str, size: usize, max: usize) -> Result<(), DatasetError> {
    if size > max {
        return Err(DatasetError::TooLarge { what, size, max });
    }
    Ok(())
}

/// Letters only, no separators, no unused values.
fn check_letters(table: Table, codes: &[Code5], allow_separator: bool) -> Result<(), DatasetError> {
    match codes
        .iter()
        .position(|c| c.letter().is_none() && !(allow_separator && c.is_separator()))
    {
        Some(position) => Err(DatasetError::BadCode {
            table,
            position,
            value: codes[position].value(),
        }),
        None => Ok(()),
    }
}

/// Fixed-width code: at least one letter, then letters until padding starts,
/// then only padding.
fn check_fixed(table: Table, entry: usize, codes: &[Code5]) -> Result<(), DatasetError> {
    let letters = codes.iter().take_while(|c| c.letter().is_some()).count();
    let padding_ok = codes[letters..].iter().all(|c| c.is_separator());
    if letters == 0 || !padding_ok {
        let position = if letters == 0 { 0 } else { letters };
        return Err(DatasetError::BadCode {
            table,
            position: entry * codes.len() + position,
            value: codes[position.min(codes.len() - 1)].value(),
        });
    }
    Ok(())
}

/// First entry with no letters. It would render as `""` and match an empty query.
fn check_blank(table: Table, entries: &PackedArray<Code5>) -> Result<(), DatasetError> {
    match entries
        .iter()
        .position(|e| e.iter().all(|c| c.letter().is_none()))
    {
        Some(entry) => Err(DatasetError::EmptyEntry { table, entry }),
        None => Ok(()),
    }
}

/// Later duplicates would be unreachable by code lookups.
fn check_unique<T: PartialEq>(table: Table, codes: &[T]) -> Result<(), DatasetError> {
    match (1..codes.len()).find(|&i| codes[..i].contains(&codes[i])) {
        Some(entry) => Err(DatasetError::DuplicateCode { table, entry }),
        None => Ok(()),
    }
}

impl Dataset {
    /// Validate raw tables and build the lookup indices.
    pub fn from_parts(parts: DatasetParts) -> Result<Self, DatasetError> {
        let DatasetParts {
            tokens,
            country_names,
            official_names,
            country_codes,
            cities,
            zone_codes,
            transitions,
        } = parts;

        check_count("token count", tokens.len(), MAX_ENTITY_COUNT)?;
        check_count("country count", country_names.len(), MAX_ENTITY_COUNT)?;
        check_count("city count", cities.len(), MAX_ENTITY_COUNT)?;
        check_count("zone code count", zone_codes.len(), MAX_ENTITY_COUNT)?;
        check_count("transition count", transitions.len(), MAX_TRANSITION_COUNT)?;

        let country_count = country_names.len();
        for (table, actual) in [
            (Table::OfficialNames, official_names.len()),
            (Table::CountryCodes, country_codes.len()),
        ] {
            if actual != country_count {
                return Err(DatasetError::LengthMismatch {
                    table,
                    expected: country_count,
                    actual,
                });
            }
        }

        check_letters(Table::Tokens, tokens.data(), true)?;
        check_letters(Table::Cities, cities.data(), true)?;
        for (entry, code) in country_codes.iter().enumerate() {
            if let Err(DatasetError::BadCode { position, value, .. }) =
                check_letters(Table::CountryCodes, code, false)
            {
                return Err(DatasetError::BadCode {
                    table: Table::CountryCodes,
                    position: entry * COUNTRY_CODE_WIDTH + position,
                    value,
                });
            }
        }
        for (entry, code) in zone_codes.iter().enumerate() {
            check_fixed(Table::ZoneCodes, entry, code)?;
        }
        check_unique(Table::CountryCodes, &country_codes)?;
        check_unique(Table::ZoneCodes, &zone_codes)?;
        check_blank(Table::Tokens, &tokens)?;
        check_blank(Table::Cities, &cities)?;

        for (table, names) in [
            (Table::CountryNames, &country_names),
            (Table::OfficialNames, &official_names),
        ] {
            if let Some((entry, token)) = names.find_dangling(tokens.len()) {
                return Err(DatasetError::DanglingToken {
                    table,
                    entry,
                    token,
                });
            }
            if let Some(entry) = names.find_empty() {
                return Err(DatasetError::EmptyEntry { table, entry });
            }
        }

        for (position, t) in transitions.iter().enumerate() {
            for (kind, index, count) in [
                (EntityKind::Zone, t.zone.get(), zone_codes.len()),
                (EntityKind::City, t.city.get(), cities.len()),
                (EntityKind::Country, t.country.get(), country_count),
            ] {
                if index >= count {
                    return Err(DatasetError::DanglingReference {
                        position,
                        kind,
                        index,
                    });
                }
            }
        }
        if let Some(position) = transitions.windows(2).position(|w| w[0].start > w[1].start) {
            return Err(DatasetError::UnsortedTransitions {
                position: position + 1,
            });
        }

        let index = TransitionIndex::build(
            &transitions,
            zone_codes.len(),
            cities.len(),
            country_count,
        );

        let mut dataset = Self {
            tokens,
            country_names,
            official_names,
            country_codes,
            cities,
            zone_codes,
            transitions,
            index,
            name_capacity: 0,
        };
        dataset.name_capacity = dataset.longest_rendered_name();

        debug!(
            tokens = dataset.token_count(),
            countries = dataset.country_count(),
            cities = dataset.city_count(),
            zone_codes = dataset.zone_count(),
            transitions = dataset.transitions.len(),
            "dataset validated"
        );

        Ok(dataset)
    }

    fn longest_rendered_name(&self) -> usize {
        let mut buf = String::new();
        let mut longest = ZONE_CODE_WIDTH.max(COUNTRY_CODE_WIDTH);
        for i in 0..self.country_count() {
            for names in [&self.country_names, &self.official_names] {
                buf.clear();
                let len = names.render_into(i, &self.tokens, &mut buf).unwrap_or(0);
                longest = longest.max(len);
            }
        }
        for city in self.cities.iter() {
            buf.clear();
            longest = longest.max(render_codes(city, &mut buf));
        }
        longest
    }

    // ------------------------------------------------------------------------
    // Sizes
    // ------------------------------------------------------------------------

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn country_count(&self) -> usize {
        self.country_names.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Number of distinct zone abbreviations.
    pub fn zone_count(&self) -> usize {
        self.zone_codes.len()
    }

    /// The transition table, ascending by `start`.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Longest rendered name or code, in bytes. A buffer this big never
    /// reallocates while rendering anything from this dataset.
    pub fn name_capacity(&self) -> usize {
        self.name_capacity
    }

    /// Earliest and latest transition start.
    pub fn time_span(&self) -> Option<(i64, i64)> {
        Some((self.transitions.first()?.start, self.transitions.last()?.start))
    }

    /// Whether names use u16 token indices.
    pub fn has_wide_names(&self) -> bool {
        self.country_names.is_wide()
    }

    /// Lookups against this dataset with the default configuration.
    pub fn finder(&self) -> Finder<'_> {
        Finder::new(self)
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Append the common name of `idx` to `out`. Returns bytes written.
    pub fn render_country_name_into(&self, idx: CountryIdx, out: &mut String) -> Option<usize> {
        self.country_names.render_into(idx.get(), &self.tokens, out)
    }

    /// Append the official name of `idx` to `out`. Returns bytes written.
    pub fn render_official_name_into(&self, idx: CountryIdx, out: &mut String) -> Option<usize> {
        self.official_names.render_into(idx.get(), &self.tokens, out)
    }

    pub fn render_country_code_into(&self, idx: CountryIdx, out: &mut String) -> Option<usize> {
        self.country_codes
            .get(idx.get())
            .map(|code| render_fixed(code, out))
    }

    pub fn render_city_into(&self, idx: CityIdx, out: &mut String) -> Option<usize> {
        self.cities.get(idx.get()).map(|city| render_codes(city, out))
    }

    pub fn render_zone_code_into(&self, idx: ZoneIdx, out: &mut String) -> Option<usize> {
        self.zone_codes
            .get(idx.get())
            .map(|code| render_fixed(code, out))
    }

    pub fn render_country_name(&self, idx: CountryIdx) -> Option<String> {
        let mut out = String::with_capacity(self.name_capacity);
        self.render_country_name_into(idx, &mut out).map(|_| out)
    }

    pub fn render_official_name(&self, idx: CountryIdx) -> Option<String> {
        let mut out = String::with_capacity(self.name_capacity);
        self.render_official_name_into(idx, &mut out).map(|_| out)
    }

    pub fn render_country_code(&self, idx: CountryIdx) -> Option<String> {
        let mut out = String::with_capacity(COUNTRY_CODE_WIDTH);
        self.render_country_code_into(idx, &mut out).map(|_| out)
    }

    pub fn render_city(&self, idx: CityIdx) -> Option<String> {
        let mut out = String::with_capacity(self.name_capacity);
        self.render_city_into(idx, &mut out).map(|_| out)
    }

    pub fn render_zone_code(&self, idx: ZoneIdx) -> Option<String> {
        let mut out = String::with_capacity(ZONE_CODE_WIDTH);
        self.render_zone_code_into(idx, &mut out).map(|_| out)
    }

    pub fn render_token(&self, idx: TokenIdx) -> Option<String> {
        let mut out = String::new();
        self.tokens
            .get(idx.get())
            .map(|token| render_codes(token, &mut out))
            .map(|_| out)
    }
}
