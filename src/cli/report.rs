// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What `lookup` and `inspect` print.
//!
//! Kept apart from `main.rs` so the exact lines can be tested against the
//! sample dataset without spawning the binary.

use serde::Serialize;
use tinytz::binary::read_header;
use tinytz::{
    CityIdx, CountryIdx, Dataset, DatasetError, Finder, Lookup, ResolveError, ZoneIdx,
};

use super::display::format_offset;

/// The demo walk-through: the query tried as a country code, a zone code, a
/// city and a country, each followed by the offset at `at`.
pub fn lookup_lines(finder: &Finder<'_>, query: &str, at: i64, k: usize) -> Vec<String> {
    let mut lines = Vec::new();
    country_code_lines(finder, query, at, &mut lines);
    zone_code_lines(finder, query, at, &mut lines);
    city_lines(finder, query, at, k, &mut lines);
    country_lines(finder, query, at, k, &mut lines);
    lines
}

fn offset_text(offset: Result<i32, ResolveError>) -> String {
    match offset {
        Ok(minutes) => format!("{} ({})", minutes, format_offset(minutes)),
        Err(ResolveError::MultiZones { .. }) => "multiple zones".to_string(),
        Err(_) => "none".to_string(),
    }
}

fn country_offset_line(dataset: &Dataset, idx: CountryIdx, name: &str, at: i64) -> String {
    match dataset.offset_by_country(idx, at) {
        Err(ResolveError::MultiZones { .. }) => {
            format!("multiple zones found for country {}", name)
        }
        offset => format!("offset for country {}: {}", name, offset_text(offset)),
    }
}

fn country_code_lines(finder: &Finder<'_>, query: &str, at: i64, lines: &mut Vec<String>) {
    let dataset = finder.dataset();
    let Some(idx) = finder.find_country_code(query).exact() else {
        return;
    };
    let code = dataset.render_country_code(idx).unwrap_or_default();
    lines.push(format!("matched country code: {}", code));
    lines.push(country_offset_line(dataset, idx, &code, at));
}

fn zone_code_lines(finder: &Finder<'_>, query: &str, at: i64, lines: &mut Vec<String>) {
    let dataset = finder.dataset();
    let Some(idx) = finder.find_zone_code(query).exact() else {
        return;
    };
    let code = zone_name(dataset, idx);
    lines.push(format!("matched zone code: {}", code));
    lines.push(format!(
        "offset for zone {}: {}",
        code,
        offset_text(dataset.offset_by_zone(idx, at))
    ));
}

fn zone_name(dataset: &Dataset, idx: ZoneIdx) -> String {
    dataset.render_zone_code(idx).unwrap_or_default()
}

fn city_name(dataset: &Dataset, idx: CityIdx) -> String {
    dataset.render_city(idx).unwrap_or_default()
}

fn city_lines(finder: &Finder<'_>, query: &str, at: i64, k: usize, lines: &mut Vec<String>) {
    let dataset = finder.dataset();
    match finder.find_city(query, k) {
        Lookup::Exact(idx) => {
            let name = city_name(dataset, idx);
            lines.push(format!("exact matched city: {}", name));
            lines.push(format!(
                "offset for city {}: {}",
                name,
                offset_text(dataset.offset_by_city(idx, at))
            ));
        }
        Lookup::Scored(matches) if !matches.is_empty() => {
            for m in matches {
                lines.push(format!(
                    "matched city: {} score: {} offset: {}",
                    city_name(dataset, m.index),
                    m.score,
                    offset_text(dataset.offset_by_city(m.index, at))
                ));
            }
        }
        _ => lines.push("no matched city".to_string()),
    }
}

fn country_lines(finder: &Finder<'_>, query: &str, at: i64, k: usize, lines: &mut Vec<String>) {
    let dataset = finder.dataset();
    match finder.find_country(query, k) {
        Lookup::Exact(idx) => {
            let name = dataset.render_country_name(idx).unwrap_or_default();
            lines.push(format!("exact matched country: {}", name));
            lines.push(country_offset_line(dataset, idx, &name, at));
        }
        Lookup::Scored(matches) if !matches.is_empty() => {
            for m in matches {
                lines.push(format!(
                    "matched country: {} score: {} offset: {}",
                    dataset.render_country_name(m.index).unwrap_or_default(),
                    m.score,
                    offset_text(dataset.offset_by_country(m.index, at))
                ));
            }
        }
        _ => lines.push("no matched country".to_string()),
    }
}

// ============================================================================
// INSPECT
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub name: &'static str,
    pub bytes: u32,
}

/// Summary of a dataset file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub file_size: usize,
    pub version: u8,
    pub wide_names: bool,
    pub tokens: usize,
    pub countries: usize,
    pub cities: usize,
    pub zone_codes: usize,
    pub transitions: usize,
    pub name_capacity: usize,
    pub first_transition: Option<i64>,
    pub last_transition: Option<i64>,
    /// Smallest offset any transition carries, in minutes.
    pub westmost_offset: Option<i32>,
    pub eastmost_offset: Option<i32>,
    pub sections: Vec<SectionReport>,
}

impl InspectReport {
    /// Validate the whole file, then describe it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let header = read_header(bytes)?;
        let dataset = Dataset::from_bytes(bytes)?;
        let span = dataset.time_span();
        let offsets = dataset.transitions().iter().map(|t| t.offset_minutes);

        let sections = vec![
            SectionReport { name: "tokens", bytes: header.tokens_len },
            SectionReport { name: "country names", bytes: header.country_names_len },
            SectionReport { name: "official names", bytes: header.official_names_len },
            SectionReport { name: "country codes", bytes: header.country_codes_len },
            SectionReport { name: "cities", bytes: header.cities_len },
            SectionReport { name: "zone codes", bytes: header.zone_codes_len },
            SectionReport { name: "transitions", bytes: header.transitions_len },
        ];

        Ok(Self {
            file_size: bytes.len(),
            version: header.version,
            wide_names: dataset.has_wide_names(),
            tokens: dataset.token_count(),
            countries: dataset.country_count(),
            cities: dataset.city_count(),
            zone_codes: dataset.zone_count(),
            transitions: dataset.transitions().len(),
            name_capacity: dataset.name_capacity(),
            first_transition: span.map(|(first, _)| first),
            last_transition: span.map(|(_, last)| last),
            westmost_offset: offsets.clone().min(),
            eastmost_offset: offsets.max(),
            sections,
        })
    }
}
