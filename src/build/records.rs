// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One row of the country list. Input order is significance order.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Common name ("United Kingdom").
    pub name: String,
    /// ISO 3166 alpha-2 code ("GB").
    pub code: String,
    /// Official name; the common name when absent.
    #[serde(default)]
    pub official_name: Option<String>,
}

impl CountryRecord {
    pub fn new(name: &str, code: &str, official_name: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            official_name: Some(official_name.to_string()),
        }
    }

    pub fn official_name(&self) -> &str {
        self.official_name.as_deref().unwrap_or(&self.name)
    }
}

/// One transition of one tz database zone.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// tz database name ("Europe/London").
    pub zone_name: String,
    /// Alpha-2 code of the owning country.
    pub country_code: String,
    /// Abbreviation in effect ("BST").
    pub abbreviation: String,
    /// Epoch seconds.
    pub start: i64,
    pub offset_minutes: i32,
    #[serde(default)]
    pub is_dst: bool,
}

impl ZoneRecord {
    pub fn new(
        zone_name: &str,
        country_code: &str,
        abbreviation: &str,
        start: i64,
        offset_minutes: i32,
        is_dst: bool,
    ) -> Self {
        Self {
            zone_name: zone_name.to_string(),
            country_code: country_code.to_string(),
            abbreviation: abbreviation.to_string(),
            start,
            offset_minutes,
            is_dst,
        }
    }

    /// City name as stored: last path segment, letters only, lowercase.
    /// "America/Port_of_Spain" is "portofspain".
    pub fn city_name(&self) -> String {
        let last = self.zone_name.rsplit('/').next().unwrap_or_default();
        last.bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| char::from(b.to_ascii_lowercase()))
            .collect()
    }
}
