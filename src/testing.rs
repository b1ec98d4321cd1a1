//! Test fixtures shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides one canonical small dataset so every test agrees on indices.
//!
//! | idx | country        | code | cities                | zone codes       |
//! |-----|----------------|------|-----------------------|------------------|
//! | 0   | United States  | US   | losangeles, newyork   | pdt pst est edt  |
//! | 1   | United Kingdom | GB   | london                | gmt bst          |
//! | 2   | France         | FR   | paris                 | cet cest         |
//! | 3   | Germany        | DE   | berlin                | cet cest         |
//! | 4   | Japan          | JP   | tokyo                 | jst              |
//! | 5   | Australia      | AU   | sydney, perth         | aedt aest awst   |
//! | 6   | Iceland        | IS   | (none)                |                  |
//!
//! Cities are indexed 0..=7 in the order above; zone codes 0..=11 in the
//! order above, first appearance wins.

#![doc(hidden)]

use crate::build::{CountryRecord, DatasetBuilder, ZoneRecord};
use crate::dataset::{Dataset, DatasetParts};

pub fn sample_countries() -> Vec<CountryRecord> {
    vec![
        CountryRecord::new("United States", "US", "United States of America"),
        CountryRecord::new(
            "United Kingdom",
            "GB",
            "United Kingdom of Great Britain and Northern Ireland",
        ),
        CountryRecord::new("France", "FR", "French Republic"),
        CountryRecord::new("Germany", "DE", "Federal Republic of Germany"),
        CountryRecord::new("Japan", "JP", "Japan"),
        CountryRecord::new("Australia", "AU", "Commonwealth of Australia"),
        CountryRecord::new("Iceland", "IS", "Iceland"),
    ]
}

/// 2023-2024 transitions, offsets in minutes.
pub fn sample_zones() -> Vec<ZoneRecord> {
    vec![
        ZoneRecord::new("America/Los_Angeles", "US", "PDT", 1678611600, -420, true),
        ZoneRecord::new("America/Los_Angeles", "US", "PST", 1699174800, -480, false),
        ZoneRecord::new("America/Los_Angeles", "US", "PDT", 1710061200, -420, true),
        ZoneRecord::new("America/Los_Angeles", "US", "PST", 1730624400, -480, false),
        ZoneRecord::new("America/New_York", "US", "EST", 1699164000, -300, false),
        ZoneRecord::new("America/New_York", "US", "EDT", 1710054000, -240, true),
        ZoneRecord::new("Europe/London", "GB", "GMT", 1698541200, 0, false),
        ZoneRecord::new("Europe/London", "GB", "BST", 1711846800, 60, true),
        ZoneRecord::new("Europe/London", "GB", "GMT", 1729990800, 0, false),
        ZoneRecord::new("Europe/Paris", "FR", "CET", 1698541200, 60, false),
        ZoneRecord::new("Europe/Paris", "FR", "CEST", 1711846800, 120, true),
        ZoneRecord::new("Europe/Berlin", "DE", "CET", 1698541200, 60, false),
        ZoneRecord::new("Europe/Berlin", "DE", "CEST", 1711846800, 120, true),
        ZoneRecord::new("Asia/Tokyo", "JP", "JST", -577962000, 540, false),
        ZoneRecord::new("Australia/Sydney", "AU", "AEDT", 1696089600, 660, true),
        ZoneRecord::new("Australia/Sydney", "AU", "AEST", 1712419200, 600, false),
        ZoneRecord::new("Australia/Perth", "AU", "AWST", -2337925404, 480, false),
    ]
}

fn sample_builder() -> DatasetBuilder {
    let mut builder = DatasetBuilder::new();
    builder
        .add_countries(sample_countries())
        .add_zones(sample_zones());
    builder
}

/// Raw tables of the sample dataset, for tests that break them on purpose.
pub fn sample_parts() -> DatasetParts {
    sample_builder()
        .build_parts()
        .expect("sample records build")
}

pub fn sample_dataset() -> Dataset {
    sample_builder().build().expect("sample dataset is valid")
}
