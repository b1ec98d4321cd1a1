//! Shared test utilities and fixtures.

#![allow(dead_code)]

use tinytz::{BuildConfig, CountryRecord, Dataset, DatasetBuilder, ZoneRecord};

// Re-export canonical fixtures from tinytz::testing
pub use tinytz::testing::{sample_countries, sample_dataset, sample_zones};

// ============================================================================
// INSTANTS
// ============================================================================

/// 2023-07-22. Only Los Angeles and Perth have transitions yet in the US and AU.
pub const JUL_2023: i64 = 1_690_000_000;

/// 2023-11-14, after the northern autumn changes.
pub const NOV_2023: i64 = 1_700_000_000;

/// 2024-07-03.
pub const JUL_2024: i64 = 1_720_000_000;

// ============================================================================
// BUILDERS
// ============================================================================

/// Build a dataset from the sample records with a custom config.
pub fn sample_with(config: BuildConfig) -> Dataset {
    let mut builder = DatasetBuilder::with_config(config);
    builder
        .add_countries(sample_countries())
        .add_zones(sample_zones());
    builder.build().expect("sample records build")
}

/// Build a dataset from arbitrary records.
pub fn build(countries: Vec<CountryRecord>, zones: Vec<ZoneRecord>) -> Dataset {
    let mut builder = DatasetBuilder::new();
    builder.add_countries(countries).add_zones(zones);
    builder.build().expect("records build")
}

/// Serialized sample dataset.
pub fn sample_bytes() -> Vec<u8> {
    sample_dataset().to_bytes().expect("sample dataset encodes")
}

/// Recompute the footer CRC after deliberately editing content bytes.
pub fn reseal(bytes: &mut [u8]) {
    let content_len = bytes.len() - tinytz::binary::DatasetFooter::SIZE;
    let crc = tinytz::binary::DatasetFooter::compute_crc32(&bytes[..content_len]);
    bytes[content_len..content_len + 4].copy_from_slice(&crc.to_le_bytes());
}
