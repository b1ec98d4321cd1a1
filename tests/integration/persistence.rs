//! Saving, loading and rejecting dataset files.

use std::fs;

use tempfile::TempDir;
use tinytz::binary::{read_header, DatasetHeader, VERSION};
use tinytz::{CityIdx, CountryIdx, Dataset, DatasetError, Lookup};

use crate::common::{reseal, sample_bytes, sample_dataset, JUL_2024};

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.ttzd");

    let ds = sample_dataset();
    ds.save(&path).unwrap();
    let loaded = Dataset::load(&path).unwrap();

    assert_eq!(loaded.country_count(), ds.country_count());
    assert_eq!(loaded.transitions(), ds.transitions());
    assert_eq!(loaded.finder().find_city("Londn", 2).best(), Some(CityIdx(2)));
    assert_eq!(loaded.finder().find_country("Japan", 2), Lookup::Exact(CountryIdx(4)));
    assert_eq!(loaded.offset_by_country(CountryIdx(1), JUL_2024), Ok(60));
}

#[test]
fn test_saved_bytes_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.ttzd");
    let b = dir.path().join("b.ttzd");
    sample_dataset().save(&a).unwrap();
    sample_dataset().save(&b).unwrap();
    assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Dataset::load(dir.path().join("missing.ttzd"));
    assert!(matches!(result, Err(DatasetError::Io(_))));
}

#[test]
fn test_corrupted_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.ttzd");
    let mut bytes = sample_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x01;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        Dataset::load(&path),
        Err(DatasetError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_header_describes_file() {
    let bytes = sample_bytes();
    let header = read_header(&bytes).unwrap();
    assert_eq!(header.version, VERSION);
    assert_eq!(header.country_count, 7);
    assert_eq!(header.city_count, 8);
    assert_eq!(header.code_count, 12);
    assert_eq!(header.transition_count, 17);
    assert_eq!(header.section_offsets().total_size(), bytes.len());
    assert!(bytes.len() > DatasetHeader::SIZE);
}

#[test]
fn test_resealed_garbage_is_still_rejected() {
    // Valid checksum, broken content: the first transition's zone varint
    // (one byte, code 11) now points past the 12-entry zone table
    let mut bytes = sample_bytes();
    let header = read_header(&bytes).unwrap();
    let transitions = header.section_offsets().transitions;
    bytes[transitions.0] = 0x7F;
    reseal(&mut bytes);

    let err = Dataset::from_bytes(&bytes).unwrap_err();
    assert!(
        matches!(err, DatasetError::DanglingReference { .. }),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_version_bump_is_rejected() {
    let mut bytes = sample_bytes();
    bytes[4] = VERSION + 1;
    reseal(&mut bytes);
    assert!(matches!(
        Dataset::from_bytes(&bytes),
        Err(DatasetError::UnsupportedVersion(v)) if v == VERSION + 1
    ));
}
