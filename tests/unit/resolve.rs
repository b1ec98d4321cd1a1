//! Offset resolution through the public API.

use crate::common::{sample_dataset, sample_with, JUL_2023, JUL_2024, NOV_2023};
use tinytz::{
    BuildConfig, CityIdx, CountryIdx, EntityKind, ResolveError, ScanStrategy, ZoneIdx,
};

#[test]
fn test_dst_boundaries_for_london() {
    let ds = sample_dataset();
    let london = CityIdx(2);
    let bst_start = 1_711_846_800;
    assert_eq!(ds.offset_by_city(london, bst_start), Ok(0));
    assert_eq!(ds.offset_by_city(london, bst_start + 1), Ok(60));
    assert_eq!(ds.offset_by_city(london, JUL_2024), Ok(60));
    assert_eq!(ds.offset_by_city(london, 1_729_990_801), Ok(0));
}

#[test]
fn test_transition_carries_metadata() {
    let ds = sample_dataset();
    let t = ds.transition_by_city(CityIdx(0), JUL_2024).unwrap();
    assert_eq!(t.zone, ZoneIdx(0));
    assert_eq!(t.country, CountryIdx(0));
    assert!(t.is_dst);
    assert_eq!(ds.render_zone_code(t.zone).as_deref(), Some("pdt"));
}

#[test]
fn test_before_first_transition_is_no_match() {
    let ds = sample_dataset();
    assert_eq!(ds.offset_by_city(CityIdx(2), 0), Err(ResolveError::NoMatch));
    assert_eq!(ds.offset_by_zone(ZoneIdx(5), 0), Err(ResolveError::NoMatch));
}

#[test]
fn test_country_ambiguity_depends_on_time() {
    let ds = sample_dataset();
    assert_eq!(ds.offset_by_country(CountryIdx(0), JUL_2023), Ok(-420));
    assert_eq!(
        ds.offset_by_country(CountryIdx(0), NOV_2023),
        Err(ResolveError::MultiZones {
            country: CountryIdx(0)
        })
    );
}

#[test]
fn test_out_of_range_indices() {
    let ds = sample_dataset();
    assert_eq!(
        ds.offset_by_city(CityIdx(500), JUL_2024),
        Err(ResolveError::InvalidIndex {
            kind: EntityKind::City,
            index: 500,
            count: 8
        })
    );
    assert!(matches!(
        ds.offset_by_zone(ZoneIdx(u16::MAX), JUL_2024),
        Err(ResolveError::InvalidIndex { kind: EntityKind::Zone, .. })
    ));
}

#[test]
fn test_strategies_agree_on_every_key() {
    let ds = sample_dataset();
    let instants = [0, JUL_2023, NOV_2023, JUL_2024, i64::MAX, i64::MIN];
    for &at in &instants {
        for c in 0..ds.city_count() as u16 {
            assert_eq!(
                ds.transition_by_city_using(CityIdx(c), at, ScanStrategy::Linear),
                ds.transition_by_city_using(CityIdx(c), at, ScanStrategy::Indexed),
            );
        }
        for z in 0..ds.zone_count() as u16 {
            assert_eq!(
                ds.transition_by_zone_using(ZoneIdx(z), at, ScanStrategy::Linear),
                ds.transition_by_zone_using(ZoneIdx(z), at, ScanStrategy::Indexed),
            );
        }
        for c in 0..ds.country_count() as u16 {
            assert_eq!(
                ds.transition_by_country_using(CountryIdx(c), at, ScanStrategy::Linear),
                ds.transition_by_country_using(CountryIdx(c), at, ScanStrategy::Indexed),
            );
        }
    }
}

#[test]
fn test_since_window_keeps_answers_at_since() {
    let full = sample_dataset();
    let since = 1_710_000_000;
    let windowed = sample_with(BuildConfig {
        since: Some(since),
        ..BuildConfig::default()
    });
    assert!(windowed.transitions().len() < full.transitions().len());
    for c in 0..full.city_count() as u16 {
        for at in [since, since + 1, JUL_2024] {
            assert_eq!(
                windowed.offset_by_city(CityIdx(c), at),
                full.offset_by_city(CityIdx(c), at),
                "city {} at {}",
                c,
                at
            );
        }
    }
}

#[test]
fn test_until_window_freezes_the_last_offset() {
    let ds = sample_with(BuildConfig {
        until: Some(JUL_2024),
        ..BuildConfig::default()
    });
    // London's autumn 2024 change is gone, BST persists
    assert_eq!(ds.offset_by_city(CityIdx(2), 1_740_000_000), Ok(60));
}
