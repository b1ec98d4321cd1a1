//! Resolver properties on randomly built datasets.

use proptest::prelude::*;
use tinytz::{
    BuildConfig, CityIdx, CountryIdx, CountryRecord, Dataset, DatasetBuilder, ResolveError,
    ScanStrategy, Transition, ZoneIdx, ZoneRecord,
};

const CITIES: [&str; 5] = ["Area/Alpha", "Area/Beta", "Area/Gamma", "Area/Delta", "Area/Omega"];
const ABBREVIATIONS: [&str; 4] = ["AAT", "BBT", "CCST", "DT"];
const COUNTRIES: [&str; 3] = ["AA", "BB", "CC"];

fn zone_strategy() -> impl Strategy<Value = ZoneRecord> {
    (
        0..CITIES.len(),
        0..ABBREVIATIONS.len(),
        0..COUNTRIES.len(),
        -2_000i64..2_000,
        -720i32..=840,
        any::<bool>(),
    )
        .prop_map(|(city, abbr, country, start, offset, dst)| {
            ZoneRecord::new(CITIES[city], COUNTRIES[country], ABBREVIATIONS[abbr], start, offset, dst)
        })
}

fn build(zones: Vec<ZoneRecord>, config: BuildConfig) -> Dataset {
    let mut builder = DatasetBuilder::with_config(config);
    builder
        .add_countries([
            CountryRecord::new("Aland", "AA", "Aland"),
            CountryRecord::new("Bland", "BB", "Bland"),
            CountryRecord::new("Cland", "CC", "Cland"),
        ])
        .add_zones(zones);
    builder.build().unwrap()
}

/// Last transition in table order for the key that started before `at`.
fn oracle(ds: &Dataset, at: i64, is_key: impl Fn(&Transition) -> bool) -> Option<Transition> {
    ds.transitions()
        .iter()
        .filter(|t| is_key(t) && t.start < at)
        .last()
        .copied()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: Linear and indexed resolution agree, and match the oracle.
    #[test]
    fn prop_strategies_agree(
        zones in prop::collection::vec(zone_strategy(), 0..120),
        at in -2_500i64..2_500,
    ) {
        let ds = build(zones, BuildConfig::default());

        for c in 0..ds.city_count() as u16 {
            let idx = CityIdx(c);
            let linear = ds.transition_by_city_using(idx, at, ScanStrategy::Linear).ok().copied();
            let indexed = ds.transition_by_city_using(idx, at, ScanStrategy::Indexed).ok().copied();
            prop_assert_eq!(linear, indexed);
            prop_assert_eq!(linear, oracle(&ds, at, |t| t.city == idx));
        }
        for z in 0..ds.zone_count() as u16 {
            let idx = ZoneIdx(z);
            let linear = ds.transition_by_zone_using(idx, at, ScanStrategy::Linear).ok().copied();
            let indexed = ds.transition_by_zone_using(idx, at, ScanStrategy::Indexed).ok().copied();
            prop_assert_eq!(linear, indexed);
            prop_assert_eq!(linear, oracle(&ds, at, |t| t.zone == idx));
        }
        for c in 0..ds.country_count() as u16 {
            let idx = CountryIdx(c);
            prop_assert_eq!(
                ds.transition_by_country_using(idx, at, ScanStrategy::Linear),
                ds.transition_by_country_using(idx, at, ScanStrategy::Indexed)
            );
        }
    }

    /// Property: A country answer is either a single city's latest
    /// transition, or MultiZones exactly when two cities are active.
    #[test]
    fn prop_country_ambiguity(
        zones in prop::collection::vec(zone_strategy(), 0..60),
        at in -2_500i64..2_500,
    ) {
        let ds = build(zones, BuildConfig::default());
        for c in 0..ds.country_count() as u16 {
            let idx = CountryIdx(c);
            let mut cities: Vec<CityIdx> = ds
                .transitions()
                .iter()
                .filter(|t| t.country == idx && t.start < at)
                .map(|t| t.city)
                .collect();
            cities.sort();
            cities.dedup();

            let result = ds.offset_by_country(idx, at);
            match cities.len() {
                0 => prop_assert_eq!(result, Err(ResolveError::NoMatch)),
                1 => prop_assert_eq!(
                    result,
                    Ok(oracle(&ds, at, |t| t.country == idx).unwrap().offset_minutes)
                ),
                _ => prop_assert_eq!(result, Err(ResolveError::MultiZones { country: idx })),
            }
        }
    }

    /// Property: The build output is sorted by start.
    #[test]
    fn prop_transitions_sorted(zones in prop::collection::vec(zone_strategy(), 0..80)) {
        let ds = build(zones, BuildConfig::default());
        prop_assert!(ds.transitions().windows(2).all(|w| w[0].start <= w[1].start));
    }

    /// Property: A `since` window changes no answer at or after `since`.
    #[test]
    fn prop_since_window_preserves_answers(
        zones in prop::collection::vec(zone_strategy(), 1..80),
        since in -2_000i64..2_000,
        delta in 0i64..1_000,
    ) {
        let full = build(zones.clone(), BuildConfig::default());
        let windowed = build(zones, BuildConfig { since: Some(since), ..BuildConfig::default() });
        let at = since + delta;

        // Window survivors are interned in their own order, so match cities by name
        prop_assert_eq!(full.city_count(), windowed.city_count());
        for c in 0..full.city_count() as u16 {
            let name = full.render_city(CityIdx(c));
            let other = (0..windowed.city_count() as u16)
                .map(CityIdx)
                .find(|&i| windowed.render_city(i) == name);
            prop_assert!(other.is_some());
            prop_assert_eq!(
                full.offset_by_city(CityIdx(c), at),
                windowed.offset_by_city(other.unwrap(), at)
            );
        }
    }
}
