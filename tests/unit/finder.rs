//! Lookup behavior on datasets built through the public builder.

use crate::common::{build, sample_countries, sample_dataset, sample_zones};
use tinytz::{
    CityIdx, CountryIdx, CountryRecord, Finder, FinderConfig, Lookup, MatchKind, MatchPolicy,
    ZoneIdx, ZoneRecord,
};

/// Three-letter word for `i`, never a stop-word below 341.
fn word(i: usize) -> String {
    [i / 676 % 26, i / 26 % 26, i % 26]
        .iter()
        .map(|&n| char::from(b'a' + n as u8))
        .collect()
}

/// 300 countries, enough distinct tokens to need u16 name indices.
fn many_countries() -> Vec<CountryRecord> {
    (0..300)
        .map(|i| {
            let code = word(i)[1..].to_string();
            CountryRecord::new(
                &format!("Land {}", word(i)),
                &code,
                &format!("Republic of {}", word(i)),
            )
        })
        .collect()
}

#[test]
fn test_wide_name_tables_still_resolve_names() {
    let ds = build(many_countries(), Vec::new());
    assert!(ds.has_wide_names());
    assert_eq!(ds.country_count(), 300);

    let finder = ds.finder();
    assert_eq!(
        finder.find_country("Republic of akz", 2),
        Lookup::Exact(CountryIdx(285))
    );
    assert_eq!(finder.find_country_code("KZ"), Lookup::Exact(CountryIdx(285)));
    assert_eq!(ds.render_country_name(CountryIdx(285)).as_deref(), Some("landakz"));
}

#[test]
fn test_lookups_ignore_case_and_punctuation() {
    let ds = sample_dataset();
    let finder = ds.finder();
    assert_eq!(finder.find_city("LOS-ANGELES", 2), Lookup::Exact(CityIdx(0)));
    assert_eq!(finder.find_city("  Tokyo!  ", 2), Lookup::Exact(CityIdx(5)));
    assert_eq!(finder.find_zone_code("a.e.d.t"), Lookup::Exact(ZoneIdx(9)));
    assert_eq!(finder.find_country("the FRENCH republic", 2), Lookup::Exact(CountryIdx(2)));
}

#[test]
fn test_stop_words_do_not_block_exact_matches() {
    let ds = sample_dataset();
    assert_eq!(
        ds.finder().find_country("Commonwealth of the Australia", 2),
        Lookup::Exact(CountryIdx(5))
    );
}

#[test]
fn test_scored_results_are_descending_and_bounded() {
    let ds = sample_dataset();
    for query in ["sidney", "pert", "berln", "nwyork"] {
        let result = ds.finder().find_city(query, 3);
        assert_eq!(result.kind(), MatchKind::Score, "{}", query);
        let Lookup::Scored(matches) = result else {
            unreachable!();
        };
        assert_eq!(matches.len(), 3);
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_best_candidate_for_typos() {
    let ds = sample_dataset();
    let finder = ds.finder();
    assert_eq!(finder.find_city("sidney", 1).best(), Some(CityIdx(6)));
    assert_eq!(finder.find_city("berln", 1).best(), Some(CityIdx(4)));
    assert_eq!(finder.find_country("Japn", 1).best(), Some(CountryIdx(4)));
}

#[test]
fn test_policy_comes_from_config() {
    let ds = sample_dataset();
    let config = FinderConfig {
        match_policy: MatchPolicy::LegacyPrefix,
        default_count: 5,
    };
    let finder = Finder::with_config(&ds, config);
    assert_eq!(finder.config().default_count, 5);
    assert_eq!(finder.find_country("germanyish", 2), Lookup::Exact(CountryIdx(3)));
    assert_eq!(ds.finder().find_country("germanyish", 2).kind(), MatchKind::Score);
}

#[test]
fn test_first_matching_zone_code_wins() {
    // Two zones share an abbreviation; the code is interned once
    let ds = build(
        vec![
            CountryRecord::new("Alpha", "AA", "Alpha"),
            CountryRecord::new("Beta", "BB", "Beta"),
        ],
        vec![
            ZoneRecord::new("X/One", "AA", "XST", 0, 60, false),
            ZoneRecord::new("X/Two", "BB", "XST", 10, 120, false),
        ],
    );
    assert_eq!(ds.zone_count(), 1);
    assert_eq!(ds.finder().find_zone_code("xst"), Lookup::Exact(ZoneIdx(0)));
    // Latest transition for the code wins
    assert_eq!(ds.offset_by_zone(ZoneIdx(0), 100), Ok(120));
}

#[test]
fn test_letterless_country_never_matches_everything() {
    let mut countries = sample_countries();
    countries.push(CountryRecord::new("123", "QQ", "123"));
    let ds = build(countries, sample_zones());
    assert_eq!(ds.country_count(), 7);
    assert_eq!(ds.finder().find_country_code("QQ"), Lookup::None);

    let legacy = Finder::with_config(
        &ds,
        FinderConfig {
            match_policy: MatchPolicy::LegacyPrefix,
            ..FinderConfig::default()
        },
    );
    assert_eq!(legacy.find_country("zzzz", 2).kind(), MatchKind::Score);
    assert_eq!(ds.finder().find_country("!!", 2).kind(), MatchKind::Score);
    assert_eq!(legacy.find_city("", 2).kind(), MatchKind::Score);
}
