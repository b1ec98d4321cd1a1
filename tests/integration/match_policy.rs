//! Exact versus legacy-prefix matching, end to end.

use tinytz::{
    CityIdx, CountryIdx, Finder, FinderConfig, Lookup, MatchKind, MatchPolicy, ZoneIdx,
};

use crate::common::sample_dataset;

fn finder_config(policy: MatchPolicy) -> FinderConfig {
    FinderConfig {
        match_policy: policy,
        ..FinderConfig::default()
    }
}

#[test]
fn test_exact_rejects_longer_queries() {
    let ds = sample_dataset();
    let finder = Finder::with_config(&ds, finder_config(MatchPolicy::Exact));
    assert_eq!(finder.find_city("parisian", 2).kind(), MatchKind::Score);
    assert_eq!(finder.find_zone_code("estx"), Lookup::None);
    assert_eq!(finder.find_country("japanese", 2).kind(), MatchKind::Score);
}

#[test]
fn test_legacy_prefix_accepts_longer_queries() {
    let ds = sample_dataset();
    let finder = Finder::with_config(&ds, finder_config(MatchPolicy::LegacyPrefix));
    assert_eq!(finder.find_city("parisian", 2), Lookup::Exact(CityIdx(3)));
    assert_eq!(finder.find_zone_code("estx"), Lookup::Exact(ZoneIdx(2)));
    assert_eq!(finder.find_country("japanese", 2), Lookup::Exact(CountryIdx(4)));
}

#[test]
fn test_neither_policy_accepts_shorter_queries() {
    let ds = sample_dataset();
    for policy in [MatchPolicy::Exact, MatchPolicy::LegacyPrefix] {
        let finder = Finder::with_config(&ds, finder_config(policy));
        assert_eq!(finder.find_city("pari", 2).kind(), MatchKind::Score, "{}", policy);
        assert_eq!(finder.find_country_code("G"), Lookup::None, "{}", policy);
    }
}

#[test]
fn test_policy_from_json_config() {
    let config: FinderConfig =
        serde_json::from_str(r#"{"matchPolicy": "legacy-prefix", "defaultCount": 4}"#).unwrap();
    assert_eq!(config.match_policy, MatchPolicy::LegacyPrefix);
    assert_eq!(config.default_count, 4);
}
