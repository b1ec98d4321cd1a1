//! Building datasets from the JSON records the CLI reads.

use tinytz::{
    BuildConfig, CityIdx, CountryIdx, CountryRecord, DatasetBuilder, Lookup, ResolveError,
    ZoneRecord,
};

const COUNTRIES: &str = r#"[
    {"name": "Brazil", "code": "BR", "officialName": "Federative Republic of Brazil"},
    {"name": "India", "code": "IN"},
    {"name": "Bad", "code": "B4D"},
    {"name": "Nepal", "code": "np", "officialName": "Federal Democratic Republic of Nepal"}
]"#;

const ZONES: &str = r#"[
    {"zoneName": "America/Sao_Paulo", "countryCode": "BR", "abbreviation": "BRT",
     "start": 1550368800, "offsetMinutes": -180},
    {"zoneName": "America/Manaus", "countryCode": "BR", "abbreviation": "AMT",
     "start": 0, "offsetMinutes": -240},
    {"zoneName": "Asia/Kolkata", "countryCode": "IN", "abbreviation": "IST",
     "start": -764145000, "offsetMinutes": 330, "isDst": false},
    {"zoneName": "Asia/Kathmandu", "countryCode": "NP", "abbreviation": "+0545",
     "start": 504901800, "offsetMinutes": 345},
    {"zoneName": "Europe/Nowhere", "countryCode": "XX", "abbreviation": "NWT",
     "start": 0, "offsetMinutes": 0}
]"#;

fn records() -> (Vec<CountryRecord>, Vec<ZoneRecord>) {
    (
        serde_json::from_str(COUNTRIES).unwrap(),
        serde_json::from_str(ZONES).unwrap(),
    )
}

#[test]
fn test_json_records_build_a_dataset() {
    let (countries, zones) = records();
    let mut builder = DatasetBuilder::new();
    builder.add_countries(countries).add_zones(zones);
    let ds = builder.build().unwrap();

    // "B4D" is skipped; Nepal's numeric abbreviation and the unknown
    // country's zone are dropped
    assert_eq!(ds.country_count(), 3);
    assert_eq!(ds.city_count(), 3);
    assert_eq!(ds.transitions().len(), 3);

    let finder = ds.finder();
    assert_eq!(finder.find_country_code("NP"), Lookup::Exact(CountryIdx(2)));
    // India has no official name; its common name stands in
    assert_eq!(ds.render_official_name(CountryIdx(1)).as_deref(), Some("india"));
    assert_eq!(finder.find_city("Kolkata", 2), Lookup::Exact(CityIdx(2)));
    assert_eq!(ds.offset_by_city(CityIdx(2), 1_700_000_000), Ok(330));
    assert_eq!(
        ds.offset_by_country(CountryIdx(2), 1_700_000_000),
        Err(ResolveError::NoMatch)
    );
    assert!(matches!(
        ds.offset_by_country(CountryIdx(0), 1_700_000_000),
        Err(ResolveError::MultiZones { .. })
    ));
}

#[test]
fn test_build_config_from_json() {
    let (countries, zones) = records();
    let config: BuildConfig = serde_json::from_str(r#"{"maxCountries": 1}"#).unwrap();
    let ds = DatasetBuilder::with_config(config)
        .add_countries(countries)
        .add_zones(zones)
        .build()
        .unwrap();
    assert_eq!(ds.country_count(), 1);
    assert!(ds.transitions().iter().all(|t| t.country == CountryIdx(0)));
}

#[test]
fn test_records_serialize_camel_case() {
    let record = ZoneRecord::new("Asia/Tokyo", "JP", "JST", 0, 540, false);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["zoneName"], "Asia/Tokyo");
    assert_eq!(json["offsetMinutes"], 540);
    assert_eq!(record.city_name(), "tokyo");
}
