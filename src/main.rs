use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use tinytz::{
    BuildConfig, CountryRecord, Dataset, DatasetBuilder, Finder, FinderConfig, MatchPolicy,
    ZoneRecord,
};

mod cli;
use cli::display::{self, format_offset, format_size, themed, BOLD, CYAN, GREEN};
use cli::report::{lookup_lines, InspectReport};
use cli::tracer::MinimalTracer;
use cli::{Cli, Commands};

fn main() {
    // A second subscriber can only come from an embedding test harness
    let _ = MinimalTracer::register();

    let result = match Cli::parse().command {
        Commands::Build {
            countries,
            zones,
            output,
            max_countries,
            since,
            until,
        } => run_build(
            &countries,
            &zones,
            &output,
            BuildConfig {
                max_countries,
                since,
                until,
            },
        ),
        Commands::Lookup {
            query,
            dataset,
            at,
            count,
            policy,
        } => run_lookup(&query, &dataset, at, count, policy),
        Commands::Inspect { file, json } => run_inspect(&file, json),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn run_build(countries: &Path, zones: &Path, output: &Path, config: BuildConfig) -> Result<()> {
    let countries: Vec<CountryRecord> = read_json(countries)?;
    let zones: Vec<ZoneRecord> = read_json(zones)?;
    let (country_input, zone_input) = (countries.len(), zones.len());

    let dataset = DatasetBuilder::with_config(config)
        .add_countries(countries)
        .add_zones(zones)
        .build()
        .context("building dataset")?;

    if dataset.country_count() == 0 {
        bail!("none of the {} country records are usable", country_input);
    }

    dataset
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{} {} countries ({} read), {} cities, {} zone codes, {} transitions ({} zone records)",
        themed(GREEN, &[BOLD], "built"),
        dataset.country_count(),
        country_input,
        dataset.city_count(),
        dataset.zone_count(),
        dataset.transitions().len(),
        zone_input,
    );
    println!("  → {}", output.display());
    Ok(())
}

fn now() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before 1970")?;
    i64::try_from(elapsed.as_secs()).context("system clock out of range")
}

fn run_lookup(
    query: &str,
    path: &Path,
    at: Option<i64>,
    count: Option<usize>,
    policy: MatchPolicy,
) -> Result<()> {
    let dataset =
        Dataset::load(path).with_context(|| format!("loading dataset {}", path.display()))?;
    let config = FinderConfig {
        match_policy: policy,
        ..FinderConfig::default()
    };
    let finder = Finder::with_config(&dataset, config);
    let at = match at {
        Some(at) => at,
        None => now()?,
    };
    let k = count.unwrap_or(config.default_count);

    println!("current time: {}", at);
    for line in lookup_lines(&finder, query, at, k) {
        println!("{}", line);
    }
    Ok(())
}

fn run_inspect(path: &Path, json: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let report = InspectReport::from_bytes(&bytes)
        .with_context(|| format!("{} is not a valid dataset", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let span = match (report.first_transition, report.last_transition) {
        (Some(first), Some(last)) => format!("{} .. {}", first, last),
        _ => "empty".to_string(),
    };

    println!();
    display::section_top("DATASET");
    display::field("file", &themed(CYAN, &[], &path.display().to_string()));
    display::field("size", &format_size(report.file_size));
    display::field("version", &report.version.to_string());
    display::field("checksum", &themed(GREEN, &[], "ok"));
    display::field("name indices", if report.wide_names { "u16" } else { "u8" });
    display::field("name capacity", &format!("{} bytes", report.name_capacity));
    display::section_bot();

    display::section_top("TABLES");
    display::field("tokens", &report.tokens.to_string());
    display::field("countries", &report.countries.to_string());
    display::field("cities", &report.cities.to_string());
    display::field("zone codes", &report.zone_codes.to_string());
    display::field("transitions", &report.transitions.to_string());
    display::field("time span", &span);
    display::section_bot();

    display::section_top("SECTIONS");
    for section in &report.sections {
        display::field(section.name, &format_size(section.bytes as usize));
    }
    display::section_bot();

    if let (Some(west), Some(east)) = (report.westmost_offset, report.eastmost_offset) {
        display::section_top("OFFSETS");
        display::field("westmost", &format_offset(west));
        display::field("eastmost", &format_offset(east));
        display::section_bot();
    }
    println!();
    Ok(())
}
