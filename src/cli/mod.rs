// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the tinytz command-line interface.
//!
//! Three subcommands: `build` to pack country and zone records into a
//! dataset, `lookup` to run a query the way an embedded caller would, and
//! `inspect` to describe a dataset file.

pub mod display;
pub mod report;
pub mod tracer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tinytz::MatchPolicy;

#[derive(Parser)]
#[command(name = "tinytz", about = "Tiny UTC offset datasets and lookups", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a dataset from JSON country and zone records
    Build {
        /// JSON array of {name, code, officialName}
        #[arg(long)]
        countries: PathBuf,

        /// JSON array of {zoneName, countryCode, abbreviation, start, offsetMinutes, isDst}
        #[arg(long)]
        zones: PathBuf,

        /// Output dataset file
        #[arg(short, long)]
        output: PathBuf,

        /// Keep only the first N countries
        #[arg(long)]
        max_countries: Option<usize>,

        /// Collapse transitions before this epoch second to one per city
        #[arg(long, allow_hyphen_values = true)]
        since: Option<i64>,

        /// Drop transitions after this epoch second
        #[arg(long, allow_hyphen_values = true)]
        until: Option<i64>,
    },

    /// Look a query up as a country code, zone code, city and country
    Lookup {
        /// Free-text query ("GB", "PST", "Londn", "the United Kingdom")
        query: String,

        /// Dataset file
        #[arg(short, long, env = "TINYTZ_DATASET")]
        dataset: PathBuf,

        /// Instant to resolve offsets at, in epoch seconds (default: now)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<i64>,

        /// Ranked candidates to show for fuzzy matches
        #[arg(short = 'k', long)]
        count: Option<usize>,

        /// Exact-match policy: exact or legacy-prefix
        #[arg(long, env = "TINYTZ_MATCH_POLICY", default_value = "exact")]
        policy: MatchPolicy,
    },

    /// Inspect a dataset file
    Inspect {
        /// Path to dataset file
        file: PathBuf,

        /// Print a JSON summary instead of a table
        #[arg(long)]
        json: bool,
    },
}
