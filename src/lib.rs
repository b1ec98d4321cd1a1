//! Tiny UTC-offset lookups for constrained devices.
//!
//! A dataset packs country names, cities, zone abbreviations and the UTC
//! offset transitions between them into a few hundred kilobytes. On top of it
//! sit two things: free-text lookup ("londn" finds London, "PST" finds PST)
//! and a temporal resolver (what offset does London observe at this instant?).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  build/     │────▶│  dataset.rs  │◀────│   binary/    │
//! │ (records →  │     │ (validated,  │     │ (bytes ⇄     │
//! │  tables)    │     │  read-only)  │     │  tables)     │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                        │          │
//!                        ▼          ▼
//!               ┌────────────┐  ┌────────────┐
//!               │  search/   │  │  resolve/  │
//!               │ (Finder:   │  │ (offset at │
//!               │  exact →   │  │  instant)  │
//!               │  fuzzy)    │  │            │
//!               └────────────┘  └────────────┘
//!                  │      │
//!                  ▼      ▼
//!          util::normalize  fuzzy + scoring
//! ```
//!
//! | Module      | Responsibility                                   |
//! |-------------|--------------------------------------------------|
//! | `types`     | Typed indices, 5-bit codes, transitions, results |
//! | `codec`     | Packed arrays and rendering                      |
//! | `util`      | Query normalization                              |
//! | `fuzzy`     | Edit distance and similarity                     |
//! | `scoring`   | Stable top-k ranking                             |
//! | `search`    | Country/zone/city lookups                        |
//! | `resolve`   | Offset at an instant                             |
//! | `dataset`   | The validated dataset handle                     |
//! | `binary`    | On-disk format                                   |
//! | `build`     | Dataset builder                                  |
//! | `config`    | Match policy and build settings                  |
//!
//! # Usage
//!
//! ```ignore
//! use tinytz::{Dataset, Lookup};
//!
//! let dataset = Dataset::load("zones.ttzd")?;
//! if let Lookup::Exact(city) = dataset.finder().find_city("London", 2) {
//!     let minutes = dataset.offset_by_city(city, now)?;
//! }
//! ```

// Module declarations
pub mod binary;
pub mod build;
pub mod codec;
pub mod config;
mod dataset;
mod error;
pub mod fuzzy;
pub mod resolve;
pub mod scoring;
pub mod search;
pub mod testing;
mod types;
pub mod util;

// Re-exports for public API
pub use build::{CountryRecord, DatasetBuilder, ZoneRecord};
pub use config::{BuildConfig, FinderConfig, MatchPolicy};
pub use dataset::{Dataset, DatasetParts, COUNTRY_CODE_WIDTH, ZONE_CODE_WIDTH};
pub use error::{DatasetError, ResolveError, Table};
pub use fuzzy::{edit_distance, similarity};
pub use resolve::{ScanStrategy, LINEAR_SCAN_LIMIT};
pub use search::Finder;
pub use types::{
    encode_codes, CityIdx, Code5, CountryIdx, EntityKind, Lookup, MatchKind, Scored, TokenIdx,
    Transition, ZoneIdx,
};
pub use util::normalize::normalize;
