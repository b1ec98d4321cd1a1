// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A `RUST_LOG`-driven subscriber small enough to live in the binary.
//!
//! `RUST_LOG=debug` shows everything at debug and above,
//! `RUST_LOG=tinytz::resolve=trace` narrows to one module, and filters can be
//! comma-separated. Unset means silent. Events go to stderr so `--json`
//! output stays parseable.

use std::env;
use std::fmt::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::field::Visit;
use tracing::{Event, Id, Level, Metadata, Subscriber};
use tracing_core::span::{Attributes, Record};
use tracing_core::Field;

struct StringVisitor<'a> {
    string: &'a mut String,
}

impl Visit for StringVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // Writing to a String can't fail
        let _ = if field.name() == "message" {
            write!(self.string, "{value:?} ")
        } else {
            write!(self.string, "{} = {:?}; ", field.name(), value)
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogFilter {
    target: Option<String>,
    level: Option<Level>,
}

impl LogFilter {
    fn matches(&self, metadata: &Metadata<'_>) -> bool {
        // Level ordering: ERROR < WARN < ... < TRACE in verbosity terms
        let level_ok = self.level.map_or(true, |max| *metadata.level() <= max);
        let target_ok = self
            .target
            .as_deref()
            .map_or(true, |t| metadata.target().starts_with(t));
        level_ok && target_ok
    }
}

fn string_to_level(string: &str) -> Option<Level> {
    match string.to_lowercase().as_str() {
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "warn" | "warning" => Some(Level::WARN),
        "trace" => Some(Level::TRACE),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn parse_filters(value: &str) -> Vec<LogFilter> {
    value
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|filter| match filter.split_once('=') {
            Some((target, level)) => LogFilter {
                target: Some(target.to_string()),
                level: string_to_level(level),
            },
            None => match string_to_level(filter) {
                Some(level) => LogFilter {
                    target: None,
                    level: Some(level),
                },
                None => LogFilter {
                    target: Some(filter.to_string()),
                    level: None,
                },
            },
        })
        .collect()
}

pub struct MinimalTracer {
    filters: Option<Vec<LogFilter>>,
}

static AUTO_ID: AtomicU64 = AtomicU64::new(1);

impl MinimalTracer {
    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let filters = env::var("RUST_LOG").ok().map(|v| parse_filters(&v));
        tracing::subscriber::set_global_default(MinimalTracer { filters })
    }
}

impl Subscriber for MinimalTracer {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        match &self.filters {
            None => false,
            Some(filters) if filters.is_empty() => true,
            Some(filters) => filters.iter().any(|f| f.matches(metadata)),
        }
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(AUTO_ID.fetch_add(1, Ordering::Relaxed))
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let metadata = event.metadata();
        let mut text = String::new();
        event.record(&mut StringVisitor { string: &mut text });
        eprintln!("{} {}: {}", metadata.level(), metadata.target(), text);
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
