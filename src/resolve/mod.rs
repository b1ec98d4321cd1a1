// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Temporal resolver: which offset applies to a zone, city or country at a
//! given instant.
//!
//! A transition applies at `t` when it is the latest one for its key with
//! `start < t`. Two ways to find it:
//!
//! - **Linear**: walk the table in order. Zone and city lookups stop at the
//!   first matching transition that hasn't started yet; nothing after it can
//!   start earlier. Country lookups walk the whole table, since ambiguity can
//!   only be seen by looking at every active transition.
//! - **Indexed**: `partition_point` over the key's position list.
//!
//! Both return the same answer for every input. [`ScanStrategy::Auto`] picks
//! the index once the table is longer than [`LINEAR_SCAN_LIMIT`].
//!
//! Index bounds are checked first, and nothing is scanned for a bad index.

mod index;

pub use index::TransitionIndex;

use tracing::trace;

use crate::dataset::Dataset;
use crate::error::ResolveError;
use crate::types::{CityIdx, CountryIdx, EntityKind, Transition, ZoneIdx};

/// Tables at or below this many transitions are scanned linearly.
pub const LINEAR_SCAN_LIMIT: usize = 64;

/// How to find the active transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Linear for small tables, indexed otherwise.
    #[default]
    Auto,
    Linear,
    Indexed,
}

impl ScanStrategy {
    #[inline]
    fn indexed(self, table_len: usize) -> bool {
        match self {
            ScanStrategy::Auto => table_len > LINEAR_SCAN_LIMIT,
            ScanStrategy::Linear => false,
            ScanStrategy::Indexed => true,
        }
    }
}

#[inline]
fn check_index(kind: EntityKind, index: usize, count: usize) -> Result<(), ResolveError> {
    if index >= count {
        return Err(ResolveError::InvalidIndex { kind, index, count });
    }
    Ok(())
}

/// Latest transition matching `is_key` that starts before `at`.
fn scan_linear<'a>(
    transitions: &'a [Transition],
    at: i64,
    is_key: impl Fn(&Transition) -> bool,
) -> Option<&'a Transition> {
    let mut active = None;
    for t in transitions.iter().filter(|t| is_key(t)) {
        if t.start >= at {
            break;
        }
        active = Some(t);
    }
    active
}

fn scan_indexed<'a>(
    transitions: &'a [Transition],
    positions: &[u32],
    at: i64,
) -> Option<&'a Transition> {
    let active = TransitionIndex::active_len(transitions, positions, at);
    positions[..active]
        .last()
        .map(|&p| &transitions[p as usize])
}

/// The last of `active`, provided every one of them belongs to the same city.
fn single_city<'a>(
    active: impl Iterator<Item = &'a Transition>,
    country: CountryIdx,
) -> Result<&'a Transition, ResolveError> {
    let mut current: Option<&Transition> = None;
    for t in active {
        if current.is_some_and(|c| c.city != t.city) {
            return Err(ResolveError::MultiZones { country });
        }
        current = Some(t);
    }
    current.ok_or(ResolveError::NoMatch)
}

impl Dataset {
    /// The transition in effect for zone abbreviation `idx` at `at`.
    pub fn transition_by_zone(&self, idx: ZoneIdx, at: i64) -> Result<&Transition, ResolveError> {
        self.transition_by_zone_using(idx, at, ScanStrategy::Auto)
    }

    pub fn transition_by_zone_using(
        &self,
        idx: ZoneIdx,
        at: i64,
        strategy: ScanStrategy,
    ) -> Result<&Transition, ResolveError> {
        check_index(EntityKind::Zone, idx.get(), self.zone_count())?;
        let found = if strategy.indexed(self.transitions.len()) {
            scan_indexed(&self.transitions, self.index.zone(idx), at)
        } else {
            scan_linear(&self.transitions, at, |t| t.zone == idx)
        };
        trace!(zone = %idx, at, found = found.is_some(), "resolve zone");
        found.ok_or(ResolveError::NoMatch)
    }

    /// The transition in effect for city `idx` at `at`.
    pub fn transition_by_city(&self, idx: CityIdx, at: i64) -> Result<&Transition, ResolveError> {
        self.transition_by_city_using(idx, at, ScanStrategy::Auto)
    }

    pub fn transition_by_city_using(
        &self,
        idx: CityIdx,
        at: i64,
        strategy: ScanStrategy,
    ) -> Result<&Transition, ResolveError> {
        check_index(EntityKind::City, idx.get(), self.city_count())?;
        let found = if strategy.indexed(self.transitions.len()) {
            scan_indexed(&self.transitions, self.index.city(idx), at)
        } else {
            scan_linear(&self.transitions, at, |t| t.city == idx)
        };
        trace!(city = %idx, at, found = found.is_some(), "resolve city");
        found.ok_or(ResolveError::NoMatch)
    }

    /// The transition in effect for country `idx` at `at`.
    ///
    /// Fails with [`ResolveError::MultiZones`] when the country's transitions
    /// that started before `at` belong to more than one city.
    pub fn transition_by_country(
        &self,
        idx: CountryIdx,
        at: i64,
    ) -> Result<&Transition, ResolveError> {
        self.transition_by_country_using(idx, at, ScanStrategy::Auto)
    }

    pub fn transition_by_country_using(
        &self,
        idx: CountryIdx,
        at: i64,
        strategy: ScanStrategy,
    ) -> Result<&Transition, ResolveError> {
        check_index(EntityKind::Country, idx.get(), self.country_count())?;
        let result = if strategy.indexed(self.transitions.len()) {
            let positions = self.index.country(idx);
            let active = TransitionIndex::active_len(&self.transitions, positions, at);
            single_city(
                positions[..active].iter().map(|&p| &self.transitions[p as usize]),
                idx,
            )
        } else {
            single_city(
                self.transitions
                    .iter()
                    .filter(|t| t.country == idx && t.start < at),
                idx,
            )
        };
        trace!(country = %idx, at, ok = result.is_ok(), "resolve country");
        result
    }

    /// Offset in minutes for zone abbreviation `idx` at `at`.
    pub fn offset_by_zone(&self, idx: ZoneIdx, at: i64) -> Result<i32, ResolveError> {
        self.transition_by_zone(idx, at).map(|t| t.offset_minutes)
    }

    /// Offset in minutes for city `idx` at `at`.
    pub fn offset_by_city(&self, idx: CityIdx, at: i64) -> Result<i32, ResolveError> {
        self.transition_by_city(idx, at).map(|t| t.offset_minutes)
    }

    /// Offset in minutes for country `idx` at `at`.
    pub fn offset_by_country(&self, idx: CountryIdx, at: i64) -> Result<i32, ResolveError> {
        self.transition_by_country(idx, at).map(|t| t.offset_minutes)
    }
}
