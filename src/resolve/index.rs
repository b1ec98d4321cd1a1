// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-key position lists over the transition table.
//!
//! For every zone, city and country, the positions of its transitions in
//! table order. The table is sorted by `start`, so each list is sorted by
//! `start` too and `partition_point` finds the active transition.

use crate::codec::PackedArray;
use crate::types::{CityIdx, CountryIdx, Transition, ZoneIdx};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionIndex {
    by_zone: PackedArray<u32>,
    by_city: PackedArray<u32>,
    by_country: PackedArray<u32>,
}

fn bucket(
    transitions: &[Transition],
    count: usize,
    key: impl Fn(&Transition) -> usize,
) -> PackedArray<u32> {
    let mut buckets = vec![Vec::new(); count];
    for (pos, t) in transitions.iter().enumerate() {
        // Out-of-range keys are rejected before the index is built
        if let Some(bucket) = buckets.get_mut(key(t)) {
            bucket.push(pos as u32);
        }
    }
    PackedArray::from_entries(buckets)
}

impl TransitionIndex {
    pub(crate) fn build(
        transitions: &[Transition],
        zone_count: usize,
        city_count: usize,
        country_count: usize,
    ) -> Self {
        Self {
            by_zone: bucket(transitions, zone_count, |t| t.zone.get()),
            by_city: bucket(transitions, city_count, |t| t.city.get()),
            by_country: bucket(transitions, country_count, |t| t.country.get()),
        }
    }

    pub fn zone(&self, idx: ZoneIdx) -> &[u32] {
        self.by_zone.get(idx.get()).unwrap_or(&[])
    }

    pub fn city(&self, idx: CityIdx) -> &[u32] {
        self.by_city.get(idx.get()).unwrap_or(&[])
    }

    pub fn country(&self, idx: CountryIdx) -> &[u32] {
        self.by_country.get(idx.get()).unwrap_or(&[])
    }

    /// How many of `positions` start strictly before `at`.
    #[inline]
    pub(crate) fn active_len(transitions: &[Transition], positions: &[u32], at: i64) -> usize {
        positions.partition_point(|&p| transitions[p as usize].start < at)
    }
}
