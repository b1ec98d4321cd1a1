// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: a stable descending sort by score.
//!
//! Equal scores keep table order, so the lower index wins a tie. That makes
//! the output a pure function of the dataset and the query, which matters when
//! a typo is equally far from two cities.

use crate::types::Scored;
use std::cmp::Ordering;

/// Compare two candidates for ranking: higher score first. Ties compare
/// `Equal` so a stable sort keeps their input order.
#[inline]
pub fn compare_scored<I>(a: &Scored<I>, b: &Scored<I>) -> Ordering {
    b.score.cmp(&a.score)
}

/// The best `k` candidates, highest score first, ties in input order.
///
/// `k` beyond the number of candidates returns all of them.
pub fn top_k<I>(candidates: impl IntoIterator<Item = Scored<I>>, k: usize) -> Vec<Scored<I>> {
    let mut ranked: Vec<Scored<I>> = candidates.into_iter().collect();
    ranked.sort_by(compare_scored);
    ranked.truncate(k);
    ranked
}
