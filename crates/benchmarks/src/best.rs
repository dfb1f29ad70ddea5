// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Best-of-repeats reduction.

use crate::record::BenchmarkRecord;
use crate::set::BenchmarkSet;
use tracing::debug;

/// Collapse every repeated benchmark name to its fastest observation.
///
/// The kept record takes the ordinal of the name's first observation so that
/// original-order reports still place it where the benchmark first appeared.
/// Records without `ns/op` never win; if none of them has it, the first one
/// is kept. Names with a single record are untouched, so applying this twice
/// is the same as applying it once.
pub fn select_best(set: &mut BenchmarkSet) {
    let mut collapsed = 0usize;
    for records in set.groups_mut() {
        if records.len() < 2 {
            continue;
        }
        let first_ordinal = records[0].ordinal;
        let winner = fastest_index(records);
        let mut best = records.swap_remove(winner);
        best.ordinal = first_ordinal;
        records.clear();
        records.push(best);
        collapsed += 1;
    }
    debug!(collapsed, "selected best of repeated benchmarks");
}

/// Index of the record with the lowest `ns/op`; earliest wins ties.
fn fastest_index(records: &[BenchmarkRecord]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (idx, record) in records.iter().enumerate() {
        if let Some(ns) = record.ns_per_op.filter(|ns| !ns.is_nan()) {
            match best {
                Some((_, best_ns)) if ns >= best_ns => {}
                _ => best = Some((idx, ns)),
            }
        }
    }
    best.map_or(0, |(idx, _)| idx)
}
