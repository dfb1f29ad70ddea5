// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Name-indexed collection of benchmark observations.

use crate::record::BenchmarkRecord;
use std::collections::HashMap;

/// All observations of one report, grouped by benchmark name.
///
/// Each name maps to its records in the order they were reported. Nothing
/// that leaves this type exposes the map's own iteration order: name listings
/// are ordered by each name's first ordinal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSet {
    by_name: HashMap<String, Vec<BenchmarkRecord>>,
}

impl BenchmarkSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation after any earlier ones with the same name.
    pub fn push(&mut self, record: BenchmarkRecord) {
        self.by_name
            .entry(record.name.clone())
            .or_default()
            .push(record);
    }

    /// Records reported under `name`, in report order.
    pub fn get(&self, name: &str) -> Option<&[BenchmarkRecord]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    /// Whether any record was reported under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Distinct names, ordered by where each first appeared.
    pub fn names_in_order(&self) -> Vec<&str> {
        let mut names: Vec<(usize, &str)> = self
            .by_name
            .iter()
            .map(|(name, records)| {
                let first = records.iter().map(|r| r.ordinal).min().unwrap_or(usize::MAX);
                (first, name.as_str())
            })
            .collect();
        names.sort();
        names.into_iter().map(|(_, name)| name).collect()
    }

    /// Iterate `(name, records)` groups ordered by first appearance.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[BenchmarkRecord])> {
        self.names_in_order()
            .into_iter()
            .filter_map(move |name| self.get(name).map(|records| (name, records)))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Total number of observations across all names.
    pub fn record_count(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    /// Whether the set holds no observations.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut Vec<BenchmarkRecord>> {
        self.by_name.values_mut()
    }
}

impl FromIterator<BenchmarkRecord> for BenchmarkSet {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        let mut set = BenchmarkSet::new();
        for record in iter {
            set.push(record);
        }
        set
    }
}
