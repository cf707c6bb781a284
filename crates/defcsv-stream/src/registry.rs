// Dweve DEFCSV - Definition File Reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lock-guarded storage of default values by category.
//!
//! The registry is the only state a reader shares across threads. Every
//! mutation of a category's entry happens under one lock acquisition, and
//! readers get copies taken under the same lock, so nobody observes a
//! partially merged entry.

use defcsv_core::MappedRow;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default values of one category: base fields plus one map per sub-row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultsEntry {
    /// Defaults for the main row.
    pub base: MappedRow,
    /// Defaults for sub-row `i`.
    pub subs: Vec<MappedRow>,
}

impl DefaultsEntry {
    /// Create an entry as is.
    pub fn new(base: MappedRow, subs: Vec<MappedRow>) -> Self {
        Self { base, subs }
    }

    /// Create an entry from a mapped default row, keeping only non-empty
    /// values.
    ///
    /// Sub-rows keep their positions; trailing empty ones are dropped.
    pub fn from_row(mut base: MappedRow, mut subs: Vec<MappedRow>) -> Self {
        base.retain(|_, v| !v.is_empty());
        for sub in &mut subs {
            sub.retain(|_, v| !v.is_empty());
        }
        while subs.last().is_some_and(|s| s.is_empty()) {
            subs.pop();
        }
        Self { base, subs }
    }

    /// Whether the entry holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.subs.iter().all(|s| s.is_empty())
    }

    /// Overlay another entry: its values replace ours field by field.
    pub fn merge(&mut self, other: DefaultsEntry) {
        self.base.extend(other.base);
        if self.subs.len() < other.subs.len() {
            self.subs.resize_with(other.subs.len(), MappedRow::new);
        }
        for (ours, theirs) in self.subs.iter_mut().zip(other.subs) {
            ours.extend(theirs);
        }
    }

    /// Fill empty fields of a row and its sub-rows.
    ///
    /// Only columns the row already has are touched, so defaults registered
    /// under a wider header never add columns to a narrower one.
    ///
    /// Returns the number of fields filled.
    pub fn fill(&self, row: &mut MappedRow, sub_rows: &mut [MappedRow]) -> usize {
        let mut filled = fill_map(&self.base, row);
        for (defaults, sub) in self.subs.iter().zip(sub_rows.iter_mut()) {
            filled += fill_map(defaults, sub);
        }
        filled
    }
}

fn fill_map(defaults: &MappedRow, row: &mut MappedRow) -> usize {
    let mut filled = 0;
    for (name, value) in defaults {
        let Some(slot) = row.get_mut(name) else {
            continue;
        };
        if slot.is_empty() {
            slot.clone_from(value);
            filled += 1;
        }
    }
    filled
}

/// Shared table of [`DefaultsEntry`] values keyed by category.
///
/// Cloning yields another handle to the same table. Entries accumulate across
/// reads and are never pruned by the reader.
///
/// # Examples
///
/// ```rust
/// use defcsv_stream::{DefaultsEntry, DefaultsRegistry};
/// use std::collections::BTreeMap;
///
/// let registry = DefaultsRegistry::new();
/// let mut base = BTreeMap::new();
/// base.insert("circuit".to_string(), "bai".to_string());
/// registry.merge("r", DefaultsEntry::new(base, Vec::new()));
///
/// let handle = registry.clone();
/// assert_eq!(handle.get("r").unwrap().base["circuit"], "bai");
/// assert!(handle.get("w").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultsRegistry {
    entries: Arc<Mutex<BTreeMap<String, DefaultsEntry>>>,
}

impl DefaultsRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry of a category, returning the previous one.
    pub fn insert(&self, category: impl Into<String>, entry: DefaultsEntry) -> Option<DefaultsEntry> {
        self.entries.lock().insert(category.into(), entry)
    }

    /// Merge values into the entry of a category, creating it if needed.
    ///
    /// Returns a copy of the merged entry.
    pub fn merge(&self, category: &str, entry: DefaultsEntry) -> DefaultsEntry {
        let mut entries = self.entries.lock();
        let slot = entries.entry(category.to_string()).or_default();
        slot.merge(entry);
        slot.clone()
    }

    /// A copy of the entry of a category.
    pub fn get(&self, category: &str) -> Option<DefaultsEntry> {
        self.entries.lock().get(category).cloned()
    }

    /// A copy of the first entry found for the given keys, in order.
    pub fn first_match<S: AsRef<str>>(&self, keys: &[S]) -> Option<DefaultsEntry> {
        let entries = self.entries.lock();
        keys.iter()
            .find_map(|key| entries.get(key.as_ref()))
            .cloned()
    }

    /// Whether a category has an entry.
    pub fn contains(&self, category: &str) -> bool {
        self.entries.lock().contains_key(category)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no category has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// A consistent copy of all entries.
    pub fn snapshot(&self) -> BTreeMap<String, DefaultsEntry> {
        self.entries.lock().clone()
    }

    /// A copy of the base defaults of all categories.
    ///
    /// Pair with [`sub_defaults`](Self::sub_defaults) only when no writer can
    /// run in between; otherwise use [`snapshot`](Self::snapshot).
    pub fn defaults(&self) -> BTreeMap<String, MappedRow> {
        self.entries
            .lock()
            .iter()
            .map(|(category, entry)| (category.clone(), entry.base.clone()))
            .collect()
    }

    /// A copy of the sub-row defaults of all categories.
    pub fn sub_defaults(&self) -> BTreeMap<String, Vec<MappedRow>> {
        self.entries
            .lock()
            .iter()
            .map(|(category, entry)| (category.clone(), entry.subs.clone()))
            .collect()
    }
}
