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

//! Column maps bound from header rows.
//!
//! A header names every column of the file. A name starting with `*` opens a
//! new column group: the columns from there up to the next `*` name form one
//! sub-row of every data row. Columns before the first `*` form the main row.
//!
//! ```text
//! type,circuit,name,*field,part,type,*field,part,type
//! └─── main ─────────┘└── sub-row 0 ──┘└── sub-row 1 ──┘
//! ```

use crate::config::ColumnArity;
use crate::error::RowError;
use defcsv_core::{combine_fields, MappedRow, DEFAULT_MARKER};
use std::collections::HashSet;
use std::ops::Range;

/// Name-to-position binding of a definition file.
///
/// Immutable once bound; a new header builds a new map.
///
/// # Examples
///
/// ```rust
/// use defcsv_stream::{ColumnArity, ColumnMap};
///
/// let map = ColumnMap::bind(["name", "value"]).unwrap();
/// let (row, subs) = map
///     .map_row(&["foo".to_string(), "1".to_string()], ColumnArity::Exact)
///     .unwrap();
/// assert_eq!(row["name"], "foo");
/// assert_eq!(row["value"], "1");
/// assert!(subs.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Column names without group markers.
    names: Vec<String>,
    /// Column ranges: main group first, then one range per sub-row group.
    groups: Vec<Range<usize>>,
}

impl ColumnMap {
    /// Bind a column map from header names.
    ///
    /// # Errors
    ///
    /// [`RowError::Header`] if there are no columns, a name is empty, the
    /// first column opens a group, or a name repeats within its group.
    pub fn bind<I, S>(header: I) -> Result<Self, RowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut groups = Vec::new();
        let mut group_start = 0;
        let mut seen = HashSet::new();

        for (idx, raw) in header.into_iter().enumerate() {
            let raw = raw.as_ref().trim();
            let name = match raw.strip_prefix(DEFAULT_MARKER) {
                Some(_) if idx == 0 => {
                    return Err(RowError::header(format!(
                        "first column {} cannot start a sub-row group",
                        raw
                    )));
                }
                Some(stripped) => {
                    groups.push(group_start..idx);
                    group_start = idx;
                    seen.clear();
                    stripped.trim()
                }
                None => raw,
            };
            if name.is_empty() {
                return Err(RowError::header(format!(
                    "empty column name at position {}",
                    idx + 1
                )));
            }
            if !seen.insert(name.to_string()) {
                return Err(RowError::header(format!("duplicate column {}", name)));
            }
            names.push(name.to_string());
        }

        if names.is_empty() {
            return Err(RowError::header("no columns"));
        }
        groups.push(group_start..names.len());
        Ok(Self { names, groups })
    }

    /// Total number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; a bound map has at least one column.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names of the main row columns, in file order.
    pub fn main_columns(&self) -> &[String] {
        &self.names[self.groups[0].clone()]
    }

    /// Number of sub-row groups.
    #[inline]
    pub fn sub_groups(&self) -> usize {
        self.groups.len() - 1
    }

    /// Names of the columns of one sub-row group.
    pub fn sub_columns(&self, group: usize) -> Option<&[String]> {
        self.groups
            .get(group + 1)
            .map(|range| &self.names[range.clone()])
    }

    /// Position of a main row column.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.main_columns().iter().position(|n| n == name)
    }

    /// Whether the main row has a column of that name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Map a row to its main row and sub-rows.
    ///
    /// Every column of a group appears in its map; blank fields map to empty
    /// strings. Trailing sub-rows with only empty values are dropped.
    ///
    /// # Errors
    ///
    /// [`RowError::Malformed`] if the row has more fields than columns, or
    /// fewer while `arity` is [`ColumnArity::Exact`].
    pub fn map_row(
        &self,
        row: &[String],
        arity: ColumnArity,
    ) -> Result<(MappedRow, Vec<MappedRow>), RowError> {
        let expected = self.names.len();
        let too_few = row.len() < expected && arity == ColumnArity::Exact;
        if row.len() > expected || too_few {
            return Err(RowError::malformed(format!(
                "{} fields, expected {}",
                row.len(),
                expected
            )));
        }

        let mut groups = self.groups.iter().map(|range| {
            range
                .clone()
                .map(|idx| {
                    let value = row.get(idx).cloned().unwrap_or_default();
                    (self.names[idx].clone(), value)
                })
                .collect::<MappedRow>()
        });
        let main = groups.next().unwrap_or_default();
        let mut subs: Vec<MappedRow> = groups.collect();
        while subs
            .last()
            .is_some_and(|sub| sub.values().all(|v| v.is_empty()))
        {
            subs.pop();
        }
        Ok((main, subs))
    }

    /// Re-serialize a main row in column order.
    ///
    /// Missing columns become empty fields; names not in the map are ignored.
    pub fn combine_row(&self, row: &MappedRow) -> String {
        combine_fields(
            self.main_columns()
                .iter()
                .map(|name| row.get(name).map(String::as_str).unwrap_or("")),
        )
    }

    /// Re-serialize the header, group markers included.
    pub fn header_line(&self) -> String {
        let starts: HashSet<usize> = self.groups.iter().skip(1).map(|r| r.start).collect();
        combine_fields(self.names.iter().enumerate().map(|(idx, name)| {
            if starts.contains(&idx) {
                format!("{}{}", DEFAULT_MARKER, name)
            } else {
                name.clone()
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_bind_simple() {
        let map = ColumnMap::bind(["name", "value"]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.sub_groups(), 0);
        assert_eq!(map.position("value"), Some(1));
        assert!(!map.contains("missing"));
    }

    #[test]
    fn test_bind_groups() {
        let map = ColumnMap::bind([
            "col 1", "col 2", "col 3", "*subcol 1", "subcol 2", "*subcol 2", "subcol 3",
        ])
        .unwrap();
        assert_eq!(map.main_columns(), ["col 1", "col 2", "col 3"]);
        assert_eq!(map.sub_groups(), 2);
        assert_eq!(map.sub_columns(0).unwrap(), ["subcol 1", "subcol 2"]);
        assert_eq!(map.sub_columns(1).unwrap(), ["subcol 2", "subcol 3"]);
        assert_eq!(map.sub_columns(2), None);
    }

    #[test]
    fn test_bind_rejects_duplicates_within_group() {
        let err = ColumnMap::bind(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, RowError::header("duplicate column a"));
    }

    #[test]
    fn test_bind_allows_repeats_across_groups() {
        assert!(ColumnMap::bind(["name", "*type", "len", "*type", "len"]).is_ok());
    }

    #[test]
    fn test_bind_rejects_empty() {
        assert!(ColumnMap::bind(Vec::<String>::new()).is_err());
        assert!(ColumnMap::bind(["a", "", "c"]).is_err());
        assert!(ColumnMap::bind(["a", "*"]).is_err());
    }

    #[test]
    fn test_bind_rejects_leading_group() {
        assert!(ColumnMap::bind(["*a", "b"]).is_err());
    }

    #[test]
    fn test_map_row_exact() {
        let map = ColumnMap::bind(["name", "value"]).unwrap();
        let (row, subs) = map.map_row(&fields(&["foo", "1"]), ColumnArity::Exact).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row["name"], "foo");
        assert!(subs.is_empty());
    }

    #[test]
    fn test_map_row_field_count_mismatch() {
        let map = ColumnMap::bind(["name", "value"]).unwrap();
        assert!(matches!(
            map.map_row(&fields(&["foo", "1", "extra"]), ColumnArity::Exact),
            Err(RowError::Malformed(_))
        ));
        assert!(matches!(
            map.map_row(&fields(&["foo"]), ColumnArity::Exact),
            Err(RowError::Malformed(_))
        ));
    }

    #[test]
    fn test_map_row_missing_trailing_allowed() {
        let map = ColumnMap::bind(["name", "value", "unit"]).unwrap();
        let (row, _) = map
            .map_row(&fields(&["foo"]), ColumnArity::AllowMissingTrailing)
            .unwrap();
        assert_eq!(row["value"], "");
        assert_eq!(row["unit"], "");
        assert!(map
            .map_row(&fields(&["a", "b", "c", "d"]), ColumnArity::AllowMissingTrailing)
            .is_err());
    }

    #[test]
    fn test_map_row_sub_rows() {
        let map = ColumnMap::bind(["name", "*field", "type", "*field", "type"]).unwrap();
        let (row, subs) = map
            .map_row(&fields(&["temp", "t1", "UCH", "t2", "D2C"]), ColumnArity::Exact)
            .unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0]["field"], "t1");
        assert_eq!(subs[1]["type"], "D2C");
    }

    #[test]
    fn test_map_row_drops_trailing_empty_sub_rows() {
        let map = ColumnMap::bind(["name", "*field", "type", "*field", "type"]).unwrap();
        let (_, subs) = map
            .map_row(&fields(&["temp", "t1", "UCH", "", ""]), ColumnArity::Exact)
            .unwrap();
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_map_row_keeps_inner_empty_sub_rows() {
        let map = ColumnMap::bind(["name", "*field", "*field"]).unwrap();
        let (_, subs) = map
            .map_row(&fields(&["temp", "", "x"]), ColumnArity::Exact)
            .unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0]["field"], "");
    }

    #[test]
    fn test_combine_row_follows_column_order() {
        let map = ColumnMap::bind(["type", "name", "comment"]).unwrap();
        let mut row = MappedRow::new();
        row.insert("comment".into(), "outside, temp".into());
        row.insert("type".into(), "r".into());
        row.insert("ignored".into(), "x".into());
        assert_eq!(map.combine_row(&row), "r,,\"outside, temp\"");
    }

    #[test]
    fn test_header_line() {
        let map = ColumnMap::bind(["name", "*field", "type"]).unwrap();
        assert_eq!(map.header_line(), "name,*field,type");
    }
}
