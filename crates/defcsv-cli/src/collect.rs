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

//! A generic mapped handler that keeps every row it is given.

use defcsv_core::MappedRow;
use defcsv_stream::{DefaultsEntry, FileNameDefaults, MappedHandler, RowContext, RowError};

/// A data row as handed to [`RowCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedRow {
    /// Source the row was read from.
    pub source: String,
    /// Line number of the row.
    pub line: usize,
    /// Main row values.
    pub row: MappedRow,
    /// Sub-rows in order.
    pub sub_rows: Vec<MappedRow>,
}

/// Collects data rows and counts default rows without interpreting them.
///
/// File names following the `ZZ.IDENT...` convention seed defaults.
#[derive(Debug, Default)]
pub struct RowCollector {
    /// Data rows in file order.
    pub rows: Vec<CollectedRow>,
    /// Number of default rows seen.
    pub defaults: usize,
    required: Vec<String>,
}

impl RowCollector {
    /// Create a collector requiring the given main columns.
    pub fn with_required(required: Vec<String>) -> Self {
        Self {
            required,
            ..Self::default()
        }
    }
}

impl MappedHandler for RowCollector {
    fn add_row(
        &mut self,
        row: MappedRow,
        sub_rows: Vec<MappedRow>,
        ctx: &RowContext<'_>,
    ) -> Result<(), RowError> {
        self.rows.push(CollectedRow {
            source: ctx.source.to_string(),
            line: ctx.line,
            row,
            sub_rows,
        });
        Ok(())
    }

    fn required_columns(&self) -> Vec<String> {
        self.required.clone()
    }

    fn add_default(
        &mut self,
        _category: &str,
        _entry: &DefaultsEntry,
        _ctx: &RowContext<'_>,
    ) -> Result<(), RowError> {
        self.defaults += 1;
        Ok(())
    }

    fn extract_defaults_from_name(&self, file_name: &str) -> Option<FileNameDefaults> {
        FileNameDefaults::parse(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defcsv_stream::{MappedConfig, MappedDefinitionReader, ReadError, ReadOptions};
    use std::io::Cursor;

    #[test]
    fn test_collects_rows_and_defaults() {
        let mut reader =
            MappedDefinitionReader::mapped(RowCollector::default(), MappedConfig::with_defaults());
        reader
            .read_from_stream(
                Cursor::new("type,circuit,name\n*r,,\nr,,status\n"),
                "08.bai.csv",
                &ReadOptions::default(),
            )
            .unwrap();
        let collector = reader.handler();
        assert_eq!(collector.defaults, 1);
        assert_eq!(collector.rows.len(), 1);
        assert_eq!(collector.rows[0].line, 3);
        assert_eq!(collector.rows[0].row["circuit"], "bai");
    }

    #[test]
    fn test_required_columns() {
        let collector = RowCollector::with_required(vec!["name".to_string()]);
        let mut reader = MappedDefinitionReader::mapped(collector, MappedConfig::default());
        let err = reader
            .read_from_stream(Cursor::new("type\nr\n"), "x.csv", &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReadError::HeaderBindingFailed { line: 1, .. }));
    }
}
