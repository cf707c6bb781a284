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

//! Dump command - print mapped rows re-serialized

use super::read_options;
use crate::collect::RowCollector;
use crate::error::CliError;
use defcsv_core::{combine_fields, MappedRow};
use defcsv_stream::{ColumnMap, MappedConfig, MappedDefinitionReader};
use serde_json::json;

/// Print every data row of a file after mapping and default filling.
///
/// Rows are printed in column order, one per line, with their sub-rows
/// indented below them. With `json` set, an array of objects with `line`,
/// `row` and `sub_rows` is printed instead.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or JSON serialization fails.
///
/// # Examples
///
/// ```no_run
/// use defcsv_cli::commands::dump;
///
/// # fn main() -> Result<(), defcsv_cli::error::CliError> {
/// dump("08.bai.csv", false, false)?;
/// # Ok(())
/// # }
/// ```
pub fn dump(file: &str, json: bool, verbose: bool) -> Result<(), CliError> {
    let mut reader =
        MappedDefinitionReader::mapped(RowCollector::default(), MappedConfig::with_defaults());
    reader.read_from_file(file, &read_options(verbose))?;

    let rows = &reader.handler().rows;
    if json {
        let values: Vec<_> = rows
            .iter()
            .map(|r| json!({ "line": r.line, "row": r.row, "sub_rows": r.sub_rows }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    let columns = reader.columns();
    for collected in rows {
        println!("{}", reader.combine_row(&collected.row));
        for (index, sub) in collected.sub_rows.iter().enumerate() {
            println!("  {}", format_sub_row(columns, index, sub));
        }
    }
    Ok(())
}

/// Serialize a sub-row in the order of the column group it came from.
///
/// Sub-rows from continuation rows carry the main columns instead; anything
/// else falls back to key order.
fn format_sub_row(columns: Option<&ColumnMap>, index: usize, sub: &MappedRow) -> String {
    let names = columns.and_then(|c| {
        c.sub_columns(index)
            .filter(|names| covers(names, sub))
            .or_else(|| Some(c.main_columns()).filter(|names| covers(names, sub)))
    });
    match names {
        Some(names) => combine_fields(
            names
                .iter()
                .map(|name| sub.get(name).map(String::as_str).unwrap_or("")),
        ),
        None => combine_fields(sub.values()),
    }
}

fn covers(names: &[String], row: &MappedRow) -> bool {
    names.len() == row.len() && names.iter().all(|name| row.contains_key(name))
}
