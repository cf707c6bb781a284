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

//! Check command - read definition files through the mapped reader

use super::read_options;
use crate::collect::RowCollector;
use crate::error::CliError;
use colored::Colorize;
use defcsv_stream::{MappedConfig, MappedDefinitionReader};
use tracing::debug;

/// Read each file as mapped definitions and report what was found.
///
/// All files share one reader, so default rows of earlier files apply to
/// later ones. For each file the number of data rows and default rows is
/// printed; at the end the categories holding defaults are listed.
///
/// # Arguments
///
/// * `files` - Files to read, in order
/// * `no_defaults` - Reject default rows instead of registering them
/// * `required` - Columns every header must contain
/// * `verbose` - Log row failures at warn level
///
/// # Errors
///
/// Returns [`CliError::Failed`] if any file could not be read.
pub fn check(
    files: &[String],
    no_defaults: bool,
    required: Vec<String>,
    verbose: bool,
) -> Result<(), CliError> {
    let config = if no_defaults {
        MappedConfig::default()
    } else {
        MappedConfig::with_defaults()
    };
    let options = read_options(verbose);
    let mut reader = MappedDefinitionReader::mapped(RowCollector::with_required(required), config);
    let mut failed = 0;

    for file in files {
        let rows_before = reader.handler().rows.len();
        let defaults_before = reader.handler().defaults;
        match reader.read_from_file(file, &options) {
            Ok(outcome) => {
                let collector = reader.handler();
                println!("{} {}", "✓".green().bold(), file);
                println!("  Rows: {}", collector.rows.len() - rows_before);
                println!("  Defaults: {}", collector.defaults - defaults_before);
                println!("  Hash: {}", outcome.fingerprint);
            }
            Err(e) => {
                failed += 1;
                println!("{} {}", "✗".red().bold(), file);
                eprintln!("{}", e);
            }
        }
    }

    let categories = reader.get_defaults();
    debug!(
        files = files.len(),
        failed,
        categories = categories.len(),
        "check finished"
    );
    if !categories.is_empty() {
        let names: Vec<&str> = categories.keys().map(String::as_str).collect();
        println!("Default categories: {}", names.join(" "));
    }

    if failed > 0 {
        return Err(CliError::failed(failed, files.len()));
    }
    Ok(())
}
