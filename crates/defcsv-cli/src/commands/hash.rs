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

//! Hash command - content fingerprints of definition files

use super::read_options;
use crate::error::CliError;
use colored::Colorize;
use defcsv_stream::{DefinitionReader, NoopSink};

/// Print the fingerprint of each file.
///
/// Every file is read without interpreting its rows. For each readable file
/// one line is printed:
///
/// ```text
/// <file> <hash> <size> <mtime>
/// ```
///
/// where `<hash>` is 8 hex digits, `<size>` the normalized content size and
/// `<mtime>` the modification time in seconds since the Unix epoch. Files that
/// cannot be read are reported on stderr and processing continues.
///
/// # Errors
///
/// Returns [`CliError::Failed`] if any file could not be read.
///
/// # Examples
///
/// ```no_run
/// use defcsv_cli::commands::hash;
///
/// # fn main() -> Result<(), defcsv_cli::error::CliError> {
/// hash(&["08.bai.csv".to_string(), "15.700.csv".to_string()], false)?;
/// # Ok(())
/// # }
/// ```
pub fn hash(files: &[String], verbose: bool) -> Result<(), CliError> {
    let options = read_options(verbose);
    let mut reader = DefinitionReader::new(NoopSink);
    let mut failed = 0;

    for file in files {
        match reader.read_from_file(file, &options) {
            Ok(outcome) => println!(
                "{} {} {} {}",
                file,
                outcome.fingerprint,
                outcome.fingerprint.size,
                outcome.modified_secs().unwrap_or(0)
            ),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}", "✗".red().bold(), e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::failed(failed, files.len()));
    }
    Ok(())
}
