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

//! DEFCSV Command Line Interface

use clap::Parser;
use defcsv_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// DEFCSV - definition file reader
///
/// Reads comma separated definition files with header rows, default rows
/// and sub-row groups.
///
/// # Examples
///
/// ```bash
/// # Fingerprints of all files in a directory
/// defcsv hash conf/*.csv
///
/// # Read files with defaults, requiring a type column
/// defcsv check conf/_templates.csv conf/08.bai.csv --required type
///
/// # Show mapped rows as JSON
/// defcsv dump conf/08.bai.csv --json
/// ```
#[derive(Parser)]
#[command(name = "defcsv")]
#[command(author, version, about = "DEFCSV - definition file reader", long_about = None)]
struct Cli {
    /// Verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.execute(cli.verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
