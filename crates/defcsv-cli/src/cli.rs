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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use defcsv_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Print content fingerprints
    ///
    /// Prints `<file> <hash> <size> <mtime>` for every file. Comment and blank
    /// lines count; leading and trailing whitespace does not.
    Hash {
        /// Input file paths
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Read definition files and report rows and defaults
    ///
    /// The first row of each file is its header. Default rows (first field
    /// starting with `*`) fill empty fields of later rows of the same type,
    /// also across the files given.
    Check {
        /// Input file paths
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Reject default rows
        #[arg(long)]
        no_defaults: bool,

        /// Column every header must contain (repeatable)
        #[arg(short, long = "required", value_name = "COLUMN")]
        required: Vec<String>,
    },

    /// Print mapped rows of a definition file
    ///
    /// Rows are printed after default filling, re-serialized in header order,
    /// with sub-rows indented below them.
    Dump {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Print JSON instead of rows
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a file cannot be read or any row fails.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            Commands::Hash { files } => commands::hash(&files, verbose),
            Commands::Check {
                files,
                no_defaults,
                required,
            } => commands::check(&files, no_defaults, required, verbose),
            Commands::Dump { file, json } => commands::dump(&file, json, verbose),
        }
    }
}
