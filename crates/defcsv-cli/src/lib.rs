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

//! DEFCSV CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **hash**: Print the content fingerprint of definition files
//! - **check**: Read definition files through the mapped reader and report
//!   rows, default rows and default categories
//! - **dump**: Print the mapped rows of a definition file
//!
//! # Examples
//!
//! ```no_run
//! use defcsv_cli::commands::{check, hash};
//!
//! # fn main() -> Result<(), defcsv_cli::error::CliError> {
//! let files = vec!["08.bai.csv".to_string()];
//! hash(&files, false)?;
//! check(&files, false, vec!["type".to_string()], false)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Library crates only emit `tracing` events. The binary installs a
//! subscriber writing to stderr, filtered by `RUST_LOG`; `--verbose` raises
//! the default level to `debug`.

pub mod cli;
pub mod collect;
pub mod commands;
pub mod error;
