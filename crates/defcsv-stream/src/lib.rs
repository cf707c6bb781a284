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

//! Definition file reading on top of `defcsv-core`.
//!
//! Two layers are provided:
//!
//! - [`DefinitionReader`] reads a file or stream row by row, tracking line
//!   numbers and the content [`Fingerprint`], and hands every non-empty row to
//!   a [`RowSink`]
//! - [`MappedDefinitionReader`] binds the first row to a [`ColumnMap`], turns
//!   data rows into name/value maps with sub-rows, stores default rows in a
//!   [`DefaultsRegistry`] and calls the hooks of a [`MappedHandler`]
//!
//! # Examples
//!
//! ```rust
//! use defcsv_core::MappedRow;
//! use defcsv_stream::{MappedConfig, MappedDefinitionReader, MappedHandler, ReadOptions, RowContext, RowError};
//! use std::io::Cursor;
//!
//! #[derive(Default)]
//! struct Messages(Vec<MappedRow>);
//!
//! impl MappedHandler for Messages {
//!     fn add_row(
//!         &mut self,
//!         row: MappedRow,
//!         _sub_rows: Vec<MappedRow>,
//!         _ctx: &RowContext<'_>,
//!     ) -> Result<(), RowError> {
//!         self.0.push(row);
//!         Ok(())
//!     }
//! }
//!
//! let input = "type,name,circuit\n*r,,bai\nr,status,\n";
//! let mut reader = MappedDefinitionReader::mapped(Messages::default(), MappedConfig::with_defaults());
//! let outcome = reader
//!     .read_from_stream(Cursor::new(input), "inline", &ReadOptions::default())
//!     .unwrap();
//!
//! assert_eq!(outcome.rows, 3);
//! assert_eq!(reader.handler().0[0]["circuit"], "bai");
//! assert_eq!(reader.get_defaults()["r"]["circuit"], "bai");
//! println!("fingerprint {}", outcome.fingerprint);
//! ```

mod columns;
mod config;
mod error;
mod filename;
mod mapped;
mod reader;
mod registry;

pub use columns::ColumnMap;
pub use config::{ColumnArity, MappedConfig, ReadOptions, ReaderConfig};
pub use error::{ErrorCategory, ReadError, ReadResult, RowError};
pub use filename::FileNameDefaults;
pub use mapped::{
    HeaderMatch, MappedDefinitionReader, MappedHandler, MappedRows, RowContext, CATEGORY_COLUMN,
};
pub use reader::{DefinitionReader, NoopSink, ReadOutcome, RowSink, SourceContext};
pub use registry::{DefaultsEntry, DefaultsRegistry};

// Re-export core types for convenience
pub use defcsv_core::{Fingerprint, Limits, MappedRow, Row};
