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

//! Core tokenizer for DEFCSV definition files.
//!
//! Definition files are comma separated text files with one record per line.
//! This crate turns a character stream into rows of trimmed field strings and
//! keeps a running fingerprint of the content so callers can tell whether a
//! file changed since it was last read. Interpreting the rows (header binding,
//! default rows, domain hooks) lives in `defcsv-stream`.
//!
//! # Grammar
//!
//! - Fields are separated by `,`
//! - A field starting with `"` is quoted; `,` and `#` are literal inside quotes
//!   and `""` yields a single `"`
//! - A quoted field left open at the end of a line continues on the next line;
//!   the parts are joined with `;`
//! - A line starting with `#` is a comment
//! - `;` separates multiple values inside one field and is never split on here
//!
//! # Examples
//!
//! ```
//! use defcsv_core::{Fingerprint, LineTokenizer, Row};
//! use std::io::Cursor;
//!
//! let mut input = Cursor::new("# circuits\nname,\"a, b\",c\n");
//! let mut tokenizer = LineTokenizer::new();
//! let mut row = Row::new();
//! let mut line_no = 0;
//! let mut fingerprint = Fingerprint::new();
//!
//! // comment line
//! assert!(tokenizer.next_row(&mut input, &mut row, &mut line_no, Some(&mut fingerprint)).unwrap());
//! assert!(row.is_empty());
//!
//! assert!(tokenizer.next_row(&mut input, &mut row, &mut line_no, Some(&mut fingerprint)).unwrap());
//! assert_eq!(row, vec!["name", "a, b", "c"]);
//! assert_eq!(line_no, 2);
//!
//! assert!(!tokenizer.next_row(&mut input, &mut row, &mut line_no, None).unwrap());
//! ```

mod error;
pub mod fingerprint;
pub mod grammar;
pub mod limits;
mod row;
pub mod tokenizer;

pub use error::{TokenizeError, TokenizeResult};
pub use fingerprint::Fingerprint;
pub use grammar::{
    combine_fields, quote_field, COMMENT_MARKER, DEFAULT_MARKER, FIELD_SEPARATOR,
    TEXT_SEPARATOR, VALUE_SEPARATOR,
};
pub use limits::Limits;
pub use row::{is_blank, MappedRow, Row};
pub use tokenizer::LineTokenizer;
