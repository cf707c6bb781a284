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

//! Error types for definition file reading.
//!
//! Hooks report problems with the unlocated [`RowError`]; the reader attaches
//! the file name and line number and surfaces a [`ReadError`].
//!
//! # Error Categories
//!
//! - **Io**: the source could not be opened or read
//! - **Structure**: malformed rows, header binding failures, unsupported defaults
//! - **Domain**: failures reported by the domain ingestion hooks
//!
//! # Examples
//!
//! ```rust
//! use defcsv_stream::{ErrorCategory, RowError};
//!
//! let err = RowError::domain("unknown data type UCH2").at("08.bai.csv", 12);
//! assert_eq!(err.line(), Some(12));
//! assert_eq!(err.category(), ErrorCategory::Domain);
//! assert_eq!(err.to_string(), "08.bai.csv:12: unknown data type UCH2");
//! ```

use defcsv_core::TokenizeError;
use std::io;
use thiserror::Error;

/// Coarse classification of a failed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Generic I/O or open failure.
    Io,
    /// Structural or argument error (malformed row, header, defaults usage).
    Structure,
    /// Failure reported by a domain ingestion hook.
    Domain,
}

/// A located failure of a definition file read.
///
/// All variants except [`SourceUnavailable`](Self::SourceUnavailable) carry
/// the 1-based line number of the offending row.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The source could not be opened or read.
    #[error("unable to read {file}: {source}")]
    SourceUnavailable {
        file: String,
        #[source]
        source: io::Error,
    },

    /// Unterminated quote or field count not matching the bound columns.
    #[error("{file}:{line}: malformed row: {message}")]
    MalformedRow {
        file: String,
        line: usize,
        message: String,
    },

    /// The header row could not be bound to a column map.
    #[error("{file}:{line}: invalid header: {message}")]
    HeaderBindingFailed {
        file: String,
        line: usize,
        message: String,
    },

    /// A default row was found by a reader not configured for defaults.
    #[error("{file}:{line}: defaults not supported")]
    DefaultsUnsupported { file: String, line: usize },

    /// The domain hook rejected the row; the message is passed through as is.
    #[error("{file}:{line}: {message}")]
    DomainIngestFailed {
        file: String,
        line: usize,
        message: String,
    },
}

impl ReadError {
    /// Create a source error.
    #[inline]
    pub fn unavailable(file: impl Into<String>, source: io::Error) -> Self {
        Self::SourceUnavailable {
            file: file.into(),
            source,
        }
    }

    /// Locate a tokenizer failure.
    ///
    /// `line_no` is the last line consumed and is used when the tokenizer
    /// error carries no line of its own.
    pub fn from_tokenize(file: &str, line_no: usize, err: TokenizeError) -> Self {
        let line = err.line().unwrap_or(line_no);
        let message = match err {
            TokenizeError::Io(source) => return Self::unavailable(file, source),
            TokenizeError::UnclosedQuote { .. } => "unterminated quoted field".to_string(),
            TokenizeError::LineTooLong { length, max, .. } => {
                format!("line length {} exceeds maximum {}", length, max)
            }
            TokenizeError::TooManyLines { max, .. } => {
                format!("quoted field spans more than {} lines", max)
            }
            TokenizeError::Utf8 { message, .. } => format!("invalid UTF-8: {}", message),
        };
        Self::MalformedRow {
            file: file.to_string(),
            line,
            message,
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::SourceUnavailable { .. } => None,
            Self::MalformedRow { line, .. }
            | Self::HeaderBindingFailed { line, .. }
            | Self::DefaultsUnsupported { line, .. }
            | Self::DomainIngestFailed { line, .. } => Some(*line),
        }
    }

    /// The name of the source being read.
    #[inline]
    pub fn file(&self) -> &str {
        match self {
            Self::SourceUnavailable { file, .. }
            | Self::MalformedRow { file, .. }
            | Self::HeaderBindingFailed { file, .. }
            | Self::DefaultsUnsupported { file, .. }
            | Self::DomainIngestFailed { file, .. } => file,
        }
    }

    /// The category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceUnavailable { .. } => ErrorCategory::Io,
            Self::MalformedRow { .. }
            | Self::HeaderBindingFailed { .. }
            | Self::DefaultsUnsupported { .. } => ErrorCategory::Structure,
            Self::DomainIngestFailed { .. } => ErrorCategory::Domain,
        }
    }
}

/// Result type for read operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// An unlocated row failure reported by a hook.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row does not fit the bound columns.
    #[error("{0}")]
    Malformed(String),

    /// The header row is unusable.
    #[error("{0}")]
    Header(String),

    /// Default rows are not accepted by this reader.
    #[error("defaults not supported")]
    DefaultsUnsupported,

    /// Domain specific rejection.
    #[error("{0}")]
    Domain(String),
}

impl RowError {
    /// Create a malformed row error.
    #[inline]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create a header error.
    #[inline]
    pub fn header(message: impl Into<String>) -> Self {
        Self::Header(message.into())
    }

    /// Create a domain error.
    #[inline]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    /// Attach the source name and line number.
    pub fn at(self, file: &str, line: usize) -> ReadError {
        let file = file.to_string();
        match self {
            Self::Malformed(message) => ReadError::MalformedRow {
                file,
                line,
                message,
            },
            Self::Header(message) => ReadError::HeaderBindingFailed {
                file,
                line,
                message,
            },
            Self::DefaultsUnsupported => ReadError::DefaultsUnsupported { file, line },
            Self::Domain(message) => ReadError::DomainIngestFailed {
                file,
                line,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable() {
        let err = ReadError::unavailable(
            "missing.csv",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.line(), None);
        assert_eq!(err.file(), "missing.csv");
        assert_eq!(err.category(), ErrorCategory::Io);
        let display = err.to_string();
        assert!(display.contains("missing.csv"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_row_error_locations() {
        let cases = [
            (RowError::malformed("3 fields"), ErrorCategory::Structure),
            (RowError::header("duplicate column name"), ErrorCategory::Structure),
            (RowError::DefaultsUnsupported, ErrorCategory::Structure),
            (RowError::domain("bad value"), ErrorCategory::Domain),
        ];
        for (row_err, category) in cases {
            let err = row_err.at("a.csv", 4);
            assert_eq!(err.line(), Some(4));
            assert_eq!(err.file(), "a.csv");
            assert_eq!(err.category(), category);
            assert!(err.to_string().starts_with("a.csv:4: "));
        }
    }

    #[test]
    fn test_defaults_unsupported_message() {
        let err = RowError::DefaultsUnsupported.at("x.csv", 2);
        assert_eq!(err.to_string(), "x.csv:2: defaults not supported");
    }

    #[test]
    fn test_domain_message_verbatim() {
        let err = RowError::domain("invalid divisor 0").at("x.csv", 9);
        assert!(matches!(
            &err,
            ReadError::DomainIngestFailed { message, .. } if message == "invalid divisor 0"
        ));
    }

    #[test]
    fn test_from_tokenize_unclosed_quote() {
        let err = ReadError::from_tokenize("x.csv", 10, TokenizeError::UnclosedQuote { line: 7 });
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.category(), ErrorCategory::Structure);
        assert!(err.to_string().contains("unterminated quoted field"));
    }

    #[test]
    fn test_from_tokenize_io() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk gone");
        let err = ReadError::from_tokenize("x.csv", 3, TokenizeError::Io(io_err));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.line(), None);
    }
}
