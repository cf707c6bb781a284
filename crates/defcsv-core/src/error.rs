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

//! Error types for row tokenizing.

use thiserror::Error;

/// Errors produced while splitting a stream into rows.
///
/// Every variant that can be tied to a physical line carries its 1-based line
/// number; use [`line()`](Self::line) to extract it uniformly.
///
/// # Examples
///
/// ```
/// use defcsv_core::TokenizeError;
///
/// let err = TokenizeError::UnclosedQuote { line: 7 };
/// assert_eq!(err.line(), Some(7));
/// assert!(err.to_string().contains("line 7"));
/// ```
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// A quoted field was still open when the stream ended.
    #[error("line {line}: unterminated quoted field")]
    UnclosedQuote { line: usize },

    /// A physical line exceeded the configured length limit.
    #[error("line {line}: line length {length} exceeds maximum {max}")]
    LineTooLong {
        line: usize,
        length: usize,
        max: usize,
    },

    /// A quoted field kept a single row open across too many lines.
    #[error("line {line}: row spans more than {max} lines")]
    TooManyLines { line: usize, max: usize },

    /// The line is not valid UTF-8.
    #[error("line {line}: invalid UTF-8: {message}")]
    Utf8 { line: usize, message: String },

    /// Reading from the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TokenizeError {
    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnclosedQuote { line }
            | Self::LineTooLong { line, .. }
            | Self::TooManyLines { line, .. }
            | Self::Utf8 { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }

    /// Whether the error stems from the stream itself rather than its content.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type for tokenizer operations.
pub type TokenizeResult<T> = Result<T, TokenizeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unclosed_quote_display() {
        let err = TokenizeError::UnclosedQuote { line: 3 };
        let display = err.to_string();
        assert!(display.contains("line 3"));
        assert!(display.contains("unterminated"));
    }

    #[test]
    fn test_line_too_long_display() {
        let err = TokenizeError::LineTooLong {
            line: 2,
            length: 2048,
            max: 1024,
        };
        let display = err.to_string();
        assert!(display.contains("2048"));
        assert!(display.contains("1024"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_io_has_no_line() {
        let err = TokenizeError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert_eq!(err.line(), None);
        assert!(err.is_io());
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_utf8_line() {
        let err = TokenizeError::Utf8 {
            line: 9,
            message: "invalid byte".to_string(),
        };
        assert_eq!(err.line(), Some(9));
        assert!(!err.is_io());
    }
}
