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

//! Error types for the DEFCSV CLI.

use defcsv_stream::ReadError;
use thiserror::Error;

/// Errors reported by CLI commands.
///
/// # Examples
///
/// ```rust
/// use defcsv_cli::error::CliError;
///
/// let err = CliError::failed(2, 5);
/// assert_eq!(err.to_string(), "2 of 5 files failed");
/// ```
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading a definition file failed.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// Some files of a multi-file command failed; each was reported already.
    #[error("{failed} of {total} files failed")]
    Failed {
        /// Number of files that failed
        failed: usize,
        /// Number of files processed
        total: usize,
    },

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create a summary error for a multi-file command.
    pub fn failed(failed: usize, total: usize) -> Self {
        Self::Failed { failed, total }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defcsv_stream::RowError;

    #[test]
    fn test_read_error_transparent() {
        let err: CliError = RowError::malformed("3 fields, expected 2")
            .at("a.csv", 4)
            .into();
        assert_eq!(err.to_string(), "a.csv:4: malformed row: 3 fields, expected 2");
    }

    #[test]
    fn test_failed_display() {
        assert_eq!(CliError::failed(1, 1).to_string(), "1 of 1 files failed");
    }

    #[test]
    fn test_json_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = source.into();
        assert!(err.to_string().starts_with("JSON format error:"));
    }
}
