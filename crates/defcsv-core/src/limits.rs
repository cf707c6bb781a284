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

//! Resource limits for tokenizing.

/// Limits bounding the memory a single row may consume.
///
/// Definition files are small and trusted in normal operation, so the
/// defaults are generous; they exist to stop a runaway quoted field from
/// swallowing the rest of a large file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum physical line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum physical lines one logical row may span (default: 1000).
    pub max_lines_per_row: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_length: 1024 * 1024, // 1MB
            max_lines_per_row: 1000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_line_length: usize::MAX,
            max_lines_per_row: usize::MAX,
        }
    }
}
