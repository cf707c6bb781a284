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

//! Reader configuration and per-read options.

use defcsv_core::{Limits, MappedRow};

/// Configuration of a [`DefinitionReader`](crate::DefinitionReader).
///
/// # Examples
///
/// ```rust
/// use defcsv_stream::ReaderConfig;
///
/// let config = ReaderConfig::default();
/// assert_eq!(config.buffer_size, 64 * 1024);
/// assert_eq!(config.limits.max_line_length, 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for reading files.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Tokenizer limits applied to every source.
    pub limits: Limits,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            limits: Limits::default(),
        }
    }
}

/// How strictly data rows must match the bound column count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnArity {
    /// Every row has exactly one field per column.
    #[default]
    Exact,
    /// Rows may omit trailing columns; missing fields map to empty values.
    AllowMissingTrailing,
}

/// Configuration of the mapped row layer.
///
/// # Examples
///
/// ```rust
/// use defcsv_stream::{ColumnArity, MappedConfig};
///
/// let config = MappedConfig::default();
/// assert!(!config.supports_defaults);
/// assert!(config.apply_defaults);
/// assert_eq!(config.arity, ColumnArity::Exact);
///
/// let config = MappedConfig::with_defaults();
/// assert!(config.supports_defaults);
/// ```
#[derive(Debug, Clone)]
pub struct MappedConfig {
    /// Accept default rows (first field starting with `*`).
    pub supports_defaults: bool,

    /// Fill empty fields of data rows from the registered defaults before
    /// handing them to the domain hook.
    pub apply_defaults: bool,

    /// Field count check for data rows.
    pub arity: ColumnArity,
}

impl Default for MappedConfig {
    fn default() -> Self {
        Self {
            supports_defaults: false,
            apply_defaults: true,
            arity: ColumnArity::Exact,
        }
    }
}

impl MappedConfig {
    /// Default configuration with default rows enabled.
    pub fn with_defaults() -> Self {
        Self {
            supports_defaults: true,
            ..Self::default()
        }
    }
}

/// Options for a single read.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Log row failures at `warn` instead of `debug`.
    pub verbose: bool,

    /// Initial default values by field name, applied before the values
    /// derived from the file name.
    pub defaults: Option<MappedRow>,
}

impl ReadOptions {
    /// Options with verbose diagnostics enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            defaults: None,
        }
    }

    /// Set the initial default values.
    pub fn with_defaults(mut self, defaults: MappedRow) -> Self {
        self.defaults = Some(defaults);
        self
    }
}
