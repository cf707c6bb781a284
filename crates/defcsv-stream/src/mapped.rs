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

//! Header-mapped reading with default rows and sub-row grouping.
//!
//! [`MappedRows`] is the [`RowSink`] behind a [`MappedDefinitionReader`]. Per
//! source it binds the first row to a [`ColumnMap`], then turns every data
//! row into a [`MappedRow`] plus sub-rows and hands it to a
//! [`MappedHandler`]. Rows whose first field starts with `*` are default rows
//! and go to the [`DefaultsRegistry`] instead.
//!
//! A primary row is held back until the next primary row (or the end of the
//! source) so that continuation rows can still attach to it as sub-rows.

use crate::columns::ColumnMap;
use crate::config::{MappedConfig, ReadOptions, ReaderConfig};
use crate::error::{ReadResult, RowError};
use crate::filename::FileNameDefaults;
use crate::reader::{DefinitionReader, RowSink, SourceContext};
use crate::registry::{DefaultsEntry, DefaultsRegistry};
use defcsv_core::grammar::strip_default_marker;
use defcsv_core::{combine_fields, MappedRow, Row, DEFAULT_MARKER};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

/// Column holding the category of a row.
pub const CATEGORY_COLUMN: &str = "type";

/// How [`MappedHandler::bind_header`] classified the first row of a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// The row is a header with these column names.
    Header(Vec<String>),
    /// The row is data; bind [`MappedHandler::default_columns`] instead.
    Data,
}

/// What a [`MappedHandler`] hook knows about the row at hand.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// Name of the source.
    pub source: &'a str,
    /// 1-based line number of the row.
    pub line: usize,
    /// Whether verbose diagnostics were requested.
    pub verbose: bool,
    /// Columns bound for this source.
    pub columns: &'a ColumnMap,
    /// Caller defaults merged with the values seeded by the file name.
    pub file_defaults: &'a MappedRow,
    /// What the file name encodes, if it follows the naming convention.
    pub file_name: Option<&'a FileNameDefaults>,
}

impl RowContext<'_> {
    /// Category of a row: its non-empty `type` value, else the category seeded
    /// by the file name, else the `type` file default, else empty.
    pub fn default_category(&self, row: &MappedRow) -> String {
        non_empty(row.get(CATEGORY_COLUMN))
            .or_else(|| self.file_name.map(|f| f.category.as_str()))
            .or_else(|| non_empty(self.file_defaults.get(CATEGORY_COLUMN)))
            .unwrap_or_default()
            .to_string()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Domain hooks of a [`MappedDefinitionReader`].
///
/// Only [`add_row`](Self::add_row) is required.
///
/// # Examples
///
/// ```rust
/// use defcsv_core::MappedRow;
/// use defcsv_stream::{MappedConfig, MappedDefinitionReader, MappedHandler, ReadOptions, RowContext, RowError};
/// use std::io::Cursor;
///
/// #[derive(Default)]
/// struct Names(Vec<String>);
///
/// impl MappedHandler for Names {
///     fn add_row(
///         &mut self,
///         row: MappedRow,
///         _sub_rows: Vec<MappedRow>,
///         _ctx: &RowContext<'_>,
///     ) -> Result<(), RowError> {
///         self.0.push(row["name"].clone());
///         Ok(())
///     }
/// }
///
/// let mut reader = MappedDefinitionReader::mapped(Names::default(), MappedConfig::default());
/// reader
///     .read_from_stream(Cursor::new("name,value\nfoo,1\nbar,2\n"), "inline", &ReadOptions::default())
///     .unwrap();
/// assert_eq!(reader.handler().0, vec!["foo", "bar"]);
/// ```
pub trait MappedHandler {
    /// Consume a data row with its sub-rows.
    fn add_row(
        &mut self,
        row: MappedRow,
        sub_rows: Vec<MappedRow>,
        ctx: &RowContext<'_>,
    ) -> Result<(), RowError>;

    /// Classify the first row of a source. Defaults to treating it as the header.
    fn bind_header(&mut self, row: &[String]) -> Result<HeaderMatch, RowError> {
        Ok(HeaderMatch::Header(row.to_vec()))
    }

    /// Column ordering used when a source has no header row.
    fn default_columns(&self) -> Option<Vec<String>> {
        None
    }

    /// Columns the main row group must contain.
    fn required_columns(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether a data row belongs to the previous primary row.
    fn is_continuation(&self, _row: &MappedRow, _ctx: &RowContext<'_>) -> bool {
        false
    }

    /// Category key of a row.
    fn category(&self, row: &MappedRow, ctx: &RowContext<'_>) -> String {
        ctx.default_category(row)
    }

    /// Registry keys to look up for a data row, most specific first.
    fn defaults_keys(&self, row: &MappedRow, ctx: &RowContext<'_>) -> Vec<String> {
        vec![self.category(row, ctx)]
    }

    /// Called after a default row was merged into the registry.
    fn add_default(
        &mut self,
        _category: &str,
        _entry: &DefaultsEntry,
        _ctx: &RowContext<'_>,
    ) -> Result<(), RowError> {
        Ok(())
    }

    /// Seed defaults from a file name without its directory.
    fn extract_defaults_from_name(&self, _file_name: &str) -> Option<FileNameDefaults> {
        None
    }
}

/// A primary row waiting for continuation rows.
#[derive(Debug)]
struct Pending {
    row: MappedRow,
    subs: Vec<MappedRow>,
    /// Leading entries of `subs` split from column groups; the rest are continuation rows.
    groups: usize,
    line: usize,
}

/// Per-source state, reset by `begin_source`.
#[derive(Debug, Default)]
struct SessionState {
    columns: Option<ColumnMap>,
    pending: Option<Pending>,
    file_defaults: MappedRow,
    file_name: Option<FileNameDefaults>,
}

impl SessionState {
    fn context<'a>(
        &'a self,
        columns: &'a ColumnMap,
        source: &'a str,
        line: usize,
        verbose: bool,
    ) -> RowContext<'a> {
        RowContext {
            source,
            line,
            verbose,
            columns,
            file_defaults: &self.file_defaults,
            file_name: self.file_name.as_ref(),
        }
    }

    fn fill_file_defaults(&self, row: &mut MappedRow) {
        for (name, value) in &self.file_defaults {
            if let Some(slot) = row.get_mut(name) {
                if slot.is_empty() {
                    slot.clone_from(value);
                }
            }
        }
    }
}

/// Row sink mapping rows through a [`ColumnMap`] into a [`MappedHandler`].
#[derive(Debug)]
pub struct MappedRows<H> {
    handler: H,
    config: MappedConfig,
    registry: DefaultsRegistry,
    session: SessionState,
}

/// A [`DefinitionReader`] feeding a [`MappedHandler`].
pub type MappedDefinitionReader<H> = DefinitionReader<MappedRows<H>>;

impl<H: MappedHandler> MappedRows<H> {
    /// Create a sink with an empty registry.
    pub fn new(handler: H, config: MappedConfig) -> Self {
        Self {
            handler,
            config,
            registry: DefaultsRegistry::new(),
            session: SessionState::default(),
        }
    }

    /// The domain handler.
    #[inline]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the domain handler.
    #[inline]
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consume the sink, returning the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The mapped row configuration.
    #[inline]
    pub fn config(&self) -> &MappedConfig {
        &self.config
    }

    /// The registry of default rows.
    #[inline]
    pub fn registry(&self) -> &DefaultsRegistry {
        &self.registry
    }

    /// Columns bound by the last source, if any.
    pub fn columns(&self) -> Option<&ColumnMap> {
        self.session.columns.as_ref()
    }

    /// Re-serialize a main row in the order of the bound columns, or in key
    /// order if none are bound.
    pub fn combine_row(&self, row: &MappedRow) -> String {
        match &self.session.columns {
            Some(columns) => columns.combine_row(row),
            None => combine_fields(row.values()),
        }
    }

    /// Bind the columns from the first row. Returns `true` if the row is data.
    fn bind_columns(&mut self, row: &Row, ctx: &SourceContext<'_>) -> ReadResult<bool> {
        let at = |e: RowError| e.at(ctx.source, ctx.line);
        let (names, is_data) = match self.handler.bind_header(row).map_err(at)? {
            HeaderMatch::Header(names) => (names, false),
            HeaderMatch::Data => {
                let names = self.handler.default_columns().ok_or_else(|| {
                    at(RowError::header("no header row and no default columns"))
                })?;
                (names, true)
            }
        };
        let columns = ColumnMap::bind(&names).map_err(at)?;
        if let Some(missing) = self
            .handler
            .required_columns()
            .into_iter()
            .find(|name| !columns.contains(name))
        {
            return Err(at(RowError::header(format!(
                "missing required column {}",
                missing
            ))));
        }

        debug!(
            source = ctx.source,
            line = ctx.line,
            columns = columns.len(),
            groups = columns.sub_groups(),
            from_header = !is_data,
            "bound columns"
        );
        self.session.columns = Some(columns);
        Ok(is_data)
    }

    fn ingest_default(&mut self, row: &mut Row, ctx: &SourceContext<'_>) -> ReadResult<()> {
        let at = |e: RowError| e.at(ctx.source, ctx.line);
        if !self.config.supports_defaults {
            return Err(at(RowError::DefaultsUnsupported));
        }
        self.dispatch_pending(ctx.source, ctx.verbose)?;

        if let Some(first) = row.first_mut() {
            strip_default_marker(first);
        }
        let Some(columns) = self.session.columns.as_ref() else {
            return Err(at(RowError::header("no columns bound")));
        };
        let (base, subs) = columns.map_row(row, self.config.arity).map_err(at)?;
        let rctx = self
            .session
            .context(columns, ctx.source, ctx.line, ctx.verbose);
        let mut keyed = base.clone();
        self.session.fill_file_defaults(&mut keyed);
        let category = self.handler.category(&keyed, &rctx);
        let entry = self
            .registry
            .merge(&category, DefaultsEntry::from_row(base, subs));
        trace!(
            source = ctx.source,
            line = ctx.line,
            category = %category,
            fields = entry.base.len(),
            "registered defaults"
        );
        self.handler
            .add_default(&category, &entry, &rctx)
            .map_err(at)
    }

    fn ingest_data(&mut self, row: &Row, ctx: &SourceContext<'_>) -> ReadResult<()> {
        let at = |e: RowError| e.at(ctx.source, ctx.line);
        let Some(columns) = self.session.columns.as_ref() else {
            return Err(at(RowError::header("no columns bound")));
        };
        let (main, subs) = columns.map_row(row, self.config.arity).map_err(at)?;
        let rctx = self
            .session
            .context(columns, ctx.source, ctx.line, ctx.verbose);

        if self.handler.is_continuation(&main, &rctx) {
            let Some(pending) = self.session.pending.as_mut() else {
                return Err(at(RowError::malformed(
                    "continuation row without a preceding row",
                )));
            };
            pending.subs.push(main);
            pending.subs.extend(subs);
            return Ok(());
        }

        self.dispatch_pending(ctx.source, ctx.verbose)?;
        self.session.pending = Some(Pending {
            row: main,
            groups: subs.len(),
            subs,
            line: ctx.line,
        });
        Ok(())
    }

    /// Apply defaults to the held back primary row and hand it to the handler.
    fn dispatch_pending(&mut self, source: &str, verbose: bool) -> ReadResult<()> {
        let Some(mut pending) = self.session.pending.take() else {
            return Ok(());
        };
        let Some(columns) = self.session.columns.as_ref() else {
            return Ok(());
        };
        let ctx = self.session.context(columns, source, pending.line, verbose);

        if self.config.apply_defaults {
            self.session.fill_file_defaults(&mut pending.row);
            let keys = self.handler.defaults_keys(&pending.row, &ctx);
            if let Some(entry) = self.registry.first_match(&keys) {
                let groups = pending.groups.min(pending.subs.len());
                let filled = entry.fill(&mut pending.row, &mut pending.subs[..groups]);
                trace!(source, line = pending.line, filled, "applied defaults");
            }
        }

        self.handler
            .add_row(pending.row, pending.subs, &ctx)
            .map_err(|e| e.at(source, pending.line))
    }
}

impl<H: MappedHandler> RowSink for MappedRows<H> {
    fn begin_source(&mut self, source: &str, options: &ReadOptions) -> ReadResult<()> {
        self.session = SessionState::default();
        if let Some(defaults) = &options.defaults {
            self.session.file_defaults = defaults.clone();
        }

        let file_name = Path::new(source)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(source);
        if let Some(parsed) = self.handler.extract_defaults_from_name(file_name) {
            debug!(source, category = %parsed.category, "defaults from file name");
            self.session
                .file_defaults
                .extend(parsed.values.iter().map(|(k, v)| (k.clone(), v.clone())));
            self.session.file_name = Some(parsed);
        }
        Ok(())
    }

    fn ingest_row(&mut self, row: &mut Row, ctx: &SourceContext<'_>) -> ReadResult<()> {
        if self.session.columns.is_none() && !self.bind_columns(row, ctx)? {
            return Ok(());
        }
        if row.first().is_some_and(|f| f.starts_with(DEFAULT_MARKER)) {
            self.ingest_default(row, ctx)
        } else {
            self.ingest_data(row, ctx)
        }
    }

    fn end_source(&mut self, ctx: &SourceContext<'_>) -> ReadResult<()> {
        self.dispatch_pending(ctx.source, ctx.verbose)
    }
}

impl<H: MappedHandler> DefinitionReader<MappedRows<H>> {
    /// Create a mapped reader with default reader configuration.
    pub fn mapped(handler: H, config: MappedConfig) -> Self {
        DefinitionReader::new(MappedRows::new(handler, config))
    }

    /// Create a mapped reader with custom reader configuration.
    pub fn mapped_with_config(handler: H, config: MappedConfig, reader: ReaderConfig) -> Self {
        DefinitionReader::with_config(MappedRows::new(handler, config), reader)
    }

    /// The domain handler.
    #[inline]
    pub fn handler(&self) -> &H {
        self.sink().handler()
    }

    /// Mutable access to the domain handler.
    #[inline]
    pub fn handler_mut(&mut self) -> &mut H {
        self.sink_mut().handler_mut()
    }

    /// A cloneable handle onto this reader's registry.
    pub fn defaults_registry(&self) -> DefaultsRegistry {
        self.sink().registry().clone()
    }

    /// A copy of the base defaults of every category.
    ///
    /// Taken under its own lock. Use [`defaults_snapshot`](Self::defaults_snapshot)
    /// when base and sub-row defaults must come from the same registry state.
    pub fn get_defaults(&self) -> BTreeMap<String, MappedRow> {
        self.sink().registry().defaults()
    }

    /// A copy of the sub-row defaults of every category.
    ///
    /// Taken under its own lock; see [`defaults_snapshot`](Self::defaults_snapshot).
    pub fn get_sub_defaults(&self) -> BTreeMap<String, Vec<MappedRow>> {
        self.sink().registry().sub_defaults()
    }

    /// A consistent copy of every registry entry.
    pub fn defaults_snapshot(&self) -> BTreeMap<String, DefaultsEntry> {
        self.sink().registry().snapshot()
    }

    /// Columns bound by the last source, if any.
    pub fn columns(&self) -> Option<&ColumnMap> {
        self.sink().columns()
    }

    /// See [`MappedRows::combine_row`].
    pub fn combine_row(&self, row: &MappedRow) -> String {
        self.sink().combine_row(row)
    }
}
