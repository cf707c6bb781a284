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

//! Reading whole definition sources.
//!
//! [`DefinitionReader`] drives the [`LineTokenizer`] over a file or stream,
//! keeps the line count and content fingerprint, and forwards every non-empty
//! row to a [`RowSink`]. The first failure aborts the read.

use crate::config::{ReadOptions, ReaderConfig};
use crate::error::{ReadError, ReadResult, RowError};
use defcsv_core::{Fingerprint, LineTokenizer, Row};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Location of the row being ingested.
#[derive(Debug, Clone, Copy)]
pub struct SourceContext<'a> {
    /// Name of the source, used for diagnostics.
    pub source: &'a str,
    /// 1-based line number of the last physical line of the row.
    pub line: usize,
    /// Whether verbose diagnostics were requested.
    pub verbose: bool,
}

/// Receiver of the rows of a definition source.
///
/// Only [`ingest_row`](Self::ingest_row) is required. Sinks locate their own
/// failures, typically with [`RowError::at`].
pub trait RowSink {
    /// Called before the first row of a source.
    fn begin_source(&mut self, _source: &str, _options: &ReadOptions) -> ReadResult<()> {
        Ok(())
    }

    /// Called once per non-empty row, in file order.
    fn ingest_row(&mut self, row: &mut Row, ctx: &SourceContext<'_>) -> ReadResult<()>;

    /// Called after the last row of a source was ingested successfully.
    fn end_source(&mut self, _ctx: &SourceContext<'_>) -> ReadResult<()> {
        Ok(())
    }
}

impl<F> RowSink for F
where
    F: FnMut(&mut Row, &SourceContext<'_>) -> Result<(), RowError>,
{
    fn ingest_row(&mut self, row: &mut Row, ctx: &SourceContext<'_>) -> ReadResult<()> {
        self(row, ctx).map_err(|e| e.at(ctx.source, ctx.line))
    }
}

/// A sink that accepts and discards every row.
///
/// Useful to compute the fingerprint of a file without interpreting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl RowSink for NoopSink {
    fn ingest_row(&mut self, _row: &mut Row, _ctx: &SourceContext<'_>) -> ReadResult<()> {
        Ok(())
    }
}

/// Result of a successful read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Fingerprint of the whole source.
    pub fingerprint: Fingerprint,
    /// Modification time of the file, if read from one.
    pub modified: Option<SystemTime>,
    /// Number of non-empty rows handed to the sink.
    pub rows: usize,
}

impl ReadOutcome {
    /// Modification time as whole seconds since the Unix epoch.
    pub fn modified_secs(&self) -> Option<u64> {
        self.modified
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
    }
}

/// Reads definition sources row by row into a [`RowSink`].
///
/// Concurrent reads on one instance are ruled out by `&mut self`; the sink's
/// per-source state (such as a bound header) is not reentrant.
///
/// # Examples
///
/// ```rust
/// use defcsv_core::Row;
/// use defcsv_stream::{DefinitionReader, ReadOptions, RowError, SourceContext};
/// use std::io::Cursor;
///
/// let mut names = Vec::new();
/// let sink = |row: &mut Row, _ctx: &SourceContext<'_>| -> Result<(), RowError> {
///     names.push(row[0].clone());
///     Ok(())
/// };
/// let mut reader = DefinitionReader::new(sink);
/// let outcome = reader
///     .read_from_stream(Cursor::new("# list\nalpha,1\nbeta,2\n"), "inline", &ReadOptions::default())
///     .unwrap();
/// assert_eq!(outcome.rows, 2);
/// drop(reader);
/// assert_eq!(names, vec!["alpha", "beta"]);
/// ```
#[derive(Debug)]
pub struct DefinitionReader<S> {
    sink: S,
    tokenizer: LineTokenizer,
    config: ReaderConfig,
}

impl<S: RowSink> DefinitionReader<S> {
    /// Create a reader with default configuration.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, ReaderConfig::default())
    }

    /// Create a reader with custom configuration.
    pub fn with_config(sink: S, config: ReaderConfig) -> Self {
        Self {
            sink,
            tokenizer: LineTokenizer::with_limits(config.limits.clone()),
            config,
        }
    }

    /// The reader configuration.
    #[inline]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// The sink receiving rows.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the reader, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Read all definitions from a file.
    ///
    /// # Errors
    ///
    /// [`ReadError::SourceUnavailable`] if the path is missing, is a directory
    /// or cannot be read; otherwise the first row failure.
    pub fn read_from_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &ReadOptions,
    ) -> ReadResult<ReadOutcome> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let metadata = fs::metadata(path).map_err(|e| ReadError::unavailable(&name, e))?;
        if metadata.is_dir() {
            return Err(ReadError::unavailable(
                &name,
                io::Error::new(io::ErrorKind::InvalidInput, "is a directory"),
            ));
        }
        let file = File::open(path).map_err(|e| ReadError::unavailable(&name, e))?;
        let stream = BufReader::with_capacity(self.config.buffer_size, file);

        let mut outcome = self.read_from_stream(stream, &name, options)?;
        outcome.modified = metadata.modified().ok();
        Ok(outcome)
    }

    /// Read all definitions from a stream.
    ///
    /// `name` identifies the source in diagnostics and is passed to the sink.
    pub fn read_from_stream<R: BufRead>(
        &mut self,
        mut stream: R,
        name: &str,
        options: &ReadOptions,
    ) -> ReadResult<ReadOutcome> {
        let result = self.read_all(&mut stream, name, options);
        match &result {
            Ok(outcome) => debug!(
                source = name,
                hash = %outcome.fingerprint,
                size = outcome.fingerprint.size,
                rows = outcome.rows,
                "read definitions"
            ),
            Err(e) if options.verbose => warn!(source = name, "{}", e),
            Err(e) => debug!(source = name, "{}", e),
        }
        result
    }

    fn read_all<R: BufRead>(
        &mut self,
        stream: &mut R,
        name: &str,
        options: &ReadOptions,
    ) -> ReadResult<ReadOutcome> {
        self.sink.begin_source(name, options)?;

        let mut line_no = 0;
        let mut row = Row::new();
        let mut outcome = ReadOutcome::default();
        while self.read_one_row(
            stream,
            name,
            &mut line_no,
            &mut row,
            Some(&mut outcome.fingerprint),
            options.verbose,
        )? {
            if !row.is_empty() {
                outcome.rows += 1;
            }
        }

        self.sink.end_source(&SourceContext {
            source: name,
            line: line_no,
            verbose: options.verbose,
        })?;
        Ok(outcome)
    }

    /// Read one logical row into `row` and hand it to the sink if non-empty.
    ///
    /// `row` is cleared first. Returns `Ok(false)` once the stream is
    /// exhausted.
    pub fn read_one_row<R: BufRead>(
        &mut self,
        stream: &mut R,
        name: &str,
        line_no: &mut usize,
        row: &mut Row,
        fingerprint: Option<&mut Fingerprint>,
        verbose: bool,
    ) -> ReadResult<bool> {
        let more = self
            .tokenizer
            .next_row(stream, row, line_no, fingerprint)
            .map_err(|e| ReadError::from_tokenize(name, *line_no, e))?;
        if row.is_empty() {
            return Ok(more);
        }
        let ctx = SourceContext {
            source: name,
            line: *line_no,
            verbose,
        };
        self.sink.ingest_row(row, &ctx)?;
        Ok(more)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[derive(Default)]
    struct Collect {
        rows: Vec<(usize, Row)>,
        begun: Vec<String>,
        ended: usize,
    }

    impl RowSink for Collect {
        fn begin_source(&mut self, source: &str, _options: &ReadOptions) -> ReadResult<()> {
            self.begun.push(source.to_string());
            Ok(())
        }

        fn ingest_row(&mut self, row: &mut Row, ctx: &SourceContext<'_>) -> ReadResult<()> {
            if row[0] == "fail" {
                return Err(RowError::domain("refused").at(ctx.source, ctx.line));
            }
            self.rows.push((ctx.line, row.clone()));
            Ok(())
        }

        fn end_source(&mut self, _ctx: &SourceContext<'_>) -> ReadResult<()> {
            self.ended += 1;
            Ok(())
        }
    }

    fn read(input: &str) -> (DefinitionReader<Collect>, ReadResult<ReadOutcome>) {
        let mut reader = DefinitionReader::new(Collect::default());
        let result = reader.read_from_stream(Cursor::new(input), "test.csv", &ReadOptions::default());
        (reader, result)
    }

    #[test]
    fn test_rows_with_line_numbers() {
        let (reader, result) = read("a,b\n\n# note\nc,d\n");
        let outcome = result.unwrap();
        assert_eq!(outcome.rows, 2);
        assert_eq!(outcome.modified, None);
        let sink = reader.sink();
        assert_eq!(sink.rows[0], (1, vec!["a".to_string(), "b".to_string()]));
        assert_eq!(sink.rows[1].0, 4);
        assert_eq!(sink.begun, vec!["test.csv"]);
        assert_eq!(sink.ended, 1);
    }

    #[test]
    fn test_first_failure_aborts() {
        let (reader, result) = read("a\nfail\nb\n");
        let err = result.unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.file(), "test.csv");
        assert_eq!(reader.sink().rows.len(), 1);
        assert_eq!(reader.sink().ended, 0);
    }

    #[test]
    fn test_unclosed_quote_is_malformed() {
        let (_, result) = read("a\n\"open,b\n");
        assert!(matches!(
            result.unwrap_err(),
            ReadError::MalformedRow { line: 2, .. }
        ));
    }

    #[test]
    fn test_fingerprint_reset_per_read() {
        let mut reader = DefinitionReader::new(NoopSink);
        let options = ReadOptions::default();
        let first = reader
            .read_from_stream(Cursor::new("a,b\n"), "x", &options)
            .unwrap();
        let second = reader
            .read_from_stream(Cursor::new("a,b\n"), "x", &options)
            .unwrap();
        assert_eq!(first.fingerprint, second.fingerprint);
        assert_eq!(first.fingerprint.size, 4);
    }

    #[test]
    fn test_read_one_row_manual_loop() {
        let mut reader = DefinitionReader::new(Collect::default());
        let mut stream = Cursor::new("x,1\n\ny,2");
        let mut line_no = 0;
        let mut row = Row::new();
        let mut fp = Fingerprint::new();
        let mut calls = 0;
        while reader
            .read_one_row(&mut stream, "manual", &mut line_no, &mut row, Some(&mut fp), false)
            .unwrap()
        {
            calls += 1;
        }
        assert_eq!(calls, 3);
        assert_eq!(line_no, 3);
        assert_eq!(reader.sink().rows.len(), 2);
        assert_eq!(fp.size, 9);
    }

    #[test]
    fn test_closure_sink_locates_errors() {
        let sink = |row: &mut Row, _ctx: &SourceContext<'_>| -> Result<(), RowError> {
            if row.len() != 2 {
                return Err(RowError::malformed("expected two fields"));
            }
            Ok(())
        };
        let mut reader = DefinitionReader::new(sink);
        let err = reader
            .read_from_stream(Cursor::new("a,b\nc\n"), "pairs.csv", &ReadOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "pairs.csv:2: malformed row: expected two fields");
    }

    #[test]
    fn test_missing_file() {
        let mut reader = DefinitionReader::new(NoopSink);
        let err = reader
            .read_from_file("/nonexistent/definitely/missing.csv", &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReadError::SourceUnavailable { .. }));
    }
}
