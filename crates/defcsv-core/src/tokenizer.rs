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

//! Splitting a stream into rows of fields.
//!
//! [`LineTokenizer`] reads one logical row per call. A logical row is usually
//! one physical line, but a quoted field left open at the end of a line pulls
//! in the following line(s) until the quote is closed.

use crate::error::{TokenizeError, TokenizeResult};
use crate::fingerprint::Fingerprint;
use crate::grammar::{is_comment, FIELD_SEPARATOR, TEXT_SEPARATOR, VALUE_SEPARATOR};
use crate::limits::Limits;
use crate::row::{is_blank, Row};
use std::io::{BufRead, Read};

/// Splitter state carried across the physical lines of one logical row.
#[derive(Debug)]
struct SplitState {
    quoted: bool,
    /// Only whitespace seen since the last separator.
    field_start: bool,
    /// Line on which the currently open quote started.
    quote_line: usize,
}

impl SplitState {
    fn new() -> Self {
        Self {
            quoted: false,
            field_start: true,
            quote_line: 0,
        }
    }
}

/// Produces one [`Row`] per call from a buffered stream.
///
/// The tokenizer owns its scratch buffers; the row buffer is owned by the
/// caller and is cleared on every call, so one `Row` can be reused for a whole
/// file.
///
/// # Examples
///
/// ```
/// use defcsv_core::{LineTokenizer, Row};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new("r,\"multi\nline\",x\n");
/// let mut tokenizer = LineTokenizer::new();
/// let mut row = Row::new();
/// let mut line_no = 0;
///
/// assert!(tokenizer.next_row(&mut input, &mut row, &mut line_no, None).unwrap());
/// assert_eq!(row, vec!["r", "multi;line", "x"]);
/// assert_eq!(line_no, 2);
/// ```
#[derive(Debug, Default)]
pub struct LineTokenizer {
    limits: Limits,
    raw: Vec<u8>,
    field: String,
}

impl LineTokenizer {
    /// Create a tokenizer with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// The limits applied by this tokenizer.
    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Split the next logical row from the stream into `row`.
    ///
    /// `line_no` is incremented once per physical line consumed. If a
    /// fingerprint is given, every consumed line is combined into it after
    /// trimming, whether or not it yields fields.
    ///
    /// Returns `Ok(false)` once the stream is exhausted; `row` is empty in that
    /// case. Otherwise returns `Ok(true)`, with `row` empty for blank lines,
    /// comment lines and lines of empty fields only.
    ///
    /// # Errors
    ///
    /// - [`TokenizeError::UnclosedQuote`] if the stream ends inside a quoted field
    /// - [`TokenizeError::LineTooLong`] / [`TokenizeError::TooManyLines`] when a
    ///   [`Limits`] value is exceeded
    /// - [`TokenizeError::Utf8`] / [`TokenizeError::Io`] for unreadable input
    pub fn next_row<R: BufRead>(
        &mut self,
        stream: &mut R,
        row: &mut Row,
        line_no: &mut usize,
        mut fingerprint: Option<&mut Fingerprint>,
    ) -> TokenizeResult<bool> {
        row.clear();
        self.field.clear();
        let mut state = SplitState::new();
        let mut lines = 0usize;

        loop {
            if !self.read_line(stream, *line_no + 1)? {
                if state.quoted {
                    return Err(TokenizeError::UnclosedQuote {
                        line: state.quote_line,
                    });
                }
                return Ok(false);
            }
            *line_no += 1;
            lines += 1;

            let line = std::str::from_utf8(&self.raw).map_err(|e| TokenizeError::Utf8 {
                line: *line_no,
                message: e.to_string(),
            })?;
            let trimmed = line.trim();
            if let Some(fp) = fingerprint.as_deref_mut() {
                fp.update(trimmed);
            }

            if state.quoted {
                if lines > self.limits.max_lines_per_row {
                    return Err(TokenizeError::TooManyLines {
                        line: state.quote_line,
                        max: self.limits.max_lines_per_row,
                    });
                }
                if !self.field.ends_with(VALUE_SEPARATOR) {
                    self.field.push(VALUE_SEPARATOR);
                }
            } else if trimmed.is_empty() || is_comment(trimmed) {
                return Ok(true);
            }

            split_line(trimmed, *line_no, row, &mut self.field, &mut state);
            if !state.quoted {
                break;
            }
        }

        if is_blank(row) {
            row.clear();
        }
        Ok(true)
    }

    /// Read one physical line into the scratch buffer.
    fn read_line<R: BufRead>(&mut self, stream: &mut R, line_no: usize) -> TokenizeResult<bool> {
        self.raw.clear();
        let max = self.limits.max_line_length;
        // room for "\r\n" after a line of exactly `max` bytes
        let limit = (max as u64).saturating_add(2);
        let read = stream.by_ref().take(limit).read_until(b'\n', &mut self.raw)?;
        if read == 0 {
            return Ok(false);
        }
        let mut length = self.raw.len();
        if self.raw.ends_with(b"\n") {
            length -= 1;
            if self.raw[..length].ends_with(b"\r") {
                length -= 1;
            }
        }
        if length > max {
            return Err(TokenizeError::LineTooLong {
                line: line_no,
                length,
                max,
            });
        }
        Ok(true)
    }
}

/// Split one trimmed physical line, continuing `field` if a quote is open.
fn split_line(line: &str, line_no: usize, row: &mut Row, field: &mut String, state: &mut SplitState) {
    if !state.quoted && memchr::memchr(b'"', line.as_bytes()).is_none() {
        let mut start = 0;
        for pos in memchr::memchr_iter(b',', line.as_bytes()) {
            field.push_str(&line[start..pos]);
            push_field(row, field);
            start = pos + 1;
        }
        field.push_str(&line[start..]);
        push_field(row, field);
        return;
    }

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if state.quoted {
            if ch == TEXT_SEPARATOR {
                if chars.peek() == Some(&TEXT_SEPARATOR) {
                    chars.next();
                    field.push(TEXT_SEPARATOR);
                } else {
                    state.quoted = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == FIELD_SEPARATOR {
            push_field(row, field);
            state.field_start = true;
        } else if ch == TEXT_SEPARATOR && state.field_start {
            field.clear();
            state.quoted = true;
            state.field_start = false;
            state.quote_line = line_no;
        } else {
            if !ch.is_whitespace() {
                state.field_start = false;
            }
            field.push(ch);
        }
    }
    if !state.quoted {
        push_field(row, field);
    }
}

#[inline]
fn push_field(row: &mut Row, field: &mut String) {
    row.push(field.trim().to_owned());
    field.clear();
}
