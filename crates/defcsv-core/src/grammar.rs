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

//! Fixed grammar of definition files.
//!
//! The separators are not configurable: every definition file shipped with
//! the daemon uses the same dialect.

use std::borrow::Cow;

/// The separator character used between fields.
pub const FIELD_SEPARATOR: char = ',';

/// The character used to quote text containing a [`FIELD_SEPARATOR`] or
/// [`COMMENT_MARKER`].
pub const TEXT_SEPARATOR: char = '"';

/// The separator between multiple values packed into one field.
pub const VALUE_SEPARATOR: char = ';';

/// Marks a comment line when it is the first non-whitespace character.
pub const COMMENT_MARKER: char = '#';

/// Marks a default row when it starts the first field.
pub const DEFAULT_MARKER: char = '*';

/// Whether a trimmed physical line is a comment.
#[inline]
pub fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with(COMMENT_MARKER)
}

/// Strip a leading [`DEFAULT_MARKER`] from a field.
///
/// Returns `true` if the marker was present.
pub fn strip_default_marker(field: &mut String) -> bool {
    if field.starts_with(DEFAULT_MARKER) {
        field.remove(0);
        true
    } else {
        false
    }
}

/// Quote a field value if reading it back would otherwise change it.
///
/// # Examples
///
/// ```
/// use defcsv_core::quote_field;
///
/// assert_eq!(quote_field("plain"), "plain");
/// assert_eq!(quote_field("a,b"), "\"a,b\"");
/// assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn quote_field(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.contains([FIELD_SEPARATOR, TEXT_SEPARATOR, COMMENT_MARKER])
        || value.trim() != value;
    if !needs_quotes {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(TEXT_SEPARATOR);
    for ch in value.chars() {
        if ch == TEXT_SEPARATOR {
            quoted.push(TEXT_SEPARATOR);
        }
        quoted.push(ch);
    }
    quoted.push(TEXT_SEPARATOR);
    Cow::Owned(quoted)
}

/// Join field values into one delimited line, quoting where needed.
///
/// # Examples
///
/// ```
/// use defcsv_core::combine_fields;
///
/// assert_eq!(combine_fields(["r", "temp", "a,b"]), "r,temp,\"a,b\"");
/// ```
pub fn combine_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (idx, field) in fields.into_iter().enumerate() {
        if idx > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(&quote_field(field.as_ref()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_comment() {
        assert!(is_comment("# comment"));
        assert!(is_comment("#"));
        assert!(!is_comment("a,#b"));
        assert!(!is_comment(""));
    }

    #[test]
    fn test_strip_default_marker() {
        let mut field = "*r".to_string();
        assert!(strip_default_marker(&mut field));
        assert_eq!(field, "r");
        assert!(!strip_default_marker(&mut field));
        assert_eq!(field, "r");
    }

    #[test]
    fn test_quote_field_comment_marker() {
        assert_eq!(quote_field("#1"), "\"#1\"");
    }

    #[test]
    fn test_quote_field_surrounding_whitespace() {
        assert_eq!(quote_field(" x"), "\" x\"");
        assert_eq!(quote_field(""), "");
    }

    #[test]
    fn test_combine_keeps_value_separator() {
        assert_eq!(combine_fields(["a;b", "c"]), "a;b,c");
    }

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine_fields(Vec::<String>::new()), "");
        assert_eq!(combine_fields(["", ""]), ",");
    }
}
