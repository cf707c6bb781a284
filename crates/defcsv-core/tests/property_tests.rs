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

//! Property-based tests for the tokenizer and fingerprint.

use defcsv_core::{combine_fields, Fingerprint, LineTokenizer, Row};
use proptest::prelude::*;
use std::io::Cursor;

/// Unquoted field text: no separators, quotes, comment markers or outer whitespace.
fn arb_plain_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9;:._*-]([a-zA-Z0-9 ;:._-]{0,10}[a-zA-Z0-9;:._-])?"
}

/// Any field text, including characters that require quoting.
fn arb_any_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,#\";]{0,12}"
}

fn tokenize_one(line: &str) -> (Row, usize) {
    let mut cursor = Cursor::new(line);
    let mut tokenizer = LineTokenizer::new();
    let mut row = Row::new();
    let mut line_no = 0;
    tokenizer
        .next_row(&mut cursor, &mut row, &mut line_no, None)
        .expect("line tokenizes");
    (row, line_no)
}

fn fingerprint_of(input: &str) -> Fingerprint {
    let mut cursor = Cursor::new(input);
    let mut tokenizer = LineTokenizer::new();
    let mut row = Row::new();
    let mut line_no = 0;
    let mut fp = Fingerprint::new();
    while tokenizer
        .next_row(&mut cursor, &mut row, &mut line_no, Some(&mut fp))
        .expect("input tokenizes")
    {}
    fp
}

proptest! {
    /// Property: joining unquoted fields with the separator reproduces the line
    #[test]
    fn prop_unquoted_row_rejoins(fields in prop::collection::vec(arb_plain_field(), 1..8)) {
        let line = fields.join(",");
        let (row, _) = tokenize_one(&format!("  {}  \n", line));
        prop_assert_eq!(row.join(","), line);
    }

    /// Property: indented comments are ignored exactly like column-0 comments
    #[test]
    fn prop_indented_comment(indent in "[ \t]{0,6}", text in "[a-z ,\"]{0,20}") {
        let (row, line_no) = tokenize_one(&format!("{}#{}\n", indent, text));
        prop_assert!(row.is_empty());
        prop_assert_eq!(line_no, 1);
    }

    /// Property: combined fields read back to the same trimmed values
    #[test]
    fn prop_combine_then_tokenize(fields in prop::collection::vec(arb_any_field(), 2..6)) {
        let line = combine_fields(&fields);
        let (row, _) = tokenize_one(&format!("{}\n", line));
        let expected: Vec<String> = fields.iter().map(|f| f.trim().to_string()).collect();
        if expected.iter().all(|f| f.is_empty()) {
            prop_assert!(row.is_empty());
        } else {
            prop_assert_eq!(row, expected);
        }
    }

    /// Property: identical content yields identical fingerprints
    #[test]
    fn prop_fingerprint_deterministic(lines in prop::collection::vec("[a-z0-9,# ]{0,16}", 0..10)) {
        let input = lines.join("\n");
        prop_assert_eq!(fingerprint_of(&input), fingerprint_of(&input));
    }

    /// Property: appending a comment line changes the fingerprint
    #[test]
    fn prop_appended_comment_changes_fingerprint(
        lines in prop::collection::vec("[a-z0-9,]{1,16}", 1..10),
        comment in "[a-z ]{0,10}",
    ) {
        let input = format!("{}\n", lines.join("\n"));
        let appended = format!("{}# {}\n", input, comment);
        let before = fingerprint_of(&input);
        let after = fingerprint_of(&appended);
        prop_assert_ne!(before.size, after.size);
        prop_assert_ne!(before, after);
    }
}
