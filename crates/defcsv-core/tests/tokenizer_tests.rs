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

//! Tokenizer tests against complete definition file samples.

use defcsv_core::{Fingerprint, LineTokenizer, Row, TokenizeError};
use std::io::Cursor;

const SAMPLE: &str = "col 1,col 2,col 3\n\
line 2 col 1,\"line 2 col 2\",\"line 2 \"\"col 3\"\";default of col 3\"\n\
line 4 col 1,\"line 4 col 2 part 1\n\
line 4 col 2 part 2\",line 4 col 3;default of col 3\n\
,,,\n\
line 6 col 1,,line 6 col 3;default of col 3\n\
line 8 col 1,\"line 8 col 2 part 1;\n\
line 8 col 2 part 2\",line 8 col 3;default of col 3\n";

const SAMPLE_WITH_SUB_COLUMNS: &str = "col 1,col 2,col 3,*subcol 1,subcol 2,*subcol 2,subcol 3\n\
line 2 col 1,\"line 2 col 2\",\"line 2 \"\"col 3\"\"\",line 2 subcol 1,line 2 subcol 2,line 2 subcol 2,line 2 subcol 3\n\
line 4 col 1,\"line 4 col 2 part 1\n\
line 4 col 2 part 2\",line 4 col 3,line 4 subcol 1,line 4 subcol 2,line 4 subcol 2,line 4 subcol 3\n\
,,,\n\
line 6 col 1,,line 6 col 3,line 6 subcol 1,line 6 subcol 2,line 6 subcol 2,line 6 subcol 3\n\
line 8 col 1,\"line 8 col 2 part 1;\n\
line 8 col 2 part 2\",line 8 col 3,line 8 subcol 1,line 8 subcol 2,line 8 subcol 2,line 8 subcol 3\n";

/// Read all rows, returning `(line_no, row)` for every non-empty row.
fn collect(input: &str, fingerprint: &mut Fingerprint) -> Vec<(usize, Row)> {
    let mut cursor = Cursor::new(input);
    let mut tokenizer = LineTokenizer::new();
    let mut row = Row::new();
    let mut line_no = 0;
    let mut out = Vec::new();
    while tokenizer
        .next_row(&mut cursor, &mut row, &mut line_no, Some(fingerprint))
        .expect("sample tokenizes")
    {
        if !row.is_empty() {
            out.push((line_no, row.clone()));
        }
    }
    out
}

#[test]
fn test_sample_rows() {
    let mut fp = Fingerprint::new();
    let rows = collect(SAMPLE, &mut fp);

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], (1, vec!["col 1".into(), "col 2".into(), "col 3".into()]));
    assert_eq!(
        rows[1].1,
        vec![
            "line 2 col 1",
            "line 2 col 2",
            "line 2 \"col 3\";default of col 3"
        ]
    );
    assert_eq!(rows[2].0, 4);
    assert_eq!(
        rows[2].1,
        vec![
            "line 4 col 1",
            "line 4 col 2 part 1;line 4 col 2 part 2",
            "line 4 col 3;default of col 3"
        ]
    );
    assert_eq!(rows[3].0, 6);
    assert_eq!(rows[3].1, vec!["line 6 col 1", "", "line 6 col 3;default of col 3"]);
    assert_eq!(rows[4].0, 8);
    assert_eq!(
        rows[4].1,
        vec![
            "line 8 col 1",
            "line 8 col 2 part 1;line 8 col 2 part 2",
            "line 8 col 3;default of col 3"
        ]
    );
}

#[test]
fn test_sample_normalized_size() {
    let mut fp = Fingerprint::new();
    collect(SAMPLE, &mut fp);
    assert_eq!(fp.size, 301);

    let mut fp = Fingerprint::new();
    collect(SAMPLE_WITH_SUB_COLUMNS, &mut fp);
    assert_eq!(fp.size, 527);
}

#[test]
fn test_sample_with_sub_columns_field_counts() {
    let mut fp = Fingerprint::new();
    let rows = collect(SAMPLE_WITH_SUB_COLUMNS, &mut fp);
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|(_, row)| row.len() == 7));
    assert_eq!(rows[1].1[2], "line 2 \"col 3\"");
}

#[test]
fn test_fingerprint_ignores_surrounding_whitespace() {
    let mut a = Fingerprint::new();
    collect("a,b\n# note\n", &mut a);
    let mut b = Fingerprint::new();
    collect("  a,b   \n\t# note\n", &mut b);
    assert_eq!(a, b);
}

#[test]
fn test_fingerprint_changes_with_appended_comment() {
    let mut before = Fingerprint::new();
    collect(SAMPLE, &mut before);
    let mut after = Fingerprint::new();
    collect(&format!("{}# trailing note\n", SAMPLE), &mut after);
    assert_ne!(before.hash, after.hash);
    assert_ne!(before.size, after.size);
}

#[test]
fn test_row_buffer_is_reused() {
    let mut cursor = Cursor::new("a,b,c\n\nd\n");
    let mut tokenizer = LineTokenizer::new();
    let mut row = Row::with_capacity(8);
    let mut line_no = 0;

    assert!(tokenizer.next_row(&mut cursor, &mut row, &mut line_no, None).unwrap());
    assert_eq!(row.len(), 3);
    assert!(tokenizer.next_row(&mut cursor, &mut row, &mut line_no, None).unwrap());
    assert!(row.is_empty());
    assert!(tokenizer.next_row(&mut cursor, &mut row, &mut line_no, None).unwrap());
    assert_eq!(row, vec!["d"]);
    assert!(!tokenizer.next_row(&mut cursor, &mut row, &mut line_no, None).unwrap());
    assert_eq!(line_no, 3);
}

#[test]
fn test_unterminated_quote_reports_opening_line() {
    let mut cursor = Cursor::new("h1,h2\nx,\"never closed\n\nmore\n");
    let mut tokenizer = LineTokenizer::new();
    let mut row = Row::new();
    let mut line_no = 0;
    assert!(tokenizer.next_row(&mut cursor, &mut row, &mut line_no, None).unwrap());
    match tokenizer.next_row(&mut cursor, &mut row, &mut line_no, None) {
        Err(TokenizeError::UnclosedQuote { line }) => assert_eq!(line, 2),
        other => panic!("expected unclosed quote, got {:?}", other),
    }
}
