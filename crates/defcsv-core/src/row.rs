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

//! Row types shared by the tokenizer and the readers built on it.

use std::collections::BTreeMap;

/// One parsed, unmapped record: the trimmed fields of a logical line.
///
/// Empty for blank lines, comment lines and lines consisting only of empty
/// fields. Readers reuse one buffer across calls, so a `Row` never outlives
/// the call that filled it.
pub type Row = Vec<String>;

/// A record addressed by column name.
pub type MappedRow = BTreeMap<String, String>;

/// Whether every field of the row is empty (or the row has no fields).
#[inline]
pub fn is_blank<S: AsRef<str>>(fields: &[S]) -> bool {
    fields.iter().all(|f| f.as_ref().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank::<String>(&[]));
        assert!(is_blank(&["", "", ""]));
        assert!(!is_blank(&["", "x"]));
    }
}
