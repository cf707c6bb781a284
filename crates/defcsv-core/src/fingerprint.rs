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

//! Content fingerprint for change detection.
//!
//! The fingerprint combines a hash of every trimmed physical line, comments
//! and blank lines included, with the normalized size of the content. Two
//! files whose lines differ only in leading or trailing whitespace get the
//! same fingerprint.

use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Running hash and normalized size of definition file content.
///
/// The per-line hash is FNV-1a, which is stable across platforms and
/// toolchain versions, so fingerprints may be persisted and compared later.
///
/// # Examples
///
/// ```
/// use defcsv_core::Fingerprint;
///
/// let mut a = Fingerprint::new();
/// a.update("r,,temp");
/// let mut b = Fingerprint::new();
/// b.update("r,,temp");
/// assert_eq!(a, b);
/// assert_eq!(a.size, 8);
/// assert_eq!(a.hash_hex().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fingerprint {
    /// Combined hash of all trimmed lines seen so far.
    pub hash: u64,
    /// Sum of trimmed line lengths plus one terminator per line.
    pub size: u64,
}

impl Fingerprint {
    /// An empty fingerprint.
    pub const fn new() -> Self {
        Self { hash: 0, size: 0 }
    }

    /// Combine one trimmed physical line into the fingerprint.
    pub fn update(&mut self, trimmed_line: &str) {
        self.combine_hash(line_hash(trimmed_line.as_bytes()));
        self.size += trimmed_line.len() as u64 + 1;
    }

    /// Lowest 32 bits of the hash as 8 lowercase hex digits.
    pub fn hash_hex(&self) -> String {
        format!("{:08x}", self.hash & 0xffff_ffff)
    }

    fn combine_hash(&mut self, value: u64) {
        self.hash ^= value
            .wrapping_add(0x9e37_79b9)
            .wrapping_add(self.hash << 6)
            .wrapping_add(self.hash >> 2);
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash_hex())
    }
}

fn line_hash(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fingerprint() {
        let fp = Fingerprint::new();
        assert_eq!(fp.hash, 0);
        assert_eq!(fp.size, 0);
        assert_eq!(fp.hash_hex(), "00000000");
    }

    #[test]
    fn test_fnv_known_values() {
        assert_eq!(line_hash(b""), FNV_OFFSET_BASIS);
        assert_eq!(line_hash(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_size_counts_terminator() {
        let mut fp = Fingerprint::new();
        fp.update("abc");
        fp.update("");
        assert_eq!(fp.size, 5);
    }

    #[test]
    fn test_order_matters() {
        let mut a = Fingerprint::new();
        a.update("x");
        a.update("y");
        let mut b = Fingerprint::new();
        b.update("y");
        b.update("x");
        assert_ne!(a.hash, b.hash);
        assert_eq!(a.size, b.size);
    }

    #[test]
    fn test_display_is_hex() {
        let fp = Fingerprint {
            hash: 0x1234_5678_9abc_def0,
            size: 0,
        };
        assert_eq!(fp.to_string(), "9abcdef0");
    }
}
