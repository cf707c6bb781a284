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

//! Defaults seeded from structured file names.
//!
//! Definition files may be named `ZZ.IDENT[.CIRCUIT][.SUFFIX][.HWnnnn][.SWnnnn].ext`
//! where `ZZ` is the two hex digit target address. The hardware and software
//! parts are case-insensitive and may come in either order.

use defcsv_core::MappedRow;

/// Values extracted from a file name.
///
/// # Examples
///
/// ```rust
/// use defcsv_stream::FileNameDefaults;
///
/// let parsed = FileNameDefaults::parse("08.bai.HW7603.SW0204.csv").unwrap();
/// assert_eq!(parsed.address, 0x08);
/// assert_eq!(parsed.values["ident"], "bai");
/// assert_eq!(parsed.values["circuit"], "bai");
/// assert_eq!(parsed.software, Some(204));
/// assert_eq!(parsed.hardware, Some(7603));
/// assert_eq!(parsed.category, "08.hw7603.sw0204");
///
/// assert!(FileNameDefaults::parse("broadcast.csv").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileNameDefaults {
    /// Category key seeded by the name.
    pub category: String,
    /// Target address.
    pub address: u8,
    /// Software version, if named.
    pub software: Option<u32>,
    /// Hardware version, if named.
    pub hardware: Option<u32>,
    /// Seeded field values: `zz`, `ident`, `circuit` and `suffix` when present.
    pub values: MappedRow,
}

impl FileNameDefaults {
    /// Parse a file name without its directory.
    ///
    /// Returns `None` if the name does not follow the convention.
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = match file_name.rfind('.') {
            Some(pos) if pos > 0 => &file_name[..pos],
            _ => return None,
        };
        let mut parts = stem.split('.');

        let zz = parts.next()?;
        if zz.len() != 2 || !zz.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let address = u8::from_str_radix(zz, 16).ok()?;
        let ident = parts.next().filter(|p| !p.is_empty())?;

        let mut names = Vec::new();
        let mut hardware: Option<(u32, &str)> = None;
        let mut software: Option<(u32, &str)> = None;
        for part in parts {
            if let Some(digits) = version_digits(part, "hw") {
                hardware = Some((digits.parse().ok()?, digits));
            } else if let Some(digits) = version_digits(part, "sw") {
                software = Some((digits.parse().ok()?, digits));
            } else if hardware.is_none() && software.is_none() && names.len() < 2 {
                names.push(part);
            } else {
                return None;
            }
        }

        let zz = zz.to_ascii_lowercase();
        let mut category = zz.clone();
        if let Some((_, digits)) = hardware {
            category.push_str(".hw");
            category.push_str(digits);
        }
        if let Some((_, digits)) = software {
            category.push_str(".sw");
            category.push_str(digits);
        }

        let mut values = MappedRow::new();
        values.insert("zz".to_string(), zz);
        values.insert("ident".to_string(), ident.to_string());
        let circuit = names.first().copied().filter(|c| !c.is_empty());
        values.insert("circuit".to_string(), circuit.unwrap_or(ident).to_string());
        if let Some(suffix) = names.get(1).filter(|s| !s.is_empty()) {
            values.insert("suffix".to_string(), suffix.to_string());
        }

        Some(Self {
            category,
            address,
            software: software.map(|(v, _)| v),
            hardware: hardware.map(|(v, _)| v),
            values,
        })
    }
}

/// The four digits of a `HWnnnn`/`SWnnnn` part.
fn version_digits<'a>(part: &'a str, prefix: &str) -> Option<&'a str> {
    if part.len() != prefix.len() + 4 || !part.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, digits) = part.split_at(prefix.len());
    if head.eq_ignore_ascii_case(prefix) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}
