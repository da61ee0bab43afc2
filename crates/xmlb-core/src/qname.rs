// Dweve XMLB - Lazy XML Builder Rendering
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

//! Qualified name parsing.
//!
//! An NCName starts with a letter or underscore and continues with letters,
//! digits, `_`, `-` or `.`. A QName is an optional NCName prefix followed by
//! `:` and an NCName local part.
//!
//! # Examples
//!
//! ```rust
//! use xmlb_core::qname::parse_qname;
//!
//! let name = parse_qname("s1:root").unwrap();
//! assert_eq!(name.prefix, "s1");
//! assert_eq!(name.local, "root");
//!
//! assert!(parse_qname("1root").is_err());
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A parsed qualified name borrowing from its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName<'a> {
    /// Prefix, empty when the name is unprefixed.
    pub prefix: &'a str,
    /// Local part.
    pub local: &'a str,
}

impl<'a> QName<'a> {
    /// Create a name from already validated parts.
    pub fn new(prefix: &'a str, local: &'a str) -> Self {
        Self { prefix, local }
    }

    /// Whether the name carries a prefix.
    pub fn has_prefix(&self) -> bool {
        !self.prefix.is_empty()
    }
}

impl fmt::Display for QName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            f.write_str(self.local)
        } else {
            write!(f, "{}:{}", self.prefix, self.local)
        }
    }
}

/// Join a prefix and local name into `prefix:local`, or the bare local name.
pub fn qualify<'a>(prefix: &str, local: &'a str) -> Cow<'a, str> {
    if prefix.is_empty() {
        Cow::Borrowed(local)
    } else {
        Cow::Owned(format!("{}:{}", prefix, local))
    }
}

#[inline]
fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Check whether `name` is a valid NCName.
pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check whether `name` is a valid QName.
pub fn is_qname(name: &str) -> bool {
    parse_qname(name).is_ok()
}

/// Split and validate a qualified name.
pub fn parse_qname(name: &str) -> CoreResult<QName<'_>> {
    let (prefix, local) = match name.split_once(':') {
        Some((prefix, local)) => {
            if !is_ncname(prefix) {
                return Err(CoreError::invalid_name(name));
            }
            (prefix, local)
        }
        None => ("", name),
    };

    if !is_ncname(local) {
        return Err(CoreError::invalid_name(name));
    }

    Ok(QName { prefix, local })
}
