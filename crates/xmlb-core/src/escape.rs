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

//! Escaping of character data for rendered markup.
//!
//! A parser normalizes line breaks in text (`\r\n` and `\r` become `\n`)
//! and every tab, line feed and carriage return in an attribute value
//! (each becomes a space). Characters that would be normalized are written
//! as character references, which parsers keep verbatim.
//!
//! | Character | Text | Attribute value |
//! |-----------|------|-----------------|
//! | `&` `<` `>` | entity | entity |
//! | `"` `'` | kept | entity |
//! | `\t` `\n` | kept | `&#9;` `&#10;` |
//! | `\r` | `&#13;` | `&#13;` |
//!
//! # Examples
//!
//! ```rust
//! use xmlb_core::escape::{escape_attribute_value, escape_text};
//!
//! assert_eq!(escape_attribute_value("x\ty\"z"), "x&#9;y&quot;z");
//! assert_eq!(escape_text("a\r\nb < c"), "a&#13;\nb &lt; c");
//! ```

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape};

fn replace_chars<'a>(escaped: Cow<'a, str>, targets: &[char]) -> Cow<'a, str> {
    if !escaped.contains(targets) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' if targets.contains(&c) => out.push_str("&#9;"),
            '\n' if targets.contains(&c) => out.push_str("&#10;"),
            '\r' if targets.contains(&c) => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape a value for a double- or single-quoted attribute.
pub fn escape_attribute_value(value: &str) -> Cow<'_, str> {
    replace_chars(escape(value), &['\t', '\n', '\r'])
}

/// Escape character content between tags.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    replace_chars(partial_escape(text), &['\r'])
}
