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

//! Serializable text stand-ins for values with no markup form of their own.
//!
//! A surrogate wraps an optional value and converts it to and from the text
//! content of a single element. An absent value, or one whose text is empty,
//! is written as an empty element and read back as absent.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use xmlb_reader::{DurationXml, TreeReader, XmlSurrogate};
//!
//! let value = DurationXml(Some(Duration::from_millis(90_500)));
//! let element = value.to_element();
//! assert_eq!(value.to_text().as_deref(), Some("00:01:30.5000000"));
//!
//! let back = DurationXml::read_from(&mut TreeReader::new(Some(&element))).unwrap();
//! assert_eq!(back, value);
//! ```

use std::time::Duration;

use xmlb_core::{CoreError, CoreResult, Element, TextEncoding};

use crate::error::{ReaderError, ReaderResult};
use crate::pull::{NodeType, PullReader};

/// A value carried as the text content of one element.
pub trait XmlSurrogate: Sized {
    /// Local name of the carrying element.
    const ELEMENT_NAME: &'static str;

    /// Text form of the value, `None` when absent.
    fn to_text(&self) -> Option<String>;

    /// Parse the text form. `None` and empty text yield the absent value.
    fn from_text(text: Option<&str>) -> CoreResult<Self>;

    /// Build the carrying element.
    fn to_element(&self) -> Element {
        let element = Element::new(Self::ELEMENT_NAME);
        match self.to_text() {
            Some(text) if !text.is_empty() => element.with_text(text),
            _ => element,
        }
    }

    /// Read the carrying element from `reader`, leaving the reader on the
    /// node after it.
    fn read_from<R: PullReader + ?Sized>(reader: &mut R) -> ReaderResult<Self> {
        reader.assert_start_element(Self::ELEMENT_NAME)?;
        if reader.is_empty_element() {
            reader.read()?;
            return Ok(Self::from_text(None)?);
        }

        let mut text = String::new();
        loop {
            if !reader.read()? {
                return Err(ReaderError::unexpected(
                    format!("end of <{}>", Self::ELEMENT_NAME),
                    "end of file",
                ));
            }
            match reader.node_type() {
                NodeType::Text | NodeType::Whitespace => text.push_str(reader.value()),
                NodeType::EndElement => break,
                other => return Err(ReaderError::unexpected("text content", other.to_string())),
            }
        }
        reader.assert_end_element(Self::ELEMENT_NAME)?;
        reader.read()?;
        Ok(Self::from_text(Some(&text))?)
    }
}

const TICKS_PER_SECOND: u64 = 10_000_000;
const NANOS_PER_TICK: u32 = 100;
const SECONDS_PER_DAY: u64 = 86_400;

/// A [`Duration`] written as `[d.]hh:mm:ss[.fffffff]`, at a resolution of
/// 100 nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationXml(pub Option<Duration>);

impl From<Duration> for DurationXml {
    fn from(duration: Duration) -> Self {
        Self(Some(duration))
    }
}

fn parse_field(text: &str, full: &str, max_digits: usize) -> CoreResult<u64> {
    if text.is_empty() || text.len() > max_digits || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDuration(full.to_string()));
    }
    text.parse().map_err(|_| CoreError::InvalidDuration(full.to_string()))
}

fn parse_duration(text: &str) -> CoreResult<Duration> {
    let invalid = || CoreError::InvalidDuration(text.to_string());
    let mut parts = text.split(':');
    let (Some(head), Some(minutes), Some(tail), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (parse_field(days, text, 8)?, hours),
        None => (0, head),
    };
    let hours = parse_field(hours, text, 2)?;
    let minutes = parse_field(minutes, text, 2)?;
    let (seconds, fraction) = match tail.split_once('.') {
        Some((seconds, fraction)) => (parse_field(seconds, text, 2)?, Some(fraction)),
        None => (parse_field(tail, text, 2)?, None),
    };
    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let ticks = match fraction {
        Some(digits) => {
            let value = parse_field(digits, text, 7)?;
            value * 10u64.pow(7 - digits.len() as u32)
        }
        None => 0,
    };

    let secs = days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|s| s.checked_add(hours * 3600 + minutes * 60 + seconds))
        .ok_or_else(invalid)?;
    Ok(Duration::new(secs, ticks as u32 * NANOS_PER_TICK))
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let days = secs / SECONDS_PER_DAY;
    let rest = secs % SECONDS_PER_DAY;
    let ticks = u64::from(duration.subsec_nanos() / NANOS_PER_TICK);

    let mut text = String::new();
    if days > 0 {
        text.push_str(&format!("{}.", days));
    }
    text.push_str(&format!("{:02}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60));
    if ticks > 0 {
        debug_assert!(ticks < TICKS_PER_SECOND);
        text.push_str(&format!(".{:07}", ticks));
    }
    text
}

impl XmlSurrogate for DurationXml {
    const ELEMENT_NAME: &'static str = "Duration";

    fn to_text(&self) -> Option<String> {
        self.0.map(format_duration)
    }

    fn from_text(text: Option<&str>) -> CoreResult<Self> {
        match text.map(str::trim) {
            None | Some("") => Ok(Self(None)),
            Some(text) => parse_duration(text).map(|d| Self(Some(d))),
        }
    }
}

/// A type identified by its name.
///
/// A present name is never empty, has no surrounding whitespace and holds
/// no control characters, so every value reads back exactly as it was
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNameXml(Option<String>);

fn validate_type_name(name: &str) -> CoreResult<&str> {
    if name.is_empty() || name.trim() != name || name.chars().any(char::is_control) {
        return Err(CoreError::invalid_value("type name", name));
    }
    Ok(name)
}

impl TypeNameXml {
    /// Surrogate for an explicit type name.
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        validate_type_name(&name)?;
        Ok(Self(Some(name)))
    }

    /// Surrogate naming `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self(Some(std::any::type_name::<T>().to_string()))
    }

    /// The absent value.
    pub fn absent() -> Self {
        Self(None)
    }

    /// The carried name.
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether this names `T`.
    pub fn is<T: ?Sized>(&self) -> bool {
        self.name() == Some(std::any::type_name::<T>())
    }
}

impl XmlSurrogate for TypeNameXml {
    const ELEMENT_NAME: &'static str = "TypeName";

    fn to_text(&self) -> Option<String> {
        self.0.clone()
    }

    fn from_text(text: Option<&str>) -> CoreResult<Self> {
        match text {
            None | Some("") => Ok(Self::absent()),
            Some(name) => Self::new(name),
        }
    }
}

/// A [`TextEncoding`] written as its label, with a trailing
/// `with signature` marker when it emits a byte order mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingXml(pub Option<TextEncoding>);

impl From<TextEncoding> for EncodingXml {
    fn from(encoding: TextEncoding) -> Self {
        Self(Some(encoding))
    }
}

impl XmlSurrogate for EncodingXml {
    const ELEMENT_NAME: &'static str = "Encoding";

    fn to_text(&self) -> Option<String> {
        self.0.map(|encoding| encoding.to_string())
    }

    fn from_text(text: Option<&str>) -> CoreResult<Self> {
        match text.map(str::trim) {
            None | Some("") => Ok(Self(None)),
            Some(label) => label.parse().map(|e| Self(Some(e))),
        }
    }
}
