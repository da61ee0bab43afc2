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

//! Text encodings for rendered output.
//!
//! A [`TextEncoding`] pairs an [`encoding_rs::Encoding`] with a flag saying
//! whether a byte order mark is written first. Its textual form is the
//! lower-case encoding name, optionally followed by ` with signature`:
//!
//! ```rust
//! use xmlb_core::TextEncoding;
//!
//! let encoding: TextEncoding = "utf-8 with signature".parse().unwrap();
//! assert!(encoding.signature());
//! assert_eq!(encoding.preamble(), b"\xEF\xBB\xBF");
//! assert_eq!(encoding.to_string(), "utf-8 with signature");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::{CoreError, CoreResult};

const SIGNATURE_MARKER: &str = "with signature";

/// An output encoding with an optional byte order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextEncoding {
    encoding: &'static Encoding,
    signature: bool,
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl TextEncoding {
    /// UTF-8 without a byte order mark.
    pub fn utf8() -> Self {
        Self {
            encoding: UTF_8,
            signature: false,
        }
    }

    /// UTF-8 preceded by `EF BB BF`.
    pub fn utf8_with_signature() -> Self {
        Self {
            encoding: UTF_8,
            signature: true,
        }
    }

    /// Little-endian UTF-16 with a byte order mark.
    pub fn utf16le() -> Self {
        Self {
            encoding: UTF_16LE,
            signature: true,
        }
    }

    /// Big-endian UTF-16 with a byte order mark.
    pub fn utf16be() -> Self {
        Self {
            encoding: UTF_16BE,
            signature: true,
        }
    }

    /// Resolve a WHATWG encoding label, without signature.
    pub fn for_label(label: &str) -> CoreResult<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self {
                encoding,
                signature: false,
            })
            .ok_or_else(|| CoreError::unsupported_encoding(label))
    }

    /// Same encoding with the signature flag changed.
    ///
    /// Only Unicode encodings can carry a signature.
    pub fn with_signature(self, signature: bool) -> CoreResult<Self> {
        if signature && !self.is_unicode() {
            return Err(CoreError::InvalidEncoding(format!(
                "{} {}",
                self.name(),
                SIGNATURE_MARKER
            )));
        }
        Ok(Self { signature, ..self })
    }

    /// The underlying encoding.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Whether a byte order mark is written before the first byte.
    pub fn signature(&self) -> bool {
        self.signature
    }

    /// Lower-case encoding name.
    pub fn name(&self) -> String {
        self.encoding.name().to_ascii_lowercase()
    }

    /// Whether this is UTF-8 or one of the UTF-16 byte orders.
    pub fn is_unicode(&self) -> bool {
        self.encoding == UTF_8 || self.encoding == UTF_16LE || self.encoding == UTF_16BE
    }

    /// Byte order mark to emit, empty without signature.
    pub fn preamble(&self) -> &'static [u8] {
        if !self.signature {
            return &[];
        }
        if self.encoding == UTF_8 {
            b"\xEF\xBB\xBF"
        } else if self.encoding == UTF_16LE {
            b"\xFF\xFE"
        } else if self.encoding == UTF_16BE {
            b"\xFE\xFF"
        } else {
            &[]
        }
    }

    /// Encode text. Characters the encoding cannot represent become numeric
    /// character references.
    pub fn encode<'s>(&self, text: &'s str) -> Cow<'s, [u8]> {
        // encoding_rs only decodes UTF-16, so both byte orders are done here
        if self.encoding == UTF_16LE {
            Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
        } else if self.encoding == UTF_16BE {
            Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
        } else {
            self.encoding.encode(text).0
        }
    }

    /// Decode bytes, dropping a leading byte order mark.
    pub fn decode<'b>(&self, bytes: &'b [u8]) -> Cow<'b, str> {
        self.encoding.decode_with_bom_removal(bytes).0
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())?;
        if self.signature {
            write!(f, " {}", SIGNATURE_MARKER)?;
        }
        Ok(())
    }
}

fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_alphanumeric() || c == '_');
    first_ok && label.chars().count() >= 2 && chars.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for TextEncoding {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let (label, signature) = match lower.strip_suffix(SIGNATURE_MARKER) {
            Some(head) if head.ends_with(char::is_whitespace) => (trimmed[..head.len()].trim_end(), true),
            _ => (trimmed, false),
        };

        if !is_valid_label(label) {
            return Err(CoreError::InvalidEncoding(s.to_string()));
        }

        Self::for_label(label)?.with_signature(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_utf8() {
        let encoding = TextEncoding::default();
        assert_eq!(encoding.to_string(), "utf-8");
        assert!(encoding.preamble().is_empty());
    }

    #[test]
    fn test_parse_names() {
        let utf16: TextEncoding = "utf-16".parse().unwrap();
        assert_eq!(utf16.encoding(), UTF_16LE);
        assert!(!utf16.signature());

        let latin: TextEncoding = "windows-1252".parse().unwrap();
        assert_eq!(latin.to_string(), "windows-1252");

        let shift: TextEncoding = "shift_jis".parse().unwrap();
        assert_eq!(shift.to_string(), "shift_jis");
    }

    #[test]
    fn test_parse_signature_marker_case_insensitive() {
        let encoding: TextEncoding = "UTF-16LE With Signature".parse().unwrap();
        assert_eq!(encoding, TextEncoding::utf16le());
        assert_eq!(encoding.to_string(), "utf-16le with signature");
    }

    #[test]
    fn test_display_round_trip() {
        for encoding in [
            TextEncoding::utf8(),
            TextEncoding::utf8_with_signature(),
            TextEncoding::utf16le(),
            TextEncoding::utf16be(),
        ] {
            let parsed: TextEncoding = encoding.to_string().parse().unwrap();
            assert_eq!(parsed, encoding);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!("".parse::<TextEncoding>(), Err(CoreError::InvalidEncoding(_))));
        assert!(matches!("u".parse::<TextEncoding>(), Err(CoreError::InvalidEncoding(_))));
        assert!(matches!(
            "utf-8with signature".parse::<TextEncoding>(),
            Err(CoreError::InvalidEncoding(_))
        ));
        assert!(matches!(
            "klingon".parse::<TextEncoding>(),
            Err(CoreError::UnsupportedEncoding { .. })
        ));
        assert!(matches!(
            "windows-1252 with signature".parse::<TextEncoding>(),
            Err(CoreError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_encode_utf16_orders() {
        assert_eq!(TextEncoding::utf16le().encode("<a").as_ref(), b"<\0a\0");
        assert_eq!(TextEncoding::utf16be().encode("<a").as_ref(), b"\0<\0a");
        assert_eq!(TextEncoding::utf16le().preamble(), b"\xFF\xFE");
        assert_eq!(TextEncoding::utf16be().preamble(), b"\xFE\xFF");
    }

    #[test]
    fn test_encode_unmappable_as_character_reference() {
        let latin = TextEncoding::for_label("windows-1252").unwrap();
        assert_eq!(latin.encode("é").as_ref(), b"\xE9");
        assert_eq!(latin.encode("\u{263A}").as_ref(), b"&#9786;");
    }

    #[test]
    fn test_decode_drops_bom() {
        let encoding = TextEncoding::utf16le();
        let mut bytes = encoding.preamble().to_vec();
        bytes.extend_from_slice(&encoding.encode("<root />"));
        assert_eq!(encoding.decode(&bytes), "<root />");
    }
}
