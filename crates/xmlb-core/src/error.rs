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

//! Error types for the node model and its value codecs.

use thiserror::Error;

/// Errors raised while building trees or converting scalar values.
///
/// # Examples
///
/// ```rust
/// use xmlb_core::CoreError;
///
/// let err = CoreError::invalid_name("1abc");
/// assert!(err.to_string().contains("1abc"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A name is not a valid NCName or QName.
    #[error("invalid XML name '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// An encoding label is not known.
    #[error("unsupported encoding '{label}'")]
    UnsupportedEncoding {
        /// The label that failed to resolve.
        label: String,
    },

    /// An encoding description is malformed.
    #[error("invalid encoding description '{0}'")]
    InvalidEncoding(String),

    /// A parameter or extension object key is already present.
    #[error("duplicate argument '{key}'")]
    DuplicateArgument {
        /// Rendered key (`{namespace}name` for parameters).
        key: String,
    },

    /// A duration string is malformed.
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    /// A scalar value could not be parsed.
    #[error("invalid {kind} value '{value}'")]
    InvalidValue {
        /// What kind of value was expected.
        kind: &'static str,
        /// The rejected text.
        value: String,
    },
}

impl CoreError {
    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create an unsupported encoding error.
    pub fn unsupported_encoding(label: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            label: label.into(),
        }
    }

    /// Create a duplicate argument error.
    pub fn duplicate_argument(key: impl Into<String>) -> Self {
        Self::DuplicateArgument { key: key.into() }
    }

    /// Create an invalid value error.
    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoreError::invalid_name("a:b:c").to_string(),
            "invalid XML name 'a:b:c'"
        );
        assert_eq!(
            CoreError::unsupported_encoding("klingon").to_string(),
            "unsupported encoding 'klingon'"
        );
        assert_eq!(
            CoreError::duplicate_argument("{urn:x}p").to_string(),
            "duplicate argument '{urn:x}p'"
        );
        assert_eq!(
            CoreError::invalid_value("type name", "").to_string(),
            "invalid type name value ''"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CoreError::invalid_name("x"), CoreError::invalid_name("x"));
        assert_ne!(
            CoreError::InvalidDuration("x".into()),
            CoreError::InvalidEncoding("x".into())
        );
    }
}
