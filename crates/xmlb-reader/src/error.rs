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

//! Error types for pull readers and their consumers.

use thiserror::Error;
use xmlb_core::CoreError;

/// Errors raised by pull readers and the consumers built on them.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Positional attribute access past the attribute list.
    #[error("attribute index {index} is out of range ({count} attributes)")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of attributes on the current element.
        count: usize,
    },

    /// The operation is never valid for this reader.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// A consumer found a node it did not expect.
    #[error("expected {expected}, found {found}")]
    UnexpectedNode {
        /// What the consumer wanted.
        expected: String,
        /// What the reader was positioned on.
        found: String,
    },

    /// Markup could not be tokenized or written.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Written markup was not UTF-8.
    #[error("invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A scalar value failed to convert.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ReaderError {
    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, count: usize) -> Self {
        Self::OutOfRange { index, count }
    }

    /// Create an unexpected node error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedNode {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
