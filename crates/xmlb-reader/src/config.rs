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

//! Reader configuration.

/// Settings shared by tree-backed and text-backed readers.
///
/// # Examples
///
/// ```rust
/// use xmlb_reader::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_base_uri("urn:doc")
///     .with_ignore_whitespace(true);
/// assert!(config.ignore_whitespace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Reported by [`PullReader::base_uri`](crate::PullReader::base_uri).
    ///
    /// Default: empty
    pub base_uri: String,

    /// Skip whitespace-only text instead of reporting
    /// [`NodeType::Whitespace`](crate::NodeType::Whitespace) nodes.
    ///
    /// Default: false
    pub ignore_whitespace: bool,
}

impl ReaderConfig {
    /// Set the base URI.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Set whether whitespace-only text is skipped.
    pub fn with_ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }
}
