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

//! Render stream configuration.

use xmlb_core::TextEncoding;

/// Configuration for [`RenderStream`](crate::RenderStream).
///
/// # Examples
///
/// ```rust
/// use xmlb_core::TextEncoding;
/// use xmlb_stream::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_encoding(TextEncoding::utf16le())
///     .with_fragment_capacity(1024);
/// assert_eq!(config.fragment_capacity, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Output encoding. With a signature the byte order mark is written
    /// before the first fragment.
    ///
    /// Default: UTF-8 without signature
    pub encoding: TextEncoding,

    /// Initial capacity of the scratch buffers holding one rendered fragment.
    /// Fragments longer than this still render; the buffers grow.
    ///
    /// Default: 256 bytes
    pub fragment_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            fragment_capacity: 256,
        }
    }
}

impl StreamConfig {
    /// Set the output encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the fragment buffer capacity.
    pub fn with_fragment_capacity(mut self, capacity: usize) -> Self {
        self.fragment_capacity = capacity;
        self
    }
}
