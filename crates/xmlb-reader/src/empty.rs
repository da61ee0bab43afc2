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

//! A reader over a document with no nodes.

use tracing::debug;

use crate::error::{ReaderError, ReaderResult};
use crate::pull::{NodeType, PullReader, ReadState, XmlSpace};

/// Reader that reports end of file on its first read.
///
/// Stands in wherever a tree reader would be created for an absent root.
///
/// ```rust
/// use xmlb_reader::{EmptyReader, PullReader, ReadState};
///
/// let mut reader = EmptyReader::new();
/// assert!(!reader.read().unwrap());
/// assert_eq!(reader.read_state(), ReadState::EndOfFile);
/// ```
#[derive(Debug, Clone)]
pub struct EmptyReader {
    state: ReadState,
    base_uri: String,
}

impl EmptyReader {
    /// Create a reader in the initial state.
    pub fn new() -> Self {
        Self::with_base_uri("")
    }

    /// Create a reader reporting `base_uri`.
    pub fn with_base_uri(base_uri: impl Into<String>) -> Self {
        Self {
            state: ReadState::Initial,
            base_uri: base_uri.into(),
        }
    }
}

impl Default for EmptyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PullReader for EmptyReader {
    fn read(&mut self) -> ReaderResult<bool> {
        if self.state != ReadState::Closed {
            self.state = ReadState::EndOfFile;
        }
        Ok(false)
    }

    fn read_state(&self) -> ReadState {
        self.state
    }

    fn node_type(&self) -> NodeType {
        NodeType::None
    }

    fn local_name(&self) -> &str {
        ""
    }

    fn prefix(&self) -> &str {
        ""
    }

    fn namespace_uri(&self) -> &str {
        ""
    }

    fn value(&self) -> &str {
        ""
    }

    fn depth(&self) -> usize {
        0
    }

    fn is_empty_element(&self) -> bool {
        false
    }

    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn attribute_count(&self) -> usize {
        0
    }

    fn get_attribute(&self, _name: &str) -> Option<&str> {
        None
    }

    fn get_attribute_ns(&self, _local_name: &str, _namespace_uri: &str) -> Option<&str> {
        None
    }

    fn get_attribute_at(&self, index: usize) -> ReaderResult<&str> {
        Err(ReaderError::out_of_range(index, 0))
    }

    fn move_to_attribute(&mut self, _name: &str) -> bool {
        false
    }

    fn move_to_attribute_ns(&mut self, _local_name: &str, _namespace_uri: &str) -> bool {
        false
    }

    fn move_to_attribute_at(&mut self, index: usize) -> ReaderResult<()> {
        Err(ReaderError::out_of_range(index, 0))
    }

    fn move_to_first_attribute(&mut self) -> bool {
        false
    }

    fn move_to_next_attribute(&mut self) -> bool {
        false
    }

    fn move_to_element(&mut self) -> bool {
        false
    }

    fn read_attribute_value(&mut self) -> bool {
        false
    }

    fn xml_lang(&self) -> &str {
        ""
    }

    fn xml_space(&self) -> XmlSpace {
        XmlSpace::None
    }

    fn lookup_namespace(&self, _prefix: &str) -> Option<&str> {
        None
    }

    fn close(&mut self) {
        debug!("empty reader closed");
        self.state = ReadState::Closed;
    }
}
