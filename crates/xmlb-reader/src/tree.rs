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

//! Pull reader driven directly by the traversal frame stack.

use std::borrow::Cow;

use tracing::{debug, trace};
use xmlb_core::namespace::{XMLNS_NAMESPACE, XML_NAMESPACE, XML_PREFIX};
use xmlb_core::{Attribute, Element, FrameStack, Step};

use crate::config::ReaderConfig;
use crate::error::{ReaderError, ReaderResult};
use crate::pull::{is_whitespace, NodeType, PullReader, ReadState, XmlSpace};
use crate::scope::NamespaceScopes;

#[derive(Debug, Clone)]
enum Current<'a> {
    None,
    Element {
        element: &'a Element,
        depth: usize,
        is_empty: bool,
    },
    EndElement {
        element: &'a Element,
        depth: usize,
    },
    Text {
        value: Cow<'a, str>,
        depth: usize,
        whitespace: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Node,
    Attribute(usize),
    AttributeValue(usize),
}

/// Namespace reported for an attribute: its own, or the reserved namespace
/// implied by an `xmlns` or `xml` name.
fn attribute_namespace(attribute: &Attribute) -> &str {
    if !attribute.namespace_uri.is_empty() {
        &attribute.namespace_uri
    } else if attribute.is_namespace_declaration() {
        XMLNS_NAMESPACE
    } else if attribute.prefix == XML_PREFIX {
        XML_NAMESPACE
    } else {
        ""
    }
}

/// Reads a borrowed tree node by node, reporting exactly what a parser
/// reports for the tree's rendered markup.
///
/// Traversal steps that carry no node of their own (attributes, the end of
/// an attribute list, self-closing) are consumed silently; attributes are
/// reached through attribute navigation instead. Adjacent text children are
/// reported as one text node and empty text is not reported at all.
///
/// # Examples
///
/// ```rust
/// use xmlb_core::Element;
/// use xmlb_reader::{NodeType, PullReader, TreeReader};
///
/// let root = Element::new("root")
///     .attr("a1", "one")
///     .with_child(Element::new("child").with_text("content"));
/// let mut reader = TreeReader::new(Some(&root));
///
/// assert!(reader.read().unwrap());
/// assert_eq!(reader.node_type(), NodeType::Element);
/// assert_eq!(reader.get_attribute("a1"), Some("one"));
///
/// assert!(reader.move_to_first_attribute());
/// assert_eq!(reader.depth(), 1);
/// assert!(reader.move_to_element());
///
/// assert!(reader.read().unwrap());
/// assert_eq!(reader.local_name(), "child");
/// assert!(reader.read().unwrap());
/// assert_eq!((reader.node_type(), reader.value(), reader.depth()), (NodeType::Text, "content", 2));
/// ```
pub struct TreeReader<'a> {
    root: Option<&'a Element>,
    steps: FrameStack<'a>,
    pending: Option<Step<'a>>,
    config: ReaderConfig,
    state: ReadState,
    open_elements: usize,
    current: Current<'a>,
    cursor: Cursor,
    scopes: NamespaceScopes<'a>,
    pop_scope: bool,
    disposed: bool,
}

impl<'a> TreeReader<'a> {
    /// Create a reader with the default configuration.
    pub fn new(root: Option<&'a Element>) -> Self {
        Self::with_config(root, ReaderConfig::default())
    }

    /// Create a reader with a custom configuration.
    pub fn with_config(root: Option<&'a Element>, config: ReaderConfig) -> Self {
        debug!(
            root = root.map(|r| r.local_name.as_str()).unwrap_or(""),
            "tree reader opened"
        );
        Self {
            root,
            steps: FrameStack::new(root),
            pending: None,
            config,
            state: ReadState::Initial,
            open_elements: 0,
            current: Current::None,
            cursor: Cursor::Node,
            scopes: NamespaceScopes::default(),
            pop_scope: false,
            disposed: false,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn next_step(&mut self) -> Option<Step<'a>> {
        self.pending.take().or_else(|| self.steps.next_step())
    }

    /// Join `first` with the text steps directly following it.
    fn coalesce(&mut self, first: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(first);
        loop {
            match self.steps.next_step() {
                Some(Step::Text(next)) => {
                    if text.is_empty() {
                        text = Cow::Borrowed(next);
                    } else if !next.is_empty() {
                        text.to_mut().push_str(next);
                    }
                }
                other => {
                    self.pending = other;
                    return text;
                }
            }
        }
    }

    fn finish(&mut self) {
        self.state = ReadState::EndOfFile;
        self.current = Current::None;
        self.cursor = Cursor::Node;
        self.open_elements = 0;
        self.scopes.clear();
        debug!("tree reader reached end of tree");
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(disposer) = self.root.and_then(|root| root.disposer.as_ref()) {
            debug!("disposing tree reader root");
            disposer.dispose();
        }
    }

    fn element(&self) -> Option<&'a Element> {
        match self.current {
            Current::Element { element, .. } => Some(element),
            _ => None,
        }
    }

    fn attributes(&self) -> &'a [Attribute] {
        match self.element() {
            Some(element) => &element.attributes,
            None => &[],
        }
    }

    fn attribute(&self) -> Option<&'a Attribute> {
        match self.cursor {
            Cursor::Attribute(index) | Cursor::AttributeValue(index) => self.attributes().get(index),
            Cursor::Node => None,
        }
    }

    fn node_depth(&self) -> usize {
        match self.current {
            Current::None => 0,
            Current::Element { depth, .. }
            | Current::EndElement { depth, .. }
            | Current::Text { depth, .. } => depth,
        }
    }
}

impl PullReader for TreeReader<'_> {
    fn read(&mut self) -> ReaderResult<bool> {
        if matches!(self.state, ReadState::EndOfFile | ReadState::Closed) {
            return Ok(false);
        }
        self.state = ReadState::Interactive;
        self.cursor = Cursor::Node;
        if std::mem::take(&mut self.pop_scope) {
            self.scopes.pop();
        }

        loop {
            let Some(step) = self.next_step() else {
                self.finish();
                return Ok(false);
            };

            match step {
                Step::StartTag { element, .. } => {
                    let is_empty = !element.has_children();
                    self.current = Current::Element {
                        element,
                        depth: self.open_elements,
                        is_empty,
                    };
                    self.scopes.push(element);
                    if is_empty {
                        self.pop_scope = true;
                    } else {
                        self.open_elements += 1;
                    }
                    trace!(name = %element.qualified_name(), depth = self.open_elements, "element");
                    return Ok(true);
                }
                Step::EndTag(element) => {
                    self.open_elements = self.open_elements.saturating_sub(1);
                    self.current = Current::EndElement {
                        element,
                        depth: self.open_elements,
                    };
                    self.pop_scope = true;
                    return Ok(true);
                }
                Step::Text(first) => {
                    let value = self.coalesce(first);
                    if value.is_empty() {
                        continue;
                    }
                    let whitespace = is_whitespace(&value);
                    if whitespace && self.config.ignore_whitespace {
                        continue;
                    }
                    self.current = Current::Text {
                        value,
                        depth: self.open_elements,
                        whitespace,
                    };
                    return Ok(true);
                }
                Step::Attribute(_) | Step::EndAttributesOpenTag(_) | Step::SelfClose(_) => {}
            }
        }
    }

    fn read_state(&self) -> ReadState {
        self.state
    }

    fn node_type(&self) -> NodeType {
        match self.cursor {
            Cursor::Attribute(_) => NodeType::Attribute,
            Cursor::AttributeValue(_) => NodeType::Text,
            Cursor::Node => match self.current {
                Current::None => NodeType::None,
                Current::Element { .. } => NodeType::Element,
                Current::EndElement { .. } => NodeType::EndElement,
                Current::Text { whitespace: true, .. } => NodeType::Whitespace,
                Current::Text { .. } => NodeType::Text,
            },
        }
    }

    fn local_name(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) => self.attribute().map_or("", |a| a.local_name.as_str()),
            Cursor::AttributeValue(_) => "",
            Cursor::Node => match self.current {
                Current::Element { element, .. } | Current::EndElement { element, .. } => {
                    element.local_name.as_str()
                }
                _ => "",
            },
        }
    }

    fn prefix(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) => self.attribute().map_or("", |a| a.prefix.as_str()),
            Cursor::AttributeValue(_) => "",
            Cursor::Node => match self.current {
                Current::Element { element, .. } | Current::EndElement { element, .. } => element.prefix.as_str(),
                _ => "",
            },
        }
    }

    fn namespace_uri(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) => self.attribute().map_or("", attribute_namespace),
            Cursor::AttributeValue(_) => "",
            Cursor::Node => match self.current {
                Current::Element { element, .. } | Current::EndElement { element, .. } => {
                    element.namespace_uri.as_str()
                }
                _ => "",
            },
        }
    }

    fn value(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) | Cursor::AttributeValue(_) => {
                self.attribute().map_or("", |a| a.value.as_str())
            }
            Cursor::Node => match &self.current {
                Current::Text { value, .. } => value.as_ref(),
                _ => "",
            },
        }
    }

    fn depth(&self) -> usize {
        match self.cursor {
            Cursor::Attribute(_) => self.node_depth() + 1,
            Cursor::AttributeValue(_) => self.node_depth() + 2,
            Cursor::Node => self.node_depth(),
        }
    }

    fn is_empty_element(&self) -> bool {
        self.cursor == Cursor::Node && matches!(self.current, Current::Element { is_empty: true, .. })
    }

    fn base_uri(&self) -> &str {
        &self.config.base_uri
    }

    fn attribute_count(&self) -> usize {
        self.attributes().len()
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|a| a.qualified_name() == name)
            .map(|a| a.value.as_str())
    }

    fn get_attribute_ns(&self, local_name: &str, namespace_uri: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|a| a.local_name == local_name && attribute_namespace(a) == namespace_uri)
            .map(|a| a.value.as_str())
    }

    fn get_attribute_at(&self, index: usize) -> ReaderResult<&str> {
        let attributes = self.attributes();
        attributes
            .get(index)
            .map(|a| a.value.as_str())
            .ok_or_else(|| ReaderError::out_of_range(index, attributes.len()))
    }

    fn move_to_attribute(&mut self, name: &str) -> bool {
        match self.attributes().iter().position(|a| a.qualified_name() == name) {
            Some(index) => {
                self.cursor = Cursor::Attribute(index);
                true
            }
            None => false,
        }
    }

    fn move_to_attribute_ns(&mut self, local_name: &str, namespace_uri: &str) -> bool {
        let found = self
            .attributes()
            .iter()
            .position(|a| a.local_name == local_name && attribute_namespace(a) == namespace_uri);
        match found {
            Some(index) => {
                self.cursor = Cursor::Attribute(index);
                true
            }
            None => false,
        }
    }

    fn move_to_attribute_at(&mut self, index: usize) -> ReaderResult<()> {
        let count = self.attribute_count();
        if index >= count {
            return Err(ReaderError::out_of_range(index, count));
        }
        self.cursor = Cursor::Attribute(index);
        Ok(())
    }

    fn move_to_first_attribute(&mut self) -> bool {
        if self.attributes().is_empty() {
            return false;
        }
        self.cursor = Cursor::Attribute(0);
        true
    }

    fn move_to_next_attribute(&mut self) -> bool {
        match self.cursor {
            Cursor::Node => self.move_to_first_attribute(),
            Cursor::Attribute(index) | Cursor::AttributeValue(index) => {
                if index + 1 < self.attribute_count() {
                    self.cursor = Cursor::Attribute(index + 1);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn move_to_element(&mut self) -> bool {
        if self.cursor == Cursor::Node {
            return false;
        }
        self.cursor = Cursor::Node;
        true
    }

    fn read_attribute_value(&mut self) -> bool {
        match self.cursor {
            Cursor::Attribute(index) => {
                self.cursor = Cursor::AttributeValue(index);
                true
            }
            _ => false,
        }
    }

    fn xml_lang(&self) -> &str {
        self.scopes.xml_lang()
    }

    fn xml_space(&self) -> XmlSpace {
        self.scopes.xml_space()
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        if self.state != ReadState::Interactive {
            return None;
        }
        self.scopes.lookup(prefix)
    }

    fn close(&mut self) {
        if self.state != ReadState::Closed {
            debug!(state = %self.state, "tree reader closed");
        }
        self.state = ReadState::Closed;
        self.current = Current::None;
        self.cursor = Cursor::Node;
        self.pending = None;
        self.open_elements = 0;
        self.pop_scope = false;
        self.scopes.clear();
        self.dispose();
    }
}

impl Drop for TreeReader<'_> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TreeReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeReader")
            .field("state", &self.state)
            .field("node_type", &self.node_type())
            .field("name", &self.name())
            .field("depth", &self.depth())
            .finish()
    }
}
