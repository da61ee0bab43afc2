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

//! The pull reader contract.
//!
//! [`PullReader`] is a forward-only cursor over document nodes. A reader
//! starts in [`ReadState::Initial`] positioned on nothing; each
//! [`read`](PullReader::read) moves to the next node until it returns
//! `false` in [`ReadState::EndOfFile`]. While positioned on an element, the
//! attribute navigation methods move the cursor onto its attributes and the
//! value of an attribute without advancing the document position.
//!
//! # Depth
//!
//! | Node | Depth |
//! |------|-------|
//! | root element | 0 |
//! | child of a depth-d element | d + 1 |
//! | attribute of a depth-d element | d + 1 |
//! | attribute value of a depth-d element | d + 2 |
//! | end of a depth-d element | d |

use std::borrow::Cow;
use std::fmt;

use xmlb_core::qname::qualify;

use crate::error::{ReaderError, ReaderResult};

/// Kind of node a reader is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Not positioned on a node: before the first read, at end of file or
    /// after close.
    None,
    /// An element start; self-closing elements have no matching end.
    Element,
    /// An attribute of the current element.
    Attribute,
    /// Character content, or the value of an attribute.
    Text,
    /// Character content made only of whitespace.
    Whitespace,
    /// An element end.
    EndElement,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Element => "Element",
            Self::Attribute => "Attribute",
            Self::Text => "Text",
            Self::Whitespace => "Whitespace",
            Self::EndElement => "EndElement",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadState {
    /// No read has happened yet.
    Initial,
    /// Positioned on a node.
    Interactive,
    /// A text-backed reader hit malformed input.
    Error,
    /// Every node has been read.
    EndOfFile,
    /// The reader was closed.
    Closed,
}

impl fmt::Display for ReadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initial => "Initial",
            Self::Interactive => "Interactive",
            Self::Error => "Error",
            Self::EndOfFile => "EndOfFile",
            Self::Closed => "Closed",
        };
        f.write_str(name)
    }
}

/// Whitespace handling requested by the `xml:space` attribute in scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum XmlSpace {
    /// No `xml:space` in scope.
    #[default]
    None,
    /// `xml:space="default"`.
    Default,
    /// `xml:space="preserve"`.
    Preserve,
}

impl XmlSpace {
    /// The value an `xml:space` attribute declares. Other values declare
    /// nothing and leave the inherited value in place.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "preserve" => Some(Self::Preserve),
            _ => None,
        }
    }
}

impl fmt::Display for XmlSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Default => "Default",
            Self::Preserve => "Preserve",
        };
        f.write_str(name)
    }
}

/// Whether `text` is non-empty and made only of XML whitespace.
pub fn is_whitespace(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Forward-only node cursor.
///
/// Property accessors describe the node the cursor is on, which is the
/// current attribute (or attribute value) while navigating attributes.
/// Attribute accessors ([`attribute_count`](Self::attribute_count),
/// [`get_attribute`](Self::get_attribute) and friends) always refer to the
/// current element, also while positioned on one of its attributes.
pub trait PullReader {
    /// Move to the next node. Returns `false` once there are no more nodes.
    fn read(&mut self) -> ReaderResult<bool>;

    /// Lifecycle state.
    fn read_state(&self) -> ReadState;

    /// Kind of the current node.
    fn node_type(&self) -> NodeType;

    /// Local name of the current element or attribute, empty otherwise.
    fn local_name(&self) -> &str;

    /// Prefix of the current element or attribute, empty otherwise.
    fn prefix(&self) -> &str;

    /// Namespace URI of the current element or attribute, empty otherwise.
    fn namespace_uri(&self) -> &str;

    /// `prefix:local` or the bare local name.
    fn name(&self) -> Cow<'_, str> {
        qualify(self.prefix(), self.local_name())
    }

    /// Value of the current text, whitespace or attribute node; empty
    /// otherwise.
    fn value(&self) -> &str;

    /// Whether the current node kind carries a value.
    fn has_value(&self) -> bool {
        matches!(
            self.node_type(),
            NodeType::Attribute | NodeType::Text | NodeType::Whitespace
        )
    }

    /// Depth of the current node.
    fn depth(&self) -> usize;

    /// Whether the current node is a self-closing element.
    fn is_empty_element(&self) -> bool;

    /// Whether the reader is at end of file.
    fn eof(&self) -> bool {
        self.read_state() == ReadState::EndOfFile
    }

    /// Base URI of the document.
    fn base_uri(&self) -> &str;

    /// `xml:lang` in scope for the current node, empty when none. Set by an
    /// element and inherited by everything inside it.
    fn xml_lang(&self) -> &str;

    /// `xml:space` in scope for the current node.
    fn xml_space(&self) -> XmlSpace;

    /// Whether the current attribute was supplied by a schema default.
    /// Builder trees and rendered markup carry no schema, so never.
    fn is_default(&self) -> bool {
        false
    }

    /// Quote character used around attribute values.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Number of attributes on the current element.
    fn attribute_count(&self) -> usize;

    /// Whether the current element has attributes.
    fn has_attributes(&self) -> bool {
        self.attribute_count() > 0
    }

    /// Attribute value by qualified name.
    fn get_attribute(&self, name: &str) -> Option<&str>;

    /// Attribute value by local name and namespace URI.
    fn get_attribute_ns(&self, local_name: &str, namespace_uri: &str) -> Option<&str>;

    /// Attribute value by position.
    fn get_attribute_at(&self, index: usize) -> ReaderResult<&str>;

    /// Move onto an attribute by qualified name.
    fn move_to_attribute(&mut self, name: &str) -> bool;

    /// Move onto an attribute by local name and namespace URI.
    fn move_to_attribute_ns(&mut self, local_name: &str, namespace_uri: &str) -> bool;

    /// Move onto an attribute by position.
    fn move_to_attribute_at(&mut self, index: usize) -> ReaderResult<()>;

    /// Move onto the first attribute.
    fn move_to_first_attribute(&mut self) -> bool;

    /// Move onto the next attribute; from the element itself this is the
    /// first attribute.
    fn move_to_next_attribute(&mut self) -> bool;

    /// Move from an attribute back to its element.
    fn move_to_element(&mut self) -> bool;

    /// Enter the text value of the current attribute. Succeeds once per
    /// attribute, even when the value is empty.
    fn read_attribute_value(&mut self) -> bool;

    /// Namespace bound to `prefix` in the current scope. Only answers while
    /// [`ReadState::Interactive`].
    fn lookup_namespace(&self, prefix: &str) -> Option<&str>;

    /// Entity references are never reported, so there is never one to
    /// resolve.
    fn resolve_entity(&mut self) -> ReaderResult<()> {
        Err(ReaderError::InvalidOperation("no entity reference to resolve"))
    }

    /// Close the reader.
    fn close(&mut self);

    /// Whether line information is available.
    fn has_line_info(&self) -> bool {
        false
    }

    /// Line of the current node, 0 when unknown.
    fn line_number(&self) -> usize {
        0
    }

    /// Column of the current node, 0 when unknown.
    fn line_position(&self) -> usize {
        0
    }

    /// Skip to the next content node (element, end element or non-whitespace
    /// text) and return its kind. From an attribute this moves back to the
    /// element.
    fn move_to_content(&mut self) -> ReaderResult<NodeType> {
        loop {
            match self.node_type() {
                NodeType::Attribute => {
                    self.move_to_element();
                    return Ok(NodeType::Element);
                }
                NodeType::Element | NodeType::EndElement | NodeType::Text => {
                    return Ok(self.node_type());
                }
                NodeType::None | NodeType::Whitespace => {}
            }
            if !self.read()? {
                return Ok(self.node_type());
            }
        }
    }

    /// [`move_to_content`](Self::move_to_content) and test for an element.
    fn is_start_element(&mut self) -> ReaderResult<bool> {
        Ok(self.move_to_content()? == NodeType::Element)
    }

    /// [`move_to_content`](Self::move_to_content) and require an element
    /// with qualified name `name`.
    fn assert_start_element(&mut self, name: &str) -> ReaderResult<()> {
        if self.is_start_element()? && self.name() == name {
            return Ok(());
        }
        Err(ReaderError::unexpected(format!("element <{}>", name), describe(&*self)))
    }

    /// [`move_to_content`](Self::move_to_content) and require an element
    /// with the given local name and namespace URI.
    fn assert_start_element_ns(&mut self, local_name: &str, namespace_uri: &str) -> ReaderResult<()> {
        if self.is_start_element()? && self.local_name() == local_name && self.namespace_uri() == namespace_uri {
            return Ok(());
        }
        Err(ReaderError::unexpected(
            format!("element <{}> in namespace '{}'", local_name, namespace_uri),
            describe(&*self),
        ))
    }

    /// Whether the current node is the end of an element with qualified
    /// name `name`. Does not move.
    fn is_end_element(&self, name: &str) -> bool {
        self.node_type() == NodeType::EndElement && self.name() == name
    }

    /// Whether the current node is the end of an element with the given
    /// local name and namespace URI. Does not move.
    fn is_end_element_ns(&self, local_name: &str, namespace_uri: &str) -> bool {
        self.node_type() == NodeType::EndElement
            && self.local_name() == local_name
            && self.namespace_uri() == namespace_uri
    }

    /// Require [`is_end_element`](Self::is_end_element).
    fn assert_end_element(&self, name: &str) -> ReaderResult<()> {
        if self.is_end_element(name) {
            return Ok(());
        }
        Err(ReaderError::unexpected(format!("end of <{}>", name), describe(&*self)))
    }

    /// Require [`is_end_element_ns`](Self::is_end_element_ns).
    fn assert_end_element_ns(&self, local_name: &str, namespace_uri: &str) -> ReaderResult<()> {
        if self.is_end_element_ns(local_name, namespace_uri) {
            return Ok(());
        }
        Err(ReaderError::unexpected(
            format!("end of <{}> in namespace '{}'", local_name, namespace_uri),
            describe(&*self),
        ))
    }

    /// Value of the attribute `name` of the current element, which must
    /// exist. Leaves the reader on that attribute.
    fn get_mandatory_attribute(&mut self, name: &str) -> ReaderResult<&str> {
        if self.move_to_attribute(name) {
            return Ok(self.value());
        }
        Err(ReaderError::unexpected(format!("attribute '{}'", name), describe(&*self)))
    }
}

/// Short description of the current node for error messages.
fn describe<R: PullReader + ?Sized>(reader: &R) -> String {
    match reader.node_type() {
        NodeType::Element | NodeType::EndElement | NodeType::Attribute => {
            format!("{} '{}'", reader.node_type(), reader.name())
        }
        NodeType::None if reader.eof() => "end of file".to_string(),
        other => other.to_string(),
    }
}

impl<R: PullReader + ?Sized> PullReader for Box<R> {
    fn read(&mut self) -> ReaderResult<bool> {
        (**self).read()
    }
    fn read_state(&self) -> ReadState {
        (**self).read_state()
    }
    fn node_type(&self) -> NodeType {
        (**self).node_type()
    }
    fn local_name(&self) -> &str {
        (**self).local_name()
    }
    fn prefix(&self) -> &str {
        (**self).prefix()
    }
    fn namespace_uri(&self) -> &str {
        (**self).namespace_uri()
    }
    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
    fn value(&self) -> &str {
        (**self).value()
    }
    fn has_value(&self) -> bool {
        (**self).has_value()
    }
    fn depth(&self) -> usize {
        (**self).depth()
    }
    fn is_empty_element(&self) -> bool {
        (**self).is_empty_element()
    }
    fn eof(&self) -> bool {
        (**self).eof()
    }
    fn base_uri(&self) -> &str {
        (**self).base_uri()
    }
    fn xml_lang(&self) -> &str {
        (**self).xml_lang()
    }
    fn xml_space(&self) -> XmlSpace {
        (**self).xml_space()
    }
    fn is_default(&self) -> bool {
        (**self).is_default()
    }
    fn quote_char(&self) -> char {
        (**self).quote_char()
    }
    fn attribute_count(&self) -> usize {
        (**self).attribute_count()
    }
    fn has_attributes(&self) -> bool {
        (**self).has_attributes()
    }
    fn get_attribute(&self, name: &str) -> Option<&str> {
        (**self).get_attribute(name)
    }
    fn get_attribute_ns(&self, local_name: &str, namespace_uri: &str) -> Option<&str> {
        (**self).get_attribute_ns(local_name, namespace_uri)
    }
    fn get_attribute_at(&self, index: usize) -> ReaderResult<&str> {
        (**self).get_attribute_at(index)
    }
    fn move_to_attribute(&mut self, name: &str) -> bool {
        (**self).move_to_attribute(name)
    }
    fn move_to_attribute_ns(&mut self, local_name: &str, namespace_uri: &str) -> bool {
        (**self).move_to_attribute_ns(local_name, namespace_uri)
    }
    fn move_to_attribute_at(&mut self, index: usize) -> ReaderResult<()> {
        (**self).move_to_attribute_at(index)
    }
    fn move_to_first_attribute(&mut self) -> bool {
        (**self).move_to_first_attribute()
    }
    fn move_to_next_attribute(&mut self) -> bool {
        (**self).move_to_next_attribute()
    }
    fn move_to_element(&mut self) -> bool {
        (**self).move_to_element()
    }
    fn read_attribute_value(&mut self) -> bool {
        (**self).read_attribute_value()
    }
    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        (**self).lookup_namespace(prefix)
    }
    fn resolve_entity(&mut self) -> ReaderResult<()> {
        (**self).resolve_entity()
    }
    fn close(&mut self) {
        (**self).close()
    }
    fn has_line_info(&self) -> bool {
        (**self).has_line_info()
    }
    fn line_number(&self) -> usize {
        (**self).line_number()
    }
    fn line_position(&self) -> usize {
        (**self).line_position()
    }
}
