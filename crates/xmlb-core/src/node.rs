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

//! Builder tree node model.
//!
//! A tree is made of [`Element`]s owning ordered [`Attribute`] lists and
//! ordered child lists of [`Node`]s (elements and [`Text`] interleaved).
//! Trees are built once by the caller and only read afterwards, so any
//! number of rendering sessions may borrow the same tree.
//!
//! # Examples
//!
//! ```rust
//! use xmlb_core::{Attribute, Element};
//!
//! let root = Element::new("root")
//!     .with_attribute(Attribute::new("a1", "one"))
//!     .with_child(Element::new("child").with_text("content"));
//!
//! assert!(root.has_attributes());
//! assert_eq!(root.children.len(), 1);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::namespace::{declared_prefix, XMLNS_PREFIX};
use crate::qname::{parse_qname, qualify};

/// Release hook attached to a root element.
///
/// Sessions call [`Dispose::dispose`] once when they are closed.
pub trait Dispose: Send + Sync {
    /// Release whatever the tree holds on to.
    fn dispose(&self);
}

impl<F> Dispose for F
where
    F: Fn() + Send + Sync,
{
    fn dispose(&self) {
        self()
    }
}

/// Shared handle to a [`Dispose`] implementation.
#[derive(Clone)]
pub struct Disposer(Arc<dyn Dispose>);

impl Disposer {
    /// Wrap a disposal hook.
    pub fn new(hook: impl Dispose + 'static) -> Self {
        Self(Arc::new(hook))
    }

    /// Invoke the hook.
    pub fn dispose(&self) {
        self.0.dispose();
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Disposer")
    }
}

impl PartialEq for Disposer {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

/// The three kinds of node a tree is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element.
    Element,
    /// An attribute of an element.
    Attribute,
    /// Character content.
    Text,
}

/// An element node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Local name, never empty.
    pub local_name: String,
    /// Namespace prefix, empty when unprefixed.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub prefix: String,
    /// Namespace URI, empty when none.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub namespace_uri: String,
    /// Attributes in declaration order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub attributes: Vec<Attribute>,
    /// Child elements and text in document order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Node>,
    /// Hook invoked when a session over this element (as root) is closed.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub disposer: Option<Disposer>,
}

impl Element {
    /// Create an element with a local name.
    ///
    /// # Panics
    ///
    /// Panics if `local_name` is empty.
    pub fn new(local_name: impl Into<String>) -> Self {
        let local_name = local_name.into();
        assert!(!local_name.is_empty(), "element local name must not be empty");
        Self {
            local_name,
            prefix: String::new(),
            namespace_uri: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            disposer: None,
        }
    }

    /// Create an element from a `prefix:local` name and a namespace URI.
    pub fn qualified(name: &str, namespace_uri: impl Into<String>) -> CoreResult<Self> {
        let name = parse_qname(name)?;
        Ok(Self::new(name.local)
            .with_prefix(name.prefix)
            .with_namespace(namespace_uri))
    }

    /// Set the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the namespace URI.
    pub fn with_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        self.namespace_uri = namespace_uri.into();
        self
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append an unprefixed attribute.
    pub fn attr(self, local_name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_attribute(Attribute::new(local_name, value))
    }

    /// Append a child element or text node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn with_text(self, value: impl Into<String>) -> Self {
        self.with_child(Text::new(value))
    }

    /// Attach a disposal hook.
    pub fn with_disposer(mut self, hook: impl Dispose + 'static) -> Self {
        self.disposer = Some(Disposer::new(hook));
        self
    }

    /// Append a child in place.
    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Append an attribute in place.
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Whether the element has at least one attribute.
    #[inline]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Whether the element has at least one child, empty text included.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// `prefix:local` or the bare local name.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        qualify(&self.prefix, &self.local_name)
    }

    /// Namespace declarations carried by this element's attributes, as
    /// `(declared prefix, namespace URI)` pairs.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().filter_map(|attr| {
            declared_prefix(&attr.prefix, &attr.local_name).map(|prefix| (prefix, attr.value.as_str()))
        })
    }

    /// Find an attribute by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.qualified_name() == name)
    }
}

/// An attribute node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Local name.
    pub local_name: String,
    /// Namespace prefix, empty when unprefixed.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub prefix: String,
    /// Namespace URI, empty when none.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub namespace_uri: String,
    /// Attribute value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: String,
}

impl Attribute {
    /// Create an unprefixed attribute.
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            prefix: String::new(),
            namespace_uri: String::new(),
            value: value.into(),
        }
    }

    /// Create an attribute from a `prefix:local` name.
    pub fn qualified(name: &str, value: impl Into<String>) -> CoreResult<Self> {
        let name = parse_qname(name)?;
        Ok(Self::new(name.local, value).with_prefix(name.prefix))
    }

    /// Create a namespace declaration: `xmlns="uri"` for an empty prefix,
    /// `xmlns:prefix="uri"` otherwise.
    pub fn namespace_declaration(prefix: &str, namespace_uri: impl Into<String>) -> Self {
        if prefix.is_empty() {
            Self::new(XMLNS_PREFIX, namespace_uri)
        } else {
            Self::new(prefix, namespace_uri).with_prefix(XMLNS_PREFIX)
        }
    }

    /// Set the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the namespace URI.
    pub fn with_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        self.namespace_uri = namespace_uri.into();
        self
    }

    /// `prefix:local` or the bare local name.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        qualify(&self.prefix, &self.local_name)
    }

    /// Whether this is an `xmlns` or `xmlns:*` attribute.
    pub fn is_namespace_declaration(&self) -> bool {
        declared_prefix(&self.prefix, &self.local_name).is_some()
    }
}

/// A text node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    /// Character content, possibly empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: String,
}

impl Text {
    /// Create a text node.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Child content of an element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Character content.
    Text(Text),
}

impl Node {
    /// Borrow as a [`NodeRef`].
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Element(element) => NodeRef::Element(element),
            Node::Text(text) => NodeRef::Text(text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// A borrowed node of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    /// An element.
    Element(&'a Element),
    /// An attribute.
    Attribute(&'a Attribute),
    /// A text node.
    Text(&'a Text),
}

impl<'a> NodeRef<'a> {
    /// The kind of node.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Element(_) => NodeKind::Element,
            NodeRef::Attribute(_) => NodeKind::Attribute,
            NodeRef::Text(_) => NodeKind::Text,
        }
    }

    /// Whether the node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, NodeRef::Element(_))
    }

    /// Whether the node is an attribute.
    pub fn is_attribute(&self) -> bool {
        matches!(self, NodeRef::Attribute(_))
    }

    /// Whether the node is text.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeRef::Text(_))
    }

    /// Local name, empty for text.
    pub fn local_name(&self) -> &'a str {
        match self {
            NodeRef::Element(e) => &e.local_name,
            NodeRef::Attribute(a) => &a.local_name,
            NodeRef::Text(_) => "",
        }
    }

    /// Prefix, empty for text.
    pub fn prefix(&self) -> &'a str {
        match self {
            NodeRef::Element(e) => &e.prefix,
            NodeRef::Attribute(a) => &a.prefix,
            NodeRef::Text(_) => "",
        }
    }

    /// Namespace URI, empty for text.
    pub fn namespace_uri(&self) -> &'a str {
        match self {
            NodeRef::Element(e) => &e.namespace_uri,
            NodeRef::Attribute(a) => &a.namespace_uri,
            NodeRef::Text(_) => "",
        }
    }

    /// Value, empty for elements.
    pub fn value(&self) -> &'a str {
        match self {
            NodeRef::Element(_) => "",
            NodeRef::Attribute(a) => &a.value,
            NodeRef::Text(t) => &t.value,
        }
    }
}
