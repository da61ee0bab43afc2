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

//! Lazy pre-order traversal over a builder tree.
//!
//! [`FrameStack`] keeps one iteration cursor per open sibling sequence (the
//! root singleton, an element's attributes, an element's children) and
//! produces one [`Step`] per call. Both the byte renderer and the node reader
//! are driven by the same step sequence.
//!
//! # Architecture
//!
//! ```text
//! <root a1="one"><child /></root>
//!
//! StartTag(root, has_attributes)      "<root"
//! Attribute(a1)                       " a1=\"one\""
//! EndAttributesOpenTag(root)          ">"
//! StartTag(child, self-closing)       "<child />"
//! EndTag(root)                        "</root>"
//! None
//! ```
//!
//! # Example
//!
//! ```rust
//! use xmlb_core::traverse::{FrameStack, Step};
//! use xmlb_core::Element;
//!
//! let root = Element::new("root").with_child(Element::new("child"));
//! let mut stack = FrameStack::new(Some(&root));
//!
//! assert!(matches!(stack.next_step(), Some(Step::StartTag { is_self_closing: false, .. })));
//! assert!(matches!(stack.next_step(), Some(Step::StartTag { is_self_closing: true, .. })));
//! assert!(matches!(stack.next_step(), Some(Step::EndTag(_))));
//! assert!(stack.next_step().is_none());
//! ```

use crate::node::{Attribute, Element, Node, NodeRef};

/// One unit of traversal progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'a> {
    /// Start of an element.
    ///
    /// With attributes, only the opening `<name` is implied and the attribute
    /// steps follow. Without attributes the open tag is complete: `<name>`
    /// when children follow, `<name />` when `is_self_closing`.
    StartTag {
        /// The element being opened.
        element: &'a Element,
        /// Attribute steps follow.
        has_attributes: bool,
        /// No attributes and no children.
        is_self_closing: bool,
    },
    /// One attribute of the element being opened.
    Attribute(&'a Attribute),
    /// Attributes are done and children follow (`>`).
    EndAttributesOpenTag(&'a Element),
    /// Attributes are done and there are no children (` />`).
    SelfClose(&'a Element),
    /// Character content, possibly empty.
    Text(&'a str),
    /// End of an element with children (`</name>`).
    EndTag(&'a Element),
}

#[derive(Debug, Clone, Copy)]
enum Siblings<'a> {
    Root(Option<&'a Element>),
    Attributes(&'a [Attribute]),
    Children(&'a [Node]),
}

impl<'a> Siblings<'a> {
    fn get(&self, index: usize) -> Option<NodeRef<'a>> {
        match *self {
            Siblings::Root(root) => root.filter(|_| index == 0).map(NodeRef::Element),
            Siblings::Attributes(attributes) => attributes.get(index).map(NodeRef::Attribute),
            Siblings::Children(children) => children.get(index).map(Node::as_node_ref),
        }
    }
}

/// An iteration cursor over one sibling sequence.
#[derive(Debug, Clone)]
struct Frame<'a> {
    owner: Option<&'a Element>,
    siblings: Siblings<'a>,
    position: usize,
}

impl<'a> Frame<'a> {
    fn root(root: Option<&'a Element>) -> Self {
        Self {
            owner: None,
            siblings: Siblings::Root(root),
            position: 0,
        }
    }

    fn attributes(owner: &'a Element) -> Self {
        Self {
            owner: Some(owner),
            siblings: Siblings::Attributes(&owner.attributes),
            position: 0,
        }
    }

    fn children(owner: &'a Element) -> Self {
        Self {
            owner: Some(owner),
            siblings: Siblings::Children(&owner.children),
            position: 0,
        }
    }

    fn advance(&mut self) -> Option<NodeRef<'a>> {
        let node = self.siblings.get(self.position)?;
        self.position += 1;
        Some(node)
    }
}

/// Stack of traversal frames over a borrowed tree.
///
/// A `None` root yields no steps at all.
#[derive(Debug, Clone)]
pub struct FrameStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> FrameStack<'a> {
    /// Start a traversal at `root`.
    pub fn new(root: Option<&'a Element>) -> Self {
        let mut frames = Vec::with_capacity(8);
        frames.push(Frame::root(root));
        Self { frames }
    }

    /// Number of frames currently open, the root frame included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the traversal has reached the end of the sequence.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Produce the next step, or `None` once the sequence is exhausted.
    pub fn next_step(&mut self) -> Option<Step<'a>> {
        let frame = self.frames.last_mut()?;

        if let Some(node) = frame.advance() {
            return Some(self.enter(node));
        }

        let frame = self.frames.pop()?;
        match (frame.siblings, frame.owner) {
            (Siblings::Attributes(_), Some(owner)) => {
                if owner.has_children() {
                    self.frames.push(Frame::children(owner));
                    Some(Step::EndAttributesOpenTag(owner))
                } else {
                    Some(Step::SelfClose(owner))
                }
            }
            (Siblings::Children(_), Some(owner)) => Some(Step::EndTag(owner)),
            _ => None,
        }
    }

    fn enter(&mut self, node: NodeRef<'a>) -> Step<'a> {
        match node {
            NodeRef::Attribute(attribute) => Step::Attribute(attribute),
            NodeRef::Text(text) => Step::Text(&text.value),
            NodeRef::Element(element) => {
                let has_attributes = element.has_attributes();
                let has_children = element.has_children();
                if has_attributes {
                    self.frames.push(Frame::attributes(element));
                } else if has_children {
                    self.frames.push(Frame::children(element));
                }
                Step::StartTag {
                    element,
                    has_attributes,
                    is_self_closing: !has_attributes && !has_children,
                }
            }
        }
    }
}

impl<'a> Iterator for FrameStack<'a> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Text;

    /// Compact rendering of a step for assertions.
    fn label(step: &Step<'_>) -> String {
        match step {
            Step::StartTag {
                element,
                has_attributes,
                is_self_closing,
            } => format!(
                "start:{}{}{}",
                element.qualified_name(),
                if *has_attributes { "+attrs" } else { "" },
                if *is_self_closing { "/" } else { "" }
            ),
            Step::Attribute(a) => format!("attr:{}", a.qualified_name()),
            Step::EndAttributesOpenTag(e) => format!("open:{}", e.local_name),
            Step::SelfClose(e) => format!("selfclose:{}", e.local_name),
            Step::Text(t) => format!("text:{}", t),
            Step::EndTag(e) => format!("end:{}", e.qualified_name()),
        }
    }

    fn labels(root: Option<&Element>) -> Vec<String> {
        FrameStack::new(root).map(|s| label(&s)).collect()
    }

    #[test]
    fn test_null_root_is_empty_sequence() {
        let mut stack = FrameStack::new(None);
        assert_eq!(stack.len(), 1);
        assert!(stack.next_step().is_none());
        assert!(stack.is_empty());
        assert!(stack.next_step().is_none());
    }

    #[test]
    fn test_self_closing_root() {
        let root = Element::new("root");
        assert_eq!(labels(Some(&root)), vec!["start:root/"]);
    }

    #[test]
    fn test_attributes_without_children_self_close() {
        let root = Element::new("root").attr("a1", "one").attr("a2", "two");
        assert_eq!(
            labels(Some(&root)),
            vec!["start:root+attrs", "attr:a1", "attr:a2", "selfclose:root"]
        );
    }

    #[test]
    fn test_attributes_with_children_open_then_close() {
        let root = Element::new("root")
            .attr("a1", "one")
            .with_child(Element::new("child").attr("a1", "one"));
        assert_eq!(
            labels(Some(&root)),
            vec![
                "start:root+attrs",
                "attr:a1",
                "open:root",
                "start:child+attrs",
                "attr:a1",
                "selfclose:child",
                "end:root",
            ]
        );
    }

    #[test]
    fn test_explicit_empty_keeps_end_tag() {
        let root = Element::new("root").with_child(Text::default());
        assert_eq!(labels(Some(&root)), vec!["start:root", "text:", "end:root"]);
    }

    #[test]
    fn test_mixed_content_order() {
        let root = Element::qualified("s1:root", "urn:ns-one")
            .unwrap()
            .with_text("a")
            .with_child(Element::new("mid").with_text("b"))
            .with_text("c");
        assert_eq!(
            labels(Some(&root)),
            vec![
                "start:s1:root",
                "text:a",
                "start:mid",
                "text:b",
                "end:mid",
                "text:c",
                "end:s1:root",
            ]
        );
    }

    #[test]
    fn test_frames_track_nesting() {
        let root = Element::new("a").with_child(Element::new("b").with_child(Element::new("c")));
        let mut stack = FrameStack::new(Some(&root));
        let mut max = 0;
        while stack.next_step().is_some() {
            max = max.max(stack.len());
        }
        // root frame plus the child frames of a and b
        assert_eq!(max, 3);
    }
}
