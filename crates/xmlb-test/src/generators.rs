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

//! Proptest strategies for builder trees.
//!
//! Names avoid the reserved `xml` prefix and every attribute name is unique
//! within its element. Values and text include tabs, line feeds and
//! carriage returns, which only survive a parser when rendered as character
//! references. Namespaced trees declare every prefix they use on the root.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use xmlb_core::{Attribute, Element, Node, Text};

/// Namespace bound to the generated `p` prefix.
pub const GENERATED_NAMESPACE: &str = "urn:xmlb:generated";

/// Element and attribute local names.
pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-w_][a-z0-9_.-]{0,6}"
}

/// Attribute values, including characters that need escaping.
pub fn arb_attribute_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"'é\t\n\r]{0,10}"
}

/// Text values, including whitespace-only and empty text.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z0-9 <>&\"'é\t\n\r]{1,12}",
        1 => "[ \t\n\r]{1,4}",
        1 => Just(String::new()),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Element> {
    (arb_name(), btree_map(arb_name(), arb_attribute_value(), 0..4)).prop_map(|(name, attributes)| {
        attributes
            .into_iter()
            .fold(Element::new(name), |element, (key, value)| element.attr(key, value))
    })
}

/// Trees of unprefixed elements with mixed content.
pub fn arb_tree() -> impl Strategy<Value = Element> {
    arb_leaf().prop_recursive(5, 48, 5, |inner| {
        (
            arb_leaf(),
            vec(
                prop_oneof![
                    2 => inner.prop_map(Node::from),
                    1 => arb_text().prop_map(|text| Node::from(Text::new(text))),
                ],
                0..5,
            ),
        )
            .prop_map(|(element, children)| {
                children
                    .into_iter()
                    .fold(element, |element, child| element.with_child(child))
            })
    })
}

/// Move some elements into the `p` namespace and declare it on the root.
fn qualify_some(element: Element, flags: &mut impl Iterator<Item = bool>) -> Element {
    let mut element = element;
    if flags.next().unwrap_or(false) {
        element = element.with_prefix("p").with_namespace(GENERATED_NAMESPACE);
    }
    element.children = element
        .children
        .into_iter()
        .map(|child| match child {
            Node::Element(child) => Node::Element(qualify_some(child, flags)),
            text => text,
        })
        .collect();
    element
}

/// Trees mixing unprefixed elements and elements bound to
/// [`GENERATED_NAMESPACE`] through the `p` prefix.
pub fn arb_namespaced_tree() -> impl Strategy<Value = Element> {
    (arb_tree(), vec(any::<bool>(), 64)).prop_map(|(root, flags)| {
        let mut flags = flags.into_iter();
        let mut root = qualify_some(root, &mut flags);
        root.push_attribute(Attribute::namespace_declaration("p", GENERATED_NAMESPACE));
        root
    })
}

/// An optional root, absent one time in ten.
pub fn arb_root() -> impl Strategy<Value = Option<Element>> {
    prop_oneof![1 => Just(None), 9 => arb_tree().prop_map(Some)]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_attribute_names_are_unique(root in arb_tree()) {
            let mut names: Vec<_> = root.attributes.iter().map(|a| a.local_name.clone()).collect();
            let count = names.len();
            names.dedup();
            prop_assert_eq!(names.len(), count);
        }

        #[test]
        fn prop_namespaced_root_declares_prefix(root in arb_namespaced_tree()) {
            prop_assert!(root.declarations().any(|(prefix, uri)| prefix == "p" && uri == GENERATED_NAMESPACE));
        }
    }
}
