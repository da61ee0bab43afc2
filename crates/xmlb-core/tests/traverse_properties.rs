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

//! Structural properties of the traversal step sequence.

use proptest::prelude::*;
use xmlb_core::{Element, FrameStack, Node, Step, Text};

fn leaf() -> impl Strategy<Value = Element> {
    ("[a-z]{1,4}", prop::collection::vec("[a-z]{0,3}", 0..3)).prop_map(|(name, values)| {
        values
            .into_iter()
            .enumerate()
            .fold(Element::new(name), |e, (i, v)| e.attr(format!("a{}", i), v))
    })
}

fn tree() -> impl Strategy<Value = Element> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        (
            leaf(),
            prop::collection::vec(
                prop_oneof![
                    inner.prop_map(Node::Element),
                    "[a-z ]{0,4}".prop_map(|t| Node::Text(Text::new(t))),
                ],
                0..4,
            ),
        )
            .prop_map(|(mut element, children)| {
                element.children = children;
                element
            })
    })
}

fn count_elements(element: &Element) -> usize {
    1 + element
        .children
        .iter()
        .map(|child| match child {
            Node::Element(e) => count_elements(e),
            Node::Text(_) => 0,
        })
        .sum::<usize>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_every_element_starts_once(root in tree()) {
        let starts = FrameStack::new(Some(&root))
            .filter(|s| matches!(s, Step::StartTag { .. }))
            .count();
        prop_assert_eq!(starts, count_elements(&root));
    }

    #[test]
    fn prop_open_elements_close_exactly_once(root in tree()) {
        let mut open = 0usize;
        for step in FrameStack::new(Some(&root)) {
            match step {
                Step::StartTag { is_self_closing: true, .. } => {}
                Step::StartTag { .. } => open += 1,
                Step::SelfClose(_) | Step::EndTag(_) => {
                    prop_assert!(open > 0);
                    open -= 1;
                }
                _ => {}
            }
        }
        prop_assert_eq!(open, 0);
    }

    #[test]
    fn prop_attributes_follow_their_start_tag(root in tree()) {
        let mut expected: Vec<String> = Vec::new();
        for step in FrameStack::new(Some(&root)) {
            match step {
                Step::StartTag { element, has_attributes, .. } => {
                    prop_assert!(expected.is_empty());
                    prop_assert_eq!(has_attributes, element.has_attributes());
                    expected = element.attributes.iter().rev().map(|a| a.local_name.clone()).collect();
                }
                Step::Attribute(attr) => {
                    prop_assert_eq!(expected.pop(), Some(attr.local_name.clone()));
                }
                _ => prop_assert!(expected.is_empty()),
            }
        }
    }
}
