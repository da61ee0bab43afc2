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

//! Integration tests for tree-backed pull readers.

use proptest::prelude::*;
use quick_xml::Writer;
use xmlb_core::namespace::XMLNS_NAMESPACE;
use xmlb_core::{Attribute, Element, Node, Text};
use xmlb_reader::{
    copy_to_writer, open, read_outer_xml, NodeType, PullReader, ReadState, ReaderConfig, TreeReader,
};
use xmlb_stream::render_to_string;

fn sample_tree() -> Element {
    Element::qualified("s1:root", "urn:ns-one")
        .unwrap()
        .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one"))
        .with_attribute(Attribute::namespace_declaration("", "urn:default"))
        .with_child(
            Element::qualified("s2:child", "urn:ns-two")
                .unwrap()
                .with_attribute(Attribute::namespace_declaration("s2", "urn:ns-two"))
                .attr("a1", "one & two")
                .with_text("héllo ")
                .with_text("<world>")
                .with_child(Element::new("leaf").with_namespace("urn:default"))
                .with_child(
                    Element::new("blank")
                        .with_namespace("urn:default")
                        .with_child(Text::default()),
                ),
        )
        .with_text("\n  ")
}

fn copy(reader: &mut dyn PullReader) -> String {
    let mut writer = Writer::new(Vec::new());
    copy_to_writer(reader, &mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_full_walk_reports_parser_view() {
    let root = sample_tree();
    let mut reader = TreeReader::new(Some(&root));
    let mut seen = Vec::new();
    while reader.read().unwrap() {
        seen.push(format!("{}:{}:{}:{}", reader.node_type(), reader.name(), reader.depth(), reader.value()));
    }
    assert_eq!(
        seen,
        [
            "Element:s1:root:0:",
            "Element:s2:child:1:",
            "Text::2:héllo <world>",
            "Element:leaf:2:",
            "Element:blank:2:",
            "EndElement:blank:2:",
            "EndElement:s2:child:1:",
            "Whitespace::1:\n  ",
            "EndElement:s1:root:0:",
        ]
    );
    assert_eq!(reader.read_state(), ReadState::EndOfFile);
}

#[test]
fn test_identity_copy_matches_rendered_markup_modulo_empty_tags() {
    let root = sample_tree();
    let copied = copy(&mut TreeReader::new(Some(&root)));
    let rendered = render_to_string(Some(&root)).replace(" />", "/>");
    assert_eq!(copied, rendered);
}

#[test]
fn test_namespace_scopes_follow_document_order() {
    let root = sample_tree();
    let mut reader = TreeReader::new(Some(&root));
    assert_eq!(reader.lookup_namespace("s1"), None);

    reader.read().unwrap();
    assert_eq!(reader.lookup_namespace(""), Some("urn:default"));
    assert_eq!(reader.lookup_namespace("s2"), None);

    reader.read().unwrap();
    assert_eq!(reader.lookup_namespace("s2"), Some("urn:ns-two"));
    assert_eq!(reader.get_attribute_ns("s2", XMLNS_NAMESPACE), Some("urn:ns-two"));
    assert_eq!(reader.get_attribute("a1"), Some("one & two"));

    while reader.node_type() != NodeType::Whitespace {
        reader.read().unwrap();
    }
    assert_eq!(reader.lookup_namespace("s2"), None);
    assert_eq!(reader.lookup_namespace("s1"), Some("urn:ns-one"));
}

#[test]
fn test_ignore_whitespace_drops_trailing_indent() {
    let root = sample_tree();
    let config = ReaderConfig::default()
        .with_ignore_whitespace(true)
        .with_base_uri("urn:sample");
    let mut reader = TreeReader::with_config(Some(&root), config);
    let mut kinds = Vec::new();
    while reader.read().unwrap() {
        assert_eq!(reader.base_uri(), "urn:sample");
        kinds.push(reader.node_type());
    }
    assert!(!kinds.contains(&NodeType::Whitespace));
    assert_eq!(kinds.len(), 8);
}

#[test]
fn test_outer_xml_of_child_then_continue() {
    let root = sample_tree();
    let mut reader = TreeReader::new(Some(&root));
    reader.read().unwrap();
    reader.read().unwrap();
    let outer = read_outer_xml(&mut reader).unwrap();
    assert!(outer.starts_with(r#"<s2:child xmlns:s2="urn:ns-two" a1="one &amp; two">"#));
    assert!(outer.ends_with("<leaf/><blank></blank></s2:child>"));
    assert_eq!(reader.node_type(), NodeType::Whitespace);
}

#[test]
fn test_open_without_root_is_empty() {
    let mut reader = open(None);
    assert_eq!(reader.read_state(), ReadState::Initial);
    assert!(!reader.read().unwrap());
    assert!(reader.eof());
    assert_eq!(copy(&mut reader), "");
}

#[test]
fn test_close_midway_then_read() {
    let root = sample_tree();
    let mut reader = open(Some(&root));
    reader.read().unwrap();
    reader.read().unwrap();
    reader.move_to_first_attribute();
    reader.close();
    assert_eq!(reader.read_state(), ReadState::Closed);
    assert_eq!(reader.node_type(), NodeType::None);
    assert_eq!(reader.attribute_count(), 0);
    assert!(!reader.read().unwrap());
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,4}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-z <>&\"' \t\n]{0,8}"
}

fn tree_strategy() -> impl Strategy<Value = Element> {
    let leaf = (name_strategy(), prop::collection::btree_map(name_strategy(), text_strategy(), 0..3)).prop_map(
        |(name, attributes)| {
            attributes
                .into_iter()
                .fold(Element::new(name), |element, (key, value)| element.attr(key, value))
        },
    );
    leaf.prop_recursive(4, 24, 4, |inner| {
        (
            name_strategy(),
            prop::collection::vec(
                prop_oneof![
                    inner.prop_map(Node::from),
                    text_strategy().prop_map(|t| Node::from(Text::new(t))),
                ],
                0..4,
            ),
        )
            .prop_map(|(name, children)| {
                children
                    .into_iter()
                    .fold(Element::new(name), |element, child| element.with_child(child))
            })
    })
}

proptest! {
    #[test]
    fn prop_depth_returns_to_zero(root in tree_strategy()) {
        let mut reader = TreeReader::new(Some(&root));
        let mut open_elements: usize = 0;
        while reader.read().unwrap() {
            match reader.node_type() {
                NodeType::Element => {
                    prop_assert_eq!(reader.depth(), open_elements);
                    if !reader.is_empty_element() {
                        open_elements += 1;
                    }
                }
                NodeType::EndElement => {
                    open_elements -= 1;
                    prop_assert_eq!(reader.depth(), open_elements);
                }
                NodeType::Text | NodeType::Whitespace => {
                    prop_assert!(!reader.value().is_empty());
                    prop_assert_eq!(reader.depth(), open_elements);
                }
                other => prop_assert!(false, "unexpected node {}", other),
            }
        }
        prop_assert_eq!(open_elements, 0);
        prop_assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn prop_no_adjacent_text_nodes(root in tree_strategy()) {
        let mut reader = TreeReader::new(Some(&root));
        let mut previous_was_text = false;
        while reader.read().unwrap() {
            let is_text = matches!(reader.node_type(), NodeType::Text | NodeType::Whitespace);
            prop_assert!(!(is_text && previous_was_text));
            previous_was_text = is_text;
        }
    }

    #[test]
    fn prop_attribute_walk_matches_element(root in tree_strategy()) {
        let mut reader = TreeReader::new(Some(&root));
        while reader.read().unwrap() {
            if reader.node_type() != NodeType::Element {
                continue;
            }
            let count = reader.attribute_count();
            let mut walked = 0;
            while reader.move_to_next_attribute() {
                prop_assert_eq!(reader.get_attribute_at(walked).unwrap(), reader.value());
                prop_assert!(reader.read_attribute_value());
                prop_assert_eq!(reader.node_type(), NodeType::Text);
                walked += 1;
            }
            prop_assert_eq!(walked, count);
            prop_assert_eq!(reader.move_to_element(), count > 0);
        }
    }
}
