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

//! Canonical builder trees paired with the markup they render to.
//!
//! Every fixture covers one shape the renderer and the tree reader must
//! agree on with a parser: self-closing versus explicit-empty elements,
//! attributes, default and prefixed namespaces, mixed content, inherited
//! `xml:` attributes, whitespace written as character references and the
//! absent root.

use xmlb_core::{Attribute, Element, Text};

/// A named tree and its expected rendering.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Short identifier used in assertion messages.
    pub name: &'static str,
    /// Builds the tree; `None` is the absent root.
    pub build: fn() -> Option<Element>,
    /// Exact markup the tree renders to.
    pub markup: &'static str,
}

/// List of fixtures.
pub type FixtureList = Vec<Fixture>;

fn a1_a2(element: Element) -> Element {
    element.attr("a1", "one").attr("a2", "two")
}

fn empty_text() -> Text {
    Text::default()
}

/// `<root><child /></root>`
pub fn child_self_closing() -> Option<Element> {
    Some(Element::new("root").with_child(Element::new("child")))
}

/// Attributes on both a root and a self-closing child.
pub fn attributes() -> Option<Element> {
    Some(a1_a2(Element::new("root")).with_child(a1_a2(Element::new("child"))))
}

/// Child closed by an explicit end tag.
pub fn child_explicit_empty() -> Option<Element> {
    Some(Element::new("root").with_child(Element::new("child").with_child(empty_text())))
}

/// Child with text content.
pub fn child_content() -> Option<Element> {
    Some(Element::new("root").with_child(Element::new("child").with_text("content")))
}

/// Default namespace declared on the root.
pub fn default_namespace() -> Option<Element> {
    Some(
        Element::new("root")
            .with_namespace("urn:ns-one")
            .with_attribute(Attribute::namespace_declaration("", "urn:ns-one"))
            .with_child(
                Element::new("child")
                    .with_namespace("urn:ns-one")
                    .with_text("content"),
            ),
    )
}

/// Prefixed namespace declared on the root.
pub fn prefixed_namespace() -> Option<Element> {
    Some(
        Element::new("root")
            .with_prefix("s1")
            .with_namespace("urn:ns-one")
            .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one"))
            .with_child(
                Element::new("child")
                    .with_prefix("s1")
                    .with_namespace("urn:ns-one")
                    .with_text("content"),
            ),
    )
}

/// Two self-closing siblings.
pub fn siblings() -> Option<Element> {
    Some(
        Element::new("root")
            .with_child(Element::new("child-one"))
            .with_child(Element::new("child-two")),
    )
}

/// Two explicit-empty siblings.
pub fn siblings_explicit_empty() -> Option<Element> {
    Some(
        Element::new("root")
            .with_child(Element::new("child-one").with_child(empty_text()))
            .with_child(Element::new("child-two").with_child(empty_text())),
    )
}

/// `<root />`
pub fn lone_root() -> Option<Element> {
    Some(Element::new("root"))
}

/// Self-closing root with attributes.
pub fn root_attributes() -> Option<Element> {
    Some(a1_a2(Element::new("root")))
}

/// Self-closing root declaring a default namespace.
pub fn root_default_namespace() -> Option<Element> {
    Some(
        Element::new("root")
            .with_namespace("urn:ns-one")
            .with_attribute(Attribute::namespace_declaration("", "urn:ns-one")),
    )
}

/// Self-closing prefixed root.
pub fn root_prefixed_namespace() -> Option<Element> {
    Some(
        Element::new("root")
            .with_prefix("s1")
            .with_namespace("urn:ns-one")
            .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one")),
    )
}

/// `<root></root>`
pub fn root_explicit_empty() -> Option<Element> {
    Some(Element::new("root").with_child(empty_text()))
}

/// Explicit-empty root with attributes.
pub fn root_attributes_explicit_empty() -> Option<Element> {
    Some(a1_a2(Element::new("root")).with_child(empty_text()))
}

/// Explicit-empty prefixed root.
pub fn root_prefixed_explicit_empty() -> Option<Element> {
    root_prefixed_namespace().map(|root| root.with_child(empty_text()))
}

/// Root with attributes and text.
pub fn root_attributes_content() -> Option<Element> {
    Some(a1_a2(Element::new("root")).with_text("content"))
}

/// `<root>content</root>`
pub fn root_content() -> Option<Element> {
    Some(Element::new("root").with_text("content"))
}

fn namespaced_attribute() -> Attribute {
    Attribute::new("a2", "two")
        .with_prefix("s2")
        .with_namespace("urn:ns-two")
}

fn grand_child_two(namespace_uri: &str) -> Element {
    Element::new("grand-child-two")
        .with_namespace(namespace_uri)
        .attr("a1", "one")
        .with_attribute(namespaced_attribute())
        .with_text("grand-content")
}

fn child_two() -> Element {
    Element::new("child-two")
        .with_prefix("s2")
        .with_namespace("urn:ns-two")
        .with_text("content")
}

/// Mixed content across two prefixed namespaces.
pub fn mixed_prefixed() -> Option<Element> {
    Some(
        Element::new("root")
            .with_prefix("s1")
            .with_namespace("urn:ns-one")
            .attr("a1", "one")
            .with_attribute(namespaced_attribute())
            .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one"))
            .with_attribute(Attribute::namespace_declaration("s2", "urn:ns-two"))
            .with_child(
                Element::new("child-one")
                    .with_prefix("s1")
                    .with_namespace("urn:ns-one")
                    .with_child(Element::new("grand-child-one").with_text("grand-content"))
                    .with_text("content")
                    .with_child(grand_child_two("")),
            )
            .with_text("intermezzo")
            .with_child(child_two()),
    )
}

/// Mixed content under a default namespace with one prefixed namespace.
pub fn mixed_default() -> Option<Element> {
    Some(
        Element::new("root")
            .with_namespace("urn:ns-one")
            .attr("a1", "one")
            .with_attribute(namespaced_attribute())
            .with_attribute(Attribute::namespace_declaration("", "urn:ns-one"))
            .with_attribute(Attribute::namespace_declaration("s2", "urn:ns-two"))
            .with_child(
                Element::new("child-one")
                    .with_namespace("urn:ns-one")
                    .with_child(
                        Element::new("grand-child-one")
                            .with_namespace("urn:ns-one")
                            .with_text("grand-content"),
                    )
                    .with_text("content")
                    .with_child(grand_child_two("urn:ns-one")),
            )
            .with_text("intermezzo")
            .with_child(child_two()),
    )
}

fn xml_attribute(local_name: &str, value: &str) -> Attribute {
    Attribute::new(local_name, value).with_prefix("xml")
}

/// `xml:lang` and `xml:space` on the root, overridden by the second child.
pub fn inherited_language() -> Option<Element> {
    Some(
        Element::new("root")
            .with_attribute(xml_attribute("lang", "en"))
            .with_attribute(xml_attribute("space", "preserve"))
            .with_child(Element::new("child").with_text("content"))
            .with_child(Element::new("child").with_attribute(xml_attribute("lang", "fr"))),
    )
}

/// Tab, line feed and carriage return that a parser would normalize.
pub fn whitespace_references() -> Option<Element> {
    Some(Element::new("root").attr("a", "x\ty\nz").with_text("a\r\nb"))
}

/// The absent root.
pub fn absent() -> Option<Element> {
    None
}

/// Every fixture, in a stable order.
pub fn all() -> FixtureList {
    vec![
        Fixture {
            name: "child_self_closing",
            build: child_self_closing,
            markup: "<root><child /></root>",
        },
        Fixture {
            name: "attributes",
            build: attributes,
            markup: r#"<root a1="one" a2="two"><child a1="one" a2="two" /></root>"#,
        },
        Fixture {
            name: "child_explicit_empty",
            build: child_explicit_empty,
            markup: "<root><child></child></root>",
        },
        Fixture {
            name: "child_content",
            build: child_content,
            markup: "<root><child>content</child></root>",
        },
        Fixture {
            name: "default_namespace",
            build: default_namespace,
            markup: r#"<root xmlns="urn:ns-one"><child>content</child></root>"#,
        },
        Fixture {
            name: "prefixed_namespace",
            build: prefixed_namespace,
            markup: r#"<s1:root xmlns:s1="urn:ns-one"><s1:child>content</s1:child></s1:root>"#,
        },
        Fixture {
            name: "siblings",
            build: siblings,
            markup: "<root><child-one /><child-two /></root>",
        },
        Fixture {
            name: "siblings_explicit_empty",
            build: siblings_explicit_empty,
            markup: "<root><child-one></child-one><child-two></child-two></root>",
        },
        Fixture {
            name: "lone_root",
            build: lone_root,
            markup: "<root />",
        },
        Fixture {
            name: "root_attributes",
            build: root_attributes,
            markup: r#"<root a1="one" a2="two" />"#,
        },
        Fixture {
            name: "root_default_namespace",
            build: root_default_namespace,
            markup: r#"<root xmlns="urn:ns-one" />"#,
        },
        Fixture {
            name: "root_prefixed_namespace",
            build: root_prefixed_namespace,
            markup: r#"<s1:root xmlns:s1="urn:ns-one" />"#,
        },
        Fixture {
            name: "root_explicit_empty",
            build: root_explicit_empty,
            markup: "<root></root>",
        },
        Fixture {
            name: "root_attributes_explicit_empty",
            build: root_attributes_explicit_empty,
            markup: r#"<root a1="one" a2="two"></root>"#,
        },
        Fixture {
            name: "root_prefixed_explicit_empty",
            build: root_prefixed_explicit_empty,
            markup: r#"<s1:root xmlns:s1="urn:ns-one"></s1:root>"#,
        },
        Fixture {
            name: "root_attributes_content",
            build: root_attributes_content,
            markup: r#"<root a1="one" a2="two">content</root>"#,
        },
        Fixture {
            name: "root_content",
            build: root_content,
            markup: "<root>content</root>",
        },
        Fixture {
            name: "mixed_prefixed",
            build: mixed_prefixed,
            markup: concat!(
                r#"<s1:root a1="one" s2:a2="two" xmlns:s1="urn:ns-one" xmlns:s2="urn:ns-two">"#,
                "<s1:child-one>",
                "<grand-child-one>grand-content</grand-child-one>",
                "content",
                r#"<grand-child-two a1="one" s2:a2="two">grand-content</grand-child-two>"#,
                "</s1:child-one>",
                "intermezzo",
                "<s2:child-two>content</s2:child-two>",
                "</s1:root>"
            ),
        },
        Fixture {
            name: "mixed_default",
            build: mixed_default,
            markup: concat!(
                r#"<root a1="one" s2:a2="two" xmlns="urn:ns-one" xmlns:s2="urn:ns-two">"#,
                "<child-one>",
                "<grand-child-one>grand-content</grand-child-one>",
                "content",
                r#"<grand-child-two a1="one" s2:a2="two">grand-content</grand-child-two>"#,
                "</child-one>",
                "intermezzo",
                "<s2:child-two>content</s2:child-two>",
                "</root>"
            ),
        },
        Fixture {
            name: "inherited_language",
            build: inherited_language,
            markup: concat!(
                r#"<root xml:lang="en" xml:space="preserve">"#,
                "<child>content</child>",
                r#"<child xml:lang="fr" />"#,
                "</root>"
            ),
        },
        Fixture {
            name: "whitespace_references",
            build: whitespace_references,
            markup: "<root a=\"x&#9;y&#10;z\">a&#13;\nb</root>",
        },
        Fixture {
            name: "absent",
            build: absent,
            markup: "",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_names_are_unique() {
        let names: HashSet<_> = all().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_only_absent_fixture_has_no_root() {
        for fixture in all() {
            assert_eq!((fixture.build)().is_none(), fixture.markup.is_empty(), "{}", fixture.name);
        }
    }
}
