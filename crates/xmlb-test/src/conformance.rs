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

//! Lockstep comparison of two pull readers.
//!
//! [`ConformanceVerifier`] is itself a [`PullReader`]. Every call is issued
//! to both wrapped readers and the results are asserted equal; after every
//! navigation call the observable state of both readers is compared as a
//! whole. Any consumer driving the verifier therefore checks conformance as
//! a side effect of its normal traversal.

use std::borrow::Cow;
use std::fmt::Debug;

use tracing::trace;
use xmlb_reader::{NodeType, PullReader, ReadState, ReaderResult, XmlSpace};

/// Wraps an `actual` and an `expected` reader and panics on the first
/// observable difference.
///
/// # Examples
///
/// ```rust
/// use xmlb_core::Element;
/// use xmlb_reader::{PullReader, TreeReader};
/// use xmlb_test::{ConformanceVerifier, TextReader};
///
/// let root = Element::new("root").attr("a", "1").with_text("x");
/// let mut verifier = ConformanceVerifier::new(TreeReader::new(Some(&root)), TextReader::new(r#"<root a="1">x</root>"#));
/// while verifier.read().unwrap() {
///     while verifier.move_to_next_attribute() {
///         verifier.read_attribute_value();
///     }
/// }
/// verifier.close();
/// ```
#[derive(Debug)]
pub struct ConformanceVerifier<A, E> {
    actual: A,
    expected: E,
    calls: usize,
}

impl<A: PullReader, E: PullReader> ConformanceVerifier<A, E> {
    /// Compare `actual` against `expected`.
    pub fn new(actual: A, expected: E) -> Self {
        Self {
            actual,
            expected,
            calls: 0,
        }
    }

    /// Number of navigation calls verified so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Unwrap into `(actual, expected)`.
    pub fn into_inner(self) -> (A, E) {
        (self.actual, self.expected)
    }

    fn check<T: PartialEq + Debug>(&self, property: &str, actual: T, expected: T) {
        assert_eq!(
            actual, expected,
            "{} differs after {} calls (actual {}, expected {})",
            property,
            self.calls,
            self.actual.read_state(),
            self.expected.read_state()
        );
    }

    fn assert_state_conformance(&mut self) {
        self.calls += 1;
        let (a, e) = (&self.actual, &self.expected);
        self.check("eof", a.eof(), e.eof());
        self.check("node_type", a.node_type(), e.node_type());
        self.check("read_state", a.read_state(), e.read_state());

        match a.node_type() {
            NodeType::Attribute => {
                self.check("name", a.name(), e.name());
                self.check("namespace_uri", a.namespace_uri(), e.namespace_uri());
                self.check("has_value", a.has_value(), e.has_value());
                self.check("value", a.value(), e.value());
                self.check("depth", a.depth(), e.depth());
            }
            NodeType::Element => {
                self.check("attribute_count", a.attribute_count(), e.attribute_count());
                self.check("base_uri", a.base_uri(), e.base_uri());
                self.check("depth", a.depth(), e.depth());
                self.check("has_attributes", a.has_attributes(), e.has_attributes());
                self.check("has_value", a.has_value(), e.has_value());
                self.check("is_empty_element", a.is_empty_element(), e.is_empty_element());
                self.check("local_name", a.local_name(), e.local_name());
                self.check("name", a.name(), e.name());
                self.check("namespace_uri", a.namespace_uri(), e.namespace_uri());
                self.check("prefix", a.prefix(), e.prefix());
                self.check("value", a.value(), e.value());
            }
            NodeType::EndElement => {
                self.check("depth", a.depth(), e.depth());
                self.check("name", a.name(), e.name());
            }
            NodeType::Text | NodeType::Whitespace => {
                self.check("has_value", a.has_value(), e.has_value());
                self.check("value", a.value(), e.value());
                self.check("depth", a.depth(), e.depth());
            }
            NodeType::None => {}
        }
        if a.node_type() != NodeType::None {
            self.check("xml_lang", a.xml_lang(), e.xml_lang());
            self.check("xml_space", a.xml_space(), e.xml_space());
        }
        self.check("is_default", a.is_default(), e.is_default());
        self.check("quote_char", a.quote_char(), e.quote_char());
        trace!(calls = self.calls, node_type = %a.node_type(), "state conforms");
    }

    fn assert_closed_state_conformance(&self) {
        let (a, e) = (&self.actual, &self.expected);
        self.check("base_uri", a.base_uri(), e.base_uri());
        self.check("depth", a.depth(), e.depth());
        self.check("eof", a.eof(), e.eof());
        self.check("node_type", a.node_type(), e.node_type());
        self.check("read_state", a.read_state(), e.read_state());
    }
}

impl<A: PullReader, E: PullReader> PullReader for ConformanceVerifier<A, E> {
    fn read(&mut self) -> ReaderResult<bool> {
        let actual = self.actual.read()?;
        let expected = self.expected.read()?;
        self.check("read", actual, expected);
        self.assert_state_conformance();
        Ok(actual)
    }

    fn read_state(&self) -> ReadState {
        self.check("read_state", self.actual.read_state(), self.expected.read_state());
        self.actual.read_state()
    }

    fn node_type(&self) -> NodeType {
        self.check("node_type", self.actual.node_type(), self.expected.node_type());
        self.actual.node_type()
    }

    fn local_name(&self) -> &str {
        self.check("local_name", self.actual.local_name(), self.expected.local_name());
        self.actual.local_name()
    }

    fn prefix(&self) -> &str {
        self.check("prefix", self.actual.prefix(), self.expected.prefix());
        self.actual.prefix()
    }

    fn namespace_uri(&self) -> &str {
        self.check("namespace_uri", self.actual.namespace_uri(), self.expected.namespace_uri());
        self.actual.namespace_uri()
    }

    fn name(&self) -> Cow<'_, str> {
        self.check("name", self.actual.name(), self.expected.name());
        self.actual.name()
    }

    fn value(&self) -> &str {
        self.check("value", self.actual.value(), self.expected.value());
        self.actual.value()
    }

    fn has_value(&self) -> bool {
        self.check("has_value", self.actual.has_value(), self.expected.has_value());
        self.actual.has_value()
    }

    fn depth(&self) -> usize {
        self.check("depth", self.actual.depth(), self.expected.depth());
        self.actual.depth()
    }

    fn is_empty_element(&self) -> bool {
        self.check(
            "is_empty_element",
            self.actual.is_empty_element(),
            self.expected.is_empty_element(),
        );
        self.actual.is_empty_element()
    }

    fn eof(&self) -> bool {
        self.check("eof", self.actual.eof(), self.expected.eof());
        self.actual.eof()
    }

    fn base_uri(&self) -> &str {
        self.check("base_uri", self.actual.base_uri(), self.expected.base_uri());
        self.actual.base_uri()
    }

    fn attribute_count(&self) -> usize {
        self.check("attribute_count", self.actual.attribute_count(), self.expected.attribute_count());
        self.actual.attribute_count()
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.check("get_attribute", self.actual.get_attribute(name), self.expected.get_attribute(name));
        self.actual.get_attribute(name)
    }

    fn get_attribute_ns(&self, local_name: &str, namespace_uri: &str) -> Option<&str> {
        self.check(
            "get_attribute_ns",
            self.actual.get_attribute_ns(local_name, namespace_uri),
            self.expected.get_attribute_ns(local_name, namespace_uri),
        );
        self.actual.get_attribute_ns(local_name, namespace_uri)
    }

    fn get_attribute_at(&self, index: usize) -> ReaderResult<&str> {
        let actual = self.actual.get_attribute_at(index);
        let expected = self.expected.get_attribute_at(index);
        self.check(
            "get_attribute_at",
            actual.as_ref().ok(),
            expected.as_ref().ok(),
        );
        actual
    }

    fn move_to_attribute(&mut self, name: &str) -> bool {
        let actual = self.actual.move_to_attribute(name);
        let expected = self.expected.move_to_attribute(name);
        self.check("move_to_attribute", actual, expected);
        self.assert_state_conformance();
        actual
    }

    fn move_to_attribute_ns(&mut self, local_name: &str, namespace_uri: &str) -> bool {
        let actual = self.actual.move_to_attribute_ns(local_name, namespace_uri);
        let expected = self.expected.move_to_attribute_ns(local_name, namespace_uri);
        self.check("move_to_attribute_ns", actual, expected);
        self.assert_state_conformance();
        actual
    }

    fn move_to_attribute_at(&mut self, index: usize) -> ReaderResult<()> {
        let actual = self.actual.move_to_attribute_at(index);
        let expected = self.expected.move_to_attribute_at(index);
        self.check("move_to_attribute_at", actual.is_ok(), expected.is_ok());
        self.assert_state_conformance();
        actual
    }

    fn move_to_first_attribute(&mut self) -> bool {
        let actual = self.actual.move_to_first_attribute();
        let expected = self.expected.move_to_first_attribute();
        self.check("move_to_first_attribute", actual, expected);
        self.assert_state_conformance();
        actual
    }

    fn move_to_next_attribute(&mut self) -> bool {
        let actual = self.actual.move_to_next_attribute();
        let expected = self.expected.move_to_next_attribute();
        self.check("move_to_next_attribute", actual, expected);
        self.assert_state_conformance();
        actual
    }

    fn move_to_element(&mut self) -> bool {
        let actual = self.actual.move_to_element();
        let expected = self.expected.move_to_element();
        self.check("move_to_element", actual, expected);
        self.assert_state_conformance();
        actual
    }

    fn read_attribute_value(&mut self) -> bool {
        let actual = self.actual.read_attribute_value();
        let expected = self.expected.read_attribute_value();
        self.check("read_attribute_value", actual, expected);
        self.assert_state_conformance();
        actual
    }

    fn xml_lang(&self) -> &str {
        self.check("xml_lang", self.actual.xml_lang(), self.expected.xml_lang());
        self.actual.xml_lang()
    }

    fn xml_space(&self) -> XmlSpace {
        self.check("xml_space", self.actual.xml_space(), self.expected.xml_space());
        self.actual.xml_space()
    }

    fn is_default(&self) -> bool {
        self.check("is_default", self.actual.is_default(), self.expected.is_default());
        self.actual.is_default()
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        self.check(
            "lookup_namespace",
            self.actual.lookup_namespace(prefix),
            self.expected.lookup_namespace(prefix),
        );
        self.actual.lookup_namespace(prefix)
    }

    fn resolve_entity(&mut self) -> ReaderResult<()> {
        let actual = self.actual.resolve_entity();
        let expected = self.expected.resolve_entity();
        self.check("resolve_entity", actual.is_ok(), expected.is_ok());
        self.assert_state_conformance();
        actual
    }

    fn close(&mut self) {
        self.actual.close();
        self.expected.close();
        self.assert_closed_state_conformance();
    }

    fn has_line_info(&self) -> bool {
        self.actual.has_line_info()
    }

    fn quote_char(&self) -> char {
        self.check("quote_char", self.actual.quote_char(), self.expected.quote_char());
        self.actual.quote_char()
    }
}
