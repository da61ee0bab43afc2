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

//! Invocation recording for pull readers.

use std::borrow::Cow;
use std::cell::RefCell;

use xmlb_reader::{NodeType, PullReader, ReadState, ReaderResult, XmlSpace};

/// Forwards every call to the wrapped reader and records its name.
///
/// Two readers that report the same nodes must be driven through the same
/// call sequence by any consumer; comparing the recorded invocations of two
/// spies checks that.
///
/// ```rust
/// use xmlb_reader::{EmptyReader, PullReader};
/// use xmlb_test::ReaderSpy;
///
/// let mut spy = ReaderSpy::new(EmptyReader::new());
/// spy.read().unwrap();
/// spy.eof();
/// assert_eq!(spy.invocations(), ["read", "eof"]);
/// ```
#[derive(Debug)]
pub struct ReaderSpy<R> {
    inner: R,
    invocations: RefCell<Vec<&'static str>>,
}

impl<R: PullReader> ReaderSpy<R> {
    /// Spy on `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// Names of the calls made so far, in order.
    pub fn invocations(&self) -> Vec<&'static str> {
        self.invocations.borrow().clone()
    }

    /// Unwrap the spied reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn record(&self, call: &'static str) {
        self.invocations.borrow_mut().push(call);
    }
}

impl<R: PullReader> PullReader for ReaderSpy<R> {
    fn read(&mut self) -> ReaderResult<bool> {
        self.record("read");
        self.inner.read()
    }

    fn read_state(&self) -> ReadState {
        self.record("read_state");
        self.inner.read_state()
    }

    fn node_type(&self) -> NodeType {
        self.record("node_type");
        self.inner.node_type()
    }

    fn local_name(&self) -> &str {
        self.record("local_name");
        self.inner.local_name()
    }

    fn prefix(&self) -> &str {
        self.record("prefix");
        self.inner.prefix()
    }

    fn namespace_uri(&self) -> &str {
        self.record("namespace_uri");
        self.inner.namespace_uri()
    }

    fn name(&self) -> Cow<'_, str> {
        self.record("name");
        self.inner.name()
    }

    fn value(&self) -> &str {
        self.record("value");
        self.inner.value()
    }

    fn has_value(&self) -> bool {
        self.record("has_value");
        self.inner.has_value()
    }

    fn depth(&self) -> usize {
        self.record("depth");
        self.inner.depth()
    }

    fn is_empty_element(&self) -> bool {
        self.record("is_empty_element");
        self.inner.is_empty_element()
    }

    fn eof(&self) -> bool {
        self.record("eof");
        self.inner.eof()
    }

    fn base_uri(&self) -> &str {
        self.record("base_uri");
        self.inner.base_uri()
    }

    fn quote_char(&self) -> char {
        self.record("quote_char");
        self.inner.quote_char()
    }

    fn attribute_count(&self) -> usize {
        self.record("attribute_count");
        self.inner.attribute_count()
    }

    fn has_attributes(&self) -> bool {
        self.record("has_attributes");
        self.inner.has_attributes()
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.record("get_attribute");
        self.inner.get_attribute(name)
    }

    fn get_attribute_ns(&self, local_name: &str, namespace_uri: &str) -> Option<&str> {
        self.record("get_attribute_ns");
        self.inner.get_attribute_ns(local_name, namespace_uri)
    }

    fn get_attribute_at(&self, index: usize) -> ReaderResult<&str> {
        self.record("get_attribute_at");
        self.inner.get_attribute_at(index)
    }

    fn move_to_attribute(&mut self, name: &str) -> bool {
        self.record("move_to_attribute");
        self.inner.move_to_attribute(name)
    }

    fn move_to_attribute_ns(&mut self, local_name: &str, namespace_uri: &str) -> bool {
        self.record("move_to_attribute_ns");
        self.inner.move_to_attribute_ns(local_name, namespace_uri)
    }

    fn move_to_attribute_at(&mut self, index: usize) -> ReaderResult<()> {
        self.record("move_to_attribute_at");
        self.inner.move_to_attribute_at(index)
    }

    fn move_to_first_attribute(&mut self) -> bool {
        self.record("move_to_first_attribute");
        self.inner.move_to_first_attribute()
    }

    fn move_to_next_attribute(&mut self) -> bool {
        self.record("move_to_next_attribute");
        self.inner.move_to_next_attribute()
    }

    fn move_to_element(&mut self) -> bool {
        self.record("move_to_element");
        self.inner.move_to_element()
    }

    fn read_attribute_value(&mut self) -> bool {
        self.record("read_attribute_value");
        self.inner.read_attribute_value()
    }

    fn xml_lang(&self) -> &str {
        self.record("xml_lang");
        self.inner.xml_lang()
    }

    fn xml_space(&self) -> XmlSpace {
        self.record("xml_space");
        self.inner.xml_space()
    }

    fn is_default(&self) -> bool {
        self.record("is_default");
        self.inner.is_default()
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        self.record("lookup_namespace");
        self.inner.lookup_namespace(prefix)
    }

    fn resolve_entity(&mut self) -> ReaderResult<()> {
        self.record("resolve_entity");
        self.inner.resolve_entity()
    }

    fn close(&mut self) {
        self.record("close");
        self.inner.close()
    }
}
