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

//! A pull reader over markup text, backed by `quick_xml`.
//!
//! [`TextReader`] is the reference side of every conformance check: it
//! tokenizes rendered markup and reports nodes with the same contract as
//! the tree reader, resolving namespaces from the declarations it parses.
//! Declarations, comments, processing instructions and whitespace outside
//! the root element are not reported.

use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};
use xmlb_core::namespace::{declared_prefix, reserved_namespace, XMLNS_NAMESPACE, XML_NAMESPACE, XML_PREFIX};
use xmlb_reader::{
    is_whitespace, EmptyReader, NodeType, PullReader, ReadState, ReaderConfig, ReaderError, ReaderResult, XmlSpace,
};

/// `\r\n` and lone `\r` become `\n`, as a parser sees them.
fn normalize_line_breaks(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\r') {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Attribute value normalization: literal tabs and line breaks become spaces.
/// Character references are expanded afterwards and keep what they encode.
fn normalize_attribute_value(raw: &str) -> Cow<'_, str> {
    let lines = normalize_line_breaks(raw);
    if !lines.contains(['\t', '\n']) {
        return lines;
    }
    Cow::Owned(lines.replace(['\t', '\n'], " "))
}

/// Bindings mark and inherited `xml:` attributes of one open element.
#[derive(Debug, Clone)]
struct ScopeMark {
    bindings: usize,
    lang: String,
    space: XmlSpace,
}

#[derive(Debug, Clone, Default)]
struct ParsedAttribute {
    prefix: String,
    local_name: String,
    namespace_uri: String,
    value: String,
}

impl ParsedAttribute {
    fn qualified_name(&self) -> Cow<'_, str> {
        xmlb_core::qname::qualify(&self.prefix, &self.local_name)
    }
}

#[derive(Debug, Clone)]
struct ParsedNode {
    kind: NodeType,
    prefix: String,
    local_name: String,
    namespace_uri: String,
    value: String,
    depth: usize,
    is_empty: bool,
    attributes: Vec<ParsedAttribute>,
}

impl ParsedNode {
    fn none() -> Self {
        Self {
            kind: NodeType::None,
            prefix: String::new(),
            local_name: String::new(),
            namespace_uri: String::new(),
            value: String::new(),
            depth: 0,
            is_empty: false,
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Node,
    Attribute(usize),
    AttributeValue(usize),
}

/// Pull reader over markup text.
///
/// # Examples
///
/// ```rust
/// use xmlb_reader::{NodeType, PullReader};
/// use xmlb_test::TextReader;
///
/// let mut reader = TextReader::new(r#"<s1:root xmlns:s1="urn:one">a &amp; b</s1:root>"#);
/// assert!(reader.read().unwrap());
/// assert_eq!(reader.namespace_uri(), "urn:one");
/// assert!(reader.read().unwrap());
/// assert_eq!((reader.node_type(), reader.value()), (NodeType::Text, "a & b"));
/// ```
pub struct TextReader<'a> {
    parser: Reader<&'a [u8]>,
    pending: Option<Event<'a>>,
    config: ReaderConfig,
    state: ReadState,
    open_elements: usize,
    current: ParsedNode,
    cursor: Cursor,
    bindings: Vec<(String, String)>,
    marks: Vec<ScopeMark>,
    pop_scope: bool,
}

impl<'a> TextReader<'a> {
    /// Create a reader over `markup` with the default configuration.
    pub fn new(markup: &'a str) -> Self {
        Self::with_config(markup, ReaderConfig::default())
    }

    /// Create a reader over `markup` with a custom configuration.
    pub fn with_config(markup: &'a str, config: ReaderConfig) -> Self {
        let mut parser = Reader::from_str(markup);
        parser.trim_text(false);
        parser.check_end_names(true);
        Self {
            parser,
            pending: None,
            config,
            state: ReadState::Initial,
            open_elements: 0,
            current: ParsedNode::none(),
            cursor: Cursor::Node,
            bindings: Vec::new(),
            marks: Vec::new(),
            pop_scope: false,
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, quick_xml::Error> {
        match self.pending.take() {
            Some(event) => Ok(event),
            None => self.parser.read_event(),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, quick_xml::Error> {
        Ok(self.parser.decoder().decode(bytes)?.into_owned())
    }

    fn lookup_binding(&self, prefix: &str) -> Option<&str> {
        if let Some(namespace) = reserved_namespace(prefix) {
            return Some(namespace);
        }
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.as_str())
            .or(if prefix.is_empty() { Some("") } else { None })
    }

    fn unbound(prefix: &str) -> quick_xml::Error {
        quick_xml::Error::UnknownPrefix(prefix.as_bytes().to_vec())
    }

    /// Open a scope for `start` and describe it as an element node.
    fn start_element(&mut self, start: &BytesStart<'_>, is_empty: bool) -> Result<ParsedNode, quick_xml::Error> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            attributes.push(ParsedAttribute {
                prefix: match attribute.key.prefix() {
                    Some(prefix) => self.decode(prefix.as_ref())?,
                    None => String::new(),
                },
                local_name: self.decode(attribute.key.local_name().as_ref())?,
                namespace_uri: String::new(),
                value: unescape(&normalize_attribute_value(&self.decode(&attribute.value)?))?.into_owned(),
            });
        }

        let xml_value = |local_name: &str| {
            attributes
                .iter()
                .find(|attribute| attribute.prefix == XML_PREFIX && attribute.local_name == local_name)
                .map(|attribute| attribute.value.as_str())
        };
        let (lang, space) = self
            .marks
            .last()
            .map_or(("", XmlSpace::None), |mark| (mark.lang.as_str(), mark.space));
        let mark = ScopeMark {
            bindings: self.bindings.len(),
            lang: xml_value("lang").unwrap_or(lang).to_string(),
            space: xml_value("space").and_then(XmlSpace::parse).unwrap_or(space),
        };
        self.marks.push(mark);
        for attribute in &attributes {
            if let Some(prefix) = declared_prefix(&attribute.prefix, &attribute.local_name) {
                self.bindings.push((prefix.to_string(), attribute.value.clone()));
            }
        }

        for attribute in &mut attributes {
            attribute.namespace_uri = if declared_prefix(&attribute.prefix, &attribute.local_name).is_some() {
                XMLNS_NAMESPACE.to_string()
            } else if attribute.prefix == XML_PREFIX {
                XML_NAMESPACE.to_string()
            } else if attribute.prefix.is_empty() {
                String::new()
            } else {
                let found = self.lookup_binding(&attribute.prefix).map(str::to_string);
                found.ok_or_else(|| Self::unbound(&attribute.prefix))?
            };
        }

        let prefix = match start.name().prefix() {
            Some(prefix) => self.decode(prefix.as_ref())?,
            None => String::new(),
        };
        let namespace_uri = self
            .lookup_binding(&prefix)
            .map(str::to_string)
            .ok_or_else(|| Self::unbound(&prefix))?;

        Ok(ParsedNode {
            kind: NodeType::Element,
            local_name: self.decode(start.local_name().as_ref())?,
            prefix,
            namespace_uri,
            value: String::new(),
            depth: self.open_elements,
            is_empty,
            attributes,
        })
    }

    fn pop_binding_scope(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.bindings.truncate(mark.bindings);
        }
    }

    /// Next node, or `None` at end of input.
    fn parse_next(&mut self) -> Result<Option<ParsedNode>, quick_xml::Error> {
        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    let node = self.start_element(&start, false)?;
                    self.open_elements += 1;
                    return Ok(Some(node));
                }
                Event::Empty(start) => {
                    let node = self.start_element(&start, true)?;
                    self.pop_scope = true;
                    return Ok(Some(node));
                }
                Event::End(end) => {
                    self.open_elements = self.open_elements.saturating_sub(1);
                    self.pop_scope = true;
                    let name = end.name();
                    let prefix = match name.prefix() {
                        Some(prefix) => self.decode(prefix.as_ref())?,
                        None => String::new(),
                    };
                    let mut node = ParsedNode::none();
                    node.kind = NodeType::EndElement;
                    node.namespace_uri = self.lookup_binding(&prefix).unwrap_or_default().to_string();
                    node.local_name = self.decode(name.local_name().as_ref())?;
                    node.prefix = prefix;
                    node.depth = self.open_elements;
                    return Ok(Some(node));
                }
                first @ (Event::Text(_) | Event::CData(_)) => {
                    let mut value = String::new();
                    let mut event = first;
                    loop {
                        match event {
                            Event::Text(text) => {
                                let raw = self.decode(&text)?;
                                value.push_str(&unescape(&normalize_line_breaks(&raw))?);
                            }
                            Event::CData(data) => value.push_str(&normalize_line_breaks(&self.decode(&data)?)),
                            other => {
                                self.pending = Some(other);
                                break;
                            }
                        }
                        event = self.next_event()?;
                    }
                    if value.is_empty() || self.open_elements == 0 {
                        continue;
                    }
                    let whitespace = is_whitespace(&value);
                    if whitespace && self.config.ignore_whitespace {
                        continue;
                    }
                    let mut node = ParsedNode::none();
                    node.kind = if whitespace { NodeType::Whitespace } else { NodeType::Text };
                    node.value = value;
                    node.depth = self.open_elements;
                    return Ok(Some(node));
                }
                Event::Eof => return Ok(None),
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }
    }

    fn attributes(&self) -> &[ParsedAttribute] {
        if self.current.kind == NodeType::Element {
            &self.current.attributes
        } else {
            &[]
        }
    }

    fn attribute(&self) -> Option<&ParsedAttribute> {
        match self.cursor {
            Cursor::Attribute(index) | Cursor::AttributeValue(index) => self.attributes().get(index),
            Cursor::Node => None,
        }
    }
}

impl PullReader for TextReader<'_> {
    fn read(&mut self) -> ReaderResult<bool> {
        if !matches!(self.state, ReadState::Initial | ReadState::Interactive) {
            return Ok(false);
        }
        self.state = ReadState::Interactive;
        self.cursor = Cursor::Node;
        if std::mem::take(&mut self.pop_scope) {
            self.pop_binding_scope();
        }

        match self.parse_next() {
            Ok(Some(node)) => {
                self.current = node;
                Ok(true)
            }
            Ok(None) => {
                self.state = ReadState::EndOfFile;
                self.current = ParsedNode::none();
                self.open_elements = 0;
                self.bindings.clear();
                self.marks.clear();
                debug!("text reader reached end of input");
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "text reader failed to parse markup");
                self.state = ReadState::Error;
                self.current = ParsedNode::none();
                Err(ReaderError::Xml(err))
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
            Cursor::Node => self.current.kind,
        }
    }

    fn local_name(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) => self.attribute().map_or("", |a| a.local_name.as_str()),
            Cursor::AttributeValue(_) => "",
            Cursor::Node => &self.current.local_name,
        }
    }

    fn prefix(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) => self.attribute().map_or("", |a| a.prefix.as_str()),
            Cursor::AttributeValue(_) => "",
            Cursor::Node => &self.current.prefix,
        }
    }

    fn namespace_uri(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) => self.attribute().map_or("", |a| a.namespace_uri.as_str()),
            Cursor::AttributeValue(_) => "",
            Cursor::Node => &self.current.namespace_uri,
        }
    }

    fn value(&self) -> &str {
        match self.cursor {
            Cursor::Attribute(_) | Cursor::AttributeValue(_) => self.attribute().map_or("", |a| a.value.as_str()),
            Cursor::Node => &self.current.value,
        }
    }

    fn depth(&self) -> usize {
        match self.cursor {
            Cursor::Attribute(_) => self.current.depth + 1,
            Cursor::AttributeValue(_) => self.current.depth + 2,
            Cursor::Node => self.current.depth,
        }
    }

    fn is_empty_element(&self) -> bool {
        self.cursor == Cursor::Node && self.current.kind == NodeType::Element && self.current.is_empty
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
            .find(|a| a.local_name == local_name && a.namespace_uri == namespace_uri)
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
            .position(|a| a.local_name == local_name && a.namespace_uri == namespace_uri);
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
        let next = match self.cursor {
            Cursor::Node => 0,
            Cursor::Attribute(index) | Cursor::AttributeValue(index) => index + 1,
        };
        if next < self.attribute_count() {
            self.cursor = Cursor::Attribute(next);
            true
        } else {
            false
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
        self.marks.last().map_or("", |mark| mark.lang.as_str())
    }

    fn xml_space(&self) -> XmlSpace {
        self.marks.last().map_or(XmlSpace::None, |mark| mark.space)
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        if self.state != ReadState::Interactive {
            return None;
        }
        self.lookup_binding(prefix)
    }

    fn close(&mut self) {
        self.state = ReadState::Closed;
        self.current = ParsedNode::none();
        self.cursor = Cursor::Node;
        self.pending = None;
        self.open_elements = 0;
        self.pop_scope = false;
        self.bindings.clear();
        self.marks.clear();
    }
}

impl std::fmt::Debug for TextReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextReader")
            .field("state", &self.state)
            .field("node_type", &self.node_type())
            .field("depth", &self.depth())
            .finish()
    }
}

/// The reader a parser would give for `markup`: an [`EmptyReader`] for
/// empty markup, a [`TextReader`] otherwise.
pub fn reference_reader(markup: &str) -> Box<dyn PullReader + '_> {
    reference_reader_with_config(markup, ReaderConfig::default())
}

/// [`reference_reader`] with a custom configuration.
pub fn reference_reader_with_config(markup: &str, config: ReaderConfig) -> Box<dyn PullReader + '_> {
    if markup.is_empty() {
        Box::new(EmptyReader::with_base_uri(config.base_uri))
    } else {
        Box::new(TextReader::with_config(markup, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(markup: &str) -> Vec<(NodeType, String, usize)> {
        let mut reader = TextReader::new(markup);
        let mut out = Vec::new();
        while reader.read().unwrap() {
            out.push((reader.node_type(), reader.name().into_owned(), reader.depth()));
        }
        out
    }

    #[test]
    fn test_empty_and_self_closing_elements() {
        assert_eq!(
            kinds("<root><a /><b></b></root>"),
            vec![
                (NodeType::Element, "root".to_string(), 0),
                (NodeType::Element, "a".to_string(), 1),
                (NodeType::Element, "b".to_string(), 1),
                (NodeType::EndElement, "b".to_string(), 1),
                (NodeType::EndElement, "root".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_text_and_cdata_coalesce() {
        let mut reader = TextReader::new("<r>a &lt; <![CDATA[<b>]]> c</r>");
        reader.read().unwrap();
        reader.read().unwrap();
        assert_eq!(reader.node_type(), NodeType::Text);
        assert_eq!(reader.value(), "a < <b> c");
    }

    #[test]
    fn test_literal_whitespace_is_normalized() {
        let mut reader = TextReader::new("<r a=\"x\ty\r\nz\" b=\"x&#9;y&#10;z&#13;\">a\r\nb\rc&#13;</r>");
        reader.read().unwrap();
        assert_eq!(reader.get_attribute("a"), Some("x y z"));
        assert_eq!(reader.get_attribute("b"), Some("x\ty\nz\r"));
        reader.read().unwrap();
        assert_eq!(reader.value(), "a\nb\nc\r");
    }

    #[test]
    fn test_xml_lang_and_space_follow_open_elements() {
        let mut reader =
            TextReader::new(r#"<r xml:lang="en" xml:space="preserve"><a xml:lang="fr" xml:space="bogus">t</a><b/></r>"#);
        assert_eq!(reader.xml_lang(), "");
        let mut seen = Vec::new();
        while reader.read().unwrap() {
            seen.push((reader.name().into_owned(), reader.xml_lang().to_string(), reader.xml_space()));
        }
        let expected = [("r", "en"), ("a", "fr"), ("", "fr"), ("a", "fr"), ("b", "en"), ("r", "en")];
        for ((name, lang, space), (expected_name, expected_lang)) in seen.iter().zip(expected) {
            assert_eq!((name.as_str(), lang.as_str()), (expected_name, expected_lang));
            assert_eq!(*space, XmlSpace::Preserve);
        }
        assert_eq!(seen.len(), expected.len());
        assert_eq!((reader.xml_lang(), reader.xml_space()), ("", XmlSpace::None));
    }

    #[test]
    fn test_prolog_is_skipped() {
        let markup = "<?xml version=\"1.0\"?>\n<!-- note -->\n<r/>\n";
        assert_eq!(kinds(markup), vec![(NodeType::Element, "r".to_string(), 0)]);
    }

    #[test]
    fn test_namespaces_resolve_from_declarations() {
        let mut reader = TextReader::new(r#"<s1:r xmlns:s1="urn:one" s1:a="1" xmlns="urn:d"><c/></s1:r>"#);
        reader.read().unwrap();
        assert_eq!(reader.namespace_uri(), "urn:one");
        assert_eq!(reader.get_attribute_ns("a", "urn:one"), Some("1"));
        assert_eq!(reader.get_attribute_ns("s1", XMLNS_NAMESPACE), Some("urn:one"));
        reader.read().unwrap();
        assert_eq!(reader.namespace_uri(), "urn:d");
    }

    #[test]
    fn test_malformed_markup_enters_error_state() {
        let mut reader = TextReader::new("<r><c></r>");
        reader.read().unwrap();
        reader.read().unwrap();
        assert!(reader.read().is_err());
        assert_eq!(reader.read_state(), ReadState::Error);
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn test_unbound_prefix_is_an_error() {
        let mut reader = TextReader::new("<p:r/>");
        assert!(reader.read().is_err());
        assert_eq!(reader.read_state(), ReadState::Error);
    }

    #[test]
    fn test_reference_reader_for_empty_markup() {
        let mut reader = reference_reader("");
        assert!(!reader.read().unwrap());
        assert_eq!(reader.read_state(), ReadState::EndOfFile);
    }
}
