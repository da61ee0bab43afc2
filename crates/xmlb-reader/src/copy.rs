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

//! Copying the nodes of a reader to a markup writer.
//!
//! [`copy_to_writer`] drives any [`PullReader`] to its end and writes every
//! node it reports through a [`quick_xml::Writer`]. Two readers that report
//! the same nodes produce the same output, which makes the copy a cheap
//! equivalence check between a tree reader and a parser over the tree's
//! rendered text.

use std::io::Write;

use std::borrow::Cow;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use tracing::trace;
use xmlb_core::escape::{escape_attribute_value, escape_text};

use crate::error::ReaderResult;
use crate::pull::{NodeType, PullReader, ReadState};

/// Write the node the reader is positioned on.
///
/// An element start collects its attributes through attribute navigation
/// and leaves the reader back on the element.
fn write_current<R, W>(reader: &mut R, writer: &mut Writer<W>) -> ReaderResult<()>
where
    R: PullReader + ?Sized,
    W: Write,
{
    match reader.node_type() {
        NodeType::Element => {
            let mut start = BytesStart::new(reader.name().into_owned());
            if reader.move_to_first_attribute() {
                loop {
                    {
                        let name = reader.name();
                        let value = escape_attribute_value(reader.value());
                        start.push_attribute(Attribute {
                            key: QName(name.as_bytes()),
                            value: Cow::Borrowed(value.as_bytes()),
                        });
                    }
                    if !reader.move_to_next_attribute() {
                        break;
                    }
                }
                reader.move_to_element();
            }
            if reader.is_empty_element() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
            }
        }
        NodeType::EndElement => {
            writer.write_event(Event::End(BytesEnd::new(reader.name().into_owned())))?;
        }
        NodeType::Text | NodeType::Whitespace => {
            writer.write_event(Event::Text(BytesText::from_escaped(escape_text(reader.value()))))?;
        }
        NodeType::Attribute | NodeType::None => {}
    }
    Ok(())
}

/// Copy every remaining node of `reader` to `writer`.
///
/// A reader in its initial state is read first. When positioned on an
/// attribute the copy starts from the owning element. Returns the number of
/// nodes written.
///
/// # Examples
///
/// ```rust
/// use quick_xml::Writer;
/// use xmlb_core::Element;
/// use xmlb_reader::{copy_to_writer, TreeReader};
///
/// let root = Element::new("root").attr("a", "1").with_child(Element::new("child").with_text("x"));
/// let mut writer = Writer::new(Vec::new());
/// let nodes = copy_to_writer(&mut TreeReader::new(Some(&root)), &mut writer).unwrap();
///
/// assert_eq!(nodes, 5);
/// assert_eq!(writer.into_inner(), br#"<root a="1"><child>x</child></root>"#);
/// ```
pub fn copy_to_writer<R, W>(reader: &mut R, writer: &mut Writer<W>) -> ReaderResult<usize>
where
    R: PullReader + ?Sized,
    W: Write,
{
    if reader.read_state() == ReadState::Initial {
        reader.read()?;
    }
    reader.move_to_element();

    let mut nodes = 0;
    while reader.read_state() == ReadState::Interactive {
        write_current(reader, writer)?;
        nodes += 1;
        reader.read()?;
    }
    trace!(nodes, "copied reader nodes");
    Ok(nodes)
}

/// Markup of the current node and, for an element, its whole subtree.
///
/// For an element or text node the reader is advanced past what was
/// returned. On an attribute this returns `name="value"` without moving.
/// On any other node it returns an empty string and advances by one read.
///
/// ```rust
/// use xmlb_core::Element;
/// use xmlb_reader::{read_outer_xml, PullReader, TreeReader};
///
/// let root = Element::new("root")
///     .with_child(Element::new("a").with_text("1"))
///     .with_child(Element::new("b"));
/// let mut reader = TreeReader::new(Some(&root));
/// reader.read().unwrap();
/// reader.read().unwrap();
///
/// assert_eq!(read_outer_xml(&mut reader).unwrap(), "<a>1</a>");
/// assert_eq!(reader.local_name(), "b");
/// ```
pub fn read_outer_xml<R>(reader: &mut R) -> ReaderResult<String>
where
    R: PullReader + ?Sized,
{
    match reader.node_type() {
        NodeType::Attribute => Ok(format!("{}=\"{}\"", reader.name(), escape_attribute_value(reader.value()))),
        NodeType::Element => {
            let mut writer = Writer::new(Vec::new());
            let depth = reader.depth();
            let empty = reader.is_empty_element();
            write_current(reader, &mut writer)?;
            if !empty {
                while reader.read()? {
                    write_current(reader, &mut writer)?;
                    if reader.node_type() == NodeType::EndElement && reader.depth() == depth {
                        break;
                    }
                }
            }
            reader.read()?;
            Ok(String::from_utf8(writer.into_inner())?)
        }
        NodeType::Text | NodeType::Whitespace => {
            let mut writer = Writer::new(Vec::new());
            write_current(reader, &mut writer)?;
            reader.read()?;
            Ok(String::from_utf8(writer.into_inner())?)
        }
        NodeType::EndElement | NodeType::None => {
            reader.read()?;
            Ok(String::new())
        }
    }
}
