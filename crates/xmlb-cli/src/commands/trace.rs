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

//! Trace command - print the nodes a pull reader walks.

use std::io::Write;

use tracing::debug;
use xmlb_reader::{NodeType, PullReader, ReaderConfig, TreeReader};

use super::{load_tree, open_output};
use crate::error::CliError;

/// Trace a tree description file to standard output.
pub fn trace(file: &str, ignore_whitespace: bool) -> Result<(), CliError> {
    let root = load_tree(file)?;
    let config = ReaderConfig::default()
        .with_base_uri(file)
        .with_ignore_whitespace(ignore_whitespace);
    let mut reader = TreeReader::with_config(root.as_ref(), config);

    let mut out = open_output(None)?;
    let nodes = trace_to(&mut reader, &mut out)?;
    out.flush().map_err(|e| CliError::io_error("-", e))?;

    debug!(file, nodes, "traced tree");
    Ok(())
}

/// Read `reader` to the end, writing one line per node and per attribute.
///
/// Each line holds the depth, the node type, the qualified name when there
/// is one and the quoted value when the node carries one. Lines are
/// indented by depth. Returns the number of nodes read.
///
/// # Examples
///
/// ```rust
/// use xmlb_cli::commands::trace_to;
/// use xmlb_core::Element;
/// use xmlb_reader::TreeReader;
///
/// let root = Element::new("root").attr("a1", "one");
/// let mut out = Vec::new();
/// trace_to(&mut TreeReader::new(Some(&root)), &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "0 Element root\n  1 Attribute a1 \"one\"\n",
/// );
/// ```
pub fn trace_to<R, W>(reader: &mut R, out: &mut W) -> Result<usize, CliError>
where
    R: PullReader + ?Sized,
    W: Write + ?Sized,
{
    let mut nodes = 0;
    while reader.read()? {
        nodes += 1;
        write_line(reader, out)?;
        if reader.node_type() == NodeType::Element {
            while reader.move_to_next_attribute() {
                write_line(reader, out)?;
            }
            reader.move_to_element();
        }
    }
    Ok(nodes)
}

fn write_line<R, W>(reader: &R, out: &mut W) -> Result<(), CliError>
where
    R: PullReader + ?Sized,
    W: Write + ?Sized,
{
    let mut line = format!("{:indent$}{} {}", "", reader.depth(), reader.node_type(), indent = reader.depth() * 2);
    let name = reader.name();
    if !name.is_empty() {
        line.push(' ');
        line.push_str(&name);
    }
    if reader.has_value() {
        line.push_str(&format!(" {:?}", reader.value()));
    }
    writeln!(out, "{}", line).map_err(|e| CliError::io_error("-", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlb_core::{Attribute, Element, Text};
    use xmlb_reader::EmptyReader;

    fn traced(root: &Element, config: ReaderConfig) -> String {
        let mut out = Vec::new();
        trace_to(&mut TreeReader::with_config(Some(root), config), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_trace_lines() {
        let root = Element::new("root")
            .with_attribute(Attribute::namespace_declaration("s1", "urn:one"))
            .with_child(Element::new("child").with_prefix("s1").with_namespace("urn:one"))
            .with_child(Text::new("content"));

        let expected = "\
0 Element root
  1 Attribute xmlns:s1 \"urn:one\"
  1 Element s1:child
  1 Text \"content\"
0 EndElement root
";
        assert_eq!(traced(&root, ReaderConfig::default()), expected);
    }

    #[test]
    fn test_trace_ignore_whitespace() {
        let root = Element::new("r").with_text("  ").with_child(Element::new("c"));

        let kept = traced(&root, ReaderConfig::default());
        assert!(kept.contains("Whitespace \"  \""));

        let skipped = traced(&root, ReaderConfig::default().with_ignore_whitespace(true));
        assert!(!skipped.contains("Whitespace"));
        assert_eq!(skipped.lines().count(), 3);
    }

    #[test]
    fn test_trace_counts_nodes_not_attributes() {
        let root = Element::new("r").attr("a", "1").attr("b", "2");
        let mut out = Vec::new();
        let nodes = trace_to(&mut TreeReader::new(Some(&root)), &mut out).unwrap();
        assert_eq!(nodes, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_trace_empty_reader() {
        let mut out = Vec::new();
        assert_eq!(trace_to(&mut EmptyReader::new(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
