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

//! CLI command implementations.
//!
//! Every command loads a tree description from a JSON file and drives one
//! of the library surfaces over it:
//!
//! - [`render`]: stream the tree as bytes through a render stream
//! - [`trace`]: walk the tree with a pull reader and print one line per node
//!
//! # Tree description
//!
//! The JSON document is either `null` (no root) or an element object:
//!
//! ```json
//! {
//!   "local_name": "root",
//!   "attributes": [{ "local_name": "a1", "value": "one" }],
//!   "children": [
//!     { "kind": "element", "local_name": "child", "prefix": "s1", "namespace_uri": "urn:one" },
//!     { "kind": "text", "value": "content" }
//!   ]
//! }
//! ```

mod render;
mod trace;

pub use render::{render, render_to};
pub use trace::{trace, trace_to};

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use xmlb_core::qname::is_ncname;
use xmlb_core::{Element, Node};

use crate::error::CliError;

/// Default maximum input size (64 MB).
///
/// Can be overridden via the `XMLB_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

fn max_file_size() -> u64 {
    std::env::var("XMLB_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a tree description file, rejecting files over the size limit.
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max = max_file_size();
    if metadata.len() > max {
        return Err(CliError::FileTooLarge {
            path: path.into(),
            actual: metadata.len(),
            max,
        });
    }
    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Parse a tree description. `null` yields no root.
///
/// # Examples
///
/// ```rust
/// use xmlb_cli::commands::parse_tree;
///
/// let root = parse_tree(r#"{ "local_name": "root" }"#).unwrap().unwrap();
/// assert_eq!(root.local_name, "root");
/// assert!(parse_tree("null").unwrap().is_none());
/// ```
pub fn parse_tree(json: &str) -> Result<Option<Element>, CliError> {
    let root: Option<Element> = serde_json::from_str(json)?;
    if let Some(element) = &root {
        validate_element(element)?;
    }
    Ok(root)
}

/// Load and parse a tree description file.
pub fn load_tree(path: &str) -> Result<Option<Element>, CliError> {
    let json = read_file(path)?;
    parse_tree(&json)
}

// Names deserialized from JSON bypass the element constructors.
fn validate_element(element: &Element) -> Result<(), CliError> {
    check_name("element", &element.local_name, &element.prefix)?;
    for attribute in &element.attributes {
        if attribute.is_namespace_declaration() {
            continue;
        }
        check_name("attribute", &attribute.local_name, &attribute.prefix)?;
    }
    element.children.iter().try_for_each(|child| match child {
        Node::Element(child) => validate_element(child),
        Node::Text(_) => Ok(()),
    })
}

fn check_name(kind: &str, local_name: &str, prefix: &str) -> Result<(), CliError> {
    if !is_ncname(local_name) {
        return Err(CliError::InvalidTree(format!("{} has invalid local name '{}'", kind, local_name)));
    }
    if !prefix.is_empty() && !is_ncname(prefix) {
        return Err(CliError::InvalidTree(format!("{} '{}' has invalid prefix '{}'", kind, local_name, prefix)));
    }
    Ok(())
}

/// Open the output file, or standard output when no path is given.
pub(crate) fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, CliError> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|e| CliError::io_error(path, e))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
