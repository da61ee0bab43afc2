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

//! Node-oriented pull reading over XML builder trees.
//!
//! A [`TreeReader`] walks a borrowed [`Element`](xmlb_core::Element) tree and
//! reports the nodes a conforming parser would report for the tree's
//! rendered markup, without rendering or parsing anything.
//!
//! # Features
//!
//! - **Pull contract**: the [`PullReader`] trait with node properties,
//!   attribute navigation and namespace lookup
//! - **Tree reader**: [`TreeReader`] driven by the traversal frame stack
//! - **Empty documents**: [`EmptyReader`] for an absent root
//! - **Identity copy**: [`copy_to_writer`] and [`read_outer_xml`] write the
//!   reported nodes through `quick_xml`
//! - **Surrogates**: [`XmlSurrogate`] values carried as element text
//!
//! # Examples
//!
//! ```rust
//! use xmlb_core::{Attribute, Element};
//! use xmlb_reader::{NodeType, PullReader, TreeReader};
//!
//! let root = Element::qualified("s1:root", "urn:ns-one")
//!     .unwrap()
//!     .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one"))
//!     .with_child(Element::new("child").with_text("content"));
//!
//! let mut reader = TreeReader::new(Some(&root));
//! let mut kinds = Vec::new();
//! while reader.read().unwrap() {
//!     kinds.push(reader.node_type());
//! }
//! assert_eq!(
//!     kinds,
//!     [
//!         NodeType::Element,
//!         NodeType::Element,
//!         NodeType::Text,
//!         NodeType::EndElement,
//!         NodeType::EndElement
//!     ]
//! );
//! ```

mod config;
mod copy;
mod empty;
mod error;
pub mod pull;
mod scope;
pub mod surrogate;
mod tree;

pub use config::ReaderConfig;
pub use copy::{copy_to_writer, read_outer_xml};
pub use empty::EmptyReader;
pub use error::{ReaderError, ReaderResult};
pub use pull::{is_whitespace, NodeType, PullReader, ReadState, XmlSpace};
pub use surrogate::{DurationXml, EncodingXml, TypeNameXml, XmlSurrogate};
pub use tree::TreeReader;

/// Reader over `root`, or an [`EmptyReader`] when there is no root.
///
/// ```rust
/// use xmlb_reader::{open, PullReader};
///
/// let mut reader = open(None);
/// assert!(!reader.read().unwrap());
/// ```
pub fn open(root: Option<&xmlb_core::Element>) -> Box<dyn PullReader + '_> {
    match root {
        Some(root) => Box::new(TreeReader::new(Some(root))),
        None => Box::new(EmptyReader::new()),
    }
}
