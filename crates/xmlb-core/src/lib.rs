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

//! Node model and traversal for lazily rendered XML builder trees.
//!
//! This crate holds everything the rendering surfaces share:
//!
//! - **Node model**: [`Element`], [`Attribute`] and [`Text`] built by the
//!   caller and borrowed, never copied, by rendering sessions
//! - **Traversal**: the [`traverse::FrameStack`] producing one
//!   [`traverse::Step`] per call in document order
//! - **Names**: qualified name parsing in [`qname`] and reserved namespaces
//!   in [`namespace`]
//! - **Encodings**: [`TextEncoding`] with optional byte order mark
//! - **Escaping**: markup for text and attribute values that a parser
//!   reads back unchanged, in [`escape`]
//! - **Arguments**: [`ArgumentList`] of transform parameters
//!
//! # Examples
//!
//! ```rust
//! use xmlb_core::traverse::FrameStack;
//! use xmlb_core::{Attribute, Element};
//!
//! let root = Element::qualified("s1:root", "urn:ns-one")
//!     .unwrap()
//!     .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one"))
//!     .with_text("content");
//!
//! let steps = FrameStack::new(Some(&root)).count();
//! assert_eq!(steps, 5);
//! ```

pub mod args;
pub mod encoding;
mod error;
pub mod escape;
pub mod namespace;
mod node;
pub mod qname;
pub mod traverse;

pub use args::{Argument, ArgumentKey, ArgumentList, ArgumentValue};
pub use encoding::TextEncoding;
pub use error::{CoreError, CoreResult};
pub use node::{Attribute, Dispose, Disposer, Element, Node, NodeKind, NodeRef, Text};
pub use qname::QName;
pub use traverse::{FrameStack, Step};
