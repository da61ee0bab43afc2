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

//! Chunked byte rendering of XML builder trees.
//!
//! [`RenderStream`] turns a borrowed [`xmlb_core::Element`] tree into encoded
//! markup through [`std::io::Read`], rendering only as much of the tree as
//! each caller buffer needs.
//!
//! # Features
//!
//! - **Lazy**: one traversal step at a time, never the whole document
//! - **Any buffer size**: overflow is kept as backlog for the next read, so
//!   reading 1, 7 or 4096 bytes at a time yields identical output
//! - **Encodings**: any [`xmlb_core::TextEncoding`], with optional byte order
//!   mark
//! - **Disposal**: the root's disposal hook runs once when the stream closes
//!
//! # Examples
//!
//! ```rust
//! use std::io::Read;
//! use xmlb_core::{Attribute, Element};
//! use xmlb_stream::RenderStream;
//!
//! let root = Element::qualified("s1:root", "urn:ns-one")
//!     .unwrap()
//!     .with_attribute(Attribute::namespace_declaration("s1", "urn:ns-one"));
//!
//! let mut stream = RenderStream::new(Some(&root));
//! let mut buf = [0u8; 7];
//! let mut out = Vec::new();
//! loop {
//!     let n = stream.read(&mut buf).unwrap();
//!     if n == 0 {
//!         break;
//!     }
//!     out.extend_from_slice(&buf[..n]);
//! }
//! assert_eq!(out, br#"<s1:root xmlns:s1="urn:ns-one" />"#);
//! ```

mod buffer;
mod config;
mod error;
mod render;
mod stream;

pub use buffer::BufferController;
pub use config::StreamConfig;
pub use error::{StreamError, StreamResult};
pub use render::{render_step, render_to_string};
pub use stream::RenderStream;
