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

//! Markup fragments for traversal steps.
//!
//! | Step | Fragment |
//! |------|----------|
//! | `StartTag` with attributes | `<name` |
//! | `StartTag` with children only | `<name>` |
//! | `StartTag` self-closing | `<name />` |
//! | `Attribute` | ` name="value"` |
//! | `EndAttributesOpenTag` | `>` |
//! | `SelfClose` | ` />` |
//! | `Text` | the escaped text |
//! | `EndTag` | `</name>` |

use xmlb_core::escape::{escape_attribute_value, escape_text};
use xmlb_core::{Element, FrameStack, Step};

fn push_name(out: &mut String, prefix: &str, local: &str) {
    if !prefix.is_empty() {
        out.push_str(prefix);
        out.push(':');
    }
    out.push_str(local);
}

/// Append the markup for one step to `out`.
pub fn render_step(step: &Step<'_>, out: &mut String) {
    match *step {
        Step::StartTag {
            element,
            has_attributes,
            is_self_closing,
        } => {
            out.push('<');
            push_name(out, &element.prefix, &element.local_name);
            if is_self_closing {
                out.push_str(" />");
            } else if !has_attributes {
                out.push('>');
            }
        }
        Step::Attribute(attribute) => {
            out.push(' ');
            push_name(out, &attribute.prefix, &attribute.local_name);
            out.push_str("=\"");
            out.push_str(&escape_attribute_value(&attribute.value));
            out.push('"');
        }
        Step::EndAttributesOpenTag(_) => out.push('>'),
        Step::SelfClose(_) => out.push_str(" />"),
        Step::Text(text) => out.push_str(&escape_text(text)),
        Step::EndTag(element) => {
            out.push_str("</");
            push_name(out, &element.prefix, &element.local_name);
            out.push('>');
        }
    }
}

/// Render a whole tree eagerly. `None` renders the empty document.
///
/// ```rust
/// use xmlb_core::Element;
/// use xmlb_stream::render_to_string;
///
/// let root = Element::new("root").attr("a1", "one").with_child(Element::new("child"));
/// assert_eq!(render_to_string(Some(&root)), r#"<root a1="one"><child /></root>"#);
/// assert_eq!(render_to_string(None), "");
/// ```
pub fn render_to_string(root: Option<&Element>) -> String {
    let mut out = String::new();
    for step in FrameStack::new(root) {
        render_step(&step, &mut out);
    }
    out
}
