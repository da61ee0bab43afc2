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

//! Reserved namespaces and declaration helpers.

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace of `xmlns` and `xmlns:*` declaration attributes.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Prefix reserved for namespace declarations.
pub const XMLNS_PREFIX: &str = "xmlns";

/// Prefix reserved for the XML namespace.
pub const XML_PREFIX: &str = "xml";

/// If `(prefix, local)` names a namespace declaration attribute, return the
/// prefix it declares (`""` for the default namespace).
///
/// ```rust
/// use xmlb_core::namespace::declared_prefix;
///
/// assert_eq!(declared_prefix("", "xmlns"), Some(""));
/// assert_eq!(declared_prefix("xmlns", "s1"), Some("s1"));
/// assert_eq!(declared_prefix("", "id"), None);
/// ```
pub fn declared_prefix<'a>(prefix: &str, local: &'a str) -> Option<&'a str> {
    if prefix == XMLNS_PREFIX {
        Some(local)
    } else if prefix.is_empty() && local == XMLNS_PREFIX {
        Some("")
    } else {
        None
    }
}

/// Namespace implied by a reserved prefix, if any.
pub fn reserved_namespace(prefix: &str) -> Option<&'static str> {
    match prefix {
        XML_PREFIX => Some(XML_NAMESPACE),
        XMLNS_PREFIX => Some(XMLNS_NAMESPACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_namespace() {
        assert_eq!(reserved_namespace("xml"), Some(XML_NAMESPACE));
        assert_eq!(reserved_namespace("xmlns"), Some(XMLNS_NAMESPACE));
        assert_eq!(reserved_namespace("s1"), None);
        assert_eq!(reserved_namespace(""), None);
    }

    #[test]
    fn test_declared_prefix_ignores_other_prefixes() {
        assert_eq!(declared_prefix("s1", "xmlns"), None);
        assert_eq!(declared_prefix("xml", "lang"), None);
    }
}
