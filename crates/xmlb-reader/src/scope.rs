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

//! Namespace bindings and inherited `xml:` attributes of the open elements
//! of a tree.

use xmlb_core::namespace::{reserved_namespace, XML_PREFIX};
use xmlb_core::Element;

use crate::pull::XmlSpace;

#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    mark: usize,
    lang: &'a str,
    space: XmlSpace,
}

/// Stack of `(prefix, uri)` bindings with one scope per open element.
#[derive(Debug, Default)]
pub(crate) struct NamespaceScopes<'a> {
    bindings: Vec<(&'a str, &'a str)>,
    scopes: Vec<Scope<'a>>,
}

fn xml_attribute<'a>(element: &'a Element, local_name: &str) -> Option<&'a str> {
    element
        .attributes
        .iter()
        .find(|attribute| attribute.prefix == XML_PREFIX && attribute.local_name == local_name)
        .map(|attribute| attribute.value.as_str())
}

impl<'a> NamespaceScopes<'a> {
    /// Open a scope holding the declarations of `element`. `xml:lang` and
    /// `xml:space` are inherited unless `element` sets them.
    pub(crate) fn push(&mut self, element: &'a Element) {
        let (lang, space) = self.scopes.last().map_or(("", XmlSpace::None), |s| (s.lang, s.space));
        self.scopes.push(Scope {
            mark: self.bindings.len(),
            lang: xml_attribute(element, "lang").unwrap_or(lang),
            space: xml_attribute(element, "space")
                .and_then(XmlSpace::parse)
                .unwrap_or(space),
        });
        self.bindings.extend(element.declarations());
    }

    /// Close the innermost scope.
    pub(crate) fn pop(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            self.bindings.truncate(scope.mark);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.bindings.clear();
        self.scopes.clear();
    }

    /// `xml:lang` of the innermost scope, empty outside any.
    pub(crate) fn xml_lang(&self) -> &'a str {
        self.scopes.last().map_or("", |scope| scope.lang)
    }

    /// `xml:space` of the innermost scope.
    pub(crate) fn xml_space(&self) -> XmlSpace {
        self.scopes.last().map_or(XmlSpace::None, |scope| scope.space)
    }

    /// Innermost binding for `prefix`. The undeclared default prefix maps to
    /// the empty namespace.
    pub(crate) fn lookup(&self, prefix: &str) -> Option<&'a str> {
        if let Some(namespace) = reserved_namespace(prefix) {
            return Some(namespace);
        }
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == prefix)
            .map(|(_, uri)| *uri)
            .or(if prefix.is_empty() { Some("") } else { None })
    }
}
