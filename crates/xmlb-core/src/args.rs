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

//! Parameters and extension objects handed to a transform.
//!
//! Parameters are keyed by `(name, namespace URI)`, extension objects by
//! namespace URI. Values are shared, so cloning a list or taking a union
//! hands out the same objects rather than copies.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use xmlb_core::ArgumentList;
//!
//! let mut first = ArgumentList::new();
//! first.add_param("limit", "", Arc::new(10_u32)).unwrap();
//!
//! let mut second = ArgumentList::new();
//! second.add_extension_object("urn:ext", Arc::new(String::from("helper"))).unwrap();
//!
//! let merged = first.union(Some(&second)).unwrap();
//! assert_eq!(merged.get_param::<u32>("limit", ""), Some(&10));
//! assert!(merged.get_extension_object::<String>("urn:ext").is_some());
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Shared argument value.
pub type ArgumentValue = Arc<dyn Any + Send + Sync>;

/// Key of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgumentKey {
    /// Local name.
    pub name: String,
    /// Namespace URI, empty when none.
    pub namespace_uri: String,
}

impl ArgumentKey {
    /// Create a key.
    pub fn new(name: impl Into<String>, namespace_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace_uri: namespace_uri.into(),
        }
    }
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace_uri, self.name)
        }
    }
}

/// One entry for building a list with [`FromIterator`] or [`Extend`].
#[derive(Clone)]
pub enum Argument {
    /// A parameter.
    Param(ArgumentKey, ArgumentValue),
    /// An extension object bound to a namespace URI.
    Extension(String, ArgumentValue),
}

impl Argument {
    /// A parameter entry.
    pub fn param(
        name: impl Into<String>,
        namespace_uri: impl Into<String>,
        value: impl Any + Send + Sync,
    ) -> Self {
        Argument::Param(ArgumentKey::new(name, namespace_uri), Arc::new(value))
    }

    /// An extension object entry.
    pub fn extension(namespace_uri: impl Into<String>, value: impl Any + Send + Sync) -> Self {
        Argument::Extension(namespace_uri.into(), Arc::new(value))
    }
}

/// Parameters and extension objects for a transform invocation.
#[derive(Clone, Default)]
pub struct ArgumentList {
    params: BTreeMap<ArgumentKey, ArgumentValue>,
    extensions: BTreeMap<String, ArgumentValue>,
}

impl ArgumentList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Fails if the key is present.
    pub fn add_param(
        &mut self,
        name: impl Into<String>,
        namespace_uri: impl Into<String>,
        value: ArgumentValue,
    ) -> CoreResult<()> {
        let key = ArgumentKey::new(name, namespace_uri);
        if self.params.contains_key(&key) {
            return Err(CoreError::duplicate_argument(key.to_string()));
        }
        self.params.insert(key, value);
        Ok(())
    }

    /// Add an extension object. Fails if the namespace is present.
    pub fn add_extension_object(
        &mut self,
        namespace_uri: impl Into<String>,
        value: ArgumentValue,
    ) -> CoreResult<()> {
        let namespace_uri = namespace_uri.into();
        if self.extensions.contains_key(&namespace_uri) {
            return Err(CoreError::duplicate_argument(namespace_uri));
        }
        self.extensions.insert(namespace_uri, value);
        Ok(())
    }

    /// Shared handle to a parameter.
    pub fn param(&self, name: &str, namespace_uri: &str) -> Option<&ArgumentValue> {
        self.params.get(&ArgumentKey::new(name, namespace_uri))
    }

    /// Typed view of a parameter.
    pub fn get_param<T: Any>(&self, name: &str, namespace_uri: &str) -> Option<&T> {
        self.param(name, namespace_uri)?.downcast_ref::<T>()
    }

    /// Shared handle to an extension object.
    pub fn extension_object(&self, namespace_uri: &str) -> Option<&ArgumentValue> {
        self.extensions.get(namespace_uri)
    }

    /// Typed view of an extension object.
    pub fn get_extension_object<T: Any>(&self, namespace_uri: &str) -> Option<&T> {
        self.extension_object(namespace_uri)?.downcast_ref::<T>()
    }

    /// Remove a parameter, returning it.
    pub fn remove_param(&mut self, name: &str, namespace_uri: &str) -> Option<ArgumentValue> {
        self.params.remove(&ArgumentKey::new(name, namespace_uri))
    }

    /// Remove an extension object, returning it.
    pub fn remove_extension_object(&mut self, namespace_uri: &str) -> Option<ArgumentValue> {
        self.extensions.remove(namespace_uri)
    }

    /// Parameter keys in order.
    pub fn param_keys(&self) -> impl Iterator<Item = &ArgumentKey> {
        self.params.keys()
    }

    /// Extension namespaces in order.
    pub fn extension_namespaces(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }

    /// Number of parameters plus extension objects.
    pub fn len(&self) -> usize {
        self.params.len() + self.extensions.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.extensions.is_empty()
    }

    /// Merge into a new list. Any key present in both fails the union.
    /// With `None` the result is an equivalent copy of `self`.
    pub fn union(&self, other: Option<&ArgumentList>) -> CoreResult<ArgumentList> {
        let mut merged = self.clone();
        let Some(other) = other else {
            return Ok(merged);
        };

        for (key, value) in &other.params {
            merged.add_param(key.name.clone(), key.namespace_uri.clone(), Arc::clone(value))?;
        }
        for (namespace_uri, value) in &other.extensions {
            merged.add_extension_object(namespace_uri.clone(), Arc::clone(value))?;
        }

        debug!(
            params = merged.params.len(),
            extensions = merged.extensions.len(),
            "merged argument lists"
        );
        Ok(merged)
    }

    /// Add an entry.
    pub fn add(&mut self, argument: Argument) -> CoreResult<()> {
        match argument {
            Argument::Param(key, value) => self.add_param(key.name, key.namespace_uri, value),
            Argument::Extension(namespace_uri, value) => self.add_extension_object(namespace_uri, value),
        }
    }
}

impl fmt::Debug for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentList")
            .field("params", &self.params.keys().collect::<Vec<_>>())
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Extend<Argument> for ArgumentList {
    /// Later entries replace earlier ones with the same key.
    fn extend<I: IntoIterator<Item = Argument>>(&mut self, iter: I) {
        for argument in iter {
            match argument {
                Argument::Param(key, value) => {
                    self.params.insert(key, value);
                }
                Argument::Extension(namespace_uri, value) => {
                    self.extensions.insert(namespace_uri, value);
                }
            }
        }
    }
}

impl FromIterator<Argument> for ArgumentList {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        let mut list = ArgumentList::new();
        list.extend(iter);
        list
    }
}
