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

//! Error types for the byte rendering surface.
//!
//! The surface is forward-only and read-only. Writing, seeking and length
//! queries report [`StreamError::NotSupported`]; through the `std::io` traits
//! that becomes an [`io::Error`] of kind [`io::ErrorKind::Unsupported`].
//!
//! ```rust
//! use std::io::{ErrorKind, Seek, SeekFrom};
//! use xmlb_core::Element;
//! use xmlb_stream::{RenderStream, StreamError};
//!
//! let root = Element::new("root");
//! let mut stream = RenderStream::new(Some(&root));
//!
//! assert!(matches!(stream.len(), Err(StreamError::NotSupported { .. })));
//! let err = stream.seek(SeekFrom::Start(0)).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Unsupported);
//! ```

use std::io;

use thiserror::Error;
use xmlb_core::CoreError;

/// Errors raised by the byte rendering surface.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The operation is not available on a forward-only, read-only stream.
    #[error("{operation} is not supported by the render stream")]
    NotSupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// I/O error from a downstream sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the node model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StreamError {
    /// Create a not-supported error.
    pub fn not_supported(operation: &'static str) -> Self {
        Self::NotSupported { operation }
    }

    /// Whether this is a not-supported error.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Io(err) => err,
            StreamError::NotSupported { .. } => io::Error::new(io::ErrorKind::Unsupported, err),
            StreamError::Core(_) => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;
