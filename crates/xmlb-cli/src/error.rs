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

//! Structured error types for the XMLB CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use xmlb_core::CoreError;
use xmlb_reader::ReaderError;

/// Errors raised while running a CLI command.
///
/// # Examples
///
/// ```rust
/// use xmlb_cli::error::CliError;
///
/// let err = CliError::io_error("tree.json", std::io::Error::from(std::io::ErrorKind::NotFound));
/// assert!(err.to_string().starts_with("I/O error for 'tree.json'"));
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Reading the input or writing the output failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// File involved, `-` for standard streams.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// The input exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// File that exceeded the limit.
        path: PathBuf,
        /// Its size in bytes.
        actual: u64,
        /// The limit in bytes.
        max: u64,
    },

    /// The tree description is not valid JSON for a tree.
    #[error("JSON error: {0}")]
    Json(String),

    /// The tree description is well-formed but not a valid tree.
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    /// A command-line option has an unusable value.
    #[error("invalid value for --{option}: {message}")]
    InvalidArgument {
        /// Option name without dashes.
        option: &'static str,
        /// What was wrong.
        message: String,
    },

    /// Rendering to bytes failed.
    #[error("render error: {0}")]
    Render(String),

    /// Reading nodes failed.
    #[error("read error: {0}")]
    Read(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(option: &'static str, message: impl ToString) -> Self {
        Self::InvalidArgument {
            option,
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<ReaderError> for CliError {
    fn from(err: ReaderError) -> Self {
        Self::Read(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::InvalidTree(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CliError::invalid_argument("encoding", "unknown label 'x'");
        assert_eq!(err.to_string(), "invalid value for --encoding: unknown label 'x'");

        let err = CliError::FileTooLarge {
            path: PathBuf::from("big.json"),
            actual: 10,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "File 'big.json' is too large (10 bytes). Maximum allowed: 5 bytes"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: CliError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, CliError::Json(_)));
    }
}
