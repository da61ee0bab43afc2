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

//! XMLB command-line interface library.
//!
//! Renders and traces XML builder trees described as JSON files.
//!
//! # Commands
//!
//! - `render` - stream a tree as encoded XML bytes in fixed-size chunks
//! - `trace` - print every node a pull reader reports, one per line
//!
//! # Examples
//!
//! ```bash
//! xmlb render tree.json --encoding "utf-16le with signature" --output tree.xml
//! xmlb trace tree.json --ignore-whitespace
//! ```

pub mod cli;
pub mod commands;
pub mod error;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` does not name one.
pub const DEFAULT_LOG_FILTER: &str = "xmlb=info";

/// Log filter for the CLI: `RUST_LOG` when set and valid, otherwise
/// [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_prefers_environment() {
        std::env::set_var("RUST_LOG", "xmlb=debug");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::DEBUG));

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::INFO));
    }
}
