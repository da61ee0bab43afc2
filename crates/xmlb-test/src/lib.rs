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

//! Shared fixtures and conformance tooling for XMLB.
//!
//! This crate holds what the test suites of every surface share, so that
//! the byte stream and the pull reader are checked against one set of
//! expectations.
//!
//! # Features
//!
//! - **Fixtures**: builder trees paired with their exact markup
//! - **Reference reader**: [`TextReader`], a pull reader over markup text
//! - **Conformance**: [`ConformanceVerifier`] drives two readers in lockstep
//!   and asserts they agree after every call
//! - **Spy**: [`ReaderSpy`] records the calls a consumer makes
//! - **Generators**: proptest strategies for random trees
//!
//! # Quick Start
//!
//! ```rust
//! use xmlb_reader::{PullReader, TreeReader};
//! use xmlb_test::{fixtures, reference_reader, ConformanceVerifier};
//!
//! for fixture in fixtures::all() {
//!     let root = (fixture.build)();
//!     let mut verifier = ConformanceVerifier::new(
//!         xmlb_reader::open(root.as_ref()),
//!         reference_reader(fixture.markup),
//!     );
//!     while verifier.read().unwrap() {}
//!     verifier.close();
//! }
//! ```

pub mod conformance;
pub mod fixtures;
pub mod generators;
pub mod reference;
pub mod spy;

pub use conformance::ConformanceVerifier;
pub use fixtures::{Fixture, FixtureList};
pub use reference::{reference_reader, reference_reader_with_config, TextReader};
pub use spy::ReaderSpy;

use tracing_subscriber::{fmt, EnvFilter};

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `debug` for the XMLB crates.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xmlb_core=debug,xmlb_stream=debug,xmlb_reader=debug,xmlb_test=debug")),
        )
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Every node of `reader` read to its end, as `type name depth value` lines.
///
/// Useful in assertion messages where a full transcript beats a single
/// mismatch.
pub fn transcript<R: xmlb_reader::PullReader + ?Sized>(reader: &mut R) -> xmlb_reader::ReaderResult<Vec<String>> {
    let mut lines = Vec::new();
    while reader.read()? {
        lines.push(format!(
            "{} {} {} {:?}",
            reader.node_type(),
            reader.name(),
            reader.depth(),
            reader.value()
        ));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlb_reader::TreeReader;

    #[test]
    fn test_all_fixtures_render_their_markup() {
        init_tracing();
        for fixture in fixtures::all() {
            let root = (fixture.build)();
            assert_eq!(
                xmlb_stream::render_to_string(root.as_ref()),
                fixture.markup,
                "fixture {}",
                fixture.name
            );
        }
    }

    #[test]
    fn test_transcripts_agree_on_fixtures() {
        for fixture in fixtures::all() {
            let root = (fixture.build)();
            let actual = transcript(&mut TreeReader::new(root.as_ref())).unwrap();
            let expected = transcript(&mut *reference_reader(fixture.markup)).unwrap();
            assert_eq!(actual, expected, "fixture {}", fixture.name);
        }
    }
}
