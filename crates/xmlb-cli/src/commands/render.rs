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

//! Render command - stream a tree as encoded bytes.

use std::io::{Read, Write};
use std::str::FromStr;

use tracing::{debug, trace};
use xmlb_core::{Element, TextEncoding};
use xmlb_stream::{RenderStream, StreamConfig};

use super::{load_tree, open_output};
use crate::error::CliError;

/// Render a tree description file.
///
/// # Arguments
///
/// * `file` - Path to the JSON tree description
/// * `encoding` - Encoding name, optionally followed by `with signature`
/// * `chunk_size` - Bytes requested from the stream per read
/// * `output` - Output file; standard output when `None`
///
/// # Errors
///
/// Returns `Err` if the tree cannot be loaded, the encoding is unknown, the
/// chunk size is zero, or the output cannot be written.
pub fn render(
    file: &str,
    encoding: Option<&str>,
    chunk_size: usize,
    output: Option<&str>,
) -> Result<(), CliError> {
    let encoding = match encoding {
        Some(name) => TextEncoding::from_str(name).map_err(|e| CliError::invalid_argument("encoding", e))?,
        None => TextEncoding::default(),
    };
    let root = load_tree(file)?;

    let mut out = open_output(output)?;
    let config = StreamConfig::default().with_encoding(encoding);
    let written = render_to(root.as_ref(), config, chunk_size, &mut out)?;
    out.flush()
        .map_err(|e| CliError::io_error(output.unwrap_or("-"), e))?;

    debug!(file, %encoding, written, "rendered tree");
    Ok(())
}

/// Stream `root` into `out` in reads of at most `chunk_size` bytes.
///
/// Returns the number of bytes written.
///
/// # Examples
///
/// ```rust
/// use xmlb_cli::commands::render_to;
/// use xmlb_core::Element;
/// use xmlb_stream::StreamConfig;
///
/// let root = Element::new("root").attr("a1", "one");
/// let mut out = Vec::new();
/// render_to(Some(&root), StreamConfig::default(), 4, &mut out).unwrap();
/// assert_eq!(out, br#"<root a1="one" />"#);
/// ```
pub fn render_to<W: Write + ?Sized>(
    root: Option<&Element>,
    config: StreamConfig,
    chunk_size: usize,
    out: &mut W,
) -> Result<u64, CliError> {
    if chunk_size == 0 {
        return Err(CliError::invalid_argument("chunk-size", "must be at least 1"));
    }

    let mut stream = RenderStream::with_config(root, config);
    let mut chunk = vec![0u8; chunk_size];
    let mut written = 0u64;
    loop {
        let n = stream
            .read(&mut chunk)
            .map_err(|e| CliError::Render(e.to_string()))?;
        if n == 0 {
            break;
        }
        trace!(n, "chunk");
        out.write_all(&chunk[..n])
            .map_err(|e| CliError::io_error("-", e))?;
        written += n as u64;
    }
    stream.close();
    Ok(written)
}
