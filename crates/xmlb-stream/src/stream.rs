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

//! Byte-oriented pull source over a builder tree.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tracing::{debug, trace};
use xmlb_core::{Element, FrameStack};

use crate::buffer::BufferController;
use crate::config::StreamConfig;
use crate::error::{StreamError, StreamResult};
use crate::render::render_step;

/// Renders a borrowed tree as encoded markup, one caller buffer at a time.
///
/// Nothing is rendered up front: each [`Read::read`] call walks just enough
/// of the tree to fill the buffer it is given. The stream is forward-only
/// and read-only.
///
/// # Lifecycle
///
/// - reads return 0 once the whole tree has been rendered
/// - [`close`](Self::close) invokes the root's disposal hook once; dropping
///   an unclosed stream closes it
/// - reads after close return 0
///
/// # Examples
///
/// ```rust
/// use std::io::Read;
/// use xmlb_core::Element;
/// use xmlb_stream::RenderStream;
///
/// let root = Element::new("root").with_child(Element::new("child").with_text("content"));
/// let mut stream = RenderStream::new(Some(&root));
///
/// let mut text = String::new();
/// stream.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "<root><child>content</child></root>");
/// assert_eq!(stream.position(), text.len() as u64);
/// ```
pub struct RenderStream<'a> {
    root: Option<&'a Element>,
    steps: FrameStack<'a>,
    config: StreamConfig,
    controller: BufferController,
    fragment: String,
    position: u64,
    preamble_pending: bool,
    exhausted: bool,
    closed: bool,
}

impl<'a> RenderStream<'a> {
    /// Create a stream with the default configuration.
    pub fn new(root: Option<&'a Element>) -> Self {
        Self::with_config(root, StreamConfig::default())
    }

    /// Create a stream with a custom configuration.
    pub fn with_config(root: Option<&'a Element>, config: StreamConfig) -> Self {
        debug!(
            root = root.map(|r| r.local_name.as_str()).unwrap_or(""),
            encoding = %config.encoding,
            "render stream opened"
        );
        Self {
            root,
            steps: FrameStack::new(root),
            controller: BufferController::new(config.fragment_capacity),
            fragment: String::with_capacity(config.fragment_capacity),
            position: 0,
            preamble_pending: root.is_some() && !config.encoding.preamble().is_empty(),
            exhausted: false,
            closed: false,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Number of bytes handed out so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether every byte has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && !self.controller.has_backlog()
    }

    /// Readable until closed.
    pub fn can_read(&self) -> bool {
        !self.closed
    }

    /// Never seekable.
    pub fn can_seek(&self) -> bool {
        false
    }

    /// Never writable.
    pub fn can_write(&self) -> bool {
        false
    }

    /// Total length is unknown without rendering; always fails.
    pub fn len(&self) -> StreamResult<u64> {
        Err(StreamError::not_supported("length"))
    }

    /// Always fails.
    pub fn set_len(&mut self, _len: u64) -> StreamResult<()> {
        Err(StreamError::not_supported("set_len"))
    }

    /// Close the stream, invoking the root's disposal hook on the first call.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.controller.clear();

        if let Some(disposer) = self.root.and_then(|root| root.disposer.as_ref()) {
            debug!(position = self.position, "disposing render stream root");
            disposer.dispose();
        }
        debug!(position = self.position, "render stream closed");
    }

    fn fill(&mut self, buf: &mut [u8]) -> usize {
        let steps = &mut self.steps;
        let fragment = &mut self.fragment;
        let preamble_pending = &mut self.preamble_pending;
        let exhausted = &mut self.exhausted;
        let encoding = self.config.encoding;

        self.controller.fill(buf, |out| {
            if std::mem::take(preamble_pending) {
                out.extend_from_slice(encoding.preamble());
                return true;
            }
            match steps.next_step() {
                Some(step) => {
                    fragment.clear();
                    render_step(&step, fragment);
                    out.extend_from_slice(&encoding.encode(fragment));
                    true
                }
                None => {
                    *exhausted = true;
                    false
                }
            }
        })
    }
}

impl Read for RenderStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed || buf.is_empty() {
            return Ok(0);
        }

        let was_exhausted = self.exhausted;
        let written = self.fill(buf);
        self.position += written as u64;
        trace!(requested = buf.len(), written, position = self.position, "render stream read");

        if self.exhausted && !was_exhausted {
            debug!(position = self.position, "render stream reached end of tree");
        }
        Ok(written)
    }
}

impl Write for RenderStream<'_> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(StreamError::not_supported("write").into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(StreamError::not_supported("flush").into())
    }
}

impl Seek for RenderStream<'_> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(StreamError::not_supported("seek").into())
    }
}

impl Drop for RenderStream<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for RenderStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderStream")
            .field("root", &self.root.map(|r| r.qualified_name()))
            .field("position", &self.position)
            .field("backlog", &self.controller.backlog_len())
            .field("exhausted", &self.exhausted)
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use xmlb_core::{Text, TextEncoding};

    fn read_all(stream: &mut RenderStream<'_>, size: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let mut buf = vec![0u8; size];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                return out;
            }
            out.extend_from_slice(&buf[..n]);
        }
    }

    #[test]
    fn test_null_root_is_empty() {
        let mut stream = RenderStream::new(None);
        assert!(read_all(&mut stream, 16).is_empty());
        assert!(stream.is_exhausted());
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_explicit_empty_child() {
        let root = Element::new("root").with_child(Element::new("child").with_child(Text::default()));
        let mut stream = RenderStream::new(Some(&root));
        assert_eq!(read_all(&mut stream, 7), b"<root><child></child></root>");
    }

    #[test]
    fn test_single_byte_reads() {
        let root = Element::new("root").attr("a1", "one").with_text("content");
        let mut stream = RenderStream::new(Some(&root));
        assert_eq!(read_all(&mut stream, 1), br#"<root a1="one">content</root>"#);
        assert_eq!(stream.position(), 29);
    }

    #[test]
    fn test_capabilities() {
        let root = Element::new("root");
        let mut stream = RenderStream::new(Some(&root));
        assert!(stream.can_read());
        assert!(!stream.can_seek());
        assert!(!stream.can_write());
        assert!(stream.set_len(4).unwrap_err().is_not_supported());
        assert_eq!(stream.write(b"x").unwrap_err().kind(), io::ErrorKind::Unsupported);
        assert_eq!(stream.flush().unwrap_err().kind(), io::ErrorKind::Unsupported);
        stream.close();
        assert!(!stream.can_read());
    }

    #[test]
    fn test_close_disposes_once_and_stops_reads() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let root = Element::new("root")
            .with_child(Element::new("child"))
            .with_disposer(move || {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        let mut stream = RenderStream::new(Some(&root));
        let mut buf = [0u8; 3];
        assert_eq!(stream.read(&mut buf).unwrap(), 3);

        stream.close();
        stream.close();
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
        drop(stream);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_disposes_unclosed_stream() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let root = Element::new("root").with_disposer(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        drop(RenderStream::new(Some(&root)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_utf16_with_signature() {
        let root = Element::new("r");
        let config = StreamConfig::default().with_encoding(TextEncoding::utf16le());
        let mut stream = RenderStream::with_config(Some(&root), config);
        let bytes = read_all(&mut stream, 3);
        assert_eq!(&bytes[..2], b"\xFF\xFE");
        assert_eq!(TextEncoding::utf16le().decode(&bytes), "<r />");
    }

    #[test]
    fn test_signature_skipped_for_null_root() {
        let config = StreamConfig::default().with_encoding(TextEncoding::utf8_with_signature());
        let mut stream = RenderStream::with_config(None, config);
        assert!(read_all(&mut stream, 8).is_empty());
    }
}
