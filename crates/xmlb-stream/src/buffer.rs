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

//! Chunk buffer controller.
//!
//! Reconciles caller buffers of any size with fragments of any size. Bytes
//! that do not fit are kept as backlog and handed out first on the next call.
//!
//! # Examples
//!
//! ```rust
//! use xmlb_stream::BufferController;
//!
//! let mut fragments = vec![b"<root>".to_vec(), b"</root>".to_vec()].into_iter();
//! let mut controller = BufferController::new(16);
//! let mut buf = [0u8; 4];
//!
//! let mut produce = |out: &mut Vec<u8>| match fragments.next() {
//!     Some(f) => { out.extend_from_slice(&f); true }
//!     None => false,
//! };
//!
//! assert_eq!(controller.fill(&mut buf, &mut produce), 4);
//! assert_eq!(&buf, b"<roo");
//! assert_eq!(controller.backlog_len(), 2);
//! assert_eq!(controller.fill(&mut buf, &mut produce), 4);
//! assert_eq!(&buf, b"t></");
//! ```

/// Fills caller buffers from a fragment producer, retaining overflow.
#[derive(Debug, Default)]
pub struct BufferController {
    backlog: Vec<u8>,
    consumed: usize,
    fragment: Vec<u8>,
}

impl BufferController {
    /// Create a controller whose scratch fragment buffer starts at `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            backlog: Vec::with_capacity(capacity),
            consumed: 0,
            fragment: Vec::with_capacity(capacity),
        }
    }

    /// Bytes waiting from a previous fill.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len() - self.consumed
    }

    /// Whether no bytes are waiting.
    pub fn has_backlog(&self) -> bool {
        self.backlog_len() > 0
    }

    /// Drop any waiting bytes.
    pub fn clear(&mut self) {
        self.backlog.clear();
        self.consumed = 0;
    }

    /// Fill `buf`, draining the backlog first and then asking `produce` for
    /// fragments until the buffer is full or `produce` returns `false`.
    ///
    /// `produce` appends the next fragment's bytes to the vector it is given
    /// and returns `false` once there are no more fragments. Returns the
    /// number of bytes written; 0 only when `buf` is empty or everything has
    /// been handed out.
    pub fn fill<F>(&mut self, buf: &mut [u8], mut produce: F) -> usize
    where
        F: FnMut(&mut Vec<u8>) -> bool,
    {
        let mut written = self.drain_backlog(buf);

        while written < buf.len() {
            self.fragment.clear();
            if !produce(&mut self.fragment) {
                break;
            }

            let take = (buf.len() - written).min(self.fragment.len());
            buf[written..written + take].copy_from_slice(&self.fragment[..take]);
            written += take;

            if take < self.fragment.len() {
                self.backlog.clear();
                self.backlog.extend_from_slice(&self.fragment[take..]);
                self.consumed = 0;
            }
        }

        written
    }

    fn drain_backlog(&mut self, buf: &mut [u8]) -> usize {
        let take = self.backlog_len().min(buf.len());
        if take == 0 {
            return 0;
        }

        buf[..take].copy_from_slice(&self.backlog[self.consumed..self.consumed + take]);
        self.consumed += take;
        if self.consumed == self.backlog.len() {
            self.clear();
        }
        take
    }
}
