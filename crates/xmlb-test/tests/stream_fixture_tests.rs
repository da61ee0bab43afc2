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

//! Byte stream rendering of every fixture, and disposal of the shared root.

use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use xmlb_core::{Element, TextEncoding};
use xmlb_reader::{PullReader, TreeReader};
use xmlb_stream::{RenderStream, StreamConfig};
use xmlb_test::{fixtures, init_tracing, TextReader};

fn drain(stream: &mut RenderStream<'_>, size: usize) -> Vec<u8> {
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
fn test_every_fixture_renders_exactly() {
    init_tracing();
    for fixture in fixtures::all() {
        let root = (fixture.build)();
        for size in [1, 7, 4096] {
            let mut stream = RenderStream::new(root.as_ref());
            assert_eq!(
                drain(&mut stream, size),
                fixture.markup.as_bytes(),
                "fixture {} with buffer size {}",
                fixture.name,
                size
            );
        }
    }
}

#[test]
fn test_rendered_bytes_parse_back_to_the_same_nodes() {
    for fixture in fixtures::all() {
        let Some(root) = (fixture.build)() else {
            continue;
        };
        let rendered = String::from_utf8(drain(&mut RenderStream::new(Some(&root)), 13)).unwrap();
        let parsed = xmlb_test::transcript(&mut TextReader::new(&rendered)).unwrap();
        let direct = xmlb_test::transcript(&mut TreeReader::new(Some(&root))).unwrap();
        assert_eq!(parsed, direct, "fixture {}", fixture.name);
    }
}

#[test]
fn test_utf16_rendering_with_signature() {
    for fixture in fixtures::all() {
        let root = (fixture.build)();
        let encoding = TextEncoding::utf16le();
        let config = StreamConfig::default().with_encoding(encoding);
        let bytes = drain(&mut RenderStream::with_config(root.as_ref(), config), 5);
        if root.is_none() {
            assert!(bytes.is_empty());
            continue;
        }
        assert!(bytes.starts_with(encoding.preamble()), "fixture {}", fixture.name);
        assert_eq!(encoding.decode(&bytes), fixture.markup, "fixture {}", fixture.name);
    }
}

#[test]
fn test_stream_rejects_write_and_seek() {
    let root = fixtures::mixed_default();
    let mut stream = RenderStream::new(root.as_ref());
    assert!(stream.can_read());
    assert!(!stream.can_seek());
    assert!(!stream.can_write());
    assert!(stream.len().is_err());
    assert!(stream.write(b"x").is_err());
    assert!(stream.seek(SeekFrom::Start(0)).is_err());
    stream.close();
    assert!(!stream.can_read());
    assert_eq!(stream.read(&mut [0u8; 16]).unwrap(), 0);
}

#[test]
fn test_root_is_disposed_once_per_session() {
    let disposals = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&disposals);
    let root: Option<Element> = fixtures::mixed_prefixed().map(|root| {
        root.with_disposer(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    });
    let root = root.as_ref();

    let mut stream = RenderStream::new(root);
    stream.read(&mut [0u8; 3]).unwrap();
    stream.close();
    stream.close();
    drop(stream);
    assert_eq!(disposals.load(Ordering::SeqCst), 1);

    let mut reader = TreeReader::new(root);
    reader.read().unwrap();
    reader.close();
    drop(reader);
    assert_eq!(disposals.load(Ordering::SeqCst), 2);

    drop(RenderStream::new(root));
    drop(TreeReader::new(root));
    assert_eq!(disposals.load(Ordering::SeqCst), 4);
}

#[test]
fn test_concurrent_sessions_over_one_tree() {
    let Some(root) = fixtures::mixed_default() else {
        unreachable!("fixture has a root");
    };
    let expected = fixtures::all()
        .into_iter()
        .find(|fixture| fixture.name == "mixed_default")
        .map(|fixture| fixture.markup)
        .unwrap_or_default();

    std::thread::scope(|scope| {
        for size in [1, 3, 64, 1024] {
            let root = &root;
            scope.spawn(move || {
                let bytes = drain(&mut RenderStream::new(Some(root)), size);
                assert_eq!(bytes, expected.as_bytes());
            });
            scope.spawn(move || {
                let mut reader = TreeReader::new(Some(root));
                while reader.read().unwrap() {}
                assert!(reader.eof());
            });
        }
    });
}
