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

//! Rendering throughput for different caller buffer sizes.

use std::io::Read;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xmlb_core::{Attribute, Element};
use xmlb_stream::{render_to_string, RenderStream};

fn build_tree(rows: usize) -> Element {
    let mut root = Element::qualified("s1:rows", "urn:bench")
        .unwrap_or_else(|_| Element::new("rows"))
        .with_attribute(Attribute::namespace_declaration("s1", "urn:bench"));
    for i in 0..rows {
        root.push_child(
            Element::new("row")
                .attr("id", i.to_string())
                .attr("kind", if i % 2 == 0 { "even" } else { "odd" })
                .with_child(Element::new("name").with_text(format!("row & {}", i)))
                .with_child(Element::new("empty")),
        );
    }
    root
}

fn bench_render(c: &mut Criterion) {
    let root = build_tree(1_000);
    let total = render_to_string(Some(&root)).len() as u64;

    let mut group = c.benchmark_group("render_stream");
    group.throughput(Throughput::Bytes(total));

    for size in [7usize, 512, 4096, 65536] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut buf = vec![0u8; size];
            b.iter(|| {
                let mut stream = RenderStream::new(Some(&root));
                let mut read = 0usize;
                loop {
                    let n = stream.read(&mut buf).unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                }
                black_box(read)
            });
        });
    }
    group.finish();

    c.bench_function("render_to_string", |b| {
        b.iter(|| black_box(render_to_string(Some(&root))))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
