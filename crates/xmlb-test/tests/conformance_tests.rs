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

//! Tree reader against reference parser, for every fixture.

use quick_xml::Writer;
use xmlb_core::Element;
use xmlb_reader::{copy_to_writer, open, read_outer_xml, NodeType, PullReader, ReadState, TreeReader, XmlSpace};
use xmlb_test::{fixtures, init_tracing, reference_reader, ConformanceVerifier, Fixture, ReaderSpy};

const PREFIXES: [&str; 6] = ["", "s1", "s2", "xml", "xmlns", "unbound"];

fn walk_with_attributes<R: PullReader>(verifier: &mut R) {
    while verifier.read().unwrap() {
        if verifier.node_type() != NodeType::Element {
            continue;
        }
        while verifier.move_to_next_attribute() {
            verifier.read_attribute_value();
        }
        verifier.move_to_content().unwrap();
    }
}

fn for_each_fixture(check: impl Fn(&Fixture, Option<&Element>)) {
    init_tracing();
    for fixture in fixtures::all() {
        let root = (fixture.build)();
        check(&fixture, root.as_ref());
    }
}

#[test]
fn test_read_conformance() {
    for_each_fixture(|fixture, root| {
        let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
        walk_with_attributes(&mut verifier);
        verifier.close();

        let mut reversed = ConformanceVerifier::new(reference_reader(fixture.markup), open(root));
        walk_with_attributes(&mut reversed);
        reversed.close();
    });
}

#[test]
fn test_tree_reader_over_absent_root_matches_empty_document() {
    let mut verifier = ConformanceVerifier::new(TreeReader::new(None), reference_reader(""));
    assert_eq!(verifier.read_state(), ReadState::Initial);
    assert_eq!(verifier.node_type(), NodeType::None);
    assert_eq!(verifier.depth(), 0);
    assert_eq!(verifier.local_name(), "");
    assert!(!verifier.read().unwrap());
    assert!(verifier.eof());
    verifier.close();
}

#[test]
fn test_tree_reader_over_absent_root_matches_whitespace_document() {
    let mut verifier = ConformanceVerifier::new(TreeReader::new(None), reference_reader(" \r\n\t "));
    assert_eq!(verifier.read_state(), ReadState::Initial);
    assert!(!verifier.read().unwrap());
    assert_eq!(verifier.read_state(), ReadState::EndOfFile);
    assert_eq!(verifier.node_type(), NodeType::None);
    verifier.close();
}

#[test]
fn test_rendered_whitespace_characters_survive_parsing() {
    init_tracing();
    let root = Element::new("r").attr("a", "x\ty\nz").with_text("a\r\nb");
    let markup = xmlb_stream::render_to_string(Some(&root));

    let mut verifier = ConformanceVerifier::new(TreeReader::new(Some(&root)), reference_reader(&markup));
    walk_with_attributes(&mut verifier);
    verifier.close();

    let mut reversed = ConformanceVerifier::new(reference_reader(&markup), TreeReader::new(Some(&root)));
    assert!(reversed.read().unwrap());
    assert_eq!(reversed.get_attribute("a"), Some("x\ty\nz"));
    assert!(reversed.read().unwrap());
    assert_eq!(reversed.value(), "a\r\nb");
}

#[test]
fn test_xml_lang_and_space_conformance() {
    let Some(root) = fixtures::inherited_language() else {
        unreachable!("fixture has a root");
    };
    let markup = xmlb_stream::render_to_string(Some(&root));
    let mut verifier = ConformanceVerifier::new(TreeReader::new(Some(&root)), reference_reader(&markup));
    let mut languages = Vec::new();
    while verifier.read().unwrap() {
        languages.push((verifier.xml_lang().to_string(), verifier.xml_space()));
    }
    let preserve = XmlSpace::Preserve;
    assert_eq!(
        languages,
        [
            ("en".to_string(), preserve),
            ("en".to_string(), preserve),
            ("en".to_string(), preserve),
            ("en".to_string(), preserve),
            ("fr".to_string(), preserve),
            ("en".to_string(), preserve),
        ]
    );
}

#[test]
fn test_close_conformance_at_every_position() {
    for_each_fixture(|fixture, root| {
        let nodes = xmlb_test::transcript(&mut *reference_reader(fixture.markup)).unwrap().len();
        for reads in 0..=nodes + 1 {
            let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
            for _ in 0..reads {
                verifier.read().unwrap();
            }
            verifier.close();
            assert_eq!(verifier.read_state(), ReadState::Closed, "fixture {}", fixture.name);
            assert!(!verifier.read().unwrap());
        }
    });
}

#[test]
fn test_namespace_lookup_conformance() {
    for_each_fixture(|fixture, root| {
        let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
        for prefix in PREFIXES {
            verifier.lookup_namespace(prefix);
        }
        while verifier.read().unwrap() {
            for prefix in PREFIXES {
                verifier.lookup_namespace(prefix);
            }
        }
        for prefix in PREFIXES {
            assert_eq!(verifier.lookup_namespace(prefix), None);
        }
    });
}

#[test]
fn test_random_attribute_access_conformance() {
    for_each_fixture(|fixture, root| {
        let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
        while verifier.read().unwrap() {
            let count = verifier.attribute_count();
            let mut names = Vec::new();
            for index in 0..=count {
                let at = verifier.get_attribute_at(index).map(str::to_string);
                assert_eq!(at.is_ok(), index < count, "fixture {}", fixture.name);
                if verifier.move_to_attribute_at(index).is_ok() {
                    names.push((
                        verifier.name().into_owned(),
                        verifier.local_name().to_string(),
                        verifier.namespace_uri().to_string(),
                    ));
                }
            }
            verifier.move_to_element();
            for (name, local_name, namespace_uri) in &names {
                verifier.get_attribute(name);
                verifier.get_attribute_ns(local_name, namespace_uri);
                assert!(verifier.move_to_attribute(name));
                assert!(verifier.move_to_attribute_ns(local_name, namespace_uri));
            }
            verifier.get_attribute("missing");
            assert!(!verifier.move_to_attribute("missing"));
            verifier.move_to_element();
        }
    });
}

#[test]
fn test_resolve_entity_is_invalid_everywhere() {
    for_each_fixture(|fixture, root| {
        let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
        assert!(verifier.resolve_entity().is_err());
        while verifier.read().unwrap() {
            assert!(verifier.resolve_entity().is_err());
        }
    });
}

#[test]
fn test_outer_xml_conformance() {
    for_each_fixture(|fixture, root| {
        let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
        verifier.move_to_content().unwrap();
        read_outer_xml(&mut verifier).unwrap();
        verifier.close();

        let mut actual = open(root);
        let mut expected = reference_reader(fixture.markup);
        actual.move_to_content().unwrap();
        expected.move_to_content().unwrap();
        assert_eq!(
            read_outer_xml(&mut actual).unwrap(),
            read_outer_xml(&mut expected).unwrap(),
            "fixture {}",
            fixture.name
        );

        let mut actual_spy = ReaderSpy::new(open(root));
        let mut expected_spy = ReaderSpy::new(reference_reader(fixture.markup));
        actual_spy.move_to_content().unwrap();
        expected_spy.move_to_content().unwrap();
        read_outer_xml(&mut actual_spy).unwrap();
        read_outer_xml(&mut expected_spy).unwrap();
        assert_eq!(actual_spy.invocations(), expected_spy.invocations(), "fixture {}", fixture.name);
    });
}

fn identity_copy<R: PullReader>(reader: &mut R) -> String {
    let mut writer = Writer::new(Vec::new());
    copy_to_writer(reader, &mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_identity_copy_conformance() {
    for_each_fixture(|fixture, root| {
        let mut verifier = ConformanceVerifier::new(open(root), reference_reader(fixture.markup));
        identity_copy(&mut verifier);
        verifier.close();

        let mut reversed = ConformanceVerifier::new(reference_reader(fixture.markup), open(root));
        identity_copy(&mut reversed);

        assert_eq!(
            identity_copy(&mut open(root)),
            identity_copy(&mut reference_reader(fixture.markup)),
            "fixture {}",
            fixture.name
        );

        let mut actual_spy = ReaderSpy::new(open(root));
        let mut expected_spy = ReaderSpy::new(reference_reader(fixture.markup));
        identity_copy(&mut expected_spy);
        identity_copy(&mut actual_spy);
        assert_eq!(actual_spy.invocations(), expected_spy.invocations(), "fixture {}", fixture.name);
    });
}

#[test]
fn test_identity_copy_reproduces_markup_up_to_empty_tag_spacing() {
    for_each_fixture(|fixture, root| {
        let copied = identity_copy(&mut open(root));
        assert_eq!(copied, fixture.markup.replace(" />", "/>"), "fixture {}", fixture.name);
    });
}
