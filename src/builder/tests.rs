/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;
use crate::engine::description;

fn parse(xml: &str, shape: TreeShape) -> Element {
    let mut root = Element::new();
    let mut parser = ElementParser::with_shape(shape).unwrap();
    parser.feed_into(xml, &mut root).unwrap();
    parser.finish().unwrap();
    drop(parser);
    root
}

fn parse_split(chunks: &[&str], shape: TreeShape) -> Element {
    let mut root = Element::new();
    let mut parser = ElementParser::with_shape(shape).unwrap();
    let (first, rest) = chunks.split_first().unwrap();
    parser.feed_into(first, &mut root).unwrap();
    for chunk in rest {
        parser.feed(chunk).unwrap();
    }
    parser.finish().unwrap();
    drop(parser);
    root
}

fn names(element: &Element) -> Vec<Option<&str>> {
    element.children().iter().map(Element::name).collect()
}

#[test]
fn root_becomes_target() {
    let root = parse("<a k=\"v\">text</a>", TreeShape::Flat);
    assert_eq!(root.name(), Some("a"));
    assert_eq!(root.attribute("k"), Some("v"));
    assert_eq!(root.children().len(), 1);
    assert!(root.children()[0].is_text());
    assert_eq!(root.children()[0].text(), Some("text"));
}

#[test]
fn attribute_free_root() {
    let root = parse("<a></a>", TreeShape::Flat);
    assert_eq!(root.name(), Some("a"));
    assert_eq!(root.attributes().count(), 0);
    assert!(root.children().is_empty());
}

#[test]
fn siblings_in_order() {
    let root = parse("<a><b/><c/></a>", TreeShape::Flat);
    assert_eq!(root.name(), Some("a"));
    assert_eq!(names(&root), vec![Some("b"), Some("c")]);
    assert!(root.children().iter().all(Element::is_tag));
}

#[test]
fn flattening_at_every_depth() {
    let root = parse("<a><b><c/></b></a>", TreeShape::Flat);
    assert_eq!(names(&root), vec![Some("b"), Some("c")]);
    assert!(root.children()[0].children().is_empty());

    let root = parse("<a><b x='1'><c><d y='2'/></c></b>tail</a>", TreeShape::Flat);
    assert_eq!(names(&root), vec![Some("b"), Some("c"), Some("d"), None]);
    assert_eq!(root.children()[0].attribute("x"), Some("1"));
    assert_eq!(root.children()[2].attribute("y"), Some("2"));
    assert_eq!(root.children()[3].text(), Some("tail"));
}

#[test]
fn text_lands_on_target() {
    let root = parse("<a>x<b>y</b>z</a>", TreeShape::Flat);
    assert_eq!(root.children().len(), 4);
    assert_eq!(root.children()[0].text(), Some("x"));
    assert_eq!(root.children()[1].name(), Some("b"));
    assert!(root.children()[1].children().is_empty());
    assert_eq!(root.children()[2].text(), Some("y"));
    assert_eq!(root.children()[3].text(), Some("z"));
}

#[test]
fn nested_shape() {
    let root = parse("<a>x<b>y<c/></b>z</a>", TreeShape::Nested);
    assert_eq!(root.name(), Some("a"));
    assert_eq!(names(&root), vec![None, Some("b"), None]);
    let b = &root.children()[1];
    assert_eq!(names(b), vec![None, Some("c")]);
    assert_eq!(b.children()[0].text(), Some("y"));
    assert_eq!(root.inner_text(), "xz");

    let root = parse("<a><b><c/></b><d/></a>", TreeShape::Nested);
    assert_eq!(names(&root), vec![Some("b"), Some("d")]);
    assert_eq!(names(&root.children()[0]), vec![Some("c")]);
}

#[test]
fn chunk_boundaries_are_invisible() {
    let whole = parse("<a>text</a>", TreeShape::Flat);
    assert_eq!(parse_split(&["<a", ">text</a>"], TreeShape::Flat), whole);
    assert_eq!(
        parse_split(&["<a>te", "", "xt</", "a>"], TreeShape::Flat),
        whole
    );

    let xml = "<r id='1'>a&amp;b<x y='&lt;'/>c<![CDATA[d]]>e<z>f</z></r>";
    for shape in [TreeShape::Flat, TreeShape::Nested] {
        let whole = parse(xml, shape);
        let bytes: Vec<String> = xml.chars().map(String::from).collect();
        let chunks: Vec<&str> = bytes.iter().map(String::as_str).collect();
        assert_eq!(parse_split(&chunks, shape), whole);
        for at in 1..xml.len() {
            assert_eq!(parse_split(&[&xml[..at], &xml[at..]], shape), whole);
        }
    }
}

#[test]
fn malformed_input() {
    let mut root = Element::new();
    let mut parser = ElementParser::new().unwrap();
    assert_eq!(
        parser.feed_into("<a><b></a>", &mut root),
        Err(ParseError::BadXml(description::TAG_MISMATCH))
    );
    assert_eq!(parser.location().bytes, 9);
    assert_eq!(
        parser.feed("</b></a>"),
        Err(ParseError::BadXml(description::REUSE_WITHOUT_RESET))
    );
    drop(parser);

    // no rollback
    assert_eq!(root.name(), Some("a"));
    assert_eq!(names(&root), vec![Some("b")]);
}

#[test]
fn reset_after_error() {
    let mut first = Element::new();
    let mut second = Element::new();
    let mut parser = ElementParser::new().unwrap();
    assert!(parser.feed_into("<a>&bad;</a>", &mut first).is_err());
    parser.reset();
    assert_eq!(parser.depth(), 0);
    parser.feed_into("<b/>", &mut second).unwrap();
    parser.finish().unwrap();
    drop(parser);
    assert_eq!(first.name(), Some("a"));
    assert_eq!(second.name(), Some("b"));
}

#[test]
fn reuse_with_new_targets() {
    let mut first = Element::new();
    let mut second = Element::new();
    let mut parser = ElementParser::new().unwrap();
    parser.feed_into("<a k='1'><x/>one</a>", &mut first).unwrap();
    assert_eq!(parser.depth(), 0);
    parser.feed_into("<b k='2'>", &mut second).unwrap();
    parser.feed("<y/>two</b>").unwrap();
    parser.finish().unwrap();
    drop(parser);

    assert_eq!(first.name(), Some("a"));
    assert_eq!(first.attribute("k"), Some("1"));
    assert_eq!(names(&first), vec![Some("x"), None]);
    assert_eq!(second.name(), Some("b"));
    assert_eq!(second.attribute("k"), Some("2"));
    assert_eq!(names(&second), vec![Some("y"), None]);
    assert_eq!(second.inner_text(), "two");
}

#[test]
fn unfinished_document_spills_into_next_target() {
    let mut first = Element::new();
    let mut second = Element::new();
    let mut parser = ElementParser::new().unwrap();
    parser.feed_into("<a><b>", &mut first).unwrap();
    assert_eq!(parser.depth(), 2);
    parser.feed_into("<c/></b></a>", &mut second).unwrap();
    assert_eq!(parser.depth(), 0);
    parser.finish().unwrap();
    drop(parser);

    assert_eq!(first.name(), Some("a"));
    assert_eq!(names(&first), vec![Some("b")]);
    assert_eq!(second.name(), Some(""));
    assert_eq!(names(&second), vec![Some("c")]);
}

#[test]
fn nested_shape_rebind_mid_document() {
    let mut first = Element::new();
    let mut second = Element::new();
    let mut parser = ElementParser::with_shape(TreeShape::Nested).unwrap();
    parser.feed_into("<a><b><c>", &mut first).unwrap();
    parser.feed_into("<d/>x</c></b><e/></a>", &mut second).unwrap();
    parser.finish().unwrap();
    drop(parser);

    assert_eq!(names(&first), vec![Some("b")]);
    assert_eq!(names(&first.children()[0]), vec![Some("c")]);
    assert_eq!(names(&second), vec![Some("d"), None, Some("e")]);
}

#[test]
fn missing_target() {
    let mut parser = ElementParser::<Element>::new().unwrap();
    assert_eq!(parser.feed("  \n"), Ok(()));
    assert_eq!(parser.feed("<a/>"), Err(ParseError::NoTarget));

    let mut root = Element::new();
    let mut parser = ElementParser::new().unwrap();
    parser.feed_into("<a>", &mut root).unwrap();
    let released = parser.release();
    assert!(released.is_some());
    assert_eq!(parser.feed("text</a>"), Err(ParseError::NoTarget));
    drop(parser);
    assert_eq!(root.name(), Some("a"));
    assert!(root.children().is_empty());
}

#[test]
fn finish_checks_completeness() {
    let mut root = Element::new();
    let mut parser = ElementParser::new().unwrap();
    parser.feed_into("<a>", &mut root).unwrap();
    assert_eq!(
        parser.finish(),
        Err(ParseError::BadXml(description::DOC_OPEN_TAGS))
    );
    parser.feed("</a>").unwrap();
    assert_eq!(parser.finish(), Ok(()));
}

#[test]
fn shape_and_defaults() {
    let parser = ElementParser::<Element>::new().unwrap();
    assert_eq!(parser.shape(), TreeShape::Flat);
    assert_eq!(parser.depth(), 0);
    assert_eq!(parser.root_level(), RootLevel::Document);
    let parser = ElementParser::<Element>::with_shape(TreeShape::Nested).unwrap();
    assert_eq!(parser.shape(), TreeShape::Nested);
    assert_eq!(parser.root_level(), RootLevel::Document);
    let parser = ElementParser::<Element>::for_stream(TreeShape::Nested).unwrap();
    assert_eq!(parser.shape(), TreeShape::Nested);
    assert_eq!(parser.root_level(), RootLevel::Stream);
}

#[test]
fn stream_of_elements() {
    let mut first = Element::new();
    let mut second = Element::new();
    let mut parser = ElementParser::for_stream(TreeShape::Flat).unwrap();
    parser.feed_into("<stream><msg to='x'>hi</msg>", &mut first).unwrap();
    assert_eq!(parser.depth(), 1);
    parser.feed_into("<msg to='y'/>", &mut second).unwrap();
    assert_eq!(parser.depth(), 1);
    drop(parser);

    assert_eq!(first.name(), Some("msg"));
    assert_eq!(first.attribute("to"), Some("x"));
    assert_eq!(names(&first), vec![None]);
    assert_eq!(first.inner_text(), "hi");
    assert_eq!(second.name(), Some("msg"));
    assert_eq!(second.attribute("to"), Some("y"));
    assert!(second.children().is_empty());
}

#[test]
fn stream_in_chunks() {
    let mut first = Element::new();
    let mut second = Element::new();
    let mut parser = ElementParser::for_stream(TreeShape::Nested).unwrap();
    parser.feed("<stream ver='1'>\n").unwrap();
    parser.feed_into("<iq id", &mut first).unwrap();
    parser.feed("='1'><q><r/>a</q>b</i").unwrap();
    parser.feed("q>\n ").unwrap();
    parser.feed_into("<m><b>t</b></m>", &mut second).unwrap();
    parser.feed("\n</stream>").unwrap();
    parser.finish().unwrap();
    drop(parser);

    assert_eq!(first.name(), Some("iq"));
    assert_eq!(first.attribute("id"), Some("1"));
    assert_eq!(names(&first), vec![Some("q"), None]);
    assert_eq!(names(&first.children()[0]), vec![Some("r"), None]);
    assert_eq!(first.inner_text(), "b");
    assert_eq!(second.name(), Some("m"));
    assert_eq!(names(&second), vec![Some("b")]);
    assert_eq!(second.children()[0].inner_text(), "t");
}

#[test]
fn stream_wrapper_needs_no_target() {
    let mut parser = ElementParser::<Element>::for_stream(TreeShape::Flat).unwrap();
    assert_eq!(parser.feed("<stream>  "), Ok(()));
    assert_eq!(parser.feed("<msg/>"), Err(ParseError::NoTarget));

    let mut root = Element::new();
    let mut parser = ElementParser::for_stream(TreeShape::Flat).unwrap();
    parser.feed_into("<stream><a><b/>", &mut root).unwrap();
    parser.release();
    assert_eq!(parser.feed("</a>text"), Ok(()));
    assert_eq!(parser.feed("</stream>"), Ok(()));
    assert_eq!(parser.finish(), Ok(()));
    drop(parser);
    assert_eq!(root.name(), Some("a"));
    assert_eq!(names(&root), vec![Some("b")]);
}

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
    children: Vec<Outline>,
}

impl ElementSink for Outline {
    fn new_tag(name: &str) -> Self {
        Outline {
            lines: vec![format!("tag {}", name)],
            children: Vec::new(),
        }
    }

    fn new_text(text: &str) -> Self {
        Outline {
            lines: vec![format!("text {}", text)],
            children: Vec::new(),
        }
    }

    fn set_name(&mut self, name: &str) {
        self.lines.push(format!("name {}", name));
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.lines.push(format!("attr {}={}", name, value));
    }

    fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }
}

#[test]
fn custom_sink() {
    let mut root = Outline::default();
    let mut parser = ElementParser::new().unwrap();
    parser.feed_into("<a k='v'><b x='y'/>t</a>", &mut root).unwrap();
    drop(parser);
    assert_eq!(root.lines, vec!["name a", "attr k=v"]);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].lines, vec!["tag b", "attr x=y"]);
    assert_eq!(root.children[1].lines, vec!["text t"]);
}

#[test]
fn flat_only_sink_in_nested_shape() {
    let mut root = Outline::default();
    let mut parser = ElementParser::with_shape(TreeShape::Nested).unwrap();
    assert_eq!(
        parser.feed_into("<a><b>t</b></a>", &mut root),
        Err(ParseError::MissingNode)
    );
}
