/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// The mutation surface needed by the [ElementParser](crate::ElementParser).
///
/// [Element] implements this, but you can implement it on your own node
/// type to let the parser build straight into your data model.
///
/// The parser sets the name of a tag before adding any attribute or child
/// to it, and never calls the tag methods on a node created with
/// [new_text()](ElementSink::new_text).
///
/// Only the constructors and the three mutators `set_name`,
/// `set_attribute` and `add_child` have to be written.
pub trait ElementSink: Sized {
    /// Creates a detached tag node with the given name.
    fn new_tag(name: &str) -> Self;

    /// Creates a detached text node.
    fn new_text(text: &str) -> Self;

    fn set_name(&mut self, name: &str);

    fn set_attribute(&mut self, name: &str, value: &str);

    /// Appends a child node after the existing children.
    fn add_child(&mut self, child: Self);

    /// Number of children added so far.
    ///
    /// Only the [nested](crate::TreeShape::Nested) tree shape needs this
    /// and [child_mut()](ElementSink::child_mut). The defaults suit sinks
    /// which only keep the flat shape; the nested shape fails on them with
    /// [ParseError::MissingNode](crate::ParseError::MissingNode).
    fn child_count(&self) -> usize {
        0
    }

    fn child_mut(&mut self, _index: usize) -> Option<&mut Self> {
        None
    }
}

/// An XML element or a text run.
///
/// Each node owns its children; dropping a node drops the whole subtree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element {
    Tag {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Element>,
    },
    Text(String),
}

impl Element {
    /// Creates an empty tag with no name, ready to be filled by a parser.
    pub fn new() -> Self {
        Element::Tag {
            name: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Element::Tag { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Element::Text(_))
    }

    /// Returns the tag name, or `None` for text nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::Tag { name, .. } => Some(name),
            Element::Text(_) => None,
        }
    }

    /// Returns the text of a text node, or `None` for tags.
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text(text) => Some(text),
            Element::Tag { .. } => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value)
    }

    /// Iterates over the (name, value) pairs in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        let attributes: &[(String, String)] = match self {
            Element::Tag { attributes, .. } => attributes,
            Element::Text(_) => &[],
        };
        attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::Tag { children, .. } => children,
            Element::Text(_) => &[],
        }
    }

    /// Concatenated text of the direct text children.
    pub fn inner_text(&self) -> String {
        self.children().iter().filter_map(Element::text).collect()
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementSink for Element {
    fn new_tag(name: &str) -> Self {
        Element::Tag {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn new_text(text: &str) -> Self {
        Element::Text(text.to_string())
    }

    fn set_name(&mut self, new_name: &str) {
        if let Element::Tag { name, .. } = self {
            new_name.clone_into(name);
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if let Element::Tag { attributes, .. } = self {
            match attributes.iter_mut().find(|(attr, _)| attr == name) {
                Some((_, old)) => value.clone_into(old),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn add_child(&mut self, child: Self) {
        if let Element::Tag { children, .. } = self {
            children.push(child);
        }
    }

    fn child_count(&self) -> usize {
        self.children().len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        match self {
            Element::Tag { children, .. } => children.get_mut(index),
            Element::Text(_) => None,
        }
    }
}
