/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::SaxError;
use super::error::description;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Span {
    name_end: usize,
    value_end: usize,
}

/// Attributes of a single start tag, in document order.
///
/// Names and values are stored back to back in one string so that a tag
/// with many attributes does not allocate per attribute. References in
/// the values are already replaced with the actual characters.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct SaxAttributes {
    text: String,
    spans: Vec<Span>,
}

impl SaxAttributes {
    pub(super) fn new() -> Self {
        SaxAttributes {
            text: String::new(),
            spans: Vec::new(),
        }
    }

    pub(super) fn reserve(&mut self, text: usize, count: usize) -> Result<(), SaxError> {
        self.text
            .try_reserve_exact(text)
            .map_err(|_| SaxError::NoMemory)?;
        self.spans
            .try_reserve_exact(count)
            .map_err(|_| SaxError::NoMemory)
    }

    pub(super) fn clear(&mut self) {
        self.text.clear();
        self.spans.clear();
    }

    pub(super) fn push(&mut self, name: &[u8], value: &[u8]) -> Result<(), SaxError> {
        let bad_char = |_| SaxError::BadXml(description::CHAR_INVALID);
        let name = std::str::from_utf8(name).map_err(bad_char)?;
        let value = std::str::from_utf8(value).map_err(bad_char)?;
        if self.get(name).is_some() {
            return Err(SaxError::BadXml(description::TAG_ATTRIBUTE_DUPLICATE));
        }
        self.text
            .try_reserve(name.len() + value.len())
            .map_err(|_| SaxError::NoMemory)?;
        self.spans.try_reserve(1).map_err(|_| SaxError::NoMemory)?;
        self.text.push_str(name);
        let name_end = self.text.len();
        self.text.push_str(value);
        self.spans.push(Span {
            name_end,
            value_end: self.text.len(),
        });
        Ok(())
    }

    /// Number of attributes in the tag.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the value of the named attribute if the tag has it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Iterates over the (name, value) pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            attributes: self,
            index: 0,
        }
    }
}

pub struct Iter<'a> {
    attributes: &'a SaxAttributes,
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.attributes.spans.get(self.index)?;
        let start = match self.index {
            0 => 0,
            i => self.attributes.spans[i - 1].value_end,
        };
        self.index += 1;
        let text = &self.attributes.text;
        Some((&text[start..span.name_end], &text[span.name_end..span.value_end]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.attributes.spans.len() - self.index;
        (left, Some(left))
    }
}

impl<'a> IntoIterator for &'a SaxAttributes {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_in_order() {
        let mut attributes = SaxAttributes::new();
        assert!(attributes.is_empty());
        attributes.push(b"a", b"1").unwrap();
        attributes.push(b"bb", b"").unwrap();
        attributes.push(b"c", b"three").unwrap();
        assert_eq!(attributes.len(), 3);
        let pairs: Vec<(&str, &str)> = attributes.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("bb", ""), ("c", "three")]);
        assert_eq!(attributes.get("bb"), Some(""));
        assert_eq!(attributes.get("c"), Some("three"));
        assert_eq!(attributes.get("d"), None);
    }

    #[test]
    fn duplicate_names() {
        let mut attributes = SaxAttributes::new();
        attributes.push(b"a", b"1").unwrap();
        assert_eq!(
            attributes.push(b"a", b"2"),
            Err(SaxError::BadXml(description::TAG_ATTRIBUTE_DUPLICATE))
        );
        assert_eq!(attributes.get("a"), Some("1"));
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut attributes = SaxAttributes::new();
        attributes.push(b"x", b"y").unwrap();
        attributes.clear();
        assert!(attributes.is_empty());
        assert_eq!(attributes.iter().next(), None);
        attributes.push(b"x", b"z").unwrap();
        assert_eq!(attributes.get("x"), Some("z"));
    }
}
