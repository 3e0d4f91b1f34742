/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Target cannot be read while the parser may still write into it:
/// ```compile_fail
/// use chunked_element::{Element, ElementParser};
/// let mut root = Element::new();
/// let mut parser = ElementParser::new().unwrap();
/// parser.feed_into("<a>", &mut root).unwrap();
/// println!("{:?}", root.name());
/// parser.feed("</a>").unwrap();
/// ```
///
/// Target cannot be dropped before the parser:
/// ```compile_fail
/// use chunked_element::{Element, ElementParser};
/// let mut parser = ElementParser::new().unwrap();
/// {
///     let mut root = Element::new();
///     parser.feed_into("<a>", &mut root).unwrap();
/// }
/// parser.feed("</a>").unwrap();
/// ```
///
/// Nodes given to the event handler cannot outlive the handler call:
/// ```compile_fail
/// use chunked_element::{SaxEngine, SaxEvent, SaxHandler, SaxHandlerError};
/// struct Keeper<'a> {
///     last: Option<&'a str>,
/// }
/// impl<'a> SaxHandler for Keeper<'a> {
///     fn handle_event(&mut self, event: &SaxEvent) -> Result<(), SaxHandlerError> {
///         if let SaxEvent::Text(run) = event {
///             self.last = Some(run);
///         }
///         Ok(())
///     }
/// }
/// ```
#[cfg(doctest)]
struct MustNotCompileTests;
