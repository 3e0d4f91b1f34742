/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod nocompile;

pub use error::ParseError;

use crate::Element;
use crate::ElementSink;
use crate::Location;
use crate::SaxAttributes;
use crate::SaxEngine;
use crate::SaxError;
use crate::SaxEvent;
use crate::SaxHandler;
use crate::SaxHandlerError;

/// Where the parser attaches the nodes found inside the root element.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TreeShape {
    /// Every element and text run below the root element becomes a direct
    /// child of the target, in document order.
    ///
    /// `<a><b><c/></b>x</a>` gives the target `a` with the children `b`, `c`
    /// and `"x"`, and `b` stays empty.
    #[default]
    Flat,

    /// Nodes are attached to the element they appear in, rebuilding the
    /// tree of the document under the target.
    Nested,
}

/// Which element of the input is written onto the target.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RootLevel {
    /// The root element of the document becomes the target.
    #[default]
    Document,

    /// The root element is a wrapper which stays open for the whole
    /// stream, and each of its children becomes a target in turn.
    ///
    /// With `<stream><msg to='x'>hi</msg><msg to='y'/>`, binding a new
    /// target before each `msg` gives one target with `msg to='x'` and the
    /// text `"hi"`, and another with `msg to='y'`. Text directly inside the
    /// wrapper belongs to no target and is dropped.
    Stream,
}

impl RootLevel {
    // Depth at which an opened element is written onto the target.
    fn target_depth(self) -> usize {
        match self {
            RootLevel::Document => 0,
            RootLevel::Stream => 1,
        }
    }
}

struct Builder<'t, E> {
    target: Option<&'t mut E>,
    depth: usize,
    shape: TreeShape,
    root: RootLevel,
    open_path: Vec<usize>,
    failure: Option<ParseError>,
}

impl<'t, E: ElementSink> Builder<'t, E> {
    fn new(shape: TreeShape, root: RootLevel) -> Self {
        Builder {
            target: None,
            depth: 0,
            shape,
            root,
            open_path: Vec::new(),
            failure: None,
        }
    }

    // Node which receives new children: the target itself, or in the nested
    // shape the innermost open element below it.
    fn parent(&mut self) -> Result<&mut E, SaxHandlerError> {
        let Some(mut node) = self.target.as_deref_mut() else {
            self.failure = Some(ParseError::NoTarget);
            return Err(SaxHandlerError::Abort);
        };
        for &index in &self.open_path {
            match node.child_mut(index) {
                Some(child) => node = child,
                None => {
                    self.failure = Some(ParseError::MissingNode);
                    return Err(SaxHandlerError::Abort);
                }
            }
        }
        Ok(node)
    }

    fn open(&mut self, name: &str, attributes: &SaxAttributes) -> Result<(), SaxHandlerError> {
        let target_depth = self.root.target_depth();
        if self.depth < target_depth {
            log::trace!("stream wrapper <{}> opened", name);
        } else if self.depth == target_depth {
            let Some(target) = self.target.as_deref_mut() else {
                self.failure = Some(ParseError::NoTarget);
                return Err(SaxHandlerError::Abort);
            };
            target.set_name(name);
            for (key, value) in attributes {
                target.set_attribute(key, value);
            }
        } else {
            let mut child = E::new_tag(name);
            for (key, value) in attributes {
                child.set_attribute(key, value);
            }
            let parent = self.parent()?;
            let index = parent.child_count();
            parent.add_child(child);
            if self.shape == TreeShape::Nested {
                self.open_path.push(index);
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.shape == TreeShape::Nested && self.depth > self.root.target_depth() {
            self.open_path.pop();
        }
    }

    fn text(&mut self, run: &str) -> Result<(), SaxHandlerError> {
        if self.depth <= self.root.target_depth() {
            log::trace!("dropping {} bytes of text outside of a target", run.len());
            return Ok(());
        }
        self.parent()?.add_child(E::new_text(run));
        Ok(())
    }
}

impl<E: ElementSink> SaxHandler for Builder<'_, E> {
    fn handle_event(&mut self, event: &SaxEvent) -> Result<(), SaxHandlerError> {
        match event {
            SaxEvent::Open { name, attributes } => {
                log::trace!(
                    "open <{}> with {} attributes at depth {}",
                    name,
                    attributes.len(),
                    self.depth
                );
                self.open(name, attributes)
            }
            SaxEvent::Close(name) => {
                log::trace!("close </{}> at depth {}", name, self.depth);
                self.close();
                Ok(())
            }
            SaxEvent::Text(run) => {
                log::trace!("text of {} bytes at depth {}", run.len(), self.depth);
                self.text(run)
            }
        }
    }
}

/// Incremental XML parser which fills in a caller supplied element.
///
/// The input can be fed in chunks of any size; chunk boundaries do not
/// change the result. The root element of the input becomes the target
/// element itself: its name and attributes are set on the target, and the
/// rest of the content is appended as children according to the
/// [TreeShape]. With [RootLevel::Stream] the children of the root element
/// take this role instead, one target each.
///
/// # Examples
///
/// ```
/// use chunked_element::{Element, ElementParser};
///
/// let mut root = Element::new();
/// let mut parser = ElementParser::new()?;
/// parser.feed_into("<msg to='bob'>hel", &mut root)?;
/// parser.feed("lo<b/></msg>")?;
/// parser.finish()?;
/// drop(parser);
///
/// assert_eq!(root.name(), Some("msg"));
/// assert_eq!(root.attribute("to"), Some("bob"));
/// assert_eq!(root.children()[0].text(), Some("hello"));
/// assert_eq!(root.children()[1].name(), Some("b"));
/// # Ok::<(), chunked_element::ParseError>(())
/// ```
///
/// The target stays borrowed while the parser is alive. Use
/// [release()](ElementParser::release) or drop the parser to get it back.
pub struct ElementParser<'t, E: ElementSink = Element> {
    engine: SaxEngine,
    builder: Builder<'t, E>,
}

impl<'t, E: ElementSink> ElementParser<'t, E> {
    /// Creates a parser with the [flat](TreeShape::Flat) tree shape which
    /// writes the [document](RootLevel::Document) root onto the target.
    pub fn new() -> Result<Self, ParseError> {
        Self::with_options(TreeShape::default(), RootLevel::default())
    }

    pub fn with_shape(shape: TreeShape) -> Result<Self, ParseError> {
        Self::with_options(shape, RootLevel::default())
    }

    /// Creates a parser for a stream of elements inside a wrapper element.
    ///
    /// ```
    /// use chunked_element::{Element, ElementParser, TreeShape};
    ///
    /// let mut first = Element::new();
    /// let mut second = Element::new();
    /// let mut parser = ElementParser::for_stream(TreeShape::Flat)?;
    /// parser.feed("<stream>")?;
    /// parser.feed_into("<msg to='x'>hi</msg>", &mut first)?;
    /// parser.feed_into("<msg to='y'/>", &mut second)?;
    /// drop(parser);
    ///
    /// assert_eq!(first.attribute("to"), Some("x"));
    /// assert_eq!(first.inner_text(), "hi");
    /// assert_eq!(second.attribute("to"), Some("y"));
    /// # Ok::<(), chunked_element::ParseError>(())
    /// ```
    pub fn for_stream(shape: TreeShape) -> Result<Self, ParseError> {
        Self::with_options(shape, RootLevel::Stream)
    }

    pub fn with_options(shape: TreeShape, root: RootLevel) -> Result<Self, ParseError> {
        let engine = SaxEngine::new().map_err(|err| {
            log::error!("cannot create the xml engine: {}", err);
            ParseError::Construction
        })?;
        Ok(ElementParser {
            engine,
            builder: Builder::new(shape, root),
        })
    }

    pub fn shape(&self) -> TreeShape {
        self.builder.shape
    }

    pub fn root_level(&self) -> RootLevel {
        self.builder.root
    }

    /// Number of elements opened and not closed yet.
    pub fn depth(&self) -> usize {
        self.builder.depth
    }

    /// Position of the last parsed byte, counted since the current document
    /// started.
    pub fn location(&self) -> Location {
        self.engine.location()
    }

    /// Parses the next chunk into the currently bound target.
    ///
    /// Events which need a target fail with [ParseError::NoTarget] if none
    /// is bound. Whitespace before the root element needs no target, and
    /// neither does the wrapper of a [stream](RootLevel::Stream).
    pub fn feed(&mut self, chunk: impl AsRef<[u8]>) -> Result<(), ParseError> {
        match self.engine.parse_bytes(&mut self.builder, chunk.as_ref()) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = match err {
                    SaxError::HandlerAbort => {
                        self.builder.failure.take().unwrap_or(ParseError::NoTarget)
                    }
                    err => ParseError::from(err),
                };
                log::debug!("parse failed at {}: {}", self.engine.location(), err);
                Err(err)
            }
        }
    }

    /// Binds `target` as the element to populate and parses the chunk.
    ///
    /// The binding stays in effect for the following [feed()](ElementParser::feed)
    /// calls. If the previous document has been completed, a new document
    /// starts with this chunk. In a [stream](RootLevel::Stream), a target
    /// bound between two children of the wrapper receives the next child.
    /// Otherwise, if elements are still open, they continue into the new
    /// target.
    pub fn feed_into(
        &mut self,
        chunk: impl AsRef<[u8]>,
        target: &'t mut E,
    ) -> Result<(), ParseError> {
        self.bind(target);
        self.feed(chunk)
    }

    fn bind(&mut self, target: &'t mut E) {
        let depth = self.builder.depth;
        if depth == 0 && self.engine.is_document_complete() {
            log::debug!("new target bound, starting a new document");
            self.engine.reset();
        } else if depth <= self.builder.root.target_depth() {
            log::debug!("new target bound at depth {}", depth);
        } else {
            log::warn!(
                "new target bound with {} open elements, continuing the old document",
                self.builder.depth
            );
            self.builder.open_path.clear();
        }
        self.builder.target = Some(target);
    }

    /// Checks that the fed input forms a complete document.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        Ok(self.engine.parse_finish()?)
    }

    /// Unbinds the target and returns it.
    pub fn release(&mut self) -> Option<&'t mut E> {
        self.builder.target.take()
    }

    /// Forgets the current document and the target.
    ///
    /// This is the only way to continue after a parse error.
    pub fn reset(&mut self) {
        log::debug!("parser reset at depth {}", self.builder.depth);
        self.engine.reset();
        self.builder.target = None;
        self.builder.depth = 0;
        self.builder.open_path.clear();
        self.builder.failure = None;
    }
}

#[cfg(test)]
mod tests;
