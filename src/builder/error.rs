/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::SaxError;

/// Error returned from the [ElementParser](super::ElementParser) methods.
///
/// Mutations made on the target before a failure are not rolled back.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum ParseError {
    /// The engine could not be created.
    Construction,

    /// Memory allocation failed while parsing.
    NoMemory,

    /// The input is not well-formed XML.
    ///
    /// The argument describes the problem, the position is available via
    /// [location()](super::ElementParser::location).
    BadXml(&'static str),

    /// Input produced a node while no target element was bound.
    NoTarget,

    /// The innermost open element could not be found under the target.
    ///
    /// Only happens in the nested tree shape, with an
    /// [ElementSink](crate::ElementSink) which does not return the children
    /// it was given.
    MissingNode,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Construction => write!(f, "cannot create the xml engine"),
            ParseError::NoMemory => write!(f, "not enough memory"),
            ParseError::BadXml(msg) => write!(f, "invalid XML syntax: {}", msg),
            ParseError::NoTarget => write!(f, "no target element to populate"),
            ParseError::MissingNode => write!(f, "open element is missing from the target"),
        }
    }
}

impl Error for ParseError {}

impl From<SaxError> for ParseError {
    fn from(err: SaxError) -> Self {
        match err {
            SaxError::NoMemory => ParseError::NoMemory,
            SaxError::BadXml(msg) => ParseError::BadXml(msg),
            SaxError::HandlerAbort => ParseError::NoTarget,
        }
    }
}
