/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Type of the error which happened while pushing bytes into the engine.
///
/// The location of the problem is available via the
/// [location()](super::SaxEngine::location) method.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum SaxError {
    /// Engine could not allocate the memory needed for its buffers.
    NoMemory,

    /// A syntax or well-formedness error is encountered in the XML input.
    ///
    /// The argument is a short description of the problem, suitable for
    /// showing to the user together with the location.
    BadXml(&'static str),

    /// The event handler returned [SaxHandlerError::Abort].
    ///
    /// This lets the handler stop the processing while signalling that
    /// the interruption is not caused by the input itself.
    HandlerAbort,
}

impl std::fmt::Display for SaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaxError::NoMemory => write!(f, "not enough memory"),
            SaxError::BadXml(msg) => write!(f, "invalid xml syntax: {}", msg),
            SaxError::HandlerAbort => write!(f, "aborted by the event handler"),
        }
    }
}

impl std::error::Error for SaxError {}

/// Error returned from [SaxHandler](super::SaxHandler) implementations.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum SaxHandlerError {
    Abort,
}

impl From<SaxHandlerError> for SaxError {
    fn from(_: SaxHandlerError) -> Self {
        SaxError::HandlerAbort
    }
}

pub(crate) mod description {
    pub(crate) const REUSE_WITHOUT_RESET: &str = "cannot continue after an error without a reset";
    pub(crate) const UTF8_INVALID_CONT_BYTE: &str = "invalid UTF8 continuation byte";
    pub(crate) const UTF8_OVERLONG_SEQUENCE: &str = "overlong UTF8 sequence";
    pub(crate) const UTF8_INVALID_PREFIX_BYTE: &str = "invalid UTF8 prefix byte";
    pub(crate) const CHAR_INVALID: &str = "invalid XML character";
    pub(crate) const DOC_NO_CONTENT: &str = "document has no root tag";
    pub(crate) const DOC_OPEN_TAGS: &str = "document has unclosed tags";
    pub(crate) const DOC_OPEN_MARKUP: &str = "document has unfinished markup";
    pub(crate) const DOC_CDATA_WITHOUT_PARENT: &str =
        "character data not allowed outside of the root tag";
    pub(crate) const TEXT_CDATA_SECTION_END: &str =
        "character data cannot contain the ']]>' sequence";
    pub(crate) const TAG_CLOSE_WITHOUT_OPEN: &str = "close tag without open";
    pub(crate) const TAG_MISMATCH: &str = "start and end tags have different names";
    pub(crate) const TAG_WHITESPACE_START: &str = "tag cannot start with whitespace";
    pub(crate) const TAG_OUTSIDE_ROOT: &str = "tags cannot be outside of the root tag";
    pub(crate) const TAG_EMPTY_NAME: &str = "tag has no name";
    pub(crate) const TAG_BAD_NAME: &str = "tag names cannot have '<', '=', '&' or quotes";
    pub(crate) const TAG_DOUBLE_END: &str = "end tag has standalone ending too";
    pub(crate) const TAG_END_TAG_ATTRIBUTES: &str = "end tag cannot have attributes";
    pub(crate) const TAG_EMPTY_TAG_MISSING_END: &str = "empty element tags must end after the '/'";
    pub(crate) const TAG_ATTRIBUTE_WITHOUT_EQUAL: &str =
        "tag attributes must have '=' before the value";
    pub(crate) const TAG_ATTRIBUTE_WITHOUT_QUOTE: &str =
        "tag attribute value must be double or single quoted";
    pub(crate) const TAG_ATTRIBUTE_BAD_NAME: &str =
        "tag attribute names cannot have '/', '<', '>' or quotes";
    pub(crate) const TAG_ATTRIBUTE_BAD_VALUE: &str =
        "tag attribute value cannot have '<' character without a reference";
    pub(crate) const TAG_ATTRIBUTE_DUPLICATE: &str = "attribute name already used in this tag";
    pub(crate) const TAG_ATTRIBUTE_NO_SPACE: &str = "attributes must be separated by whitespace";
    pub(crate) const REFERENCE_INVALID_DECIMAL: &str = "non digit in decimal character reference";
    pub(crate) const REFERENCE_INVALID_HEX: &str = "non hex digit in hexadecimal character reference";
    pub(crate) const REFERENCE_EMPTY: &str = "character reference has no digits";
    pub(crate) const REFERENCE_CUSTOM_ENTITY: &str =
        "non-predefined entity references are not supported";
    pub(crate) const COMMENT_MISSING_DASH: &str = "comment tag should start with double dash";
    pub(crate) const COMMENT_MISSING_END: &str = "comment tag should end after double dash";
    pub(crate) const MARKUP_CDATA_SECTION_BAD_START: &str =
        "character data sections must start with '[CDATA['";
    pub(crate) const MARKUP_CDATA_SECTION_OUTSIDE_ROOT: &str =
        "character data sections cannot be outside of the root tag";
    pub(crate) const MARKUP_DOCTYPE_BAD_START: &str = "doctype must start with 'DOCTYPE '";
    pub(crate) const MARKUP_DOCTYPE_MISPLACED: &str = "doctype must come before the root tag";
    pub(crate) const MARKUP_UNRECOGNIZED: &str =
        "markup is not a comment, character data section, or document type declaration";
}
