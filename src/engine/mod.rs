/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod attributes;
mod error;

pub use attributes::Iter as SaxAttributesIter;
pub use attributes::SaxAttributes;
pub use error::SaxError;
pub use error::SaxHandlerError;
pub(crate) use error::description;

/// An event emitted by the [SaxEngine].
///
/// Borrowed strings point into the engine buffers and are only valid
/// during the handler call.
#[derive(Debug, Eq, PartialEq)]
pub enum SaxEvent<'a> {
    /// A complete start tag or empty element tag with all of its attributes.
    ///
    /// An empty element tag is followed by a [Close](SaxEvent::Close) event
    /// right away.
    Open {
        name: &'a str,
        attributes: &'a SaxAttributes,
    },

    /// An end tag. The name is already verified against the start tag.
    Close(&'a str),

    /// A run of character data between two pieces of markup.
    ///
    /// The run is reported once, in full, no matter how the input was split
    /// between [parse_bytes()](SaxEngine::parse_bytes) calls. References are
    /// replaced and CDATA section contents are included verbatim.
    ///
    /// A run longer than [TEXT_FLUSH_SIZE] bytes is reported in several
    /// pieces. The split points depend only on the run itself, never on the
    /// chunks of the input, and always fall on character boundaries.
    Text(&'a str),
}

/// Receiver of the engine events.
pub trait SaxHandler {
    fn handle_event(&mut self, event: &SaxEvent) -> Result<(), SaxHandlerError>;
}

/// Position of the last consumed byte in the input stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// Number of bytes consumed.
    pub bytes: usize,
    /// Number of newline characters consumed.
    pub lines: usize,
    /// Number of bytes consumed after the last newline.
    pub column: usize,
}

impl Location {
    fn advance(&mut self, c: u8) {
        self.bytes += 1;
        if c == b'\n' {
            self.lines += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.lines, self.column
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Prolog,
    TagStart,
    TagName,
    EndTagWhitespace,
    EmptyTagEnd,
    AttributeWhitespace,
    AttributeName,
    AttributeEq,
    AttributeValueStart,
    AttributeValue,
    AttributeEnd,
    CData,
    Reference,
    Entity,
    CharReference,
    CharReferenceBody,
    HexCharReference,
    Markup,
    CDataSectionStart,
    CDataSectionBody,
    CDataSectionMaybeEnd,
    CDataSectionMaybeEnd2,
    CommentStart,
    CommentBody,
    CommentMaybeEnd,
    CommentEnd,
    PI,
    PIEnd,
    DoctypeStart,
    DoctypeWhitespace,
    DoctypeSkip,
    DoctypeMarkupDecl,
    Epilog,
}

const INITIAL_BUFFER_CAPACITY: usize = 128;

const INITIAL_ATTRIBUTE_COUNT: usize = 8;

const REF_BUFFER_SIZE: usize = 8;

/// Buffered character data is reported once it reaches this many bytes.
pub const TEXT_FLUSH_SIZE: usize = 64 * 1024;

const CDATA_SECTION_KEYWORD: &[u8] = b"CDATA[";

const DOCTYPE_KEYWORD: &[u8] = b"OCTYPE";

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

macro_rules! xml_error {
    ($a:ident) => {
        return Err(SaxError::BadXml(description::$a))
    };
}

fn is_valid_xml_char(c: u32) -> bool {
    matches!(c, 0x09 | 0x0a | 0x0d | 0x20..=0xd7ff | 0xe000..=0xfffd | 0x10000..=0x10ffff)
}

fn store(buffer: &mut Vec<u8>, c: u8) -> Result<(), SaxError> {
    if buffer.len() == buffer.capacity() {
        let grow = std::cmp::max(buffer.capacity(), INITIAL_BUFFER_CAPACITY);
        buffer
            .try_reserve_exact(grow)
            .map_err(|_| SaxError::NoMemory)?;
    }
    buffer.push(c);
    Ok(())
}

fn store_slice(buffer: &mut Vec<u8>, bytes: &[u8]) -> Result<(), SaxError> {
    buffer
        .try_reserve(bytes.len())
        .map_err(|_| SaxError::NoMemory)?;
    buffer.extend_from_slice(bytes);
    Ok(())
}

fn new_buffer() -> Result<Vec<u8>, SaxError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(INITIAL_BUFFER_CAPACITY)
        .map_err(|_| SaxError::NoMemory)?;
    Ok(buffer)
}

fn as_str(bytes: &[u8]) -> Result<&str, SaxError> {
    std::str::from_utf8(bytes).map_err(|_| SaxError::BadXml(description::CHAR_INVALID))
}

/// Push mode XML engine.
///
/// Bytes can be given in blocks of any size, including a single byte or
/// none at all. Events are delivered to the handler synchronously, in
/// document order, before [parse_bytes()](SaxEngine::parse_bytes) returns.
///
/// ```
/// use chunked_element::{SaxEngine, SaxEvent, SaxHandler, SaxHandlerError};
///
/// struct Counter(usize);
/// impl SaxHandler for Counter {
///     fn handle_event(&mut self, event: &SaxEvent) -> Result<(), SaxHandlerError> {
///         if let SaxEvent::Open { .. } = event {
///             self.0 += 1;
///         }
///         Ok(())
///     }
/// }
///
/// let mut counter = Counter(0);
/// let mut engine = SaxEngine::new()?;
/// engine.parse_bytes(&mut counter, b"<doc><a/>")?;
/// engine.parse_bytes(&mut counter, b"<b/></doc>")?;
/// engine.parse_finish()?;
/// assert_eq!(counter.0, 3);
/// # Ok::<(), chunked_element::SaxError>(())
/// ```
pub struct SaxEngine {
    state: State,
    uni_len: u32,
    uni_left: u32,
    uni_char: u32,
    failed: bool,
    seen_content: bool,
    is_end_tag: bool,
    is_value_ref: bool,
    quote: u8,
    keyword_pos: usize,
    char_ref_value: u32,
    char_ref_digits: usize,
    text_brackets: u8,
    name: Vec<u8>,
    attribute_name: Vec<u8>,
    value: Vec<u8>,
    text: Vec<u8>,
    ref_buffer: Vec<u8>,
    open_names: Vec<u8>,
    open_starts: Vec<usize>,
    attributes: SaxAttributes,
    location: Location,
}

impl SaxEngine {
    /// Creates a new engine with its initial buffers.
    ///
    /// Fails with [SaxError::NoMemory] if the buffers cannot be allocated.
    pub fn new() -> Result<SaxEngine, SaxError> {
        let mut attributes = SaxAttributes::new();
        attributes.reserve(INITIAL_BUFFER_CAPACITY, INITIAL_ATTRIBUTE_COUNT)?;
        let mut ref_buffer = Vec::new();
        ref_buffer
            .try_reserve_exact(REF_BUFFER_SIZE)
            .map_err(|_| SaxError::NoMemory)?;
        let mut open_starts = Vec::new();
        open_starts
            .try_reserve_exact(INITIAL_ATTRIBUTE_COUNT)
            .map_err(|_| SaxError::NoMemory)?;
        Ok(SaxEngine {
            state: State::Prolog,
            uni_len: 0,
            uni_left: 0,
            uni_char: 0,
            failed: false,
            seen_content: false,
            is_end_tag: false,
            is_value_ref: false,
            quote: b'"',
            keyword_pos: 0,
            char_ref_value: 0,
            char_ref_digits: 0,
            text_brackets: 0,
            name: new_buffer()?,
            attribute_name: new_buffer()?,
            value: new_buffer()?,
            text: new_buffer()?,
            ref_buffer,
            open_names: new_buffer()?,
            open_starts,
            attributes,
            location: Location::default(),
        })
    }

    /// Returns the engine into its initial state so that a new document
    /// can be parsed. Allocated buffers are kept.
    pub fn reset(&mut self) {
        self.state = State::Prolog;
        self.uni_len = 0;
        self.uni_left = 0;
        self.uni_char = 0;
        self.failed = false;
        self.seen_content = false;
        self.is_end_tag = false;
        self.is_value_ref = false;
        self.quote = b'"';
        self.keyword_pos = 0;
        self.char_ref_value = 0;
        self.char_ref_digits = 0;
        self.text_brackets = 0;
        self.name.clear();
        self.attribute_name.clear();
        self.value.clear();
        self.text.clear();
        self.ref_buffer.clear();
        self.open_names.clear();
        self.open_starts.clear();
        self.attributes.clear();
        self.location = Location::default();
    }

    /// Position of the last consumed byte.
    ///
    /// After an error, this is the position of the offending byte.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open_starts.len()
    }

    /// True when a root element has been closed and the input consumed so
    /// far ends outside of any markup.
    pub fn is_document_complete(&self) -> bool {
        !self.failed && self.state == State::Epilog
    }

    /// Checks if the document is complete.
    ///
    /// A complete document has a root element which is closed, and has no
    /// unfinished comment or processing instruction after it.
    pub fn parse_finish(&mut self) -> Result<(), SaxError> {
        if self.failed {
            xml_error!(REUSE_WITHOUT_RESET);
        }
        if !self.seen_content {
            xml_error!(DOC_NO_CONTENT);
        }
        if self.depth() > 0 {
            xml_error!(DOC_OPEN_TAGS);
        }
        if self.state != State::Epilog {
            xml_error!(DOC_OPEN_MARKUP);
        }
        Ok(())
    }

    /// Pushes the given bytes into the engine.
    ///
    /// Any error is final: the engine must be [reset](SaxEngine::reset)
    /// before it accepts more input.
    pub fn parse_bytes(
        &mut self,
        handler: &mut impl SaxHandler,
        bytes: &[u8],
    ) -> Result<(), SaxError> {
        if self.failed {
            xml_error!(REUSE_WITHOUT_RESET);
        }
        for &c in bytes {
            if let Err(err) = self.parse_byte(handler, c) {
                self.failed = true;
                return Err(err);
            }
            self.location.advance(c);
        }
        Ok(())
    }

    fn check_utf8(&mut self, c: u8) -> Result<(), SaxError> {
        if self.uni_left > 0 {
            if c & 0xc0 != 0x80 {
                xml_error!(UTF8_INVALID_CONT_BYTE);
            }
            self.uni_char = (self.uni_char << 6) | (c as u32 & 0x3f);
            self.uni_left -= 1;
            if self.uni_left == 0 {
                let overlong = match self.uni_len {
                    2 => self.uni_char <= 0x7f,
                    3 => self.uni_char <= 0x7ff,
                    _ => self.uni_char <= 0xffff,
                };
                if overlong {
                    xml_error!(UTF8_OVERLONG_SEQUENCE);
                }
                if !is_valid_xml_char(self.uni_char) {
                    xml_error!(CHAR_INVALID);
                }
            }
        } else if c & 0x80 == 0x80 {
            if c & 0xe0 == 0xc0 {
                self.uni_len = 2;
                self.uni_char = c as u32 & 0x1f;
            } else if c & 0xf0 == 0xe0 {
                self.uni_len = 3;
                self.uni_char = c as u32 & 0x0f;
            } else if c & 0xf8 == 0xf0 {
                self.uni_len = 4;
                self.uni_char = c as u32 & 0x07;
            } else {
                xml_error!(UTF8_INVALID_PREFIX_BYTE);
            }
            self.uni_left = self.uni_len - 1;
        } else if c < 0x20 && !matches!(c, b'\t' | b'\n' | b'\r') {
            xml_error!(CHAR_INVALID);
        }
        Ok(())
    }

    fn flush_text(&mut self, handler: &mut impl SaxHandler) -> Result<(), SaxError> {
        if !self.text.is_empty() {
            let run = as_str(&self.text)?;
            handler.handle_event(&SaxEvent::Text(run))?;
            self.text.clear();
        }
        Ok(())
    }

    fn store_text(&mut self, handler: &mut impl SaxHandler, c: u8) -> Result<(), SaxError> {
        store(&mut self.text, c)?;
        if self.uni_left == 0 && self.text.len() >= TEXT_FLUSH_SIZE {
            self.flush_text(handler)?;
        }
        Ok(())
    }

    fn after_tag(&mut self) {
        self.state = if self.depth() == 0 {
            State::Epilog
        } else {
            State::CData
        };
    }

    fn after_markup(&mut self) {
        self.state = if self.depth() > 0 {
            State::CData
        } else if self.seen_content {
            State::Epilog
        } else {
            State::Prolog
        };
    }

    fn open_tag(&mut self, handler: &mut impl SaxHandler, is_empty: bool) -> Result<(), SaxError> {
        let name = as_str(&self.name)?;
        handler.handle_event(&SaxEvent::Open {
            name,
            attributes: &self.attributes,
        })?;
        if is_empty {
            handler.handle_event(&SaxEvent::Close(name))?;
        } else {
            self.open_starts
                .try_reserve(1)
                .map_err(|_| SaxError::NoMemory)?;
            self.open_starts.push(self.open_names.len());
            store_slice(&mut self.open_names, &self.name)?;
        }
        self.attributes.clear();
        self.after_tag();
        Ok(())
    }

    fn close_tag(&mut self, handler: &mut impl SaxHandler) -> Result<(), SaxError> {
        let Some(&start) = self.open_starts.last() else {
            xml_error!(TAG_CLOSE_WITHOUT_OPEN);
        };
        if self.open_names[start..] != self.name[..] {
            xml_error!(TAG_MISMATCH);
        }
        handler.handle_event(&SaxEvent::Close(as_str(&self.name)?))?;
        self.open_names.truncate(start);
        self.open_starts.pop();
        self.after_tag();
        Ok(())
    }

    fn store_reference(&mut self, bytes: &[u8]) -> Result<(), SaxError> {
        if self.is_value_ref {
            store_slice(&mut self.value, bytes)?;
            self.state = State::AttributeValue;
        } else {
            store_slice(&mut self.text, bytes)?;
            self.state = State::CData;
        }
        Ok(())
    }

    fn store_char_reference(&mut self) -> Result<(), SaxError> {
        if !is_valid_xml_char(self.char_ref_value) {
            xml_error!(CHAR_INVALID);
        }
        let Some(c) = char::from_u32(self.char_ref_value) else {
            xml_error!(CHAR_INVALID);
        };
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf);
        self.store_reference(encoded.as_bytes())
    }

    fn add_char_ref_digit(&mut self, radix: u32, digit: u32) -> Result<(), SaxError> {
        self.char_ref_value = self.char_ref_value * radix + digit;
        self.char_ref_digits += 1;
        if self.char_ref_value > 0x10ffff {
            xml_error!(CHAR_INVALID);
        }
        Ok(())
    }

    fn parse_byte(&mut self, handler: &mut impl SaxHandler, c: u8) -> Result<(), SaxError> {
        self.check_utf8(c)?;

        match self.state {
            State::Prolog | State::Epilog => match c {
                b'<' => self.state = State::TagStart,
                whitespace!() => (),
                _ => xml_error!(DOC_CDATA_WITHOUT_PARENT),
            },

            State::TagStart => match c {
                b'!' => self.state = State::Markup,
                b'?' => {
                    self.flush_text(handler)?;
                    self.state = State::PI;
                }
                b'/' => {
                    if self.depth() == 0 {
                        xml_error!(TAG_CLOSE_WITHOUT_OPEN);
                    }
                    self.flush_text(handler)?;
                    self.name.clear();
                    self.is_end_tag = true;
                    self.state = State::TagName;
                }
                whitespace!() => xml_error!(TAG_WHITESPACE_START),
                b'>' => xml_error!(TAG_EMPTY_NAME),
                b'<' | b'=' | b'"' | b'\'' | b'&' => xml_error!(TAG_BAD_NAME),
                _ => {
                    if self.depth() == 0 && self.seen_content {
                        xml_error!(TAG_OUTSIDE_ROOT);
                    }
                    self.flush_text(handler)?;
                    self.seen_content = true;
                    self.is_end_tag = false;
                    self.name.clear();
                    self.attributes.clear();
                    store(&mut self.name, c)?;
                    self.state = State::TagName;
                }
            },

            State::TagName => match c {
                b'/' | b'>' | whitespace!() => {
                    if self.name.is_empty() {
                        xml_error!(TAG_EMPTY_NAME);
                    }
                    match (self.is_end_tag, c) {
                        (true, b'/') => xml_error!(TAG_DOUBLE_END),
                        (true, b'>') => self.close_tag(handler)?,
                        (true, _) => self.state = State::EndTagWhitespace,
                        (false, b'/') => self.state = State::EmptyTagEnd,
                        (false, b'>') => self.open_tag(handler, false)?,
                        (false, _) => self.state = State::AttributeWhitespace,
                    }
                }
                b'<' | b'=' | b'"' | b'\'' | b'&' => xml_error!(TAG_BAD_NAME),
                _ => store(&mut self.name, c)?,
            },

            State::EndTagWhitespace => match c {
                b'>' => self.close_tag(handler)?,
                whitespace!() => (),
                _ => xml_error!(TAG_END_TAG_ATTRIBUTES),
            },

            State::EmptyTagEnd => match c {
                b'>' => self.open_tag(handler, true)?,
                _ => xml_error!(TAG_EMPTY_TAG_MISSING_END),
            },

            State::AttributeWhitespace => match c {
                whitespace!() => (),
                b'/' => self.state = State::EmptyTagEnd,
                b'>' => self.open_tag(handler, false)?,
                b'<' | b'=' | b'"' | b'\'' => xml_error!(TAG_ATTRIBUTE_BAD_NAME),
                _ => {
                    self.attribute_name.clear();
                    store(&mut self.attribute_name, c)?;
                    self.state = State::AttributeName;
                }
            },

            State::AttributeName => match c {
                b'=' => self.state = State::AttributeValueStart,
                whitespace!() => self.state = State::AttributeEq,
                b'/' | b'>' | b'<' | b'"' | b'\'' => xml_error!(TAG_ATTRIBUTE_BAD_NAME),
                _ => store(&mut self.attribute_name, c)?,
            },

            State::AttributeEq => match c {
                b'=' => self.state = State::AttributeValueStart,
                whitespace!() => (),
                _ => xml_error!(TAG_ATTRIBUTE_WITHOUT_EQUAL),
            },

            State::AttributeValueStart => match c {
                b'"' | b'\'' => {
                    self.quote = c;
                    self.value.clear();
                    self.state = State::AttributeValue;
                }
                whitespace!() => (),
                _ => xml_error!(TAG_ATTRIBUTE_WITHOUT_QUOTE),
            },

            State::AttributeValue => match c {
                b'&' => {
                    self.is_value_ref = true;
                    self.state = State::Reference;
                }
                b'<' => xml_error!(TAG_ATTRIBUTE_BAD_VALUE),
                _ if c == self.quote => {
                    self.attributes.push(&self.attribute_name, &self.value)?;
                    self.state = State::AttributeEnd;
                }
                _ => store(&mut self.value, c)?,
            },

            State::AttributeEnd => match c {
                whitespace!() => self.state = State::AttributeWhitespace,
                b'/' => self.state = State::EmptyTagEnd,
                b'>' => self.open_tag(handler, false)?,
                _ => xml_error!(TAG_ATTRIBUTE_NO_SPACE),
            },

            State::CData => match c {
                b'<' => {
                    self.text_brackets = 0;
                    self.state = State::TagStart;
                }
                b'&' => {
                    self.text_brackets = 0;
                    self.is_value_ref = false;
                    self.state = State::Reference;
                }
                b']' => {
                    self.text_brackets = self.text_brackets.saturating_add(1);
                    self.store_text(handler, c)?;
                }
                b'>' if self.text_brackets >= 2 => xml_error!(TEXT_CDATA_SECTION_END),
                _ => {
                    self.text_brackets = 0;
                    self.store_text(handler, c)?;
                }
            },

            State::Reference => match c {
                b'#' => {
                    self.char_ref_value = 0;
                    self.char_ref_digits = 0;
                    self.state = State::CharReference;
                }
                b';' => xml_error!(REFERENCE_CUSTOM_ENTITY),
                _ => {
                    self.ref_buffer.clear();
                    self.ref_buffer.push(c);
                    self.state = State::Entity;
                }
            },

            State::Entity => match c {
                b';' => {
                    let replacement: &[u8] = match self.ref_buffer.as_slice() {
                        b"amp" => b"&",
                        b"lt" => b"<",
                        b"gt" => b">",
                        b"quot" => b"\"",
                        b"apos" => b"'",
                        _ => xml_error!(REFERENCE_CUSTOM_ENTITY),
                    };
                    self.store_reference(replacement)?;
                }
                _ => {
                    if self.ref_buffer.len() >= REF_BUFFER_SIZE {
                        xml_error!(REFERENCE_CUSTOM_ENTITY);
                    }
                    self.ref_buffer.push(c);
                }
            },

            State::CharReference => match c {
                b'x' => self.state = State::HexCharReference,
                b'0'..=b'9' => {
                    self.add_char_ref_digit(10, (c - b'0').into())?;
                    self.state = State::CharReferenceBody;
                }
                _ => xml_error!(REFERENCE_INVALID_DECIMAL),
            },

            State::CharReferenceBody => match c {
                b';' => self.store_char_reference()?,
                b'0'..=b'9' => self.add_char_ref_digit(10, (c - b'0').into())?,
                _ => xml_error!(REFERENCE_INVALID_DECIMAL),
            },

            State::HexCharReference => match c {
                b';' => {
                    if self.char_ref_digits == 0 {
                        xml_error!(REFERENCE_EMPTY);
                    }
                    self.store_char_reference()?;
                }
                b'0'..=b'9' => self.add_char_ref_digit(16, (c - b'0').into())?,
                b'a'..=b'f' => self.add_char_ref_digit(16, (c - b'a' + 10).into())?,
                b'A'..=b'F' => self.add_char_ref_digit(16, (c - b'A' + 10).into())?,
                _ => xml_error!(REFERENCE_INVALID_HEX),
            },

            State::Markup => match c {
                b'-' => {
                    self.flush_text(handler)?;
                    self.state = State::CommentStart;
                }
                b'[' => {
                    if self.depth() == 0 {
                        xml_error!(MARKUP_CDATA_SECTION_OUTSIDE_ROOT);
                    }
                    self.keyword_pos = 0;
                    self.state = State::CDataSectionStart;
                }
                b'D' => {
                    if self.seen_content {
                        xml_error!(MARKUP_DOCTYPE_MISPLACED);
                    }
                    self.keyword_pos = 0;
                    self.state = State::DoctypeStart;
                }
                _ => xml_error!(MARKUP_UNRECOGNIZED),
            },

            State::CDataSectionStart => {
                if CDATA_SECTION_KEYWORD.get(self.keyword_pos) != Some(&c) {
                    xml_error!(MARKUP_CDATA_SECTION_BAD_START);
                }
                self.keyword_pos += 1;
                if self.keyword_pos == CDATA_SECTION_KEYWORD.len() {
                    self.state = State::CDataSectionBody;
                }
            }

            State::CDataSectionBody => match c {
                b']' => self.state = State::CDataSectionMaybeEnd,
                _ => self.store_text(handler, c)?,
            },

            State::CDataSectionMaybeEnd => match c {
                b']' => self.state = State::CDataSectionMaybeEnd2,
                _ => {
                    store(&mut self.text, b']')?;
                    store(&mut self.text, c)?;
                    self.state = State::CDataSectionBody;
                }
            },

            State::CDataSectionMaybeEnd2 => match c {
                b'>' => self.state = State::CData,
                b']' => store(&mut self.text, b']')?,
                _ => {
                    store_slice(&mut self.text, b"]]")?;
                    store(&mut self.text, c)?;
                    self.state = State::CDataSectionBody;
                }
            },

            State::CommentStart => match c {
                b'-' => self.state = State::CommentBody,
                _ => xml_error!(COMMENT_MISSING_DASH),
            },

            State::CommentBody => {
                if c == b'-' {
                    self.state = State::CommentMaybeEnd;
                }
            }

            State::CommentMaybeEnd => match c {
                b'-' => self.state = State::CommentEnd,
                _ => self.state = State::CommentBody,
            },

            State::CommentEnd => match c {
                b'>' => self.after_markup(),
                _ => xml_error!(COMMENT_MISSING_END),
            },

            State::PI => {
                if c == b'?' {
                    self.state = State::PIEnd;
                }
            }

            State::PIEnd => match c {
                b'>' => self.after_markup(),
                b'?' => (),
                _ => self.state = State::PI,
            },

            State::DoctypeStart => {
                if DOCTYPE_KEYWORD.get(self.keyword_pos) != Some(&c) {
                    xml_error!(MARKUP_DOCTYPE_BAD_START);
                }
                self.keyword_pos += 1;
                if self.keyword_pos == DOCTYPE_KEYWORD.len() {
                    self.state = State::DoctypeWhitespace;
                }
            }

            State::DoctypeWhitespace => match c {
                whitespace!() => self.state = State::DoctypeSkip,
                _ => xml_error!(MARKUP_DOCTYPE_BAD_START),
            },

            State::DoctypeSkip => match c {
                b'<' => self.state = State::DoctypeMarkupDecl,
                b'>' => self.state = State::Prolog,
                _ => (),
            },

            State::DoctypeMarkupDecl => {
                if c == b'>' {
                    self.state = State::DoctypeSkip;
                }
            }
        }

        Ok(())
    }
}
