//! Single-pass streaming parser.
//!
//! The parser pulls bytes from a [`Scanner`] and builds the value tree as it
//! goes. Open containers live on a stack of [`Frame`]s; string contents and
//! bare literals are accumulated in a [`ScratchBuffer`] and classified once
//! a terminator is seen. Any error aborts the parse.
//!
//! ```
//! use objective_json::{parse, Value};
//!
//! let value = parse("[1, 2.5, \"three\", true, null]").unwrap();
//! assert_eq!(value.as_array().unwrap().len(), 5);
//!
//! let err = parse("[1 1]").unwrap_err();
//! assert_eq!(err.to_string(), "Multiple values found at index 4, json preview '[1 1]'");
//!
//! assert_eq!(parse("").unwrap(), Value::Null);
//! ```

use std::{fs::File, io::Read, path::Path};

use log::trace;

use crate::{
    error::{EscapeKind, MalformedKind, ParseError},
    scanner::{
        DEFAULT_CHUNK_SIZE, DEFAULT_SCRATCH_CAPACITY, ReaderSource, Scanner, ScratchBuffer,
        SliceSource, Source,
    },
    value::{Array, JsonString, Number, Object, Value},
};

/// Buffer sizes used by a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Initial capacity of the literal scratch buffer; it grows on demand
    pub scratch_capacity: usize,
    /// Window size used when reading from a stream or file
    pub chunk_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Entry point for parsing JSON from memory, readers and files.
///
/// A parser holds only its configuration; every call gets its own scanner
/// and scratch buffer.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Parser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse_str(&self, json: &str) -> Result<Value, ParseError> {
        self.parse_bytes(json.as_bytes())
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Value, ParseError> {
        self.parse_source(SliceSource::new(bytes))
    }

    /// Parses from a reader in windows of `chunk_size` bytes.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Value, ParseError> {
        self.parse_source(ReaderSource::with_chunk_size(reader, self.config.chunk_size))
    }

    /// Parses a file; small files get a window sized to the file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Value, ParseError> {
        let file = File::open(path)?;
        self.parse_source(ReaderSource::from_file_with_chunk_size(
            file,
            self.config.chunk_size,
        )?)
    }

    pub fn parse_source<S: Source>(&self, source: S) -> Result<Value, ParseError> {
        Machine::new(source, self.config.scratch_capacity).run()
    }
}

/// Parses a JSON document held in memory.
pub fn parse(json: &str) -> Result<Value, ParseError> {
    Parser::new().parse_str(json)
}

pub fn parse_bytes(bytes: &[u8]) -> Result<Value, ParseError> {
    Parser::new().parse_bytes(bytes)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Value, ParseError> {
    Parser::new().parse_reader(reader)
}

pub fn from_file(path: impl AsRef<Path>) -> Result<Value, ParseError> {
    Parser::new().parse_file(path)
}

enum Container {
    Object(Object),
    Array(Array),
}

impl Container {
    fn name(&self) -> &'static str {
        match self {
            Container::Object(_) => "object",
            Container::Array(_) => "array",
        }
    }

    fn into_value(self) -> Value {
        match self {
            Container::Object(obj) => Value::Object(obj),
            Container::Array(arr) => Value::Array(arr),
        }
    }
}

/// One open container and the key waiting for its value.
struct Frame {
    container: Container,
    key: Option<String>,
    colon: bool,
}

impl Frame {
    fn new(container: Container) -> Self {
        Frame {
            container,
            key: None,
            colon: false,
        }
    }

    fn store(&mut self, value: Value) {
        match &mut self.container {
            Container::Array(arr) => arr.push(value),
            Container::Object(obj) => {
                if let Some(key) = self.key.take() {
                    obj.insert(key, value);
                }
                self.colon = false;
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Closer {
    Object,
    Array,
}

struct Machine<S> {
    scanner: Scanner<S>,
    scratch: ScratchBuffer,
    stack: Vec<Frame>,
    pending: Option<Value>,
    root: Option<Value>,
}

impl<S: Source> Machine<S> {
    fn new(source: S, scratch_capacity: usize) -> Self {
        Machine {
            scanner: Scanner::new(source),
            scratch: ScratchBuffer::with_capacity(scratch_capacity),
            stack: Vec::new(),
            pending: None,
            root: None,
        }
    }

    fn malformed(&self, kind: MalformedKind, offset: usize) -> ParseError {
        ParseError::Malformed {
            kind,
            offset,
            preview: self.scanner.preview(offset),
        }
    }

    fn invalid_escape(&self, kind: EscapeKind) -> ParseError {
        let offset = self.scanner.last_offset();
        ParseError::InvalidEscape {
            kind,
            offset,
            preview: self.scanner.preview(offset),
        }
    }

    fn run(mut self) -> Result<Value, ParseError> {
        while let Some(b) = self.scanner.next_byte()? {
            let offset = self.scanner.last_offset();
            match b {
                b'"' => self.string(offset)?,
                b'{' => self.open(Container::Object(Object::new()), offset)?,
                b'[' => self.open(Container::Array(Array::new()), offset)?,
                b':' => self.colon(offset)?,
                b',' => self.comma(offset)?,
                b'}' => self.close(Closer::Object, offset)?,
                b']' => self.close(Closer::Array, offset)?,
                b if b == 0 || b == 0x0B || b.is_ascii_whitespace() => self.flush_literal(offset)?,
                b => self.literal_byte(b, offset)?,
            }
        }
        self.finish()
    }

    fn finish(mut self) -> Result<Value, ParseError> {
        let offset = self.scanner.last_offset();
        if !self.stack.is_empty() {
            return Err(self.malformed(MalformedKind::Unclosed, offset));
        }
        self.flush_literal(offset)?;
        if let Some(value) = self.pending.take() {
            trace!("Discarding top-level literal {}", value);
        }
        Ok(self.root.take().unwrap_or(Value::Null))
    }

    fn literal_byte(&mut self, b: u8, offset: usize) -> Result<(), ParseError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(self.malformed(MalformedKind::TrailingContent, offset));
        }
        self.scratch.push(b);
        Ok(())
    }

    /// Turns a buffered bare literal into the pending value.
    fn flush_literal(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.scratch.is_empty() {
            return Ok(());
        }
        if self.pending.is_some() {
            return Err(self.malformed(MalformedKind::MultipleValues, offset));
        }
        let value = self.parse_value(offset)?;
        if self.stack.is_empty() {
            // held so a following value at depth 0 is rejected
            self.pending = Some(value);
            return Ok(());
        }
        self.accept(value, offset)
    }

    /// Checks that the current frame can take a value and makes it pending.
    fn accept(&mut self, value: Value, offset: usize) -> Result<(), ParseError> {
        self.check_slot(MalformedKind::MissingFieldName, offset)?;
        self.pending = Some(value);
        Ok(())
    }

    fn check_slot(&self, missing_key: MalformedKind, offset: usize) -> Result<(), ParseError> {
        if self.pending.is_some() || !self.scratch.is_empty() {
            return Err(self.malformed(MalformedKind::MultipleValues, offset));
        }
        match self.stack.last() {
            Some(Frame {
                container: Container::Object(_),
                key,
                colon,
            }) => {
                if key.is_none() {
                    Err(self.malformed(missing_key, offset))
                } else if !colon {
                    Err(self.malformed(MalformedKind::MissingColon, offset))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    fn open(&mut self, container: Container, offset: usize) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            if self.root.is_some() {
                return Err(self.malformed(MalformedKind::TrailingContent, offset));
            }
            if self.pending.is_some() || !self.scratch.is_empty() {
                return Err(self.malformed(MalformedKind::MultipleValues, offset));
            }
        } else {
            self.check_slot(MalformedKind::ExpectedFieldName, offset)?;
        }
        trace!("Opening {} at depth {}", container.name(), self.stack.len());
        self.stack.push(Frame::new(container));
        Ok(())
    }

    fn close(&mut self, closer: Closer, offset: usize) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            let kind = match closer {
                Closer::Object => MalformedKind::ObjectNeverOpened,
                Closer::Array => MalformedKind::ArrayNeverOpened,
            };
            return Err(self.malformed(kind, offset));
        }
        self.flush_literal(offset)?;

        let pending = self.pending.take();
        let Some(frame) = self.stack.last_mut() else {
            return Ok(());
        };
        let mismatch = match (closer, &frame.container) {
            (Closer::Object, Container::Array(_)) => Some(MalformedKind::ArrayClosedObject),
            (Closer::Array, Container::Object(_)) => Some(MalformedKind::ObjectClosedArray),
            _ => None,
        };
        let missing = match (&pending, &frame.key) {
            (None, Some(_)) if frame.colon => Some(MalformedKind::EmptyValue),
            (None, Some(_)) => Some(MalformedKind::MissingColon),
            _ => None,
        };
        if let Some(kind) = mismatch.or(missing) {
            return Err(self.malformed(kind, offset));
        }
        if let Some(value) = pending {
            frame.store(value);
        }

        let Some(frame) = self.stack.pop() else {
            return Ok(());
        };
        trace!("Closing {} at depth {}", frame.container.name(), self.stack.len());
        let value = frame.container.into_value();
        if self.stack.is_empty() {
            self.root = Some(value);
        } else {
            self.pending = Some(value);
        }
        Ok(())
    }

    fn colon(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(self.malformed(MalformedKind::TrailingContent, offset));
        }
        let kind = match self.stack.last_mut() {
            Some(Frame {
                container: Container::Object(_),
                key: Some(_),
                colon,
            }) => {
                if *colon || self.pending.is_some() || !self.scratch.is_empty() {
                    MalformedKind::UnexpectedColon
                } else {
                    *colon = true;
                    return Ok(());
                }
            }
            _ => MalformedKind::MissingFieldName,
        };
        Err(self.malformed(kind, offset))
    }

    fn comma(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            let kind = if self.root.is_some() {
                MalformedKind::TrailingContent
            } else {
                MalformedKind::CommaOutsideContainer
            };
            return Err(self.malformed(kind, offset));
        }
        self.flush_literal(offset)?;

        let Some(value) = self.pending.take() else {
            let kind = match self.stack.last() {
                Some(Frame {
                    container: Container::Object(_),
                    key: None,
                    ..
                }) => MalformedKind::NoFieldNameForValue,
                _ => MalformedKind::EmptyValue,
            };
            return Err(self.malformed(kind, offset));
        };
        if let Some(frame) = self.stack.last_mut() {
            frame.store(value);
        }
        Ok(())
    }

    fn string(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            let kind = if self.root.is_some() {
                MalformedKind::TrailingContent
            } else {
                MalformedKind::StartNotContainer
            };
            return Err(self.malformed(kind, offset));
        }
        if !self.scratch.is_empty() {
            return Err(self.malformed(MalformedKind::CharactersBeforeString, offset));
        }

        self.read_string_body()?;
        let text = self.scratch.take_string();

        if let Some(frame) = self.stack.last_mut()
            && matches!(frame.container, Container::Object(_))
            && frame.key.is_none()
        {
            frame.key = Some(text);
            return Ok(());
        }
        let end = self.scanner.last_offset();
        self.accept(Value::String(JsonString::new(text)), end)
    }

    /// Reads up to the closing quote, decoding escapes into the scratch buffer.
    fn read_string_body(&mut self) -> Result<(), ParseError> {
        loop {
            match self.scanner.next_byte()? {
                None => {
                    let offset = self.scanner.last_offset();
                    return Err(self.malformed(MalformedKind::UnclosedString, offset));
                }
                Some(b'"') => return Ok(()),
                Some(b'\\') => self.escape()?,
                Some(b) => self.scratch.push(b),
            }
        }
    }

    fn escape(&mut self) -> Result<(), ParseError> {
        let Some(b) = self.scanner.next_byte()? else {
            return Err(self.invalid_escape(EscapeKind::Unfinished));
        };
        let decoded = match b {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'b' => 0x08,
            b'f' => 0x0C,
            b'0' => 0,
            b'\\' | b'"' | b'\'' | b'/' => b,
            b'u' => return self.unicode_escape(),
            other => return Err(self.invalid_escape(EscapeKind::UnknownEscape(other))),
        };
        self.scratch.push(decoded);
        Ok(())
    }

    /// Decodes `XXXX` after `\u`, joining a surrogate pair into one code point.
    fn unicode_escape(&mut self) -> Result<(), ParseError> {
        let unit = self.read_hex4()?;
        let code_point = match unit {
            0xD800..=0xDBFF => {
                if self.scanner.next_byte()? != Some(b'\\') || self.scanner.next_byte()? != Some(b'u')
                {
                    return Err(self.invalid_escape(EscapeKind::UnpairedSurrogate));
                }
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.invalid_escape(EscapeKind::UnpairedSurrogate));
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.invalid_escape(EscapeKind::UnpairedSurrogate)),
            _ => unit,
        };
        let c = char::from_u32(code_point)
            .ok_or_else(|| self.invalid_escape(EscapeKind::UnpairedSurrogate))?;
        self.scratch.push_char(c);
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u32, ParseError> {
        let mut unit = 0;
        for _ in 0..4 {
            let Some(b) = self.scanner.next_byte()? else {
                return Err(self.invalid_escape(EscapeKind::UnicodeUnfinished));
            };
            let digit = char::from(b)
                .to_digit(16)
                .ok_or_else(|| self.invalid_escape(EscapeKind::InvalidHex(b)))?;
            unit = (unit << 4) | digit;
        }
        Ok(unit)
    }

    /// Classifies the buffered literal as a keyword, integer or float.
    fn parse_value(&mut self, offset: usize) -> Result<Value, ParseError> {
        let value = match self.scratch.as_bytes() {
            [] => return Err(self.malformed(MalformedKind::EmptyValue, offset)),
            b"true" => Value::Boolean(true),
            b"false" => Value::Boolean(false),
            b"null" => Value::Null,
            bytes => match classify(bytes) {
                Some(integer) => {
                    // classify only accepts ASCII digits, '-' and '.'
                    let text = std::str::from_utf8(bytes).unwrap_or_default();
                    let number = if integer {
                        text.parse().map(Number::Integer).ok()
                    } else {
                        text.parse().map(Number::Float).ok()
                    };
                    match number {
                        Some(n) => Value::Number(n),
                        None => return Err(self.number_format(offset)),
                    }
                }
                None => return Err(self.number_format(offset)),
            },
        };
        trace!("Classified literal as {}", value.type_name());
        self.scratch.clear();
        Ok(value)
    }

    fn number_format(&self, offset: usize) -> ParseError {
        ParseError::NumberFormat {
            literal: String::from_utf8_lossy(self.scratch.as_bytes()).into_owned(),
            offset,
            preview: self.scanner.preview(offset),
        }
    }
}

/// `Some(true)` for an integer literal, `Some(false)` for a float literal.
fn classify(bytes: &[u8]) -> Option<bool> {
    let digits = bytes.strip_prefix(b"-").unwrap_or(bytes);
    let mut dots = 0;
    let mut seen_digit = false;
    for b in digits {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' => dots += 1,
            _ => return None,
        }
    }
    match (seen_digit, dots) {
        (true, 0) => Some(true),
        (true, 1) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(b"123"), Some(true));
        assert_eq!(classify(b"-123"), Some(true));
        assert_eq!(classify(b"1.5"), Some(false));
        assert_eq!(classify(b"-.5"), Some(false));
        assert_eq!(classify(b"1.2.3"), None);
        assert_eq!(classify(b"1-2"), None);
        assert_eq!(classify(b"-"), None);
        assert_eq!(classify(b"."), None);
        assert_eq!(classify(b"1e5"), None);
    }

    #[test]
    fn test_small_buffers_parse_the_same() {
        let json = r#"{"key": "value € 😀", "esc": "\u20AC a\uD83D\uDE00b", "list": [1, 2.5, true, null]}"#.as_bytes();
        let expected = parse_bytes(json).unwrap();
        assert_eq!(
            expected.as_object().unwrap().get_string("esc").unwrap(),
            "€ a😀b"
        );
        for chunk_size in 1..=8 {
            let parser = Parser::with_config(ParserConfig {
                scratch_capacity: 1,
                chunk_size,
            });
            assert_eq!(parser.parse_reader(json).unwrap(), expected, "chunk {}", chunk_size);
        }
    }
}
