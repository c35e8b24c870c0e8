//! Error types for the value model and the parser.
//!
//! Accessor failures ([`ValueError`]) are local to the call that produced
//! them. Parse failures ([`ParseError`]) abort the whole parse; no partial
//! tree is ever returned.

use std::{fmt, io};

use thiserror::Error;

/// Errors raised by typed accessors and builders on the value model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The stored variant cannot be read as the requested type
    #[error("JsonValue is of type '{actual}' not {expected}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer accessor was used on a floating-point number
    #[error("JsonValue is a floating-point number, conversion to an integer will always be lossy")]
    LossyInteger,

    /// The integer does not fit the requested width
    #[error("Integer {value} does not fit in {target}")]
    OutOfRange { value: i64, target: &'static str },

    /// A string value could not be coerced to a number
    #[error("String '{text}' is not a valid {expected}")]
    NumberFormat { text: String, expected: &'static str },

    /// Object lookup for a key that is not present
    #[error("No field named '{0}'")]
    MissingKey(String),

    /// Array access past the end
    #[error("Index {index} out of bounds for array with length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Parallel name/value builders were given slices of different lengths
    #[error("Got {names} names but {values} values")]
    LengthMismatch { names: usize, values: usize },
}

/// Structural problems found while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    MultipleValues,
    CharactersBeforeString,
    StartNotContainer,
    MissingFieldName,
    MissingColon,
    UnexpectedColon,
    NoFieldNameForValue,
    ExpectedFieldName,
    ObjectNeverOpened,
    ArrayNeverOpened,
    ObjectClosedArray,
    ArrayClosedObject,
    CommaOutsideContainer,
    EmptyValue,
    TrailingContent,
    Unclosed,
    UnclosedString,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MalformedKind::MultipleValues => "Multiple values found",
            MalformedKind::CharactersBeforeString => "Non whitespace characters before String",
            MalformedKind::StartNotContainer => "Start of json should indicate an array or object",
            MalformedKind::MissingFieldName => "Missing field name",
            MalformedKind::MissingColon => "Missing colon after field name",
            MalformedKind::UnexpectedColon => "Unexpected colon",
            MalformedKind::NoFieldNameForValue => "No field name for value in object",
            MalformedKind::ExpectedFieldName => "Expected field name for nested value",
            MalformedKind::ObjectNeverOpened => "Object closed but was never opened",
            MalformedKind::ArrayNeverOpened => "Array closed but was never opened",
            MalformedKind::ObjectClosedArray => {
                "Expected array after closing square bracket but got an object instead"
            }
            MalformedKind::ArrayClosedObject => {
                "Expected object after closing curly bracket but got an array instead"
            }
            MalformedKind::CommaOutsideContainer => {
                "Expected the start of either an object or array found a comma instead"
            }
            MalformedKind::EmptyValue => "Json value can not have length of 0",
            MalformedKind::TrailingContent => "Unexpected content after the root value",
            MalformedKind::Unclosed => "Unclosed objects and/or arrays in json",
            MalformedKind::UnclosedString => "Input ended inside a string",
        };
        f.write_str(msg)
    }
}

/// Problems inside a string escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeKind {
    /// `\` followed by a byte that is not a known escape
    UnknownEscape(u8),
    /// Input ended right after a `\`
    Unfinished,
    /// Input ended inside the four hex digits of `\u`
    UnicodeUnfinished,
    /// A `\u` digit is not hexadecimal
    InvalidHex(u8),
    /// A high surrogate without its low half, or a lone low surrogate
    UnpairedSurrogate,
}

impl fmt::Display for EscapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapeKind::UnknownEscape(b) => {
                write!(f, "Invalid character '{}' was escaped", b.escape_ascii())
            }
            EscapeKind::Unfinished => f.write_str("Escape sequence started but never finished"),
            EscapeKind::UnicodeUnfinished => {
                f.write_str("Unicode character literal started but never finished")
            }
            EscapeKind::InvalidHex(b) => write!(
                f,
                "Invalid unicode escape sequence ('{}' is not a hex digit)",
                b.escape_ascii()
            ),
            EscapeKind::UnpairedSurrogate => f.write_str("Unpaired UTF-16 surrogate in unicode escape"),
        }
    }
}

/// Errors surfaced by the parse entry points.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Structural violation of the JSON grammar
    #[error("{kind} at index {offset}, json preview '{preview}'")]
    Malformed {
        kind: MalformedKind,
        offset: usize,
        preview: String,
    },

    /// Bad escape sequence inside a string
    #[error("{kind} at index {offset}, json preview '{preview}'")]
    InvalidEscape {
        kind: EscapeKind,
        offset: usize,
        preview: String,
    },

    /// Bare literal that is neither a keyword nor a number
    #[error("Invalid json value '{literal}' at index {offset}, json preview '{preview}'")]
    NumberFormat {
        literal: String,
        offset: usize,
        preview: String,
    },

    /// Failure of the underlying byte source
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Byte offset of the failure, when it came from the input itself.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Malformed { offset, .. }
            | ParseError::InvalidEscape { offset, .. }
            | ParseError::NumberFormat { offset, .. } => Some(*offset),
            ParseError::Io(_) => None,
        }
    }

    /// Surrounding input captured at the failure point.
    pub fn preview(&self) -> Option<&str> {
        match self {
            ParseError::Malformed { preview, .. }
            | ParseError::InvalidEscape { preview, .. }
            | ParseError::NumberFormat { preview, .. } => Some(preview),
            ParseError::Io(_) => None,
        }
    }
}
