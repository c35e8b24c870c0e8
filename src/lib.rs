pub mod convert;
pub mod emitter;
pub mod error;
pub mod filter;
pub mod parser;
pub mod scanner;
pub mod serializer;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use emitter::{JsonPrinter, to_json, to_json_filtered};
pub use error::{EscapeKind, MalformedKind, ParseError, ValueError};
pub use filter::{AllowAny, Filter, FilterRegistry};
pub use parser::{Parser, ParserConfig, from_file, from_reader, parse, parse_bytes};
pub use serializer::{ModifierError, ObjectSerializer, ToJson};
pub use value::{Array, JsonString, Number, Object, Value};
