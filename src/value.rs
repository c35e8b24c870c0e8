//! # JSON Value Model
//!
//! This module defines the in-memory tree produced by the parser and
//! consumed by the emitter.
//!
//! The value model is organized into focused submodules:
//!
//! - **[number]** - integer- or float-tagged numbers
//! - **[string]** - text values with a cached numeric/boolean classification
//! - **[array]** - ordered sequences with typed getters and setters
//! - **[object]** - keyed maps with typed getters and setters
//!
//! ## Ownership
//!
//! Every node is owned by exactly one parent. Containers are mutable, so
//! nothing is shared between trees; cloning a subtree copies it. `Null` and
//! the two booleans are plain unit-like variants and carry no shared state.
//!
//! ## Equality
//!
//! - Numbers compare by `i64` when both are integer-tagged and by `f64` when
//!   both are float-tagged. An integer never equals a float: `1 != 1.0`.
//! - Objects compare without regard to key order, arrays element by element.
//! - A value also compares against plain Rust values (`bool`, `&str`, `i64`,
//!   `f64`, `Option<&Value>`), see the `PartialEq` impls below.
//!
//! ## Examples
//!
//! ```
//! use objective_json::{Array, Object, Value};
//!
//! let obj = Object::of([
//!     ("field", Value::from("name")),
//!     ("inner", Value::from(Object::of([("innerField", 342)]))),
//! ]);
//!
//! assert_eq!(obj.get_string("field").unwrap(), "name");
//! assert_eq!(obj.get_object("inner").unwrap().get_i32("innerField").unwrap(), 342);
//! assert_ne!(Value::from(1), Value::from(1.0));
//! assert_eq!(Value::from(Array::of([1, 2])), Value::from(vec![1, 2]));
//! ```

pub mod array;
pub mod number;
pub mod object;
pub mod string;

use std::{collections::HashMap, fmt};

use rust_decimal::Decimal;

pub use array::Array;
pub use number::Number;
pub use object::Object;
pub use string::JsonString;

use crate::error::ValueError;

pub(crate) static NULL: Value = Value::Null;

/// A node in the JSON value tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// JSON null
    #[default]
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer- or float-tagged number
    Number(Number),

    /// UTF-8 string
    String(JsonString),

    /// Ordered sequence of values
    Array(Array),

    /// Keyed mapping, key order is not preserved
    Object(Object),
}

impl Value {
    pub const NULL: Value = Value::Null;
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);

    /// Human-readable name of the stored variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ValueError {
        ValueError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for booleans and for strings spelled exactly `true`/`false`.
    pub fn is_boolean(&self) -> bool {
        match self {
            Value::Boolean(_) => true,
            Value::String(s) => s.is_boolean_like(),
            _ => false,
        }
    }

    /// True for numbers and for number-like strings.
    pub fn is_number(&self) -> bool {
        match self {
            Value::Number(_) => true,
            Value::String(s) => s.is_number_like(),
            _ => false,
        }
    }

    /// True for integer-tagged numbers and for integer-like strings.
    pub fn is_integer(&self) -> bool {
        match self {
            Value::Number(n) => n.is_integer(),
            Value::String(s) => s.is_integer_like(),
            _ => false,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch("a boolean")),
        }
    }

    /// Reads a 64-bit integer. Strings are parsed; float-tagged numbers fail.
    pub fn as_i64(&self) -> Result<i64, ValueError> {
        match self {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse_i64(),
            _ => Err(self.mismatch("a long")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, ValueError> {
        narrow(self.as_i64()?, "an integer")
    }

    pub fn as_i16(&self) -> Result<i16, ValueError> {
        narrow(self.as_i64()?, "a short")
    }

    pub fn as_i8(&self) -> Result<i8, ValueError> {
        narrow(self.as_i64()?, "a byte")
    }

    pub fn as_f64(&self) -> Result<f64, ValueError> {
        match self {
            Value::Number(n) => Ok(n.as_f64()),
            Value::String(s) => s.parse_f64(),
            _ => Err(self.mismatch("a double")),
        }
    }

    pub fn as_f32(&self) -> Result<f32, ValueError> {
        match self {
            Value::Number(_) | Value::String(_) => self.as_f64().map(|f| f as f32),
            _ => Err(self.mismatch("a float")),
        }
    }

    /// Reads the stored number; number-like strings are parsed into one.
    pub fn as_number(&self) -> Result<Number, ValueError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::String(s) if s.is_integer_like() => s.parse_i64().map(Number::Integer),
            Value::String(s) if s.is_number_like() => s.parse_f64().map(Number::Float),
            _ => Err(self.mismatch("a number")),
        }
    }

    pub fn as_decimal(&self) -> Result<Decimal, ValueError> {
        let number = self.as_number()?;
        number.as_decimal().ok_or(ValueError::NumberFormat {
            text: number.to_string(),
            expected: "decimal",
        })
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(self.mismatch("a String")),
        }
    }

    pub fn as_array(&self) -> Result<&Array, ValueError> {
        match self {
            Value::Array(arr) => Ok(arr),
            _ => Err(self.mismatch("an array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array, ValueError> {
        match self {
            Value::Array(arr) => Ok(arr),
            _ => Err(self.mismatch("an array")),
        }
    }

    pub fn as_object(&self) -> Result<&Object, ValueError> {
        match self {
            Value::Object(obj) => Ok(obj),
            _ => Err(self.mismatch("an object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, ValueError> {
        match self {
            Value::Object(obj) => Ok(obj),
            _ => Err(self.mismatch("an object")),
        }
    }
}

fn narrow<T: TryFrom<i64>>(value: i64, target: &'static str) -> Result<T, ValueError> {
    T::try_from(value).map_err(|_| ValueError::OutOfRange { value, target })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::emitter::to_json(self))
    }
}

// Comparisons against plain Rust values

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Boolean(b) => b == other,
            Value::String(s) => {
                let text = if *other { "true" } else { "false" };
                s.is_boolean_like() && s.as_str() == text
            }
            _ => false,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s.as_str() == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Number(Number::Integer(i)) if i == other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Number(n) if n.as_f64() == *other)
    }
}

/// `Null` equals an absent value.
impl PartialEq<Option<&Value>> for Value {
    fn eq(&self, other: &Option<&Value>) -> bool {
        match other {
            None => self.is_null(),
            Some(v) => self == *v,
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, u8, u16, u32, f32, f64, Decimal);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(JsonString::new(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(JsonString::new(s))
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(JsonString::new(c.to_string()))
    }
}

impl From<JsonString> for Value {
    fn from(s: JsonString) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(Array::of(values))
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(map: HashMap<String, T>) -> Self {
        Value::Object(Object::of(map))
    }
}

/// `None` becomes `Null`, so a container never stores an absent entry.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
