use std::fmt;

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::error::ValueError;

/// A JSON number, tagged as integer or floating-point.
///
/// The tag is part of the value: `Integer(1)` and `Float(1.0)` are different
/// numbers and compare unequal.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Integer magnitude, parsed from a literal without a `.`
    Integer(i64),

    /// Floating-point magnitude
    Float(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Fails on float-tagged numbers instead of truncating.
    pub fn as_i64(&self) -> Result<i64, ValueError> {
        match self {
            Number::Integer(i) => Ok(*i),
            Number::Float(_) => Err(ValueError::LossyInteger),
        }
    }

    /// Exact decimal form, `None` for NaN and the infinities.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Number::Integer(i) => Some(Decimal::from(*i)),
            Number::Float(f) => Decimal::from_f64(*f),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => false,
        }
    }
}

/// Canonical decimal text. Floats always carry a fraction so that they
/// parse back as floats; non-finite floats print as `NaN`/`Infinity`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(n) if n.is_nan() => f.write_str("NaN"),
            Number::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(n) => {
                let text = n.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::Integer(i64::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::Float(f64::from(n))
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

/// Decimals are float-tagged, whatever their scale.
impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Number::Float(d.to_f64().unwrap_or(f64::NAN))
    }
}
