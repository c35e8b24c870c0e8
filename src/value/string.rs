use std::{fmt, ops::Deref, sync::OnceLock};

use crate::error::ValueError;

/// What the text of a [`JsonString`] looks like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Class {
    number: bool,
    integer: bool,
    boolean: bool,
}

impl Class {
    /// Optional leading `-`, at least one digit, at most one `.`.
    fn of(text: &str) -> Class {
        if text == "true" || text == "false" {
            return Class {
                boolean: true,
                ..Class::default()
            };
        }

        let digits = text.strip_prefix('-').unwrap_or(text);
        let mut dots = 0;
        let mut seen_digit = false;
        for b in digits.bytes() {
            match b {
                b'0'..=b'9' => seen_digit = true,
                b'.' => dots += 1,
                _ => return Class::default(),
            }
        }

        if !seen_digit || dots > 1 {
            return Class::default();
        }
        Class {
            number: true,
            integer: dots == 0,
            boolean: false,
        }
    }
}

/// A JSON string value.
///
/// Besides its text, a string knows whether it looks like an integer, a
/// number or a boolean. The classification is computed on first use and
/// cached; values built from numbers or booleans are classified up front.
#[derive(Clone, Default)]
pub struct JsonString {
    text: String,
    class: OnceLock<Class>,
}

impl JsonString {
    pub fn new(text: impl Into<String>) -> Self {
        JsonString {
            text: text.into(),
            class: OnceLock::new(),
        }
    }

    /// String holding the decimal text of a number, e.g. `"42"`.
    pub fn from_number(n: super::Number) -> Self {
        let class = Class {
            number: true,
            integer: n.is_integer(),
            boolean: false,
        };
        JsonString {
            text: n.to_string(),
            class: OnceLock::from(class),
        }
    }

    /// String holding `"true"` or `"false"`.
    pub fn from_bool(b: bool) -> Self {
        JsonString {
            text: b.to_string(),
            class: OnceLock::from(Class {
                boolean: true,
                ..Class::default()
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    fn class(&self) -> Class {
        *self.class.get_or_init(|| Class::of(&self.text))
    }

    pub fn is_number_like(&self) -> bool {
        self.class().number
    }

    pub fn is_integer_like(&self) -> bool {
        self.class().integer
    }

    pub fn is_boolean_like(&self) -> bool {
        self.class().boolean
    }

    pub(crate) fn parse_i64(&self) -> Result<i64, ValueError> {
        self.text.parse().map_err(|_| ValueError::NumberFormat {
            text: self.text.clone(),
            expected: "long",
        })
    }

    pub(crate) fn parse_f64(&self) -> Result<f64, ValueError> {
        self.text.parse().map_err(|_| ValueError::NumberFormat {
            text: self.text.clone(),
            expected: "double",
        })
    }
}

impl PartialEq for JsonString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for JsonString {}

impl PartialEq<str> for JsonString {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for JsonString {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl Deref for JsonString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text, f)
    }
}

impl fmt::Display for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for JsonString {
    fn from(s: &str) -> Self {
        JsonString::new(s)
    }
}

impl From<String> for JsonString {
    fn from(s: String) -> Self {
        JsonString::new(s)
    }
}

impl From<super::Number> for JsonString {
    fn from(n: super::Number) -> Self {
        JsonString::from_number(n)
    }
}

impl From<bool> for JsonString {
    fn from(b: bool) -> Self {
        JsonString::from_bool(b)
    }
}
