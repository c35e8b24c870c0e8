//! JSON text output for value trees.
//!
//! Output is compact and deterministic: object keys are written in sorted
//! order. Floats always carry a decimal point so they read back as floats,
//! and non-finite floats are written as the quoted strings `"NaN"`,
//! `"Infinity"` and `"-Infinity"`.
//!
//! # Examples
//!
//! ```
//! use objective_json::{Object, Value};
//! use objective_json::emitter::to_json;
//!
//! let obj = Object::of([("name", Value::from("Alice")), ("age", Value::from(30))]);
//! assert_eq!(to_json(&Value::from(obj)), r#"{"age":30,"name":"Alice"}"#);
//! assert_eq!(to_json(&Value::from(1.0)), "1.0");
//! assert_eq!(to_json(&Value::from(f64::NAN)), r#""NaN""#);
//! ```

use std::fmt::Write;

use log::trace;

use crate::{
    filter::Filter,
    value::{Array, Number, Object, Value},
};

/// Writes values as JSON text, optionally filtering the properties of the
/// outermost object.
pub struct JsonPrinter<'f> {
    filters: &'f [Box<dyn Filter>],
}

impl JsonPrinter<'static> {
    pub fn new() -> Self {
        JsonPrinter { filters: &[] }
    }
}

impl Default for JsonPrinter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'f> JsonPrinter<'f> {
    /// A printer that keeps a top-level property only if every filter allows it.
    pub fn with_filters(filters: &'f [Box<dyn Filter>]) -> Self {
        JsonPrinter { filters }
    }

    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write(value, &mut out);
        out
    }

    /// Appends the JSON text of `value` to `out`.
    pub fn write(&self, value: &Value, out: &mut String) {
        match value {
            Value::Object(obj) => self.write_object(obj, true, out),
            other => self.write_value(other, out),
        }
    }

    fn write_value(&self, value: &Value, out: &mut String) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_number(n, out),
            Value::String(s) => write_string(s, out),
            Value::Array(arr) => self.write_array(arr, out),
            Value::Object(obj) => self.write_object(obj, false, out),
        }
    }

    fn write_array(&self, arr: &Array, out: &mut String) {
        out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_value(item, out);
        }
        out.push(']');
    }

    fn write_object(&self, obj: &Object, outermost: bool, out: &mut String) {
        let mut entries: Vec<_> = obj.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        out.push('{');
        let mut first = true;
        for (key, value) in entries {
            if outermost && !self.allows(key) {
                trace!("Filtered out property '{}'", key);
                continue;
            }
            if !first {
                out.push(',');
            }
            first = false;
            write_string(key, out);
            out.push(':');
            self.write_value(value, out);
        }
        out.push('}');
    }

    fn allows(&self, name: &str) -> bool {
        self.filters.iter().all(|f| f.allow(name))
    }
}

fn write_number(n: &Number, out: &mut String) {
    if n.is_finite() {
        // Writing to a String cannot fail
        let _ = write!(out, "{}", n);
    } else {
        let _ = write!(out, "\"{}\"", n);
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Converts a value to compact JSON text.
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new().print(value)
}

/// Converts a value to JSON text, dropping top-level properties that any of
/// `filters` rejects. Nested objects are written in full.
pub fn to_json_filtered(value: &Value, filters: &[Box<dyn Filter>]) -> String {
    JsonPrinter::with_filters(filters).print(value)
}
