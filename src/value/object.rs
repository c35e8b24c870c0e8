use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use super::{Array, JsonString, NULL, Value};
use crate::error::ValueError;

/// A JSON object with unique keys.
///
/// Backed by a `HashMap`: iteration order is unspecified and equality
/// ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object(HashMap<String, Value>);

macro_rules! typed_fields {
    ($($get:ident / $put:ident: $ty:ty => $as:ident;)*) => {
        $(
            pub fn $get(&self, name: &str) -> Result<$ty, ValueError> {
                self.field(name)?.$as()
            }

            pub fn $put(&mut self, name: impl Into<String>, value: $ty) -> Option<Value> {
                self.put(name, value)
            }
        )*
    };
}

impl Object {
    pub fn new() -> Self {
        Object(HashMap::new())
    }

    /// Builds an object from name/value pairs. Later duplicates win.
    ///
    /// ```
    /// use objective_json::{Object, Value};
    ///
    /// let obj = Object::of([("a", Value::from(1)), ("b", Value::Null)]);
    /// assert_eq!(obj.len(), 2);
    /// ```
    pub fn of<K: Into<String>, V: Into<Value>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an object from parallel name and value lists.
    pub fn from_parallel<K: Into<String>, V: Into<Value>>(
        names: Vec<K>,
        values: Vec<V>,
    ) -> Result<Self, ValueError> {
        if names.len() != values.len() {
            return Err(ValueError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        Ok(Object::of(names.into_iter().zip(values)))
    }

    fn field(&self, name: &str) -> Result<&Value, ValueError> {
        self.0
            .get(name)
            .ok_or_else(|| ValueError::MissingKey(name.to_string()))
    }

    /// Inserts a value, returning the one previously stored under `name`.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Looks up `name`, treating a missing entry as `Null`.
    pub fn get_or_null(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&NULL)
    }

    /// True when `name` is present and not `Null`.
    pub fn present_not_null(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|v| !v.is_null())
    }

    typed_fields! {
        get_bool / put_bool: bool => as_bool;
        get_i64 / put_i64: i64 => as_i64;
        get_i32 / put_i32: i32 => as_i32;
        get_i16 / put_i16: i16 => as_i16;
        get_i8 / put_i8: i8 => as_i8;
        get_f64 / put_f64: f64 => as_f64;
        get_f32 / put_f32: f32 => as_f32;
    }

    pub fn get_string(&self, name: &str) -> Result<&str, ValueError> {
        self.field(name)?.as_str()
    }

    pub fn get_object(&self, name: &str) -> Result<&Object, ValueError> {
        self.field(name)?.as_object()
    }

    pub fn get_array(&self, name: &str) -> Result<&Array, ValueError> {
        self.field(name)?.as_array()
    }

    /// Puts a string; numbers and booleans are stored as their text.
    pub fn put_string(&mut self, name: impl Into<String>, value: impl Into<JsonString>) -> Option<Value> {
        self.put(name, Value::String(value.into()))
    }

    pub fn put_object(&mut self, name: impl Into<String>, value: Object) -> Option<Value> {
        self.put(name, value)
    }

    pub fn put_array(&mut self, name: impl Into<String>, value: Array) -> Option<Value> {
        self.put(name, value)
    }

    pub fn put_null(&mut self, name: impl Into<String>) -> Option<Value> {
        self.put(name, Value::Null)
    }

    pub fn into_map(self) -> HashMap<String, Value> {
        self.0
    }
}

impl Deref for Object {
    type Target = HashMap<String, Value>;

    fn deref(&self) -> &HashMap<String, Value> {
        &self.0
    }
}

impl DerefMut for Object {
    fn deref_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.0
    }
}

impl From<HashMap<String, Value>> for Object {
    fn from(map: HashMap<String, Value>) -> Self {
        Object(map)
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Object(iter.into_iter().collect())
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
