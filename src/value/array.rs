use std::ops::{Deref, DerefMut};

use super::{JsonString, Object, Value};
use crate::error::ValueError;

/// An ordered JSON array. Element order is significant for equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array(Vec<Value>);

macro_rules! typed_elements {
    ($($get:ident / $set:ident / $add:ident: $ty:ty => $as:ident;)*) => {
        $(
            pub fn $get(&self, index: usize) -> Result<$ty, ValueError> {
                self.at(index)?.$as()
            }

            pub fn $set(&mut self, index: usize, value: $ty) -> Result<Value, ValueError> {
                self.set(index, value)
            }

            pub fn $add(&mut self, value: $ty) {
                self.add(value);
            }
        )*
    };
}

impl Array {
    pub fn new() -> Self {
        Array(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Array(Vec::with_capacity(capacity))
    }

    /// Builds an array from anything convertible into values.
    pub fn of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Array(values.into_iter().map(Into::into).collect())
    }

    fn at(&self, index: usize) -> Result<&Value, ValueError> {
        self.0.get(index).ok_or(ValueError::IndexOutOfBounds {
            index,
            len: self.0.len(),
        })
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value, ValueError> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(ValueError::IndexOutOfBounds { index, len })?;
        Ok(std::mem::replace(slot, value.into()))
    }

    pub fn add(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, ValueError> {
        if index >= self.0.len() {
            return Err(ValueError::IndexOutOfBounds {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    typed_elements! {
        get_bool / set_bool / add_bool: bool => as_bool;
        get_i64 / set_i64 / add_i64: i64 => as_i64;
        get_i32 / set_i32 / add_i32: i32 => as_i32;
        get_i16 / set_i16 / add_i16: i16 => as_i16;
        get_i8 / set_i8 / add_i8: i8 => as_i8;
        get_f64 / set_f64 / add_f64: f64 => as_f64;
        get_f32 / set_f32 / add_f32: f32 => as_f32;
    }

    pub fn get_string(&self, index: usize) -> Result<&str, ValueError> {
        self.at(index)?.as_str()
    }

    pub fn get_object(&self, index: usize) -> Result<&Object, ValueError> {
        self.at(index)?.as_object()
    }

    pub fn get_array(&self, index: usize) -> Result<&Array, ValueError> {
        self.at(index)?.as_array()
    }

    pub fn set_string(&mut self, index: usize, value: impl Into<JsonString>) -> Result<Value, ValueError> {
        self.set(index, Value::String(value.into()))
    }

    pub fn set_object(&mut self, index: usize, value: Object) -> Result<Value, ValueError> {
        self.set(index, value)
    }

    pub fn set_array(&mut self, index: usize, value: Array) -> Result<Value, ValueError> {
        self.set(index, value)
    }

    pub fn set_null(&mut self, index: usize) -> Result<Value, ValueError> {
        self.set(index, Value::Null)
    }

    /// Adds a string; numbers and booleans are stored as their text.
    pub fn add_string(&mut self, value: impl Into<JsonString>) {
        self.add(Value::String(value.into()));
    }

    pub fn add_object(&mut self, value: Object) {
        self.add(value);
    }

    pub fn add_array(&mut self, value: Array) {
        self.add(value);
    }

    pub fn add_null(&mut self) {
        self.add(Value::Null);
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl Deref for Array {
    type Target = Vec<Value>;

    fn deref(&self) -> &Vec<Value> {
        &self.0
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut Vec<Value> {
        &mut self.0
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array(values)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array(iter.into_iter().collect())
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
