//! Mapping host types into value trees.
//!
//! A type opts in by implementing [`ToJson`]. The [`ObjectSerializer`]
//! layers per-type behavior on top of that mapping:
//!
//! - a custom serializer replacing the type's own [`ToJson`] impl
//! - modifiers that patch the produced object after mapping
//! - property filters, combined with AND, from a [`FilterRegistry`]
//!
//! ```
//! use objective_json::{Object, ObjectSerializer, ToJson, Value};
//!
//! struct User {
//!     name: String,
//!     password: String,
//! }
//!
//! impl ToJson for User {
//!     fn to_json(&self, ser: &ObjectSerializer) -> Value {
//!         let mut obj = Object::new();
//!         obj.put("name", ser.to_value(&self.name));
//!         obj.put("password", ser.to_value(&self.password));
//!         obj.into()
//!     }
//! }
//!
//! let mut ser = ObjectSerializer::new();
//! ser.add_filter::<User>(|name: &str| name != "password");
//!
//! let user = User { name: "ann".into(), password: "hunter2".into() };
//! assert_eq!(ser.serialize(&user), r#"{"name":"ann"}"#);
//! ```

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    error::Error,
    fmt,
};

use log::debug;
use rust_decimal::Decimal;

use crate::{
    emitter::to_json_filtered,
    filter::{Filter, FilterRegistry},
    value::{Array, JsonString, Number, Object, Value},
};

/// Conversion of a host value into a value tree.
///
/// Implementations should map nested host values through
/// [`ObjectSerializer::to_value`] so their own modifiers and filters apply.
pub trait ToJson {
    fn to_json(&self, ser: &ObjectSerializer) -> Value;
}

pub type ModifierError = Box<dyn Error + Send + Sync>;

type Modifier<T> = Box<dyn Fn(&T, &mut Object) -> Result<(), ModifierError> + Send + Sync>;
type CustomSerializer<T> = Box<dyn Fn(&ObjectSerializer, &T) -> Value + Send + Sync>;

/// Registry of per-type serializers, modifiers and filters.
///
/// All registration takes `&mut self`; share it behind a lock if several
/// threads need to reconfigure it.
#[derive(Default)]
pub struct ObjectSerializer {
    filters: FilterRegistry,
    modifiers: HashMap<TypeId, Vec<Box<dyn Any + Send + Sync>>>,
    serializers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ObjectSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property filter for objects produced from `T`.
    pub fn add_filter<T: 'static>(&mut self, filter: impl Filter + 'static) {
        self.filters.add::<T>(filter);
    }

    /// Clears the filters for `T`; every property is emitted again.
    pub fn remove_filters<T: 'static>(&mut self) {
        self.filters.remove::<T>();
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Adds a modifier run on every object produced from `T`.
    ///
    /// Modifiers run in registration order. A failing modifier is logged and
    /// skipped; the remaining modifiers still run.
    pub fn add_modifier<T, F>(&mut self, modifier: F)
    where
        T: 'static,
        F: Fn(&T, &mut Object) -> Result<(), ModifierError> + Send + Sync + 'static,
    {
        let modifier: Modifier<T> = Box::new(modifier);
        self.modifiers
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(modifier));
    }

    /// Replaces the [`ToJson`] mapping of `T`.
    pub fn set_serializer<T, F>(&mut self, serializer: F)
    where
        T: 'static,
        F: Fn(&ObjectSerializer, &T) -> Value + Send + Sync + 'static,
    {
        let serializer: CustomSerializer<T> = Box::new(serializer);
        self.serializers.insert(TypeId::of::<T>(), Box::new(serializer));
    }

    /// Maps `value` and runs its modifiers, without filtering.
    fn mapped<T: ToJson + ?Sized + 'static>(&self, value: &T) -> Value {
        let custom = self
            .serializers
            .get(&TypeId::of::<T>())
            .and_then(|s| s.downcast_ref::<CustomSerializer<T>>());
        let mut mapped = match custom {
            Some(serializer) => serializer(self, value),
            None => value.to_json(self),
        };

        if let (Value::Object(obj), Some(modifiers)) =
            (&mut mapped, self.modifiers.get(&TypeId::of::<T>()))
        {
            for modifier in modifiers {
                let Some(modifier) = modifier.downcast_ref::<Modifier<T>>() else {
                    continue;
                };
                if let Err(e) = modifier(value, obj) {
                    debug!("Modifier for {} failed: {}", type_name::<T>(), e);
                }
            }
        }
        mapped
    }

    /// Converts `value` into a tree, applying its custom serializer,
    /// modifiers and filters.
    pub fn to_value<T: ToJson + ?Sized + 'static>(&self, value: &T) -> Value {
        let mut mapped = self.mapped(value);
        if let Value::Object(obj) = &mut mapped {
            obj.retain(|name, _| self.filters.allows_id(TypeId::of::<T>(), name));
        }
        mapped
    }

    /// Converts `value` straight to JSON text.
    pub fn serialize<T: ToJson + ?Sized + 'static>(&self, value: &T) -> String {
        to_json_filtered(
            &self.mapped(value),
            self.filters.filters_for_id(TypeId::of::<T>()),
        )
    }
}

impl fmt::Debug for ObjectSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSerializer")
            .field("filters", &self.filters)
            .field("modifiers", &self.modifiers.len())
            .field("serializers", &self.serializers.len())
            .finish()
    }
}

macro_rules! scalar_to_json {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self, _ser: &ObjectSerializer) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

scalar_to_json!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, char, Decimal);

impl ToJson for str {
    fn to_json(&self, _ser: &ObjectSerializer) -> Value {
        Value::String(JsonString::new(self))
    }
}

impl ToJson for String {
    fn to_json(&self, _ser: &ObjectSerializer) -> Value {
        Value::String(JsonString::new(self.clone()))
    }
}

impl ToJson for Number {
    fn to_json(&self, _ser: &ObjectSerializer) -> Value {
        Value::Number(*self)
    }
}

impl ToJson for Value {
    fn to_json(&self, _ser: &ObjectSerializer) -> Value {
        self.clone()
    }
}

impl ToJson for Object {
    fn to_json(&self, _ser: &ObjectSerializer) -> Value {
        Value::Object(self.clone())
    }
}

impl ToJson for Array {
    fn to_json(&self, _ser: &ObjectSerializer) -> Value {
        Value::Array(self.clone())
    }
}

impl<T: ToJson + 'static> ToJson for Option<T> {
    fn to_json(&self, ser: &ObjectSerializer) -> Value {
        match self {
            Some(value) => ser.to_value(value),
            None => Value::Null,
        }
    }
}

impl<T: ToJson + 'static> ToJson for [T] {
    fn to_json(&self, ser: &ObjectSerializer) -> Value {
        Value::Array(self.iter().map(|item| ser.to_value(item)).collect())
    }
}

impl<T: ToJson + 'static, const N: usize> ToJson for [T; N] {
    fn to_json(&self, ser: &ObjectSerializer) -> Value {
        self.as_slice().to_json(ser)
    }
}

impl<T: ToJson + 'static> ToJson for Vec<T> {
    fn to_json(&self, ser: &ObjectSerializer) -> Value {
        self.as_slice().to_json(ser)
    }
}

impl<T: ToJson + 'static> ToJson for HashMap<String, T> {
    fn to_json(&self, ser: &ObjectSerializer) -> Value {
        Value::Object(
            self.iter()
                .map(|(name, value)| (name.clone(), ser.to_value(value)))
                .collect(),
        )
    }
}
