//! Property filters and the per-type filter registry.
//!
//! A [`Filter`] decides whether a named property survives serialization.
//! The [`FilterRegistry`] keeps an ordered list of filters per host type;
//! a property is kept only when every filter registered for the type
//! allows it. Clearing a type's filters leaves the single [`AllowAny`]
//! filter in place.

use std::{
    any::{TypeId, type_name},
    collections::HashMap,
    fmt,
};

use log::trace;

/// A predicate over property names.
pub trait Filter: Send + Sync {
    fn allow(&self, property: &str) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn allow(&self, property: &str) -> bool {
        self(property)
    }
}

/// The reset filter: every property is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAny;

impl Filter for AllowAny {
    fn allow(&self, _property: &str) -> bool {
        true
    }
}

/// Filters keyed by host type.
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<TypeId, Vec<Box<dyn Filter>>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter for `T`. Filters for the same type are combined with AND.
    pub fn add<T: 'static>(&mut self, filter: impl Filter + 'static) {
        trace!("Adding filter for {}", type_name::<T>());
        self.filters
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(filter));
    }

    /// Drops every filter for `T` and installs [`AllowAny`].
    pub fn remove<T: 'static>(&mut self) {
        trace!("Clearing filters for {}", type_name::<T>());
        self.filters
            .insert(TypeId::of::<T>(), vec![Box::new(AllowAny)]);
    }

    /// The filters registered for `T`, in insertion order.
    pub fn filters_for<T: 'static>(&self) -> &[Box<dyn Filter>] {
        self.filters_for_id(TypeId::of::<T>())
    }

    pub fn filters_for_id(&self, id: TypeId) -> &[Box<dyn Filter>] {
        self.filters.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// True when no filter registered for `T` rejects `property`.
    pub fn allows<T: 'static>(&self, property: &str) -> bool {
        self.allows_id(TypeId::of::<T>(), property)
    }

    pub fn allows_id(&self, id: TypeId, property: &str) -> bool {
        self.filters_for_id(id).iter().all(|f| f.allow(property))
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("types", &self.filters.len())
            .finish()
    }
}
