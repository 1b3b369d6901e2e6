//! The container contract and the instance proxy that enforces it.
//!
//! A type opts in by implementing [`Container`]: it declares its properties
//! once in a [`Schema`] and names the ones that stay hidden. Wrapping a value
//! in an [`Instance`] then hydrates it from a data map through the registered
//! setters and gates every external read through the allow-list.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::error::{ContainerError, Result};
use crate::keeper::{self, Declaration};
use crate::schema::{Schema, SchemaBuilder};
use crate::visibility::{ALLOW_LIST_PROPERTY, AllowList};

pub trait Container: Sized + 'static {
    /// Declares every property of the type, including inherited ones, and the
    /// setters hydration may route to.
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self>;

    /// Declared properties that must stay invisible to `get`, `has` and
    /// serialization even though their visibility would allow reads. A type
    /// extending another container has to include the parent's names itself
    /// if it wants to keep them hidden.
    fn hidden_property_names() -> Vec<&'static str> {
        Vec::new()
    }
}

/// Routes each `(field, value)` pair, in iteration order, to the setter
/// registered for `field`. Stops at the first failure; setters already
/// called are not undone.
pub fn hydrate<T, I, K>(schema: &Schema<T>, target: &mut T, data: I) -> Result<()>
where
    T: 'static,
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    for (field, value) in data {
        let field = field.as_ref();
        // the allow-list is always there, but hydration may never replace it
        if field == ALLOW_LIST_PROPERTY {
            warn!(type_name = schema.type_name(), property = field, "allow-list is not settable");
            return Err(ContainerError::unknown_setter(field));
        }
        let Some(property) = schema.property(field) else {
            warn!(type_name = schema.type_name(), property = field, "no such property");
            return Err(ContainerError::unknown_property(field));
        };
        let Some(setter) = property.setter() else {
            warn!(type_name = schema.type_name(), property = field, "no setter for property");
            return Err(ContainerError::unknown_setter(field));
        };
        trace!(type_name = schema.type_name(), property = field, "set");
        setter(target, value);
    }
    Ok(())
}

// ------------- Instance -------------
pub struct Instance<T: Container> {
    // schema plus the allow-list, resolved before hydration and never changed
    declaration: Arc<Declaration<T>>,
    value: T,
}

impl<T: Container> Instance<T> {
    /// Hydrates a default `T` from `data`. Afterwards the value is only
    /// readable through `Deref`; changing it goes through the type's own
    /// `&self` logic or `into_inner`.
    pub fn new<I, K>(data: I) -> Result<Self>
    where
        T: Default,
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        Self::with_value(T::default(), data)
    }

    /// Hydrates `value` from `data`. Properties absent from `data` keep
    /// whatever `value` started with.
    pub fn with_value<I, K>(value: T, data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let declaration = keeper::declaration::<T>()?;
        let mut instance = Self { declaration, value };
        hydrate(instance.declaration.schema(), &mut instance.value, data)?;
        Ok(instance)
    }

    /// Reads an allow-listed property.
    pub fn get(&self, name: &str) -> Result<Value> {
        if !self.has(name) {
            return Err(ContainerError::unknown_property(name));
        }
        self.declaration
            .schema()
            .property(name)
            .map(|property| property.value(&self.value))
            .ok_or_else(|| ContainerError::unknown_property(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.declaration.allow_list().contains(name)
    }

    /// All allow-listed properties with their current values, in allow-list
    /// order. Empty when nothing is exposed.
    pub fn serialize(&self) -> Map<String, Value> {
        let schema = self.declaration.schema();
        self.allow_list()
            .iter()
            .filter_map(|name| schema.property(name))
            .map(|property| (property.name().to_owned(), property.value(&self.value)))
            .collect()
    }

    pub fn allow_list(&self) -> &AllowList {
        self.declaration.allow_list()
    }
    pub fn properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.allow_list().iter()
    }
    pub fn schema(&self) -> &Schema<T> {
        self.declaration.schema()
    }
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Container> Deref for Instance<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Container + Clone> Clone for Instance<T> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
            value: self.value.clone(),
        }
    }
}

impl<T: Container + fmt::Debug> fmt::Debug for Instance<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Instance")
            .field("allow_list", &self.allow_list().as_slice())
            .field("value", &self.value)
            .finish()
    }
}

impl<T: Container> Serialize for Instance<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let schema = self.declaration.schema();
        let mut map = serializer.serialize_map(Some(self.allow_list().len()))?;
        for property in self.allow_list().iter().filter_map(|name| schema.property(name)) {
            map.serialize_entry(property.name(), &property.value(&self.value))?;
        }
        map.end()
    }
}
