use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// other keepers and lookups use a fast hasher
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

use serde_json::Value;
use tracing::debug;

use crate::container::Container;
use crate::error::{ContainerError, Result};
use crate::keeper;

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

pub type Getter<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
pub type Setter<T> = Arc<dyn Fn(&mut T, Value) + Send + Sync>;

// ------------- Visibility -------------
// Mirrors the usual member visibilities. Only private properties are kept
// out of the allow-list by visibility alone; hiding anything else is up to
// Container::hidden_property_names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn is_private(&self) -> bool {
        *self == Visibility::Private
    }
}

// ------------- Property -------------
pub struct Property<T> {
    name: &'static str,
    visibility: Visibility,
    declared_by: &'static str,
    getter: Getter<T>,
    setter: Option<Setter<T>>,
}

impl<T> Property<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
    /// Short name of the type that declared the property, which is an
    /// ancestor for inherited properties.
    pub fn declared_by(&self) -> &'static str {
        self.declared_by
    }
    pub fn setter(&self) -> Option<&Setter<T>> {
        self.setter.as_ref()
    }
    /// Reads the live value straight from `target`, ignoring the allow-list.
    pub fn value(&self, target: &T) -> Value {
        (self.getter)(target)
    }
}

// a derive would needlessly demand T: Clone
impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            visibility: self.visibility,
            declared_by: self.declared_by,
            getter: Arc::clone(&self.getter),
            setter: self.setter.as_ref().map(Arc::clone),
        }
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("declared_by", &self.declared_by)
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

// ------------- Schema -------------
/// The explicit, per type declaration of every property an instance carries,
/// inherited ones included, in declaration order.
pub struct Schema<T> {
    type_name: &'static str,
    properties: Vec<Property<T>>,
    index: HashMap<&'static str, usize, OtherHasher>,
}

impl<T: 'static> Schema<T> {
    pub fn build(type_name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder::new(type_name)
    }
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
    pub fn property(&self, name: &str) -> Option<&Property<T>> {
        self.index.get(name).map(|&i| &self.properties[i])
    }
    pub fn has_property(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|p| p.name)
    }
    pub fn len(&self) -> usize {
        self.properties.len()
    }
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .finish()
    }
}

// ------------- SchemaBuilder -------------
pub struct SchemaBuilder<T> {
    type_name: &'static str,
    properties: Vec<Property<T>>,
    setters: Vec<(&'static str, Setter<T>)>,
    // first failure while declaring, reported by finish()
    error: Option<ContainerError>,
}

impl<T: 'static> SchemaBuilder<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            properties: Vec::new(),
            setters: Vec::new(),
            error: None,
        }
    }

    /// Declares a property read through `get`. Redeclaring an inherited name
    /// overrides it in place, and the override starts out without a setter
    /// since the inherited one writes to the parent's storage.
    pub fn property<V, F>(mut self, name: &'static str, visibility: Visibility, get: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let property = Property {
            name,
            visibility,
            declared_by: self.type_name,
            getter: Arc::new(move |target: &T| get(target).into()),
            setter: None,
        };
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
        self
    }
    pub fn public<V, F>(self, name: &'static str, get: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.property(name, Visibility::Public, get)
    }
    pub fn protected<V, F>(self, name: &'static str, get: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.property(name, Visibility::Protected, get)
    }
    pub fn private<V, F>(self, name: &'static str, get: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.property(name, Visibility::Private, get)
    }

    /// Registers the mutator hydration routes `name` to. The property has to
    /// be declared by the time the schema is finished.
    pub fn setter<F>(mut self, name: &'static str, set: F) -> Self
    where
        F: Fn(&mut T, Value) + Send + Sync + 'static,
    {
        self.setters.push((name, Arc::new(set)));
        self
    }

    /// Copies every property of `parent`, private ones included, reading and
    /// writing them through the embedded parent value. Properties the child
    /// already declared win over inherited ones.
    pub fn inherit<P: 'static>(
        mut self,
        parent: &Schema<P>,
        project: fn(&T) -> &P,
        project_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        for inherited in parent.properties() {
            if self.properties.iter().any(|p| p.name == inherited.name) {
                continue;
            }
            let getter = Arc::clone(&inherited.getter);
            let setter: Option<Setter<T>> = inherited.setter.as_ref().map(|s| {
                let s = Arc::clone(s);
                Arc::new(move |target: &mut T, value: Value| s(project_mut(target), value)) as Setter<T>
            });
            self.properties.push(Property {
                name: inherited.name,
                visibility: inherited.visibility,
                declared_by: inherited.declared_by,
                getter: Arc::new(move |target: &T| getter(project(target))),
                setter,
            });
        }
        self
    }

    /// Like `inherit`, taking the parent schema from the keeper. Ancestry has
    /// to be acyclic; a type that ends up extending itself panics.
    pub fn extends<P: Container>(
        mut self,
        project: fn(&T) -> &P,
        project_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        match keeper::declaration::<P>() {
            Ok(parent) => self.inherit(parent.schema(), project, project_mut),
            Err(e) => {
                self.error.get_or_insert(e);
                self
            }
        }
    }

    pub fn finish(self) -> Result<Schema<T>> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut properties = self.properties;
        for (name, setter) in self.setters {
            match properties.iter_mut().find(|p| p.name == name) {
                Some(property) => property.setter = Some(setter),
                None => return Err(ContainerError::unknown_property(name)),
            }
        }
        let index = properties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name, i))
            .collect();
        debug!(type_name = self.type_name, properties = properties.len(), "schema declared");
        Ok(Schema {
            type_name: self.type_name,
            properties,
            index,
        })
    }
}
