//! Type keyed cache of declarations.
//!
//! A [`Declaration`] couples the schema of a concrete container type with the
//! allow-list resolved for it. It is built the first time an instance of the
//! type is constructed and then shared, unchanged, by every later instance.

use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use lazy_static::lazy_static;
use tracing::debug;

use crate::container::Container;
use crate::error::Result;
use crate::schema::{OtherHasher, Schema, SchemaBuilder};
use crate::visibility::{AllowList, compute_allow_list};

// ------------- Declaration -------------
#[derive(Debug)]
pub struct Declaration<T> {
    schema: Schema<T>,
    allow_list: AllowList,
}

impl<T: Container> Declaration<T> {
    /// Declares the schema of `T` and resolves its allow-list, without caching.
    pub fn resolve() -> Result<Self> {
        let schema = T::declare(SchemaBuilder::new(short_type_name::<T>())).finish()?;
        let hidden = T::hidden_property_names();
        let allow_list = compute_allow_list(&schema, &hidden);
        debug!(
            type_name = schema.type_name(),
            exposed = allow_list.len(),
            hidden = hidden.len(),
            "allow-list resolved"
        );
        Ok(Self { schema, allow_list })
    }
    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }
}

// ------------- SchemaKeeper -------------
#[derive(Default)]
pub struct SchemaKeeper {
    kept: HashMap<TypeId, Arc<dyn Any + Send + Sync>, OtherHasher>,
}

impl SchemaKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    // Keeps the first declaration seen for a type, so racing constructions
    // still end up sharing one.
    pub fn keep<T: Container>(&mut self, declaration: Declaration<T>) -> (Arc<Declaration<T>>, bool) {
        if let Some(kept) = self.get::<T>() {
            return (kept, true);
        }
        let keepsake = Arc::new(declaration);
        self.kept.insert(TypeId::of::<T>(), Arc::clone(&keepsake) as Arc<dyn Any + Send + Sync>);
        (keepsake, false)
    }
    pub fn get<T: Container>(&self) -> Option<Arc<Declaration<T>>> {
        self.kept
            .get(&TypeId::of::<T>())
            .and_then(|kept| Arc::clone(kept).downcast::<Declaration<T>>().ok())
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

lazy_static! {
    static ref KEEPER: Mutex<SchemaKeeper> = Mutex::new(SchemaKeeper::new());
}

// kept declarations are immutable, so a poisoned lock still guards valid data
fn keeper() -> MutexGuard<'static, SchemaKeeper> {
    KEEPER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

thread_local! {
    // types whose declaration is being resolved on this thread, outermost first
    static RESOLVING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

// Marks a type as being resolved for as long as it lives, unwinding included.
struct Resolving(TypeId);

impl Resolving {
    fn enter<T: Container>() -> Self {
        let id = TypeId::of::<T>();
        let cyclic = RESOLVING.with(|resolving| {
            let mut resolving = resolving.borrow_mut();
            let cyclic = resolving.contains(&id);
            resolving.push(id);
            cyclic
        });
        let guard = Self(id);
        if cyclic {
            panic!("cyclic container ancestry: {} extends itself", short_type_name::<T>());
        }
        guard
    }
}

impl Drop for Resolving {
    fn drop(&mut self) {
        RESOLVING.with(|resolving| {
            let mut resolving = resolving.borrow_mut();
            if let Some(i) = resolving.iter().rposition(|id| *id == self.0) {
                resolving.remove(i);
            }
        });
    }
}

/// The shared declaration of `T`, resolving it on first use. Ancestry declared
/// through `SchemaBuilder::extends` must be acyclic; a type that ends up
/// extending itself panics.
pub fn declaration<T: Container>() -> Result<Arc<Declaration<T>>> {
    let kept = keeper().get::<T>();
    if let Some(kept) = kept {
        return Ok(kept);
    }
    let _resolving = Resolving::enter::<T>();
    // resolved without holding the lock, since declaring a type may need the
    // declarations of its ancestors
    let resolved = Declaration::<T>::resolve()?;
    let (kept, _previously_kept) = keeper().keep(resolved);
    Ok(kept)
}

/// Number of container types declared so far.
pub fn declared_types() -> usize {
    keeper().len()
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    // strip the module path but leave any generic arguments alone
    let end = full.find('<').unwrap_or(full.len());
    match full[..end].rfind("::") {
        Some(i) => &full[i + 2..],
        None => full,
    }
}
