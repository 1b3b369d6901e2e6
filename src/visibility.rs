use std::collections::HashSet;

use crate::schema::{OtherHasher, Schema};

/// Name under which an instance keeps its allow-list. It is bookkeeping, so it
/// never shows up in the allow-list even if a schema declares it.
pub const ALLOW_LIST_PROPERTY: &str = "allowList";

// ------------- AllowList -------------
// Ordered set of externally readable property names. Order follows the
// schema, but only membership carries meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowList {
    names: Vec<&'static str>,
    members: HashSet<&'static str, OtherHasher>,
}

impl AllowList {
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
    pub fn as_slice(&self) -> &[&'static str] {
        &self.names
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Every non-private property of `schema`, inherited ones included, minus the
/// bookkeeping name and minus `hidden`.
pub fn compute_allow_list<T: 'static>(schema: &Schema<T>, hidden: &[&str]) -> AllowList {
    let mut excluded: HashSet<&str, OtherHasher> = hidden.iter().copied().collect();
    excluded.insert(ALLOW_LIST_PROPERTY);
    let mut allow_list = AllowList::default();
    for property in schema.properties() {
        if property.visibility().is_private() || excluded.contains(property.name()) {
            continue;
        }
        if allow_list.members.insert(property.name()) {
            allow_list.names.push(property.name());
        }
    }
    allow_list
}
