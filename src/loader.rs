//! Hydrating containers from configuration.
//!
//! Configuration keys are written markup style (`event-name`, or `event_name`
//! as environment variables produce) and mapped onto property names with
//! [`field_to_property`] before hydration. Keys are hydrated in sorted order.

use std::collections::BTreeMap;

use config::{Config, ConfigError, Environment, File};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::case::{field_to_property, property_to_field};
use crate::container::{Container, Instance};
use crate::error::ContainerError;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Hydrates a default `T` from the top level keys of `config`.
pub fn load<T: Container + Default>(config: Config) -> Result<Instance<T>, LoadError> {
    let table: BTreeMap<String, Value> = config.try_deserialize()?;
    let data = table
        .into_iter()
        .map(|(key, value)| (field_to_property(&key.replace('_', "-")), value));
    Ok(Instance::new(data)?)
}

/// Reads `path` (format picked from its extension) and, when `env_prefix` is
/// given, layers matching environment variables on top of it.
pub fn load_file<T: Container + Default>(
    path: &str,
    env_prefix: Option<&str>,
) -> Result<Instance<T>, LoadError> {
    let mut builder = Config::builder().add_source(File::with_name(path));
    if let Some(prefix) = env_prefix {
        builder = builder.add_source(Environment::with_prefix(prefix).try_parsing(true));
    }
    let config = builder.build()?;
    info!(path, env_prefix = ?env_prefix, "loading container from config");
    load(config)
}

/// The serialized form of `instance` keyed the way `load` expects.
pub fn dump<T: Container>(instance: &Instance<T>) -> BTreeMap<String, Value> {
    instance
        .serialize()
        .into_iter()
        .map(|(property, value)| (property_to_field(&property), value))
        .collect()
}
