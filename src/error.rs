
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    // Raised both for input keys with no declared property and for reads of
    // names that are absent from (or hidden by) the allow-list.
    #[error("Unknown property: {property}")]
    UnknownProperty { property: String },
    #[error("Unknown setter: {setter} (for property {property})")]
    UnknownSetter { property: String, setter: String },
}

impl ContainerError {
    pub fn unknown_property(property: &str) -> Self {
        Self::UnknownProperty { property: property.to_owned() }
    }
    pub fn unknown_setter(property: &str) -> Self {
        Self::UnknownSetter {
            property: property.to_owned(),
            setter: crate::case::setter_name(property),
        }
    }
    /// The property name the error is about.
    pub fn property(&self) -> &str {
        match self {
            Self::UnknownProperty { property } => property,
            Self::UnknownSetter { property, .. } => property,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContainerError>;
