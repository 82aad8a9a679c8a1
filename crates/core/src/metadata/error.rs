use super::{PropertyIndex, TypeIndex};
use thiserror::Error;

/// Errors raised while assembling a metadata registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("type index {0} registered twice")]
    DuplicateType(TypeIndex),
    #[error("property index {0} registered twice")]
    DuplicateProperty(PropertyIndex),
    #[error("property {property} refers to unknown type {type_index}")]
    DanglingType { property: PropertyIndex, type_index: TypeIndex },
}
