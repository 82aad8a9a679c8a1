mod error;
mod registry;

pub use error::MetadataError;
pub use registry::{StaticMetadata, StaticMetadataBuilder};

use crate::object::ObjectRef;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Stable index of a type, committed by the encoder at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIndex(pub u16);

/// Stable index of a property, committed by the encoder at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyIndex(pub u16);

impl Display for TypeIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl Display for PropertyIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

bitflags! {
    /// Capabilities the registry reports for a type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TypeFlags: u8 {
        /// Dictionary entries of this type are keyed by their `TargetType`.
        const STYLE = 0b0000_0001;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeInfo {
    pub index: TypeIndex,
    pub name: Arc<str>,
    #[serde(default)]
    pub flags: TypeFlags,
}

impl TypeInfo {
    pub fn new(index: TypeIndex, name: impl Into<Arc<str>>) -> Self {
        Self { index, name: name.into(), flags: TypeFlags::empty() }
    }

    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_style(&self) -> bool {
        self.flags.contains(TypeFlags::STYLE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub index: PropertyIndex,
    pub name: Arc<str>,
    pub declaring_type: TypeIndex,
    pub property_type: TypeIndex,
}

impl PropertyInfo {
    pub fn new(
        index: PropertyIndex,
        name: impl Into<Arc<str>>,
        declaring_type: TypeIndex,
        property_type: TypeIndex,
    ) -> Self {
        Self { index, name: name.into(), declaring_type, property_type }
    }
}

/// Resolves the indices carried by nodes into type and property handles.
///
/// Implementations must be deterministic: the same index always resolves to
/// the same handle for the lifetime of a document.
pub trait MetadataProvider {
    fn type_info(&self, index: TypeIndex) -> Option<Arc<TypeInfo>>;

    fn property_info(&self, index: PropertyIndex) -> Option<Arc<PropertyInfo>>;

    /// Instantiates an object of the given type.
    fn create_instance(&self, type_info: &Arc<TypeInfo>) -> ObjectRef {
        ObjectRef::new(Arc::clone(type_info))
    }
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for &T {
    fn type_info(&self, index: TypeIndex) -> Option<Arc<TypeInfo>> {
        (**self).type_info(index)
    }

    fn property_info(&self, index: PropertyIndex) -> Option<Arc<PropertyInfo>> {
        (**self).property_info(index)
    }

    fn create_instance(&self, type_info: &Arc<TypeInfo>) -> ObjectRef {
        (**self).create_instance(type_info)
    }
}
