//! Core data types shared by the XBF object-graph writer and its tooling.
//!
//! - [`metadata`]: stable type/property indices and the registry that resolves them
//! - [`node`]: the decoded, read-only node streams of one document
//! - [`object`]: the values and objects the writer produces

pub mod metadata;
pub mod node;
pub mod object;

pub use metadata::{
    MetadataError, MetadataProvider, PropertyIndex, PropertyInfo, StaticMetadata,
    StaticMetadataBuilder, TypeFlags, TypeIndex, TypeInfo,
};
pub use node::{
    CustomRuntimeDataBlob, Node, NodeKind, NodeStream, Opcode, XbfDocument, disassemble,
};
pub use object::{
    Constant, ContainerKind, CustomRuntimeData, DeferredElementData, GridUnit, KeyedResource,
    ObjectRef, PropertySetter, ResourceDictionaryData, ResourceKey, RuntimeDataKind,
    RuntimeDataPayload, SetterValue, StyleData, Value, VisualState, VisualStateGroup,
    VisualTransition, directive_names,
};
