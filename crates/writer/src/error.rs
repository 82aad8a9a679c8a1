use std::sync::Arc;
use thiserror::Error;
use xbfload_core::{ContainerKind, PropertyIndex, RuntimeDataKind, TypeIndex};

/// Fatal conditions raised while realizing a node stream.
///
/// Every variant means the stream and the writer disagree about the encoding;
/// no partial result is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriterError {
    #[error("unrecognized opcode 0x{opcode:02X} at offset {offset}")]
    UnrecognizedOpcode { opcode: u8, offset: u32 },
    #[error("{node} at offset {offset} needs a value but the object stack is empty")]
    StackUnderflow { node: String, offset: u32 },
    #[error("{node} at offset {offset} expected an object but found a {found}")]
    ExpectedObject { node: String, offset: u32, found: &'static str },
    #[error("{node} at offset {offset} has no open namespace scope")]
    NoOpenScope { node: String, offset: u32 },
    #[error("dictionary value of type {type_name} has no usable {property} key")]
    MissingDictionaryKey { type_name: Arc<str>, property: &'static str },
    #[error("unknown type index {0}")]
    UnknownType(TypeIndex),
    #[error("unknown property index {0}")]
    UnknownProperty(PropertyIndex),
    #[error("unknown node stream {0}")]
    UnknownStream(usize),
    #[error("node stream {stream} ended at index {index} before its scopes were closed")]
    UnexpectedEndOfStream { stream: usize, index: usize },
    #[error("walk produced {found} values, expected exactly {expected}")]
    StackImbalance { expected: usize, found: usize },
    #[error("{node} at offset {offset} opens more than {limit} nested scopes")]
    ScopeDepthExceeded { node: String, offset: u32, limit: usize },
    #[error("deferred properties nested deeper than {limit} levels")]
    DeferredDepthExceeded { limit: usize },
    #[error("object of type {type_name} used as {requested:?} after being used as {previous:?}")]
    ContainerConflict { type_name: Arc<str>, previous: ContainerKind, requested: ContainerKind },
    #[error("invalid custom runtime data: {0}")]
    RuntimeData(#[from] RuntimeDataError),
}

/// Errors of the custom runtime data decoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeDataError {
    #[error("record truncated at byte {offset}, {needed} more bytes needed")]
    UnexpectedEnd { offset: usize, needed: usize },
    #[error("invalid UTF-16 string at byte {offset}")]
    InvalidUtf16 { offset: usize },
    #[error("unknown record kind {0}")]
    UnknownKind(u8),
    #[error("{kind:?} records of version {version} are not supported")]
    UnsupportedVersion { kind: RuntimeDataKind, version: u16 },
    #[error("invalid setter value tag {tag} at byte {offset}")]
    InvalidSetterTag { tag: u8, offset: usize },
    #[error("{count} trailing bytes after record")]
    TrailingBytes { count: usize },
}
