//! Decoders for the versioned records carried by `SetCustomRuntimeData` nodes.
//!
//! Every record starts with a `u8` kind tag and a `u16` format version. The
//! remainder is handed to the decoder registered for that pair; adding a new
//! format version is a matter of registering one more function.

mod deferred_element;
mod reader;
mod resource_dictionary;
mod style;
mod visual_states;

pub use reader::ByteReader;

use crate::error::RuntimeDataError;
use std::collections::HashMap;
use std::sync::LazyLock;
use xbfload_core::{CustomRuntimeData, RuntimeDataKind, RuntimeDataPayload};

/// Decodes the body of one record, after its header.
pub type DecodeFn = fn(&mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError>;

static STANDARD: LazyLock<DecoderRegistry> = LazyLock::new(DecoderRegistry::with_standard_formats);

/// Decoders keyed by record kind and format version.
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<(RuntimeDataKind, u16), DecodeFn>,
}

impl DecoderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry holding every known format version.
    pub fn standard() -> &'static DecoderRegistry {
        &STANDARD
    }

    /// A fresh registry holding every known format version, for callers that
    /// want to extend it.
    pub fn with_standard_formats() -> Self {
        let mut registry = Self::new();
        registry.register(RuntimeDataKind::VisualStateGroupCollection, 1, visual_states::decode_v1);
        registry.register(RuntimeDataKind::VisualStateGroupCollection, 2, visual_states::decode_v2);
        registry.register(RuntimeDataKind::Style, 1, style::decode_v1);
        registry.register(RuntimeDataKind::Style, 2, style::decode_v2);
        registry.register(RuntimeDataKind::DeferredElement, 1, deferred_element::decode_v1);
        registry.register(RuntimeDataKind::DeferredElement, 2, deferred_element::decode_v2);
        registry.register(RuntimeDataKind::ResourceDictionary, 1, resource_dictionary::decode_v1);
        registry.register(RuntimeDataKind::ResourceDictionary, 2, resource_dictionary::decode_v2);
        registry
    }

    /// Registers `decoder` for one format version, replacing any previous one.
    pub fn register(&mut self, kind: RuntimeDataKind, version: u16, decoder: DecodeFn) {
        self.decoders.insert((kind, version), decoder);
    }

    /// Decodes a complete record, header included.
    ///
    /// # Errors
    ///
    /// Fails for unknown kinds or versions, truncated or malformed bodies and
    /// bytes left over after the body.
    pub fn decode(&self, bytes: &[u8], stream: usize) -> Result<CustomRuntimeData, RuntimeDataError> {
        let mut reader = ByteReader::new(bytes);
        let tag = reader.read_u8()?;
        let kind = RuntimeDataKind::try_from(tag).map_err(RuntimeDataError::UnknownKind)?;
        let version = reader.read_u16()?;
        let decoder = self
            .decoders
            .get(&(kind, version))
            .ok_or(RuntimeDataError::UnsupportedVersion { kind, version })?;
        let payload = decoder(&mut reader)?;
        reader.finish()?;
        Ok(CustomRuntimeData { version, stream, payload })
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formats: Vec<_> = self.decoders.keys().collect();
        formats.sort_unstable();
        f.debug_struct("DecoderRegistry").field("formats", &formats).finish()
    }
}
