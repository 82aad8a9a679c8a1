use super::ByteReader;
use crate::error::RuntimeDataError;
use xbfload_core::{DeferredElementData, RuntimeDataPayload};

pub(super) fn decode_v1(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let name = reader.read_string()?;
    let stream = reader.read_u32()?;
    Ok(RuntimeDataPayload::DeferredElement(DeferredElementData {
        name,
        stream,
        non_deferred_properties: Vec::new(),
    }))
}

pub(super) fn decode_v2(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let name = reader.read_string()?;
    let stream = reader.read_u32()?;
    let non_deferred_properties = reader.read_setters()?;
    Ok(RuntimeDataPayload::DeferredElement(DeferredElementData { name, stream, non_deferred_properties }))
}
