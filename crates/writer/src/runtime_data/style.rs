use super::ByteReader;
use crate::error::RuntimeDataError;
use xbfload_core::{RuntimeDataPayload, StyleData};

pub(super) fn decode_v1(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let target_type = reader.read_type()?;
    let setters = reader.read_setters()?;
    Ok(RuntimeDataPayload::Style(StyleData { target_type, setters, based_on: None }))
}

/// v1 followed by an optional `BasedOn` resource key.
pub(super) fn decode_v2(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let target_type = reader.read_type()?;
    let setters = reader.read_setters()?;
    let based_on = if reader.read_bool()? { Some(reader.read_string()?) } else { None };
    Ok(RuntimeDataPayload::Style(StyleData { target_type, setters, based_on }))
}
