use super::ByteReader;
use crate::error::RuntimeDataError;
use xbfload_core::{KeyedResource, ResourceDictionaryData, RuntimeDataPayload};

pub(super) fn decode_v1(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let data = read_keys_and_implicit_styles(reader)?;
    Ok(RuntimeDataPayload::ResourceDictionary(data))
}

/// v1 followed by the keys resolved through theme dictionaries.
pub(super) fn decode_v2(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let mut data = read_keys_and_implicit_styles(reader)?;
    data.theme_resource_keys =
        (0..reader.read_count()?).map(|_| reader.read_string()).collect::<Result<_, _>>()?;
    Ok(RuntimeDataPayload::ResourceDictionary(data))
}

fn read_keys_and_implicit_styles(reader: &mut ByteReader<'_>) -> Result<ResourceDictionaryData, RuntimeDataError> {
    let keyed_resources = (0..reader.read_count()?)
        .map(|_| {
            let key = reader.read_string()?;
            let stream = reader.read_u32()?;
            Ok(KeyedResource { key, stream })
        })
        .collect::<Result<_, RuntimeDataError>>()?;
    let implicit_styles = (0..reader.read_count()?).map(|_| reader.read_type()).collect::<Result<_, _>>()?;
    Ok(ResourceDictionaryData { keyed_resources, implicit_styles, theme_resource_keys: Vec::new() })
}
