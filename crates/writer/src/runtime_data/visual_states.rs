use super::ByteReader;
use crate::error::RuntimeDataError;
use xbfload_core::{RuntimeDataPayload, VisualState, VisualStateGroup, VisualTransition};

/// Groups with plain state names.
pub(super) fn decode_v1(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let groups = read_groups(reader, read_state_v1, |_| Ok(Vec::new()))?;
    Ok(RuntimeDataPayload::VisualStateGroups { groups })
}

/// Adds storyboard streams to states and transitions to groups.
pub(super) fn decode_v2(reader: &mut ByteReader<'_>) -> Result<RuntimeDataPayload, RuntimeDataError> {
    let groups = read_groups(reader, read_state_v2, read_transitions)?;
    Ok(RuntimeDataPayload::VisualStateGroups { groups })
}

type ReadState = fn(&mut ByteReader<'_>) -> Result<VisualState, RuntimeDataError>;
type ReadTransitions = fn(&mut ByteReader<'_>) -> Result<Vec<VisualTransition>, RuntimeDataError>;

fn read_groups(
    reader: &mut ByteReader<'_>,
    read_state: ReadState,
    read_transitions: ReadTransitions,
) -> Result<Vec<VisualStateGroup>, RuntimeDataError> {
    let count = reader.read_count()?;
    let mut groups = Vec::with_capacity(count);
    for _ in 0..count {
        let name = reader.read_string()?;
        let states = (0..reader.read_count()?).map(|_| read_state(reader)).collect::<Result<_, _>>()?;
        let transitions = read_transitions(reader)?;
        groups.push(VisualStateGroup { name, states, transitions });
    }
    Ok(groups)
}

fn read_state_v1(reader: &mut ByteReader<'_>) -> Result<VisualState, RuntimeDataError> {
    Ok(VisualState { name: reader.read_string()?, storyboard_stream: None })
}

fn read_state_v2(reader: &mut ByteReader<'_>) -> Result<VisualState, RuntimeDataError> {
    let name = reader.read_string()?;
    let storyboard_stream = if reader.read_bool()? { Some(reader.read_u32()?) } else { None };
    Ok(VisualState { name, storyboard_stream })
}

fn read_transitions(reader: &mut ByteReader<'_>) -> Result<Vec<VisualTransition>, RuntimeDataError> {
    (0..reader.read_count()?)
        .map(|_| {
            let from = reader.read_optional_string()?;
            let to = reader.read_optional_string()?;
            Ok(VisualTransition { from, to })
        })
        .collect()
}
