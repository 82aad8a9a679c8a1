use super::value::Constant;
use crate::metadata::{PropertyIndex, TypeIndex};
use serde::Serialize;
use std::sync::Arc;

/// Record kinds a `SetCustomRuntimeData` node may carry, by wire tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum RuntimeDataKind {
    VisualStateGroupCollection = 1,
    Style = 2,
    DeferredElement = 3,
    ResourceDictionary = 4,
}

impl TryFrom<u8> for RuntimeDataKind {
    type Error = u8;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(RuntimeDataKind::VisualStateGroupCollection),
            2 => Ok(RuntimeDataKind::Style),
            3 => Ok(RuntimeDataKind::DeferredElement),
            4 => Ok(RuntimeDataKind::ResourceDictionary),
            other => Err(other),
        }
    }
}

/// Decoded custom runtime data, attached to the object that requested it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomRuntimeData {
    /// Format version the record was written with.
    pub version: u16,
    /// Sub-stream holding the markup the record refers to.
    pub stream: usize,
    pub payload: RuntimeDataPayload,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum RuntimeDataPayload {
    VisualStateGroups { groups: Vec<VisualStateGroup> },
    Style(StyleData),
    DeferredElement(DeferredElementData),
    ResourceDictionary(ResourceDictionaryData),
}

impl RuntimeDataPayload {
    pub fn kind(&self) -> RuntimeDataKind {
        match self {
            RuntimeDataPayload::VisualStateGroups { .. } => RuntimeDataKind::VisualStateGroupCollection,
            RuntimeDataPayload::Style(_) => RuntimeDataKind::Style,
            RuntimeDataPayload::DeferredElement(_) => RuntimeDataKind::DeferredElement,
            RuntimeDataPayload::ResourceDictionary(_) => RuntimeDataKind::ResourceDictionary,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualStateGroup {
    pub name: Arc<str>,
    pub states: Vec<VisualState>,
    pub transitions: Vec<VisualTransition>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualState {
    pub name: Arc<str>,
    pub storyboard_stream: Option<u32>,
}

/// `None` on either side matches any state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualTransition {
    pub from: Option<Arc<str>>,
    pub to: Option<Arc<str>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SetterValue {
    Constant(Constant),
    StaticResource(Arc<str>),
    ThemeResource(Arc<str>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertySetter {
    pub property: PropertyIndex,
    pub value: SetterValue,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleData {
    pub target_type: TypeIndex,
    pub setters: Vec<PropertySetter>,
    pub based_on: Option<Arc<str>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeferredElementData {
    pub name: Arc<str>,
    pub stream: u32,
    /// Properties applied to the placeholder before the element is realized.
    pub non_deferred_properties: Vec<PropertySetter>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeyedResource {
    pub key: Arc<str>,
    pub stream: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceDictionaryData {
    pub keyed_resources: Vec<KeyedResource>,
    pub implicit_styles: Vec<TypeIndex>,
    pub theme_resource_keys: Vec<Arc<str>>,
}
