pub mod directives;
mod handle;
mod runtime_data;
mod value;

pub use directives::names as directive_names;
pub use handle::{ContainerKind, ObjectRef};
pub use runtime_data::{
    CustomRuntimeData, DeferredElementData, KeyedResource, PropertySetter, ResourceDictionaryData,
    RuntimeDataKind, RuntimeDataPayload, SetterValue, StyleData, VisualState, VisualStateGroup,
    VisualTransition,
};
pub use value::{Constant, GridUnit, ResourceKey, Value};
