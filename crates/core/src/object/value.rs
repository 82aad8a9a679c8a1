use super::handle::ObjectRef;
use super::runtime_data::CustomRuntimeData;
use crate::metadata::{PropertyInfo, TypeIndex, TypeInfo};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridUnit {
    Auto,
    Pixel,
    Star,
}

/// Inline constant carried by a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Null,
    Bool(bool),
    Int32(i32),
    Double(f64),
    String(Arc<str>),
    Enum { type_index: TypeIndex, value: u32 },
    /// ARGB packed into one word.
    Color(u32),
    Thickness { left: f64, top: f64, right: f64, bottom: f64 },
    GridLength { value: f64, unit: GridUnit },
}

impl Constant {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Constant::String(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant::Null => write!(f, "{{x:Null}}"),
            Constant::Bool(value) => write!(f, "{}", if *value { "True" } else { "False" }),
            Constant::Int32(value) => write!(f, "{value}"),
            Constant::Double(value) => write!(f, "{value}"),
            Constant::String(value) => write!(f, "{value}"),
            Constant::Enum { type_index, value } => write!(f, "{type_index}:{value}"),
            Constant::Color(argb) => write!(f, "#{argb:08X}"),
            Constant::Thickness { left, top, right, bottom } => {
                write!(f, "{left},{top},{right},{bottom}")
            }
            Constant::GridLength { value, unit } => match unit {
                GridUnit::Auto => write!(f, "Auto"),
                GridUnit::Pixel => write!(f, "{value}"),
                GridUnit::Star => write!(f, "{value}*"),
            },
        }
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant::String(value.into())
    }
}

impl From<String> for Constant {
    fn from(value: String) -> Self {
        Constant::String(value.into())
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant::Bool(value)
    }
}

impl From<i32> for Constant {
    fn from(value: i32) -> Self {
        Constant::Int32(value)
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Constant::Double(value)
    }
}

/// Key of a dictionary entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Name(Arc<str>),
    Type(Arc<TypeInfo>),
}

impl ResourceKey {
    pub fn name(name: impl Into<Arc<str>>) -> Self {
        ResourceKey::Name(name.into())
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKey::Name(name) => write!(f, "{name}"),
            ResourceKey::Type(info) => write!(f, "{{x:Type {}}}", info.name),
        }
    }
}

/// An item of the writer's object stack, and the value of a property.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Object(ObjectRef),
    Constant(Constant),
    /// A constant still awaiting conversion to `target` by the host.
    TypeConverted { target: Arc<TypeInfo>, value: Constant },
    Type(Arc<TypeInfo>),
    Property(Arc<PropertyInfo>),
    StaticResource(ResourceKey),
    ThemeResource(ResourceKey),
    TemplateBinding(Arc<PropertyInfo>),
    RuntimeData(Arc<CustomRuntimeData>),
}

impl Value {
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Value::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_constant().and_then(Constant::as_str)
    }

    /// Short label used by diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Constant(_) => "constant",
            Value::TypeConverted { .. } => "type-converted constant",
            Value::Type(_) => "type",
            Value::Property(_) => "property",
            Value::StaticResource(_) => "static resource reference",
            Value::ThemeResource(_) => "theme resource reference",
            Value::TemplateBinding(_) => "template binding",
            Value::RuntimeData(_) => "custom runtime data",
        }
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        Value::Constant(constant)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Object(object) => write!(f, "<{}>", object.type_name()),
            Value::Constant(constant) => write!(f, "{constant}"),
            Value::TypeConverted { target, value } => write!(f, "{}({value})", target.name),
            Value::Type(info) => write!(f, "{{x:Type {}}}", info.name),
            Value::Property(info) => write!(f, "{}", info.name),
            Value::StaticResource(key) => write!(f, "{{StaticResource {key}}}"),
            Value::ThemeResource(key) => write!(f, "{{ThemeResource {key}}}"),
            Value::TemplateBinding(info) => write!(f, "{{TemplateBinding {}}}", info.name),
            Value::RuntimeData(data) => write!(f, "{{{:?} v{}}}", data.payload.kind(), data.version),
        }
    }
}
