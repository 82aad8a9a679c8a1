#![allow(dead_code)]

use rstest::fixture;
use xbfload_core::{NodeKind, NodeStream, PropertyIndex, StaticMetadata, TypeIndex, XbfDocument};

pub mod types {
    use xbfload_core::TypeIndex;

    pub const PAGE: TypeIndex = TypeIndex(1);
    pub const STACK_PANEL: TypeIndex = TypeIndex(2);
    pub const ELEMENT_COLLECTION: TypeIndex = TypeIndex(3);
    pub const TEXT_BLOCK: TypeIndex = TypeIndex(4);
    pub const STRING: TypeIndex = TypeIndex(5);
    pub const RESOURCE_DICTIONARY: TypeIndex = TypeIndex(6);
    pub const STYLE: TypeIndex = TypeIndex(7);
    pub const BRUSH: TypeIndex = TypeIndex(8);
    pub const BUTTON: TypeIndex = TypeIndex(9);
    pub const GRID: TypeIndex = TypeIndex(10);
    pub const OBJECT: TypeIndex = TypeIndex(11);
    pub const BINDING: TypeIndex = TypeIndex(12);
    pub const THICKNESS: TypeIndex = TypeIndex(13);
    pub const TYPE: TypeIndex = TypeIndex(14);
    pub const CONTROL_TEMPLATE: TypeIndex = TypeIndex(15);
}

pub mod props {
    use xbfload_core::PropertyIndex;

    pub const TEXT: PropertyIndex = PropertyIndex(1);
    pub const CHILDREN: PropertyIndex = PropertyIndex(2);
    pub const RESOURCES: PropertyIndex = PropertyIndex(3);
    pub const CONTENT: PropertyIndex = PropertyIndex(4);
    pub const NAME: PropertyIndex = PropertyIndex(5);
    pub const TARGET_TYPE: PropertyIndex = PropertyIndex(6);
    pub const BACKGROUND: PropertyIndex = PropertyIndex(7);
    pub const MARGIN: PropertyIndex = PropertyIndex(8);
    pub const TEMPLATE: PropertyIndex = PropertyIndex(9);
    pub const FOREGROUND: PropertyIndex = PropertyIndex(10);
    pub const TAG: PropertyIndex = PropertyIndex(11);
    pub const VISUAL_STATE_GROUPS: PropertyIndex = PropertyIndex(12);
    pub const DATA_CONTEXT: PropertyIndex = PropertyIndex(13);
}

/// A small UI type system covering every node kind the writer handles.
#[fixture]
pub fn metadata() -> StaticMetadata {
    StaticMetadata::builder()
        .with_type(1, "Page")
        .with_type(2, "StackPanel")
        .with_type(3, "UIElementCollection")
        .with_type(4, "TextBlock")
        .with_type(5, "String")
        .with_type(6, "ResourceDictionary")
        .with_style_type(7, "Style")
        .with_type(8, "SolidColorBrush")
        .with_type(9, "Button")
        .with_type(10, "Grid")
        .with_type(11, "Object")
        .with_type(12, "Binding")
        .with_type(13, "Thickness")
        .with_type(14, "Type")
        .with_type(15, "ControlTemplate")
        .with_property(1, "Text", 4, 5)
        .with_property(2, "Children", 2, 3)
        .with_property(3, "Resources", 1, 6)
        .with_property(4, "Content", 1, 11)
        .with_property(5, "Name", 11, 5)
        .with_property(6, "TargetType", 7, 14)
        .with_property(7, "Background", 2, 8)
        .with_property(8, "Margin", 4, 13)
        .with_property(9, "Template", 9, 15)
        .with_property(10, "Foreground", 4, 8)
        .with_property(11, "Tag", 11, 11)
        .with_property(12, "VisualStateGroups", 10, 11)
        .with_property(13, "DataContext", 11, 11)
        .build()
        .expect("fixture metadata is consistent")
}

pub fn stream(nodes: Vec<NodeKind>) -> NodeStream {
    nodes.into_iter().collect()
}

/// A document whose stream `i` holds `streams[i]`.
pub fn document(streams: Vec<Vec<NodeKind>>) -> XbfDocument {
    XbfDocument::new(streams.into_iter().map(stream).collect())
}

pub fn create(type_index: TypeIndex) -> NodeKind {
    NodeKind::PushScopeCreateTypeBeginInit { type_index }
}

pub fn set_text(property: PropertyIndex, text: &str) -> NodeKind {
    NodeKind::SetValueConstant { property, value: text.into() }
}

/// Little-endian encoder for custom runtime data records.
#[derive(Default)]
pub struct RecordBuilder {
    bytes: Vec<u8>,
}

impl RecordBuilder {
    pub fn new(kind: u8, version: u16) -> Self {
        Self::default().u8(kind).u16(version)
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.bytes.extend(value.to_le_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.bytes.extend(value.to_le_bytes());
        self
    }

    pub fn i32(mut self, value: i32) -> Self {
        self.bytes.extend(value.to_le_bytes());
        self
    }

    pub fn f64(mut self, value: f64) -> Self {
        self.bytes.extend(value.to_le_bytes());
        self
    }

    pub fn string(self, text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut builder = self.u32(units.len() as u32);
        for unit in units {
            builder = builder.u16(unit);
        }
        builder
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
