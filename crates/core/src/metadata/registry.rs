use super::{
    MetadataError, MetadataProvider, PropertyIndex, PropertyInfo, TypeFlags, TypeIndex, TypeInfo,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory metadata registry.
///
/// Serialized as two flat lists so hand-written fixtures stay readable:
///
/// ```
/// use xbfload_core::{MetadataProvider, StaticMetadata, TypeIndex};
///
/// let json = r#"{
///   "types": [{ "index": 1, "name": "Grid" }, { "index": 2, "name": "String" }],
///   "properties": [{ "index": 1, "name": "Tag", "declaring_type": 1, "property_type": 2 }]
/// }"#;
/// let metadata: StaticMetadata = serde_json::from_str(json).unwrap();
/// assert_eq!(&*metadata.type_info(TypeIndex(1)).unwrap().name, "Grid");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetadataTable", into = "MetadataTable")]
pub struct StaticMetadata {
    types: BTreeMap<TypeIndex, Arc<TypeInfo>>,
    properties: BTreeMap<PropertyIndex, Arc<PropertyInfo>>,
}

#[derive(Serialize, Deserialize)]
struct MetadataTable {
    #[serde(default)]
    types: Vec<TypeInfo>,
    #[serde(default)]
    properties: Vec<PropertyInfo>,
}

impl StaticMetadata {
    pub fn builder() -> StaticMetadataBuilder {
        StaticMetadataBuilder::default()
    }

    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeInfo>> {
        self.types.values()
    }

    pub fn properties(&self) -> impl Iterator<Item = &Arc<PropertyInfo>> {
        self.properties.values()
    }

    pub fn type_by_name(&self, name: &str) -> Option<Arc<TypeInfo>> {
        self.types.values().find(|info| &*info.name == name).cloned()
    }

    /// Looks a property up by its declaring type name and member name.
    pub fn property_by_name(&self, type_name: &str, name: &str) -> Option<Arc<PropertyInfo>> {
        let owner = self.type_by_name(type_name)?;
        self.properties
            .values()
            .find(|info| info.declaring_type == owner.index && &*info.name == name)
            .cloned()
    }
}

impl MetadataProvider for StaticMetadata {
    fn type_info(&self, index: TypeIndex) -> Option<Arc<TypeInfo>> {
        self.types.get(&index).cloned()
    }

    fn property_info(&self, index: PropertyIndex) -> Option<Arc<PropertyInfo>> {
        self.properties.get(&index).cloned()
    }
}

impl TryFrom<MetadataTable> for StaticMetadata {
    type Error = MetadataError;

    fn try_from(table: MetadataTable) -> Result<Self, Self::Error> {
        StaticMetadataBuilder { types: table.types, properties: table.properties }.build()
    }
}

impl From<StaticMetadata> for MetadataTable {
    fn from(metadata: StaticMetadata) -> Self {
        MetadataTable {
            types: metadata.types.values().map(|info| (**info).clone()).collect(),
            properties: metadata.properties.values().map(|info| (**info).clone()).collect(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StaticMetadataBuilder {
    types: Vec<TypeInfo>,
    properties: Vec<PropertyInfo>,
}

impl StaticMetadataBuilder {
    pub fn with_type(self, index: u16, name: &str) -> Self {
        self.with_type_flags(index, name, TypeFlags::empty())
    }

    /// Registers a style-like type: dictionaries key its instances by `TargetType`.
    pub fn with_style_type(self, index: u16, name: &str) -> Self {
        self.with_type_flags(index, name, TypeFlags::STYLE)
    }

    pub fn with_type_flags(mut self, index: u16, name: &str, flags: TypeFlags) -> Self {
        self.types.push(TypeInfo::new(TypeIndex(index), name).with_flags(flags));
        self
    }

    pub fn with_property(
        mut self,
        index: u16,
        name: &str,
        declaring_type: u16,
        property_type: u16,
    ) -> Self {
        self.properties.push(PropertyInfo::new(
            PropertyIndex(index),
            name,
            TypeIndex(declaring_type),
            TypeIndex(property_type),
        ));
        self
    }

    pub fn build(self) -> Result<StaticMetadata, MetadataError> {
        let mut types = BTreeMap::new();
        for info in self.types {
            let index = info.index;
            if types.insert(index, Arc::new(info)).is_some() {
                return Err(MetadataError::DuplicateType(index));
            }
        }

        let mut properties = BTreeMap::new();
        for info in self.properties {
            for type_index in [info.declaring_type, info.property_type] {
                if !types.contains_key(&type_index) {
                    return Err(MetadataError::DanglingType { property: info.index, type_index });
                }
            }
            let index = info.index;
            if properties.insert(index, Arc::new(info)).is_some() {
                return Err(MetadataError::DuplicateProperty(index));
            }
        }

        Ok(StaticMetadata { types, properties })
    }
}
