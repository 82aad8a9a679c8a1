mod blob;
mod disasm;
mod opcode;
mod stream;

pub use blob::CustomRuntimeDataBlob;
pub use disasm::disassemble;
pub use opcode::Opcode;
pub use stream::{Node, NodeStream, XbfDocument};

use crate::metadata::{PropertyIndex, TypeIndex};
use crate::object::Constant;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One decoded instruction and its typed operands.
///
/// Raw opcodes outside the known set decode to [`NodeKind::Unrecognized`] so
/// the writer can report them instead of the decoder guessing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum NodeKind {
    PushScope,
    PushScopeAddNamespace { prefix: Arc<str>, namespace: Arc<str> },
    PushScopeGetValue { property: PropertyIndex },
    PushScopeCreateTypeBeginInit { type_index: TypeIndex },
    PushScopeCreateTypeWithConstantBeginInit { type_index: TypeIndex, value: Constant },
    PushScopeCreateTypeWithTypeConvertedConstantBeginInit { type_index: TypeIndex, value: Constant },
    BeginConditionalScope { predicate: Arc<str> },
    AddNamespace { prefix: Arc<str>, namespace: Arc<str> },
    PopScope,
    EndInitPopScope,
    EndInitProvideValuePopScope,
    CreateTypeBeginInit { type_index: TypeIndex },
    CreateTypeWithConstantBeginInit { type_index: TypeIndex, value: Constant },
    CreateTypeWithTypeConvertedConstantBeginInit { type_index: TypeIndex, value: Constant },
    CreateTypeWithConstant { type_index: TypeIndex, value: Constant },
    ProvideValue,
    AddToCollection,
    AddToDictionary,
    AddToDictionaryWithKey { key: Constant },
    CheckPeerType { class_name: Arc<str> },
    PushConstant { value: Constant },
    SetValue { property: PropertyIndex },
    SetValueFromMarkupExtension { property: PropertyIndex },
    SetConnectionId { value: Constant },
    SetName { name: Arc<str> },
    SetDeferredProperty {
        property: PropertyIndex,
        stream: usize,
        #[serde(default)]
        static_resources: Vec<Arc<str>>,
        #[serde(default)]
        theme_resources: Vec<Arc<str>>,
    },
    SetCustomRuntimeData { property: PropertyIndex, stream: usize, data: CustomRuntimeDataBlob },
    SetValueConstant { property: PropertyIndex, value: Constant },
    SetValueTypeConvertedConstant { property: PropertyIndex, value: Constant },
    SetValueTypeConvertedResolvedType { property: PropertyIndex, type_index: TypeIndex },
    SetValueTypeConvertedResolvedProperty { property: PropertyIndex, value: PropertyIndex },
    ProvideStaticResourceValue { key: Arc<str> },
    SetValueFromStaticResource { property: PropertyIndex, key: Arc<str> },
    ProvideThemeResourceValue { key: Arc<str> },
    SetValueFromThemeResource { property: PropertyIndex, key: Arc<str> },
    SetValueFromTemplateBinding { property: PropertyIndex, source: PropertyIndex },
    GetResourcePropertyBag { uid: Arc<str> },
    Unrecognized { opcode: u8 },
}

impl NodeKind {
    /// `None` for [`NodeKind::Unrecognized`].
    pub fn opcode(&self) -> Option<Opcode> {
        Some(match self {
            NodeKind::PushScope => Opcode::PushScope,
            NodeKind::PushScopeAddNamespace { .. } => Opcode::PushScopeAddNamespace,
            NodeKind::PushScopeGetValue { .. } => Opcode::PushScopeGetValue,
            NodeKind::PushScopeCreateTypeBeginInit { .. } => Opcode::PushScopeCreateTypeBeginInit,
            NodeKind::PushScopeCreateTypeWithConstantBeginInit { .. } => {
                Opcode::PushScopeCreateTypeWithConstantBeginInit
            }
            NodeKind::PushScopeCreateTypeWithTypeConvertedConstantBeginInit { .. } => {
                Opcode::PushScopeCreateTypeWithTypeConvertedConstantBeginInit
            }
            NodeKind::BeginConditionalScope { .. } => Opcode::BeginConditionalScope,
            NodeKind::AddNamespace { .. } => Opcode::AddNamespace,
            NodeKind::PopScope => Opcode::PopScope,
            NodeKind::EndInitPopScope => Opcode::EndInitPopScope,
            NodeKind::EndInitProvideValuePopScope => Opcode::EndInitProvideValuePopScope,
            NodeKind::CreateTypeBeginInit { .. } => Opcode::CreateTypeBeginInit,
            NodeKind::CreateTypeWithConstantBeginInit { .. } => {
                Opcode::CreateTypeWithConstantBeginInit
            }
            NodeKind::CreateTypeWithTypeConvertedConstantBeginInit { .. } => {
                Opcode::CreateTypeWithTypeConvertedConstantBeginInit
            }
            NodeKind::CreateTypeWithConstant { .. } => Opcode::CreateTypeWithConstant,
            NodeKind::ProvideValue => Opcode::ProvideValue,
            NodeKind::AddToCollection => Opcode::AddToCollection,
            NodeKind::AddToDictionary => Opcode::AddToDictionary,
            NodeKind::AddToDictionaryWithKey { .. } => Opcode::AddToDictionaryWithKey,
            NodeKind::CheckPeerType { .. } => Opcode::CheckPeerType,
            NodeKind::PushConstant { .. } => Opcode::PushConstant,
            NodeKind::SetValue { .. } => Opcode::SetValue,
            NodeKind::SetValueFromMarkupExtension { .. } => Opcode::SetValueFromMarkupExtension,
            NodeKind::SetConnectionId { .. } => Opcode::SetConnectionId,
            NodeKind::SetName { .. } => Opcode::SetName,
            NodeKind::SetDeferredProperty { .. } => Opcode::SetDeferredProperty,
            NodeKind::SetCustomRuntimeData { .. } => Opcode::SetCustomRuntimeData,
            NodeKind::SetValueConstant { .. } => Opcode::SetValueConstant,
            NodeKind::SetValueTypeConvertedConstant { .. } => Opcode::SetValueTypeConvertedConstant,
            NodeKind::SetValueTypeConvertedResolvedType { .. } => {
                Opcode::SetValueTypeConvertedResolvedType
            }
            NodeKind::SetValueTypeConvertedResolvedProperty { .. } => {
                Opcode::SetValueTypeConvertedResolvedProperty
            }
            NodeKind::ProvideStaticResourceValue { .. } => Opcode::ProvideStaticResourceValue,
            NodeKind::SetValueFromStaticResource { .. } => Opcode::SetValueFromStaticResource,
            NodeKind::ProvideThemeResourceValue { .. } => Opcode::ProvideThemeResourceValue,
            NodeKind::SetValueFromThemeResource { .. } => Opcode::SetValueFromThemeResource,
            NodeKind::SetValueFromTemplateBinding { .. } => Opcode::SetValueFromTemplateBinding,
            NodeKind::GetResourcePropertyBag { .. } => Opcode::GetResourcePropertyBag,
            NodeKind::Unrecognized { .. } => return None,
        })
    }

    pub fn raw_opcode(&self) -> u8 {
        match self {
            NodeKind::Unrecognized { opcode } => *opcode,
            known => known.opcode().map_or(0, |opcode| opcode as u8),
        }
    }

    /// Unrecognized nodes are treated as leaves: nothing can be known about their children.
    pub fn is_leaf(&self) -> bool {
        self.opcode().is_none_or(Opcode::is_leaf)
    }

    pub fn is_scope_close(&self) -> bool {
        self.opcode().is_some_and(Opcode::is_scope_close)
    }

    pub fn name(&self) -> String {
        match self.opcode() {
            Some(opcode) => opcode.to_string(),
            None => format!("Unrecognized(0x{:02X})", self.raw_opcode()),
        }
    }
}
