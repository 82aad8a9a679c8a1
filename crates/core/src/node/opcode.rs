use std::fmt::{Display, Formatter};

/// Wire tag of every node kind the writer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    PushScope = 1,
    PushScopeAddNamespace = 2,
    PushScopeGetValue = 3,
    PushScopeCreateTypeBeginInit = 4,
    PushScopeCreateTypeWithConstantBeginInit = 5,
    PushScopeCreateTypeWithTypeConvertedConstantBeginInit = 6,
    BeginConditionalScope = 7,
    AddNamespace = 8,
    PopScope = 9,
    EndInitPopScope = 10,
    EndInitProvideValuePopScope = 11,
    CreateTypeBeginInit = 12,
    CreateTypeWithConstantBeginInit = 13,
    CreateTypeWithTypeConvertedConstantBeginInit = 14,
    CreateTypeWithConstant = 15,
    ProvideValue = 16,
    AddToCollection = 17,
    AddToDictionary = 18,
    AddToDictionaryWithKey = 19,
    CheckPeerType = 20,
    PushConstant = 21,
    SetValue = 22,
    SetValueFromMarkupExtension = 23,
    SetConnectionId = 24,
    SetName = 25,
    SetDeferredProperty = 26,
    SetCustomRuntimeData = 27,
    SetValueConstant = 28,
    SetValueTypeConvertedConstant = 29,
    SetValueTypeConvertedResolvedType = 30,
    SetValueTypeConvertedResolvedProperty = 31,
    ProvideStaticResourceValue = 32,
    SetValueFromStaticResource = 33,
    ProvideThemeResourceValue = 34,
    SetValueFromThemeResource = 35,
    SetValueFromTemplateBinding = 36,
    GetResourcePropertyBag = 37,
}

impl Opcode {
    pub const ALL: [Opcode; 37] = [
        Opcode::PushScope,
        Opcode::PushScopeAddNamespace,
        Opcode::PushScopeGetValue,
        Opcode::PushScopeCreateTypeBeginInit,
        Opcode::PushScopeCreateTypeWithConstantBeginInit,
        Opcode::PushScopeCreateTypeWithTypeConvertedConstantBeginInit,
        Opcode::BeginConditionalScope,
        Opcode::AddNamespace,
        Opcode::PopScope,
        Opcode::EndInitPopScope,
        Opcode::EndInitProvideValuePopScope,
        Opcode::CreateTypeBeginInit,
        Opcode::CreateTypeWithConstantBeginInit,
        Opcode::CreateTypeWithTypeConvertedConstantBeginInit,
        Opcode::CreateTypeWithConstant,
        Opcode::ProvideValue,
        Opcode::AddToCollection,
        Opcode::AddToDictionary,
        Opcode::AddToDictionaryWithKey,
        Opcode::CheckPeerType,
        Opcode::PushConstant,
        Opcode::SetValue,
        Opcode::SetValueFromMarkupExtension,
        Opcode::SetConnectionId,
        Opcode::SetName,
        Opcode::SetDeferredProperty,
        Opcode::SetCustomRuntimeData,
        Opcode::SetValueConstant,
        Opcode::SetValueTypeConvertedConstant,
        Opcode::SetValueTypeConvertedResolvedType,
        Opcode::SetValueTypeConvertedResolvedProperty,
        Opcode::ProvideStaticResourceValue,
        Opcode::SetValueFromStaticResource,
        Opcode::ProvideThemeResourceValue,
        Opcode::SetValueFromThemeResource,
        Opcode::SetValueFromTemplateBinding,
        Opcode::GetResourcePropertyBag,
    ];

    /// Interior nodes open a namespace scope and may have children.
    pub fn is_leaf(self) -> bool {
        !matches!(
            self,
            Opcode::PushScope
                | Opcode::PushScopeAddNamespace
                | Opcode::PushScopeGetValue
                | Opcode::PushScopeCreateTypeBeginInit
                | Opcode::PushScopeCreateTypeWithConstantBeginInit
                | Opcode::PushScopeCreateTypeWithTypeConvertedConstantBeginInit
                | Opcode::BeginConditionalScope
        )
    }

    pub fn is_scope_close(self) -> bool {
        matches!(
            self,
            Opcode::PopScope | Opcode::EndInitPopScope | Opcode::EndInitProvideValuePopScope
        )
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Opcode::ALL.iter().copied().find(|opcode| *opcode as u8 == raw).ok_or(raw)
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
