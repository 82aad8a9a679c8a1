use super::{ObjectWriter, expect_object, stack_underflow};
use crate::error::WriterError;
use std::sync::Arc;
use tracing::{debug, warn};
use xbfload_core::{Node, NodeKind, PropertyIndex, Value};

impl ObjectWriter<'_> {
    /// Pre-order step: opens namespace scopes and pushes the values children
    /// will operate on. Leaf nodes do nothing here.
    pub(super) fn open(&mut self, node: &Node) -> Result<(), WriterError> {
        match &node.kind {
            NodeKind::PushScope => self.push_scope(node)?,
            NodeKind::PushScopeAddNamespace { prefix, namespace } => {
                self.push_scope(node)?;
                self.declare_namespace(node, prefix, namespace)?;
            }
            NodeKind::PushScopeGetValue { property } => {
                self.push_scope(node)?;
                let value = self.get_or_create_property_value(node, *property)?;
                self.stacks.push_value(value);
            }
            NodeKind::PushScopeCreateTypeBeginInit { type_index } => {
                self.push_scope(node)?;
                let object = self.create_instance(*type_index)?;
                self.stacks.push_value(object);
            }
            NodeKind::PushScopeCreateTypeWithConstantBeginInit { value, .. } => {
                self.push_scope(node)?;
                self.stacks.push_value(Value::Constant(value.clone()));
            }
            NodeKind::PushScopeCreateTypeWithTypeConvertedConstantBeginInit { type_index, value } => {
                self.push_scope(node)?;
                let converted = self.type_converted(*type_index, value)?;
                self.stacks.push_value(converted);
            }
            NodeKind::BeginConditionalScope { predicate } => {
                if !self.conditional_scope_seen {
                    debug!(%predicate, offset = node.offset, "conditional scopes are not evaluated");
                }
                self.conditional_scope_seen = true;
                self.push_scope(node)?;
            }
            NodeKind::ProvideValue
            | NodeKind::CreateTypeWithConstant { .. }
            | NodeKind::Unrecognized { .. } => {
                warn!(node = %node.kind.name(), offset = node.offset, "unexpected node in pre-order walk, ignoring");
            }
            NodeKind::AddNamespace { .. }
            | NodeKind::PopScope
            | NodeKind::EndInitPopScope
            | NodeKind::EndInitProvideValuePopScope
            | NodeKind::CreateTypeBeginInit { .. }
            | NodeKind::CreateTypeWithConstantBeginInit { .. }
            | NodeKind::CreateTypeWithTypeConvertedConstantBeginInit { .. }
            | NodeKind::AddToCollection
            | NodeKind::AddToDictionary
            | NodeKind::AddToDictionaryWithKey { .. }
            | NodeKind::CheckPeerType { .. }
            | NodeKind::PushConstant { .. }
            | NodeKind::SetValue { .. }
            | NodeKind::SetValueFromMarkupExtension { .. }
            | NodeKind::SetConnectionId { .. }
            | NodeKind::SetName { .. }
            | NodeKind::SetDeferredProperty { .. }
            | NodeKind::SetCustomRuntimeData { .. }
            | NodeKind::SetValueConstant { .. }
            | NodeKind::SetValueTypeConvertedConstant { .. }
            | NodeKind::SetValueTypeConvertedResolvedType { .. }
            | NodeKind::SetValueTypeConvertedResolvedProperty { .. }
            | NodeKind::ProvideStaticResourceValue { .. }
            | NodeKind::SetValueFromStaticResource { .. }
            | NodeKind::ProvideThemeResourceValue { .. }
            | NodeKind::SetValueFromThemeResource { .. }
            | NodeKind::SetValueFromTemplateBinding { .. }
            | NodeKind::GetResourcePropertyBag { .. } => {}
        }
        Ok(())
    }

    /// Current value of `property` on the top object, creating and assigning
    /// an instance of the property type when it has none yet.
    fn get_or_create_property_value(
        &self,
        node: &Node,
        property: PropertyIndex,
    ) -> Result<Value, WriterError> {
        let info = self.property_info(property)?;
        let owner = self.stacks.peek_value().ok_or_else(|| stack_underflow(node))?;
        let owner = expect_object(node, owner)?;
        if let Some(existing) = owner.property(&info.name) {
            return Ok(existing);
        }
        let created = self.create_instance(info.property_type)?;
        owner.set_property(Arc::clone(&info.name), created.clone());
        Ok(created)
    }
}

