use super::{ObjectWriter, expect_object, no_open_scope, stack_underflow};
use crate::error::WriterError;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use xbfload_core::{
    Constant, ContainerKind, Node, NodeKind, ResourceKey, Value, directive_names,
};

impl ObjectWriter<'_> {
    /// Post-order step: runs after every child of `node` has been visited.
    pub(super) fn close(&mut self, node: &Node) -> Result<(), WriterError> {
        if !matches!(node.kind, NodeKind::AddToCollection) {
            self.discard_orphaned_constant(node);
        }

        match &node.kind {
            NodeKind::PushScope
            | NodeKind::PushScopeAddNamespace { .. }
            | NodeKind::PushScopeCreateTypeBeginInit { .. }
            | NodeKind::PushScopeCreateTypeWithConstantBeginInit { .. }
            | NodeKind::PushScopeCreateTypeWithTypeConvertedConstantBeginInit { .. }
            | NodeKind::BeginConditionalScope { .. }
            | NodeKind::ProvideValue
            | NodeKind::CreateTypeWithConstant { .. } => {}
            NodeKind::PushScopeGetValue { .. } => {
                self.pop(node)?;
            }
            NodeKind::AddNamespace { prefix, namespace } => {
                self.declare_namespace(node, prefix, namespace)?;
            }
            NodeKind::PopScope | NodeKind::EndInitPopScope | NodeKind::EndInitProvideValuePopScope => {
                self.pop_scope(node)?;
            }
            NodeKind::CreateTypeBeginInit { type_index } => {
                let object = self.create_instance(*type_index)?;
                self.stacks.push_value(object);
            }
            NodeKind::CreateTypeWithConstantBeginInit { value, .. } => {
                self.stacks.push_value(Value::Constant(value.clone()));
            }
            NodeKind::CreateTypeWithTypeConvertedConstantBeginInit { type_index, value } => {
                let converted = self.type_converted(*type_index, value)?;
                self.stacks.push_value(converted);
            }
            NodeKind::AddToCollection => {
                let item = match self.last_seen_constant.take() {
                    Some(constant) => Value::Constant(constant),
                    None => self.pop(node)?,
                };
                let collection = self.top_object(node)?;
                self.classify(&collection, ContainerKind::Collection)?;
                collection.add_item(item);
            }
            NodeKind::AddToDictionary => {
                let value = self.pop(node)?;
                let key = dictionary_key(&value)?;
                self.add_to_dictionary(node, key, value)?;
            }
            NodeKind::AddToDictionaryWithKey { key } => {
                let value = self.pop(node)?;
                let key = match key {
                    Constant::String(name) => ResourceKey::Name(Arc::clone(name)),
                    other => ResourceKey::name(other.to_string()),
                };
                self.add_to_dictionary(node, key, value)?;
            }
            NodeKind::CheckPeerType { class_name } => {
                debug!(class = %class_name, "captured x:Class");
                self.class_name = Some(Arc::clone(class_name));
            }
            NodeKind::PushConstant { value } => self.push_constant(value),
            NodeKind::SetValue { property } => {
                let value = self.pop(node)?;
                self.set_on_top(node, *property, value)?;
            }
            NodeKind::SetValueFromMarkupExtension { property } => {
                let value = self.pop(node)?;
                expect_object(node, &value)?.mark_markup_extension();
                self.set_on_top(node, *property, value)?;
            }
            NodeKind::SetConnectionId { value } => {
                let top = self.stacks.peek_value().ok_or_else(|| stack_underflow(node))?;
                match top.as_object() {
                    Some(object) => {
                        object.set_property(directive_names::X_CONNECTION_ID, Value::Constant(value.clone()));
                    }
                    None => trace!(kind = top.kind_name(), "connection id on a non-object, ignoring"),
                }
            }
            NodeKind::SetName { name } => self.set_name(node, name)?,
            NodeKind::SetDeferredProperty { property, stream, static_resources, theme_resources } => {
                trace!(?static_resources, ?theme_resources, "deferred property resources");
                let value = self.realize_deferred(*stream)?;
                self.set_on_top(node, *property, value)?;
            }
            NodeKind::SetCustomRuntimeData { property, stream, data } => {
                let decoded = self.decoders.decode(data.bytes(), *stream)?;
                trace!(kind = ?decoded.payload.kind(), version = decoded.version, "decoded custom runtime data");
                self.set_on_top(node, *property, Value::RuntimeData(Arc::new(decoded)))?;
            }
            NodeKind::SetValueConstant { property, value } => {
                self.set_on_top(node, *property, Value::Constant(value.clone()))?;
            }
            NodeKind::SetValueTypeConvertedConstant { property, value } => {
                let target = self.property_info(*property)?.property_type;
                let converted = self.type_converted(target, value)?;
                self.set_on_top(node, *property, converted)?;
            }
            NodeKind::SetValueTypeConvertedResolvedType { property, type_index } => {
                let resolved = self.type_info(*type_index)?;
                self.set_on_top(node, *property, Value::Type(resolved))?;
            }
            NodeKind::SetValueTypeConvertedResolvedProperty { property, value } => {
                let resolved = self.property_info(*value)?;
                self.set_on_top(node, *property, Value::Property(resolved))?;
            }
            NodeKind::ProvideStaticResourceValue { key } => {
                self.stacks.push_value(Value::StaticResource(ResourceKey::Name(Arc::clone(key))));
            }
            NodeKind::SetValueFromStaticResource { property, key } => {
                let reference = Value::StaticResource(ResourceKey::Name(Arc::clone(key)));
                self.set_on_top(node, *property, reference)?;
            }
            NodeKind::ProvideThemeResourceValue { key } => {
                self.stacks.push_value(Value::ThemeResource(ResourceKey::Name(Arc::clone(key))));
            }
            NodeKind::SetValueFromThemeResource { property, key } => {
                let reference = Value::ThemeResource(ResourceKey::Name(Arc::clone(key)));
                self.set_on_top(node, *property, reference)?;
            }
            NodeKind::SetValueFromTemplateBinding { property, source } => {
                let binding = Value::TemplateBinding(self.property_info(*source)?);
                self.set_on_top(node, *property, binding)?;
            }
            NodeKind::GetResourcePropertyBag { uid } => {
                let owner = self.stacks.peek_nth(1).ok_or_else(|| stack_underflow(node))?;
                let owner = expect_object(node, owner)?;
                owner.set_property(directive_names::X_UID, Value::Constant(Constant::String(Arc::clone(uid))));
            }
            NodeKind::Unrecognized { opcode } => {
                return Err(WriterError::UnrecognizedOpcode { opcode: *opcode, offset: node.offset });
            }
        }
        Ok(())
    }

    fn discard_orphaned_constant(&mut self, node: &Node) {
        if let Some(constant) = self.last_seen_constant.take() {
            warn!(
                %constant,
                next = %node.kind.name(),
                offset = node.offset,
                "constant not consumed by a collection add, discarding"
            );
        }
    }

    fn push_constant(&mut self, value: &Constant) {
        if self.options.class_name_heuristic()
            && self.scope_creation_count == 1
            && self.stacks.object_depth() == 1
        {
            let class_name: Arc<str> = match value {
                Constant::String(name) => Arc::clone(name),
                other => other.to_string().into(),
            };
            debug!(class = %class_name, "treating leading constant as x:Class");
            self.class_name = Some(class_name);
        } else {
            self.last_seen_constant = Some(value.clone());
        }
    }

    fn pop_scope(&mut self, node: &Node) -> Result<(), WriterError> {
        if self.stacks.namespace_depth() <= self.entry_depth {
            return Err(no_open_scope(node));
        }
        let frame = self.stacks.pop_frame().ok_or_else(|| no_open_scope(node))?;
        match self.stacks.peek_value().and_then(Value::as_object) {
            Some(object) => {
                for (prefix, namespace) in frame.iter() {
                    object.add_namespace(Arc::clone(prefix), Arc::clone(namespace));
                }
            }
            None if !frame.is_empty() => {
                trace!(declarations = frame.len(), "scope closed without an object, dropping namespaces");
            }
            None => {}
        }
        Ok(())
    }

    fn add_to_dictionary(&mut self, node: &Node, key: ResourceKey, value: Value) -> Result<(), WriterError> {
        let dictionary = self.top_object(node)?;
        self.classify(&dictionary, ContainerKind::Dictionary)?;
        if dictionary.add_entry(key.clone(), value).is_some() {
            warn!(%key, dictionary = %dictionary.type_name(), "duplicate dictionary key, replacing entry");
        }
        Ok(())
    }

    fn set_name(&mut self, node: &Node, name: &Arc<str>) -> Result<(), WriterError> {
        let top = self.stacks.peek_value().ok_or_else(|| stack_underflow(node))?.clone();
        if let Some(object) = top.as_object() {
            object.set_property(directive_names::NAME, Value::Constant(Constant::String(Arc::clone(name))));
        }
        if self.namescope.insert(Arc::clone(name), top).is_some() {
            warn!(%name, "name declared twice in one namescope");
        }
        Ok(())
    }

    /// Realizes `stream` with a fresh writer seeded from the current stacks.
    fn realize_deferred(&self, stream: usize) -> Result<Value, WriterError> {
        let limit = self.options.max_deferred_depth();
        if self.deferred_depth >= limit {
            return Err(WriterError::DeferredDepthExceeded { limit });
        }
        debug!(stream, depth = self.deferred_depth + 1, "realizing deferred property");
        let mut nested = ObjectWriter::with_context(
            self.metadata,
            self.document,
            self.capture_context(),
            self.deferred_depth + 1,
        )
        .with_options(self.options)
        .with_decoders(self.decoders);
        nested.process_stream(stream, 0)
    }
}

/// Key for an `AddToDictionary` value: `TargetType` for styles, `Name` otherwise.
fn dictionary_key(value: &Value) -> Result<ResourceKey, WriterError> {
    let Some(object) = value.as_object() else {
        return Err(WriterError::MissingDictionaryKey {
            type_name: Arc::from(value.kind_name()),
            property: directive_names::NAME,
        });
    };
    let type_info = object.type_info();
    let property = if type_info.is_style() { directive_names::TARGET_TYPE } else { directive_names::NAME };
    let key = match object.property(property) {
        Some(Value::Type(target)) if type_info.is_style() => Some(ResourceKey::Type(target)),
        Some(Value::Constant(Constant::String(name)))
        | Some(Value::TypeConverted { value: Constant::String(name), .. }) => Some(ResourceKey::Name(name)),
        _ => None,
    };
    key.ok_or_else(|| WriterError::MissingDictionaryKey { type_name: Arc::clone(&type_info.name), property })
}
