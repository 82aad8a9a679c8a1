mod close;
mod open;

use crate::error::WriterError;
use crate::options::{ContainerPolicy, WriterOptions};
use crate::runtime_data::DecoderRegistry;
use crate::scope::{SavedContext, ScopeStacks};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use xbfload_core::{
    Constant, ContainerKind, MetadataProvider, Node, NodeStream, ObjectRef, PropertyIndex,
    PropertyInfo, TypeIndex, TypeInfo, Value, XbfDocument, directive_names,
};

/// Realizes node streams of one document into object graphs.
///
/// A writer owns its stacks, namescope table and walk state; nested writers
/// created for deferred properties get their own copies of all of them.
pub struct ObjectWriter<'a> {
    metadata: &'a dyn MetadataProvider,
    document: &'a XbfDocument,
    decoders: &'a DecoderRegistry,
    options: WriterOptions,
    stacks: ScopeStacks,
    initial: SavedContext,
    namescope: BTreeMap<Arc<str>, Value>,
    class_name: Option<Arc<str>>,
    last_seen_constant: Option<Constant>,
    scope_creation_count: usize,
    conditional_scope_seen: bool,
    entry_depth: usize,
    deferred_depth: usize,
}

impl<'a> ObjectWriter<'a> {
    pub fn new(metadata: &'a dyn MetadataProvider, document: &'a XbfDocument) -> Self {
        Self::with_context(metadata, document, SavedContext::default(), 0)
    }

    /// Creates a writer whose stacks start as a copy of `context`.
    ///
    /// `deferred_depth` counts how many deferred regions enclose the streams
    /// this writer will walk.
    pub fn with_context(
        metadata: &'a dyn MetadataProvider,
        document: &'a XbfDocument,
        context: SavedContext,
        deferred_depth: usize,
    ) -> Self {
        let stacks = context.stacks().clone();
        Self {
            metadata,
            document,
            decoders: DecoderRegistry::standard(),
            options: WriterOptions::default(),
            entry_depth: stacks.namespace_depth(),
            stacks,
            initial: context,
            namescope: BTreeMap::new(),
            class_name: None,
            last_seen_constant: None,
            scope_creation_count: 0,
            conditional_scope_seen: false,
            deferred_depth,
        }
    }

    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_decoders(mut self, decoders: &'a DecoderRegistry) -> Self {
        self.decoders = decoders;
        self
    }

    pub fn options(&self) -> WriterOptions {
        self.options
    }

    pub fn object_depth(&self) -> usize {
        self.stacks.object_depth()
    }

    pub fn namespace_depth(&self) -> usize {
        self.stacks.namespace_depth()
    }

    /// Snapshot of the current stacks, as handed to nested writers.
    pub fn capture_context(&self) -> SavedContext {
        self.stacks.capture()
    }

    /// Realizes the root stream of the document.
    pub fn process_document(&mut self) -> Result<Value, WriterError> {
        self.process_stream(0, 0)
    }

    /// Walks `stream_index` from `start` until the namespace depth returns to
    /// its value at entry and returns the single value the walk produced.
    ///
    /// The x:Class marker and every name declared during the walk are applied
    /// to the result when it is an object. Afterwards the writer is reset to
    /// the context it was created with, whether or not the walk succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown streams, indices or opcodes, for a stream
    /// that ends inside an open scope, and for any stack-shape violation.
    pub fn process_stream(&mut self, stream_index: usize, start: usize) -> Result<Value, WriterError> {
        debug!(stream = stream_index, start, deferred_depth = self.deferred_depth, "processing node stream");
        let result = self.walk_stream(stream_index, start);
        self.reset();
        result
    }

    fn walk_stream(&mut self, stream_index: usize, start: usize) -> Result<Value, WriterError> {
        let document = self.document;
        let stream =
            document.stream(stream_index).ok_or(WriterError::UnknownStream(stream_index))?;

        let namespace_depth = self.stacks.namespace_depth();
        let object_depth = self.stacks.object_depth();
        self.entry_depth = namespace_depth;

        let mut index = start;
        loop {
            index = self.visit(stream_index, stream, index)?;
            if self.stacks.namespace_depth() == namespace_depth {
                break;
            }
        }

        let produced = self.stacks.object_depth().saturating_sub(object_depth);
        if self.stacks.object_depth() != object_depth + 1 {
            return Err(WriterError::StackImbalance { expected: 1, found: produced });
        }
        let root = self
            .stacks
            .pop_value()
            .ok_or(WriterError::StackImbalance { expected: 1, found: 0 })?;

        match root.as_object() {
            Some(object) => {
                if let Some(class_name) = self.class_name.take() {
                    debug!(class = %class_name, "applying x:Class to root");
                    object.set_property(directive_names::X_CLASS, Value::Constant(Constant::String(class_name)));
                }
                for (name, value) in &self.namescope {
                    object.register_name(Arc::clone(name), value);
                }
            }
            None if !self.namescope.is_empty() || self.class_name.is_some() => {
                warn!(
                    kind = root.kind_name(),
                    names = self.namescope.len(),
                    "root value is not nameable; dropping namescope and x:Class"
                );
            }
            None => {}
        }

        Ok(root)
    }

    /// Visits the node at `index` and, for interior nodes, all of its
    /// descendants up to and including the closing node. Returns the index of
    /// the next unvisited node.
    fn visit(&mut self, stream_index: usize, stream: &NodeStream, index: usize) -> Result<usize, WriterError> {
        let node = stream
            .get(index)
            .ok_or(WriterError::UnexpectedEndOfStream { stream: stream_index, index })?;
        trace!(index, offset = node.offset, node = %node.kind.name(), "visit");

        self.open(node)?;

        let mut next = index + 1;
        if !node.kind.is_leaf() {
            loop {
                let child = stream
                    .get(next)
                    .ok_or(WriterError::UnexpectedEndOfStream { stream: stream_index, index: next })?;
                let closes_scope = child.kind.is_scope_close();
                next = self.visit(stream_index, stream, next)?;
                if closes_scope {
                    break;
                }
            }
        }

        self.close(node)?;
        Ok(next)
    }

    fn reset(&mut self) {
        self.stacks.restore(&self.initial);
        self.entry_depth = self.stacks.namespace_depth();
        self.namescope.clear();
        self.class_name = None;
        self.last_seen_constant = None;
        self.scope_creation_count = 0;
        self.conditional_scope_seen = false;
    }

    fn push_scope(&mut self, node: &Node) -> Result<(), WriterError> {
        let limit = self.options.max_scope_depth();
        if self.stacks.namespace_depth() >= limit {
            return Err(WriterError::ScopeDepthExceeded { node: node.kind.name(), offset: node.offset, limit });
        }
        self.stacks.push_frame();
        self.scope_creation_count += 1;
        Ok(())
    }

    fn declare_namespace(&mut self, node: &Node, prefix: &Arc<str>, namespace: &Arc<str>) -> Result<(), WriterError> {
        let frame = self.stacks.top_frame_mut().ok_or_else(|| no_open_scope(node))?;
        frame.declare(Arc::clone(prefix), Arc::clone(namespace));
        Ok(())
    }

    fn type_info(&self, index: TypeIndex) -> Result<Arc<TypeInfo>, WriterError> {
        self.metadata.type_info(index).ok_or(WriterError::UnknownType(index))
    }

    fn property_info(&self, index: PropertyIndex) -> Result<Arc<PropertyInfo>, WriterError> {
        self.metadata.property_info(index).ok_or(WriterError::UnknownProperty(index))
    }

    fn create_instance(&self, index: TypeIndex) -> Result<Value, WriterError> {
        let type_info = self.type_info(index)?;
        Ok(Value::Object(self.metadata.create_instance(&type_info)))
    }

    fn type_converted(&self, index: TypeIndex, value: &Constant) -> Result<Value, WriterError> {
        Ok(Value::TypeConverted { target: self.type_info(index)?, value: value.clone() })
    }

    fn pop(&mut self, node: &Node) -> Result<Value, WriterError> {
        self.stacks.pop_value().ok_or_else(|| stack_underflow(node))
    }

    fn top_object(&self, node: &Node) -> Result<ObjectRef, WriterError> {
        let top = self.stacks.peek_value().ok_or_else(|| stack_underflow(node))?;
        expect_object(node, top).cloned()
    }

    /// Sets `value` on `property` of the object on top of the stack.
    fn set_on_top(&self, node: &Node, property: PropertyIndex, value: Value) -> Result<(), WriterError> {
        let info = self.property_info(property)?;
        let target = self.top_object(node)?;
        target.set_property(Arc::clone(&info.name), value);
        Ok(())
    }

    fn classify(&self, container: &ObjectRef, kind: ContainerKind) -> Result<(), WriterError> {
        let previous = container.container_kind();
        if previous != ContainerKind::None && previous != kind {
            match self.options.container_policy() {
                ContainerPolicy::Strict => {
                    return Err(WriterError::ContainerConflict {
                        type_name: container.type_name(),
                        previous,
                        requested: kind,
                    });
                }
                ContainerPolicy::LastWriteWins => {
                    warn!(
                        type_name = %container.type_name(),
                        ?previous,
                        requested = ?kind,
                        "container reclassified"
                    );
                }
            }
        }
        container.set_container_kind(kind);
        Ok(())
    }
}

fn stack_underflow(node: &Node) -> WriterError {
    WriterError::StackUnderflow { node: node.kind.name(), offset: node.offset }
}

fn no_open_scope(node: &Node) -> WriterError {
    WriterError::NoOpenScope { node: node.kind.name(), offset: node.offset }
}

fn expect_object<'v>(node: &Node, value: &'v Value) -> Result<&'v ObjectRef, WriterError> {
    value.as_object().ok_or_else(|| WriterError::ExpectedObject {
        node: node.kind.name(),
        offset: node.offset,
        found: value.kind_name(),
    })
}
