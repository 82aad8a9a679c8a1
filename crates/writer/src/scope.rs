//! The writer's two parallel stacks and the snapshots nested writers start from.

use smallvec::SmallVec;
use std::sync::Arc;
use xbfload_core::Value;

/// Namespace declarations collected while one scope was on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamespaceFrame(SmallVec<[(Arc<str>, Arc<str>); 2]>);

impl NamespaceFrame {
    pub fn declare(&mut self, prefix: Arc<str>, namespace: Arc<str>) {
        self.0.push((prefix, namespace));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Arc<str>, Arc<str>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Object stack plus namespace scope stack.
///
/// Cloning copies both containers; the objects they hold stay shared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeStacks {
    objects: Vec<Value>,
    namespaces: Vec<NamespaceFrame>,
}

impl ScopeStacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_value(&mut self, value: Value) {
        self.objects.push(value);
    }

    pub fn pop_value(&mut self) -> Option<Value> {
        self.objects.pop()
    }

    pub fn peek_value(&self) -> Option<&Value> {
        self.objects.last()
    }

    /// The value `depth` levels below the top; `peek_nth(0)` is the top.
    pub fn peek_nth(&self, depth: usize) -> Option<&Value> {
        let index = self.objects.len().checked_sub(depth + 1)?;
        self.objects.get(index)
    }

    pub fn object_depth(&self) -> usize {
        self.objects.len()
    }

    pub fn push_frame(&mut self) {
        self.namespaces.push(NamespaceFrame::default());
    }

    pub fn pop_frame(&mut self) -> Option<NamespaceFrame> {
        self.namespaces.pop()
    }

    pub fn top_frame_mut(&mut self) -> Option<&mut NamespaceFrame> {
        self.namespaces.last_mut()
    }

    pub fn namespace_depth(&self) -> usize {
        self.namespaces.len()
    }

    pub fn capture(&self) -> SavedContext {
        SavedContext { stacks: self.clone() }
    }

    pub fn restore(&mut self, context: &SavedContext) {
        self.clone_from(&context.stacks);
    }
}

/// Snapshot of both stacks at the point a deferred region was encountered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SavedContext {
    stacks: ScopeStacks,
}

impl SavedContext {
    pub fn stacks(&self) -> &ScopeStacks {
        &self.stacks
    }
}
