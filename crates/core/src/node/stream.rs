use super::NodeKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Position in the source stream; diagnostics only.
    #[serde(default)]
    pub offset: u32,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(offset: u32, kind: NodeKind) -> Self {
        Self { offset, kind }
    }
}

/// Read-only, indexable sequence of nodes describing one (sub)tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeStream(Vec<Node>);

impl NodeStream {
    pub fn new(nodes: Vec<Node>) -> Self {
        NodeStream(nodes)
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.iter()
    }
}

/// Nodes without explicit offsets get their position as offset.
impl FromIterator<NodeKind> for NodeStream {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        NodeStream(
            iter.into_iter()
                .enumerate()
                .map(|(position, kind)| Node::new(u32::try_from(position).unwrap_or(u32::MAX), kind))
                .collect(),
        )
    }
}

/// All node streams of one compiled document. Stream 0 is the root stream,
/// the others are realized through deferred properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XbfDocument {
    pub streams: Vec<NodeStream>,
}

impl XbfDocument {
    pub fn new(streams: Vec<NodeStream>) -> Self {
        Self { streams }
    }

    pub fn stream(&self, index: usize) -> Option<&NodeStream> {
        self.streams.get(index)
    }
}
