//! Node arena for AST storage.

use crate::node::NodeKind;
use crate::span::Span;
use serde::Serialize;

/// Index of a node inside a `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for absent optional children.
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Arena-based storage for AST nodes.
/// Nodes are stored contiguously and referenced by index; a conversion owns
/// exactly one arena for its lifetime.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index.
    pub fn add(&mut self, kind: NodeKind, span: Span) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node { kind, span });
        NodeIndex(index)
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn kind(&self, index: NodeIndex) -> Option<&NodeKind> {
        self.get(index).map(|node| &node.kind)
    }

    /// Overwrite the node at `index`, returning the old node.
    pub fn replace(&mut self, index: NodeIndex, new_node: Node) -> Option<Node> {
        if index.is_none() {
            None
        } else {
            self.nodes
                .get_mut(index.0 as usize)
                .map(|old| std::mem::replace(old, new_node))
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identifier text of the node, if it is an identifier.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.kind(index)? {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Cooked string value of the node, if it is a string literal.
    pub fn string_value(&self, index: NodeIndex) -> Option<&str> {
        match self.kind(index)? {
            NodeKind::StringLiteral { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Program body of the root node.
    pub fn program_body(&self, root: NodeIndex) -> &[NodeIndex] {
        match self.kind(root) {
            Some(NodeKind::Program { body }) => body,
            _ => &[],
        }
    }

    /// Replace the program body of the root node.
    pub fn set_program_body(&mut self, root: NodeIndex, new_body: Vec<NodeIndex>) {
        if let Some(node) = self.get_mut(root) {
            if let NodeKind::Program { body } = &mut node.kind {
                *body = new_body;
            }
        }
    }
}
