//! Diagram edges.

use std::sync::Arc;

use super::node::{DiagramNode, NodeRef};
use crate::base::RelationshipKind;

/// Shared handle to an edge.
pub type EdgeRef = Arc<DiagramEdge>;

/// A directed, typed edge between two nodes.
///
/// Identity is the `(source, target, relationship)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagramEdge {
    source: NodeRef,
    target: NodeRef,
    relationship: RelationshipKind,
}

impl DiagramEdge {
    pub fn new(source: NodeRef, target: NodeRef, relationship: RelationshipKind) -> Self {
        Self {
            source,
            target,
            relationship,
        }
    }

    pub fn source(&self) -> &NodeRef {
        &self.source
    }

    pub fn target(&self) -> &NodeRef {
        &self.target
    }

    pub fn relationship(&self) -> &RelationshipKind {
        &self.relationship
    }

    /// Whether either endpoint equals `node`.
    pub fn touches(&self, node: &DiagramNode) -> bool {
        *self.source == *node || *self.target == *node
    }
}
