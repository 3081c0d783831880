//! The node/edge collections produced by one reconciliation pass.

use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;

use super::edge::{DiagramEdge, EdgeRef};
use super::node::{DiagramElement, DiagramNode, NodeRef};
use crate::base::RelationshipKind;

/// Nodes, structural edges, and dependency edges.
///
/// Structural and dependency edges live in separate sets so toggling the
/// dependency display never touches inheritance edges. Iteration order is
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    nodes: IndexSet<NodeRef>,
    edges: IndexSet<EdgeRef>,
    dependency_edges: IndexSet<EdgeRef>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Query ───────────────────────────────────────────────────────

    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef> {
        self.nodes.iter()
    }

    /// Structural (inheritance) edges.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeRef> {
        self.edges.iter()
    }

    pub fn dependency_edges(&self) -> impl Iterator<Item = &EdgeRef> {
        self.dependency_edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn dependency_edge_count(&self) -> usize {
        self.dependency_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.dependency_edges.is_empty()
    }

    /// The node for `element`, matching both FQN and kind.
    pub fn find_node(&self, element: &DiagramElement) -> Option<&NodeRef> {
        self.nodes.get(&element.to_node())
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Insert a node, returning the canonical handle (an existing equal
    /// node wins over the new one).
    pub fn insert_node(&mut self, node: DiagramNode) -> NodeRef {
        if let Some(existing) = self.nodes.get(&node) {
            return existing.clone();
        }
        let node = Arc::new(node);
        self.nodes.insert(node.clone());
        node
    }

    /// Add a structural edge. `None` if an equal edge already exists.
    pub fn add_edge(
        &mut self,
        from: &NodeRef,
        to: &NodeRef,
        relationship: RelationshipKind,
    ) -> Option<EdgeRef> {
        add_unique(&mut self.edges, DiagramEdge::new(from.clone(), to.clone(), relationship))
    }

    /// Add a dependency edge. `None` if an equal edge already exists.
    pub fn add_dependency_edge(
        &mut self,
        from: &NodeRef,
        to: &NodeRef,
        relationship: RelationshipKind,
    ) -> Option<EdgeRef> {
        add_unique(
            &mut self.dependency_edges,
            DiagramEdge::new(from.clone(), to.clone(), relationship),
        )
    }

    /// The structural edge `from → to`, adding it if missing.
    pub fn ensure_edge(
        &mut self,
        from: &NodeRef,
        to: &NodeRef,
        relationship: RelationshipKind,
    ) -> EdgeRef {
        let edge = DiagramEdge::new(from.clone(), to.clone(), relationship);
        if let Some(existing) = self.edges.get(&edge) {
            return existing.clone();
        }
        let edge = Arc::new(edge);
        self.edges.insert(edge.clone());
        edge
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, node: &DiagramNode) -> Option<NodeRef> {
        self.edges.retain(|edge| !edge.touches(node));
        self.dependency_edges.retain(|edge| !edge.touches(node));
        self.nodes.shift_take(node)
    }

    /// Remove an edge from whichever set holds it.
    pub fn remove_edge(&mut self, edge: &DiagramEdge) -> bool {
        self.edges.shift_remove(edge) || self.dependency_edges.shift_remove(edge)
    }

    /// Move everything into a backup, leaving this snapshot empty.
    pub fn take(&mut self) -> Snapshot {
        std::mem::take(self)
    }

    /// Replace freshly built nodes with their equal counterparts from
    /// `backup`, so surviving nodes keep their original handle.
    pub fn merge_nodes(&mut self, backup: &Snapshot) {
        merge_with_backup(&mut self.nodes, &backup.nodes);
    }

    /// Same as [`merge_nodes`](Self::merge_nodes) for both edge sets.
    pub fn merge_edges(&mut self, backup: &Snapshot) {
        merge_with_backup(&mut self.edges, &backup.edges);
        merge_with_backup(&mut self.dependency_edges, &backup.dependency_edges);
    }
}

fn add_unique(storage: &mut IndexSet<EdgeRef>, edge: DiagramEdge) -> Option<EdgeRef> {
    if storage.contains(&edge) {
        return None;
    }
    let edge = Arc::new(edge);
    storage.insert(edge.clone());
    Some(edge)
}

fn merge_with_backup<T: Hash + Eq + Clone>(target: &mut IndexSet<T>, backup: &IndexSet<T>) {
    for old in backup {
        if target.contains(old) {
            target.replace(old.clone());
        }
    }
}
