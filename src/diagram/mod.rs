//! Diagram elements: nodes, edges, and the snapshot collections.
//!
//! Nodes and edges are handed out as `Arc`s. Equality and hashing follow the
//! logical identity (FQN plus node kind for nodes; source, target and
//! relationship for edges), while the `Arc` allocation is the handle the
//! renderer keys its UI state on. Reconciliation keeps the allocation alive
//! for every element that survives a pass; see [`Snapshot::merge_nodes`].

mod edge;
mod node;
mod snapshot;


pub use edge::{DiagramEdge, EdgeRef};
pub use node::{DiagramElement, DiagramNode, NodeKind, NodeRef};
pub use snapshot::Snapshot;
