//! # flexuml-base
//!
//! Live UML class-diagram data model for ActionScript/Flex symbol graphs.
//!
//! A diagram is a user-curated selection of classes and packages, projected
//! onto the host's symbol space on every refresh. Nodes and edges keep their
//! handles across refreshes, and edge gestures on the diagram become source
//! refactorings.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! edit       → Gestures, pure edit planning, outbound collaborator traits
//!   ↓
//! model      → UmlDataModel: serialized reconciliation, identity-preserving merge
//!   ↓
//! classify   → Relationship classifier (nearest visible ancestors, usages)
//!   ↓
//! selection  → User-curated membership (added/removed, included/excluded)
//!   ↓
//! diagram    → Nodes, edges, snapshot collections
//!   ↓
//! symbols    → Symbol handles, SymbolSpace trait, package index adapter
//!   ↓
//! base       → Primitives (Fqn, relationship kinds, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → symbols → diagram → selection → classify → model → edit)
// ============================================================================

/// Foundation types: FQNs, relationship kinds
pub mod base;

/// Symbol handles and the host query surface
pub mod symbols;

/// Diagram nodes, edges and snapshots
pub mod diagram;

/// The user-curated Selection Set
pub mod selection;

/// Edge derivation over resolved symbols
pub mod classify;

/// The data model and its reconciliation pass
pub mod model;

/// Diagram gestures and source refactoring commands
pub mod edit;

/// Model configuration
pub mod config;

/// Error types
pub mod error;

/// In-memory host implementation
pub mod workspace;

// Re-export foundation types
pub use base::{DependencyKind, Fqn, RelationshipKind};

pub use config::{DependencyOption, DependencyOptions, ModelConfig};
pub use diagram::{DiagramEdge, DiagramElement, DiagramNode, EdgeRef, NodeRef};
pub use edit::EdgeRemoval;
pub use error::{RefactoringError, UmlError};
pub use model::{DiagramHost, UmlDataModel};
