//! Relationship kinds drawn between diagram nodes.

use smol_str::SmolStr;

/// Kind of a non-inheritance usage relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DependencyKind {
    /// Single-valued association (a field of the target type).
    OneToOne,
    /// Multi-valued association (a collection of the target type).
    OneToMany,
    /// Plain usage (method call, parameter, local variable).
    Usage,
    /// Object creation (`new Target()`).
    Creation,
    /// Metadata annotation referencing the target.
    Annotation,
}

/// The relationship carried by a diagram edge.
///
/// Part of edge identity: two edges between the same nodes with different
/// relationships are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelationshipKind {
    /// Class extends class.
    Generalization,
    /// Interface extends interface.
    InterfaceGeneralization,
    /// Class implements interface.
    Realization,
    /// Usage dependency, optionally labelled (e.g. with the field name).
    Dependency {
        kind: DependencyKind,
        label: Option<SmolStr>,
    },
    /// Placeholder carried by edges the host created without a relationship.
    NoRelationship,
}

impl RelationshipKind {
    /// An unlabelled dependency.
    pub fn dependency(kind: DependencyKind) -> Self {
        Self::Dependency { kind, label: None }
    }

    /// A dependency with a label.
    pub fn labelled(kind: DependencyKind, label: impl Into<SmolStr>) -> Self {
        Self::Dependency {
            kind,
            label: Some(label.into()),
        }
    }

    /// Inheritance relationships (generalization and realization).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Generalization | Self::InterfaceGeneralization | Self::Realization
        )
    }

    /// The dependency kind, if this is a dependency.
    pub fn dependency_kind(&self) -> Option<DependencyKind> {
        match self {
            Self::Dependency { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
