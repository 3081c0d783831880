//! Diagram nodes and the elements they identify.

use std::fmt;
use std::sync::Arc;

use crate::base::Fqn;
use crate::base::constants::{CLASS_LABEL, PACKAGE_LABEL};
use crate::symbols::SymbolRef;

/// Shared handle to a node. Pointer identity is what survives refreshes.
pub type NodeRef = Arc<DiagramNode>;

/// Discriminant of a [`DiagramNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    Package,
    Note,
}

/// What a node stands for: a class or a package, by FQN.
///
/// This is also the key gestures and lookups are expressed in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagramElement {
    Class(Fqn),
    Package(Fqn),
}

impl DiagramElement {
    pub fn class(fqn: impl Into<Fqn>) -> Self {
        Self::Class(fqn.into())
    }

    pub fn package(fqn: impl Into<Fqn>) -> Self {
        Self::Package(fqn.into())
    }

    pub fn fqn(&self) -> &Fqn {
        match self {
            Self::Class(fqn) | Self::Package(fqn) => fqn,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Class(_) => NodeKind::Class,
            Self::Package(_) => NodeKind::Package,
        }
    }

    /// The node that would represent this element.
    pub fn to_node(&self) -> DiagramNode {
        match self {
            Self::Class(fqn) => DiagramNode::Class(SymbolRef::new(fqn.clone())),
            Self::Package(fqn) => DiagramNode::Package(fqn.clone()),
        }
    }
}

impl fmt::Display for DiagramElement {
    /// Human-readable label: `Class <fqn>` or `Package <fqn>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(fqn) => write!(f, "{CLASS_LABEL} {fqn}"),
            Self::Package(fqn) => write!(f, "{PACKAGE_LABEL} {fqn}"),
        }
    }
}

/// A diagram node.
///
/// Two nodes are equal iff they have the same kind and FQN; a class node
/// and a package node with the same FQN are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiagramNode {
    Class(SymbolRef),
    Package(Fqn),
    /// A note attached to another node. Identifies as whatever it annotates.
    Note(NodeRef),
}

impl DiagramNode {
    pub fn class(fqn: impl Into<Fqn>) -> Self {
        Self::Class(SymbolRef::new(fqn))
    }

    pub fn package(fqn: impl Into<Fqn>) -> Self {
        Self::Package(fqn.into())
    }

    pub fn note(target: NodeRef) -> Self {
        Self::Note(target)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Class(_) => NodeKind::Class,
            Self::Package(_) => NodeKind::Package,
            Self::Note(_) => NodeKind::Note,
        }
    }

    /// The class or package this node stands for, unwrapping notes.
    pub fn identifying_element(&self) -> Option<DiagramElement> {
        match self {
            Self::Class(symbol) => Some(DiagramElement::Class(symbol.fqn().clone())),
            Self::Package(fqn) => Some(DiagramElement::Package(fqn.clone())),
            Self::Note(target) => target.identifying_element(),
        }
    }

    /// FQN of the identifying element.
    pub fn fqn(&self) -> Option<Fqn> {
        self.identifying_element().map(|element| element.fqn().clone())
    }

    /// `Class <fqn>`, `Package <fqn>`, or empty for detached notes.
    pub fn name(&self) -> String {
        self.identifying_element()
            .map(|element| element.to_string())
            .unwrap_or_default()
    }
}

impl From<&DiagramElement> for DiagramNode {
    fn from(element: &DiagramElement) -> Self {
        element.to_node()
    }
}
