//! Relationship classifier: derives diagram edges from resolved symbols.
//!
//! Every walk here targets the *nearest visible* element: when an ancestor
//! has no node in the diagram, the walk continues past it so the edge lands
//! on the first ancestor that is shown. All walks carry a visited set and
//! terminate on cyclic hierarchies.
//!
//! The classifier only reads the node set; it returns [`EdgeSpec`]s and
//! leaves inserting them to the caller.

mod dependencies;


use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;

use crate::base::constants::is_object_class;
use crate::base::{Fqn, RelationshipKind};
use crate::config::DependencyOptions;
use crate::diagram::{DiagramElement, NodeRef, Snapshot};
use crate::symbols::{ClassResolver, ClassSymbol, UsageAnalyzer};

pub use dependencies::should_show;

/// An edge the classifier wants drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSpec {
    pub source: NodeRef,
    pub target: NodeRef,
    pub relationship: RelationshipKind,
}

impl EdgeSpec {
    fn new(source: &NodeRef, target: &NodeRef, relationship: RelationshipKind) -> Self {
        Self {
            source: source.clone(),
            target: target.clone(),
            relationship,
        }
    }
}

/// Edge derivation over one snapshot's node set.
pub struct RelationshipClassifier<'s, 'r, 'a> {
    nodes: &'s Snapshot,
    resolver: &'r mut ClassResolver<'a>,
}

impl<'s, 'r, 'a> RelationshipClassifier<'s, 'r, 'a> {
    pub fn new(nodes: &'s Snapshot, resolver: &'r mut ClassResolver<'a>) -> Self {
        Self { nodes, resolver }
    }

    fn class_node(&self, fqn: &str) -> Option<NodeRef> {
        self.nodes.find_node(&DiagramElement::class(fqn)).cloned()
    }

    // ========================================================================
    // Structural edges
    // ========================================================================

    /// Generalization and realization edges among `classes`.
    pub fn structural_edges(&mut self, classes: &[Arc<ClassSymbol>]) -> Vec<EdgeSpec> {
        let interfaces: FxHashSet<&Fqn> = classes
            .iter()
            .filter(|class| class.is_interface())
            .map(|class| &class.fqn)
            .collect();
        let mut edges = Vec::new();

        for class in classes {
            let Some(source) = self.class_node(&class.fqn) else {
                continue;
            };

            if let Some(target) = self.nearest_superclass(class) {
                // Interfaces implicitly extending Object get no edge.
                let implicit_object = class.is_interface()
                    && target.fqn().is_some_and(|fqn| is_object_class(&fqn));
                if source != target && !implicit_object {
                    let relationship = if class.is_interface() {
                        RelationshipKind::InterfaceGeneralization
                    } else {
                        RelationshipKind::Generalization
                    };
                    edges.push(EdgeSpec::new(&source, &target, relationship));
                }
            }

            for fqn in &class.interfaces {
                if !interfaces.contains(fqn) {
                    continue;
                }
                if let Some(target) = self.class_node(fqn) {
                    if source != target {
                        edges.push(EdgeSpec::new(&source, &target, RelationshipKind::Realization));
                    }
                }
            }

            if class.is_interface() {
                for parent in self.nearest_interfaces(class) {
                    if !interfaces.contains(&parent.fqn) {
                        continue;
                    }
                    if let Some(target) = self.class_node(&parent.fqn) {
                        if source != target {
                            edges.push(EdgeSpec::new(
                                &source,
                                &target,
                                RelationshipKind::InterfaceGeneralization,
                            ));
                        }
                    }
                }
            } else {
                for target in self.realized_interfaces(class) {
                    if source != target {
                        edges.push(EdgeSpec::new(&source, &target, RelationshipKind::Realization));
                    }
                }
            }
        }

        tracing::trace!("[CLASSIFY] {} structural edges", edges.len());
        edges
    }

    /// The node of the closest ancestor along the primary-base chain that
    /// is shown in the diagram.
    pub fn nearest_superclass(&mut self, class: &ClassSymbol) -> Option<NodeRef> {
        let mut processed = FxHashSet::default();
        let mut current = self.resolver.super_class(class, &mut processed);
        while let Some(base) = current {
            if let Some(node) = self.class_node(&base.fqn) {
                return Some(node);
            }
            current = self.resolver.super_class(&base, &mut processed);
        }
        None
    }

    /// Every super-interface of `interface`, transitively, in depth-first
    /// declaration order.
    pub fn nearest_interfaces(&mut self, interface: &ClassSymbol) -> Vec<Arc<ClassSymbol>> {
        let mut found = IndexMap::new();
        self.collect_super_interfaces(interface, &mut found);
        found.into_values().collect()
    }

    fn collect_super_interfaces(
        &mut self,
        interface: &ClassSymbol,
        found: &mut IndexMap<Fqn, Arc<ClassSymbol>>,
    ) {
        for parent in self.resolver.resolved_supers(interface) {
            if found.contains_key(&parent.fqn) {
                continue;
            }
            found.insert(parent.fqn.clone(), parent.clone());
            self.collect_super_interfaces(&parent, found);
        }
    }

    /// Nodes of the nearest shown interfaces `class` realizes.
    ///
    /// Candidates are the class's own interfaces plus those of its hidden
    /// ancestors, up to the first ancestor that is shown. Each candidate
    /// that is shown is a target; a hidden one is replaced by its
    /// super-interfaces. Candidates are processed first-in first-out in
    /// declaration order.
    pub fn realized_interfaces(&mut self, class: &ClassSymbol) -> Vec<NodeRef> {
        let mut candidates: IndexSet<Fqn> = class.interfaces.iter().cloned().collect();
        let mut processed = FxHashSet::default();
        let mut current = self.resolver.super_class(class, &mut processed);
        while let Some(base) = current {
            if self.class_node(&base.fqn).is_some() {
                break;
            }
            candidates.extend(base.interfaces.iter().cloned());
            current = self.resolver.super_class(&base, &mut processed);
        }

        let mut pending: VecDeque<Fqn> = candidates.into_iter().collect();
        let mut visited = FxHashSet::default();
        let mut targets = Vec::new();
        while let Some(fqn) = pending.pop_front() {
            if !visited.insert(fqn.clone()) {
                continue;
            }
            if let Some(node) = self.class_node(&fqn) {
                targets.push(node);
            } else if let Some(interface) = self.resolver.resolve(&fqn) {
                pending.extend(interface.declared_interfaces().iter().cloned());
            }
        }
        targets
    }

    // ========================================================================
    // Dependency edges
    // ========================================================================

    /// Usage edges from each shown class in `classes` to shown targets.
    pub fn dependency_edges(
        &mut self,
        classes: &[Arc<ClassSymbol>],
        analyzer: &dyn UsageAnalyzer,
        options: &DependencyOptions,
    ) -> Vec<EdgeSpec> {
        let mut edges = Vec::new();
        for class in classes {
            let Some(source) = self.class_node(&class.fqn) else {
                continue;
            };
            for (target, relationship) in analyzer.used_classes(class) {
                if !should_show(options, &class.fqn, &target, &relationship) {
                    continue;
                }
                if let Some(target) = self.class_node(&target) {
                    edges.push(EdgeSpec::new(&source, &target, relationship));
                }
            }
        }
        tracing::trace!("[CLASSIFY] {} dependency edges", edges.len());
        edges
    }
}
