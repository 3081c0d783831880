//! Gesture entry points on [`UmlDataModel`].

use std::sync::Arc;

use super::plan::{EditPlan, PlannedEdit, plan_create_edge, plan_remove_edge};
use crate::base::{Fqn, package_name};
use crate::diagram::{DiagramEdge, DiagramElement, DiagramNode, EdgeRef, NodeRef, Snapshot};
use crate::error::UmlError;
use crate::model::{ModelState, UmlDataModel};
use crate::symbols::{ClassResolver, ClassSymbol, PackageIndex, SymbolRef};

/// Outcome of [`UmlDataModel::remove_edge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeRemoval {
    /// Nothing to do (not an editable inheritance edge).
    Skipped,
    /// Refused; an error was shown to the user.
    Rejected,
    /// The user answered no.
    Declined,
    /// The source was edited and the edge dropped.
    Removed,
}

impl UmlDataModel {
    // ========================================================================
    // Membership gestures
    // ========================================================================

    /// Add a class or package to the diagram.
    ///
    /// Returns the new node, or `None` if the element is already shown, or
    /// is a class that does not resolve or may not be shown.
    pub fn add_element(&self, element: &DiagramElement) -> Option<NodeRef> {
        let mut state = self.state.lock();
        let mut resolver = ClassResolver::new(self.host.symbols.as_ref(), state.config.scope);
        self.add_element_locked(&mut state, &mut resolver, element)
    }

    fn add_element_locked(
        &self,
        state: &mut ModelState,
        resolver: &mut ClassResolver<'_>,
        element: &DiagramElement,
    ) -> Option<NodeRef> {
        if state.snapshot.find_node(element).is_some() {
            return None;
        }
        match element {
            DiagramElement::Class(fqn) => {
                let class = resolver.resolve(fqn)?;
                if !state.is_allowed_to_show(&self.host, &class) {
                    return None;
                }
                if !state.selection.add_class(&SymbolRef::of(&class)) {
                    return None;
                }
                Some(state.snapshot.insert_node(DiagramNode::Class(SymbolRef::of(&class))))
            }
            DiagramElement::Package(package) => {
                state.selection.include_package(package.clone());
                Some(state.snapshot.insert_node(DiagramNode::Package(package.clone())))
            }
        }
    }

    /// Remove a class or package from the diagram and remember the removal,
    /// so later updates keep it out. An element without a node only loses
    /// its pending addition or inclusion.
    pub fn remove_element(&self, element: &DiagramElement) {
        let mut state = self.state.lock();
        let Some(node) = state.snapshot.find_node(element).cloned() else {
            match element {
                DiagramElement::Class(fqn) => state.selection.forget_class(fqn),
                DiagramElement::Package(package) => state.selection.forget_package(package),
            }
            return;
        };

        state.snapshot.remove_node(&node);
        match element {
            DiagramElement::Class(fqn) => {
                state.selection.remove_class(&SymbolRef::new(fqn.clone()));
            }
            DiagramElement::Package(package) => {
                state.selection.exclude_package(package.clone());
                state.selection.purge_package_classes(package);
            }
        }
        tracing::debug!("[UML_EDIT] removed {}", element);
    }

    /// Remove whatever `node` stands for. Detached notes are ignored.
    pub fn remove_node(&self, node: &DiagramNode) {
        if let Some(element) = node.identifying_element() {
            self.remove_element(&element);
        }
    }

    /// Everything shown becomes removed; the snapshot is cleared.
    pub fn remove_all_elements(&self) {
        let mut state = self.state.lock();
        state.selection.remove_all();
        state.snapshot = Snapshot::new();
    }

    /// Expand a package node into its members. Other nodes are ignored.
    pub fn expand_node(&self, node: &DiagramNode) {
        if let Some(DiagramElement::Package(package)) = node.identifying_element() {
            self.expand_package(&package);
        }
    }

    /// Replace a collapsed package by its member classes and subpackages.
    pub fn expand_package(&self, package: &str) {
        let mut state = self.state.lock();
        let space = self.host.symbols.as_ref();
        let index = PackageIndex::new(space, state.config.scope);
        let mut resolver = ClassResolver::new(space, state.config.scope);

        state.selection.exclude_package(package);
        for class in index.member_classes(package, &mut resolver) {
            let element = DiagramElement::Class(class.fqn.clone());
            self.add_element_locked(&mut state, &mut resolver, &element);
        }
        for subpackage in index.subpackages(package) {
            let element = DiagramElement::Package(subpackage);
            self.add_element_locked(&mut state, &mut resolver, &element);
        }
        tracing::debug!("[UML_EDIT] expanded package {}", package);
    }

    /// Collapse a node into its parent package: everything tracked below
    /// the parent is dropped and the parent is shown as one node. Top-level
    /// elements have no parent and are left alone.
    pub fn collapse_node(&self, node: &DiagramNode) {
        let Some(fqn) = node.fqn() else {
            return;
        };
        let parent = package_name(&fqn);
        if parent.is_empty() {
            return;
        }
        let mut state = self.state.lock();
        state.selection.forget_nested(parent);
        state.selection.include_package(Fqn::new(parent));
        tracing::debug!("[UML_EDIT] collapsed {} into {}", fqn, parent);
    }

    // ========================================================================
    // Edge gestures
    // ========================================================================

    /// Draw an inheritance edge `from → to` by editing the source of `from`.
    ///
    /// `Ok(None)` when the gesture does nothing: either endpoint is not a
    /// resolvable class, the classes are already related, or the user
    /// declined. Returns the existing edge if an equal one is already shown.
    pub fn create_edge(
        &self,
        from: &DiagramNode,
        to: &DiagramNode,
    ) -> Result<Option<EdgeRef>, UmlError> {
        let Some((source, target)) = self.resolve_endpoints(from, to) else {
            return Ok(None);
        };
        let supers = {
            let scope = self.state.lock().config.scope;
            ClassResolver::new(self.host.symbols.as_ref(), scope).resolved_supers(&source)
        };

        let planned = match plan_create_edge(&source, &target, &supers) {
            EditPlan::Proceed(planned) => planned,
            EditPlan::Skip(reason) => {
                tracing::debug!(
                    "[UML_EDIT] create edge {} -> {} skipped: {:?}",
                    source.fqn,
                    target.fqn,
                    reason
                );
                return Ok(None);
            }
            EditPlan::Reject(rejection) => {
                self.host
                    .prompter
                    .show_error(rejection.title(), rejection.message());
                return Ok(None);
            }
        };
        if !self.confirm_and_execute(&planned)? {
            return Ok(None);
        }

        let Some(relationship) = planned.relationship else {
            return Ok(None);
        };
        let edge = {
            let mut state = self.state.lock();
            let source_node = state
                .snapshot
                .insert_node(DiagramNode::Class(SymbolRef::of(&source)));
            let target_node = state
                .snapshot
                .insert_node(DiagramNode::Class(SymbolRef::of(&target)));
            state.snapshot.ensure_edge(&source_node, &target_node, relationship)
        };
        self.host.request_update();
        Ok(Some(edge))
    }

    /// Delete an inheritance edge by editing the source of its source class.
    pub fn remove_edge(&self, edge: &DiagramEdge) -> Result<EdgeRemoval, UmlError> {
        let Some((source, target)) = self.resolve_endpoints(edge.source(), edge.target()) else {
            return Ok(EdgeRemoval::Skipped);
        };

        let planned = match plan_remove_edge(&source, &target, edge.relationship()) {
            EditPlan::Proceed(planned) => planned,
            EditPlan::Skip(reason) => {
                tracing::debug!(
                    "[UML_EDIT] remove edge {} -> {} skipped: {:?}",
                    source.fqn,
                    target.fqn,
                    reason
                );
                return Ok(EdgeRemoval::Skipped);
            }
            EditPlan::Reject(rejection) => {
                self.host
                    .prompter
                    .show_error(rejection.title(), rejection.message());
                return Ok(EdgeRemoval::Rejected);
            }
        };
        if !self.confirm_and_execute(&planned)? {
            return Ok(EdgeRemoval::Declined);
        }

        self.state.lock().snapshot.remove_edge(edge);
        self.host.request_update();
        Ok(EdgeRemoval::Removed)
    }

    /// Both endpoints as live classes, or `None` if either is not a class
    /// node or no longer resolves.
    fn resolve_endpoints(
        &self,
        from: &DiagramNode,
        to: &DiagramNode,
    ) -> Option<(Arc<ClassSymbol>, Arc<ClassSymbol>)> {
        let (Some(DiagramElement::Class(from)), Some(DiagramElement::Class(to))) =
            (from.identifying_element(), to.identifying_element())
        else {
            return None;
        };
        let scope = self.state.lock().config.scope;
        let mut resolver = ClassResolver::new(self.host.symbols.as_ref(), scope);
        Some((resolver.resolve(&from)?, resolver.resolve(&to)?))
    }

    /// Ask for confirmation if the plan needs it, then run the command.
    /// Returns false if the user declined.
    fn confirm_and_execute(&self, planned: &PlannedEdit) -> Result<bool, UmlError> {
        if let Some(confirmation) = &planned.confirmation {
            if !self
                .host
                .prompter
                .confirm(confirmation.title, &confirmation.message)
            {
                tracing::debug!("[UML_EDIT] '{}' declined", planned.command.name);
                return Ok(false);
            }
        }
        self.host.refactoring.execute(&planned.command)?;
        tracing::info!(
            "[UML_EDIT] executed '{}' on {}",
            planned.command.name,
            planned.command.file
        );
        Ok(true)
    }
}
