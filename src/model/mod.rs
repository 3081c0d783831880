//! The diagram data model.
//!
//! [`UmlDataModel`] owns one diagram's [`SelectionSet`] and the [`Snapshot`]
//! last computed from it. Reconciliation ([`UmlDataModel::update`]) and the
//! gesture handlers in [`crate::edit`] run under one lock per model, so
//! overlapping refreshes serialize.
//!
//! Outbound collaborators (refactoring, prompts, re-render requests) are
//! never called while the lock is held.

mod update;


use std::sync::Arc;

use parking_lot::Mutex;

use crate::base::Fqn;
use crate::config::ModelConfig;
use crate::diagram::{DiagramElement, DiagramNode, EdgeRef, NodeKind, NodeRef, Snapshot};
use crate::edit::{DiagramBuilder, Prompter, Refactoring};
use crate::selection::SelectionSet;
use crate::symbols::{
    ClassResolver, ClassSymbol, PackageIndex, ScopeFilter, SymbolRef, SymbolSpace, UsageAnalyzer,
};

/// The host services a model talks to.
#[derive(Clone)]
pub struct DiagramHost {
    pub symbols: Arc<dyn SymbolSpace>,
    pub usages: Option<Arc<dyn UsageAnalyzer>>,
    pub scope_filter: Option<Arc<dyn ScopeFilter>>,
    pub refactoring: Arc<dyn Refactoring>,
    pub prompter: Arc<dyn Prompter>,
    pub builder: Option<Arc<dyn DiagramBuilder>>,
}

impl DiagramHost {
    pub fn new(
        symbols: Arc<dyn SymbolSpace>,
        refactoring: Arc<dyn Refactoring>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            symbols,
            usages: None,
            scope_filter: None,
            refactoring,
            prompter,
            builder: None,
        }
    }

    pub fn with_usages(mut self, usages: Arc<dyn UsageAnalyzer>) -> Self {
        self.usages = Some(usages);
        self
    }

    pub fn with_scope_filter(mut self, filter: Arc<dyn ScopeFilter>) -> Self {
        self.scope_filter = Some(filter);
        self
    }

    pub fn with_builder(mut self, builder: Arc<dyn DiagramBuilder>) -> Self {
        self.builder = Some(builder);
        self
    }

    pub(crate) fn request_update(&self) {
        if let Some(builder) = &self.builder {
            builder.request_update();
        }
    }
}

/// Mutable state of one model, guarded by its lock.
#[derive(Debug, Default)]
pub(crate) struct ModelState {
    pub(crate) selection: SelectionSet,
    pub(crate) snapshot: Snapshot,
    pub(crate) config: ModelConfig,
    /// Symbol-space modification count seen by the last reconciliation.
    pub(crate) reconciled_at: Option<u64>,
}

impl ModelState {
    /// Whether `class` may get a node: it must pass the scope filter and
    /// must not sit in a package shown as a collapsed node. The seed class
    /// is exempt from the package rule.
    pub(crate) fn is_allowed_to_show(&self, host: &DiagramHost, class: &ClassSymbol) -> bool {
        if !class.valid {
            return false;
        }
        if let Some(filter) = &host.scope_filter {
            if !filter.contains(class) {
                return false;
            }
        }
        self.selection.is_seed_class(&class.fqn)
            || !self.selection.is_inside_included_package(&class.fqn)
    }
}

/// A live UML class diagram over a symbol space.
pub struct UmlDataModel {
    pub(crate) host: DiagramHost,
    pub(crate) state: Mutex<ModelState>,
}

impl UmlDataModel {
    /// A model with an empty selection.
    pub fn new(host: DiagramHost, config: ModelConfig) -> Self {
        Self::with_selection(host, config, SelectionSet::new())
    }

    /// A model seeded from a class and all of its ancestors. `None` if the
    /// class does not resolve.
    pub fn for_class(host: DiagramHost, config: ModelConfig, fqn: &str) -> Option<Self> {
        let mut resolver = ClassResolver::new(host.symbols.as_ref(), config.scope);
        let class = resolver.resolve(fqn)?;
        let selection = SelectionSet::from_class(&class, &mut resolver);
        Some(Self::with_selection(host, config, selection))
    }

    /// A model seeded from a package: its subpackages and member classes.
    pub fn for_package(host: DiagramHost, config: ModelConfig, package: &str) -> Self {
        let space = host.symbols.as_ref();
        let index = PackageIndex::new(space, config.scope);
        let mut resolver = ClassResolver::new(space, config.scope);
        let selection = SelectionSet::from_package(package, &index, &mut resolver);
        Self::with_selection(host, config, selection)
    }

    pub fn with_selection(host: DiagramHost, config: ModelConfig, selection: SelectionSet) -> Self {
        Self {
            host,
            state: Mutex::new(ModelState {
                selection,
                config,
                ..ModelState::default()
            }),
        }
    }

    pub fn host(&self) -> &DiagramHost {
        &self.host
    }

    // ── Query ───────────────────────────────────────────────────────

    pub fn nodes(&self) -> Vec<NodeRef> {
        self.state.lock().snapshot.nodes().cloned().collect()
    }

    /// Structural edges, plus dependency edges when dependencies are shown.
    pub fn edges(&self) -> Vec<EdgeRef> {
        let state = self.state.lock();
        let mut edges: Vec<EdgeRef> = state.snapshot.edges().cloned().collect();
        if state.config.show_dependencies {
            edges.extend(state.snapshot.dependency_edges().cloned());
        }
        edges
    }

    pub fn structural_edges(&self) -> Vec<EdgeRef> {
        self.state.lock().snapshot.edges().cloned().collect()
    }

    pub fn dependency_edges(&self) -> Vec<EdgeRef> {
        self.state.lock().snapshot.dependency_edges().cloned().collect()
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot.clone()
    }

    /// A copy of the current selection.
    pub fn selection(&self) -> SelectionSet {
        self.state.lock().selection.clone()
    }

    pub fn config(&self) -> ModelConfig {
        self.state.lock().config.clone()
    }

    /// `Class <fqn>`, `Package <fqn>`, or empty for detached notes.
    pub fn node_name(&self, node: &DiagramNode) -> String {
        node.name()
    }

    pub fn find_node(&self, element: &DiagramElement) -> Option<NodeRef> {
        self.state.lock().snapshot.find_node(element).cloned()
    }

    pub fn find_class_node(&self, fqn: &str) -> Option<NodeRef> {
        self.find_node(&DiagramElement::class(fqn))
    }

    pub fn find_package_node(&self, package: &str) -> Option<NodeRef> {
        self.find_node(&DiagramElement::package(package))
    }

    pub fn has_element(&self, element: &DiagramElement) -> bool {
        self.find_node(element).is_some()
    }

    /// FQNs of the class nodes currently shown.
    pub fn all_class_fqns(&self) -> Vec<Fqn> {
        self.node_fqns(NodeKind::Class)
    }

    /// FQNs of the package nodes currently shown.
    pub fn all_package_fqns(&self) -> Vec<Fqn> {
        self.node_fqns(NodeKind::Package)
    }

    fn node_fqns(&self, kind: NodeKind) -> Vec<Fqn> {
        self.state
            .lock()
            .snapshot
            .nodes()
            .filter_map(|node| node.identifying_element())
            .filter(|element| element.kind() == kind)
            .map(|element| element.fqn().clone())
            .collect()
    }

    /// The seed class, if the diagram was opened on one that still resolves.
    pub fn initial_element(&self) -> Option<Arc<ClassSymbol>> {
        let (seed, scope) = {
            let state = self.state.lock();
            (state.selection.initial_class().cloned(), state.config.scope)
        };
        let mut resolver = ClassResolver::new(self.host.symbols.as_ref(), scope);
        seed.and_then(|symbol: SymbolRef| symbol.resolve(&mut resolver))
    }

    /// The seed package, if the diagram was opened on one.
    pub fn initial_package(&self) -> Option<Fqn> {
        self.state.lock().selection.initial_package().cloned()
    }

    /// Whether any shown node refers to something that no longer resolves:
    /// a missing or stale class, or a package that no longer exists.
    pub fn has_invalid_nodes(&self) -> bool {
        let state = self.state.lock();
        let space = self.host.symbols.as_ref();
        let index = PackageIndex::new(space, state.config.scope);
        let mut resolver = ClassResolver::new(space, state.config.scope);
        state
            .snapshot
            .nodes()
            .filter_map(|node| node.identifying_element())
            .any(|element| match element {
                DiagramElement::Class(fqn) => resolver.resolve(&fqn).is_none(),
                DiagramElement::Package(package) => !index.package_exists(&package),
            })
    }

    /// Whether the symbol space changed since the last reconciliation.
    pub fn is_stale(&self) -> bool {
        let reconciled_at = self.state.lock().reconciled_at;
        reconciled_at != Some(self.host.symbols.modification_count())
    }

    /// Dependency edges are supported by every model.
    pub fn is_dependency_diagram_supported(&self) -> bool {
        true
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Toggle dependency edges. Takes effect on the next update.
    pub fn set_show_dependencies(&self, show: bool) {
        self.state.lock().config.show_dependencies = show;
    }
}

impl std::fmt::Debug for UmlDataModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("UmlDataModel")
            .field("nodes", &state.snapshot.node_count())
            .field("edges", &state.snapshot.edge_count())
            .field("dependency_edges", &state.snapshot.dependency_edge_count())
            .finish()
    }
}
