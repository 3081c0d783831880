//! Reconciliation: rebuild the snapshot from the selection and the live
//! symbol space, keeping the handles of everything that survives.

use super::{ModelState, UmlDataModel};
use crate::classify::RelationshipClassifier;
use crate::diagram::DiagramNode;
use crate::symbols::{ClassResolver, PackageIndex, SymbolRef};

impl UmlDataModel {
    /// Recompute nodes and edges.
    ///
    /// Nodes and edges equal to ones from the previous pass keep their
    /// previous `Arc`, so calling this twice without source changes yields
    /// pointer-identical snapshots.
    pub fn update(&self) {
        let mut state = self.state.lock();
        self.reconcile(&mut state);
    }

    /// Force a full recomputation. Same as [`update`](Self::update).
    pub fn refresh(&self) {
        self.update();
    }

    /// Reconcile only if the symbol space changed since the last pass.
    /// Returns whether a pass ran.
    pub fn update_if_stale(&self) -> bool {
        let mut state = self.state.lock();
        if state.reconciled_at == Some(self.host.symbols.modification_count()) {
            return false;
        }
        self.reconcile(&mut state);
        true
    }

    fn reconcile(&self, state: &mut ModelState) {
        let space = self.host.symbols.as_ref();
        let scope = state.config.scope;
        let index = PackageIndex::new(space, scope);
        let mut resolver = ClassResolver::new(space, scope);
        let modification_count = space.modification_count();

        let backup = state.snapshot.take();
        state.selection.sync_packages(&index);
        let classes = state
            .selection
            .resolve_effective_classes(&index, &mut resolver);

        let packages: Vec<_> = state
            .selection
            .included_packages()
            .filter(|package| index.package_exists(package))
            .cloned()
            .collect();
        for package in packages {
            state.snapshot.insert_node(DiagramNode::Package(package));
        }
        for class in &classes {
            if state.is_allowed_to_show(&self.host, class) {
                state.snapshot.insert_node(DiagramNode::Class(SymbolRef::of(class)));
            }
        }
        // Edges are built over the merged nodes so they share their handles.
        state.snapshot.merge_nodes(&backup);

        let (structural, dependencies) = {
            let mut classifier = RelationshipClassifier::new(&state.snapshot, &mut resolver);
            let structural = classifier.structural_edges(&classes);
            let dependencies = match (&self.host.usages, state.config.show_dependencies) {
                (Some(analyzer), true) => classifier.dependency_edges(
                    &classes,
                    analyzer.as_ref(),
                    &state.config.dependency_options,
                ),
                _ => Vec::new(),
            };
            (structural, dependencies)
        };
        for edge in structural {
            state
                .snapshot
                .add_edge(&edge.source, &edge.target, edge.relationship);
        }
        for edge in dependencies {
            state
                .snapshot
                .add_dependency_edge(&edge.source, &edge.target, edge.relationship);
        }
        state.snapshot.merge_edges(&backup);
        state.reconciled_at = Some(modification_count);

        tracing::debug!(
            "[UML_UPDATE] {} classes resolved, {} nodes, {} edges, {} dependency edges",
            classes.len(),
            state.snapshot.node_count(),
            state.snapshot.edge_count(),
            state.snapshot.dependency_edge_count()
        );
    }
}
