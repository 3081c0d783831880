//! Reconciliation tests: what a refresh shows, and that it keeps handles.

use std::sync::Arc;

use flexuml::workspace::{ClassDecl, InMemoryWorkspace};
use flexuml::{DiagramElement, RelationshipKind};

use crate::helpers::diagram_assertions::*;
use crate::helpers::workspace_fixtures::*;

// =============================================================================
// SNAPSHOT CONTENT
// =============================================================================

#[test]
fn test_acme_package_snapshot() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;

    assert_classes(model, &["com.acme.A", "com.acme.B", "com.acme.C", "com.acme.I"]);
    assert_eq!(
        edge_triples(model),
        [
            triple("com.acme.B", "com.acme.A", RelationshipKind::Generalization),
            triple("com.acme.C", "com.acme.B", RelationshipKind::Generalization),
            triple("com.acme.C", "com.acme.I", RelationshipKind::Realization),
        ]
    );
}

#[test]
fn test_class_seed_shows_ancestor_chain() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("com.acme.A"),
        ClassDecl::class("com.acme.B").extends("com.acme.A"),
        ClassDecl::class("com.acme.C").extends("com.acme.B"),
        ClassDecl::class("com.acme.Unrelated"),
    ]));
    let fixture = class_fixture(workspace, "com.acme.C");
    assert_classes(&fixture.model, &["com.acme.A", "com.acme.B", "com.acme.C"]);
}

#[test]
fn test_cyclic_hierarchy_reconciles() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("cyc.P").extends("cyc.Q"),
        ClassDecl::class("cyc.Q").extends("cyc.P"),
        ClassDecl::class("cyc.Own").extends("cyc.Own"),
        ClassDecl::interface("cyc.J").extends("cyc.K"),
        ClassDecl::interface("cyc.K").extends("cyc.J"),
        ClassDecl::class("cyc.Impl").implements("cyc.J"),
    ]));
    let fixture = package_fixture(workspace, "cyc");
    let triples = edge_triples(&fixture.model);

    assert!(triples.contains(&triple("cyc.P", "cyc.Q", RelationshipKind::Generalization)));
    assert!(triples.contains(&triple("cyc.Q", "cyc.P", RelationshipKind::Generalization)));
    assert!(triples.contains(&triple("cyc.Impl", "cyc.J", RelationshipKind::Realization)));
    assert!(triples.iter().all(|(source, target, _)| source != target));
}

#[test]
fn test_invalid_symbols_drop_out() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    fixture.workspace.invalidate("com.acme.B");
    fixture.model.update();

    assert_classes(&fixture.model, &["com.acme.A", "com.acme.C", "com.acme.I"]);
    assert_eq!(
        edge_triples(&fixture.model),
        [
            triple("com.acme.C", "com.acme.I", RelationshipKind::Realization),
        ]
    );
}

#[test]
fn test_renamed_seed_package_adopts_subpackages() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("com.acme.A"),
        ClassDecl::class("com.acme.ui.Button"),
    ]));
    let fixture = package_fixture(workspace, "com.acme");
    assert_eq!(fixture.model.all_package_fqns(), ["com.acme.ui"]);

    fixture.workspace.remove_class("com.acme.A");
    fixture
        .workspace
        .add_class(ClassDecl::class("com.acme.net.Socket"));
    fixture.model.update();

    let mut packages = fixture.model.all_package_fqns();
    packages.sort();
    assert_eq!(packages, ["com.acme.net", "com.acme.ui"]);
    assert_classes(&fixture.model, &[]);
}

// =============================================================================
// IDENTITY
// =============================================================================

#[test]
fn test_update_is_idempotent_by_identity() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;
    let nodes = model.nodes();
    let edges = model.edges();

    model.update();
    model.refresh();

    let nodes_after = model.nodes();
    let edges_after = model.edges();
    assert_eq!(nodes.len(), nodes_after.len());
    assert_eq!(edges.len(), edges_after.len());
    for (before, after) in nodes.iter().zip(&nodes_after) {
        assert!(Arc::ptr_eq(before, after), "node {} was rebuilt", before.name());
    }
    for (before, after) in edges.iter().zip(&edges_after) {
        assert!(Arc::ptr_eq(before, after));
    }
}

#[test]
fn test_surviving_nodes_keep_identity_across_source_edits() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let a = fixture.model.find_class_node("com.acme.A").unwrap();

    fixture
        .workspace
        .add_class(ClassDecl::class("com.acme.D").extends("com.acme.A"));
    fixture.model.update();

    let a_after = fixture.model.find_class_node("com.acme.A").unwrap();
    assert!(Arc::ptr_eq(&a, &a_after));
    assert!(
        fixture
            .model
            .has_element(&DiagramElement::class("com.acme.D"))
    );
}

#[test]
fn test_new_edges_point_at_preserved_nodes() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let a = fixture.model.find_class_node("com.acme.A").unwrap();

    fixture
        .workspace
        .add_class(ClassDecl::class("com.acme.D").extends("com.acme.A"));
    fixture.model.update();

    let edge = fixture
        .model
        .structural_edges()
        .into_iter()
        .find(|edge| edge.source().fqn().as_deref() == Some("com.acme.D"))
        .unwrap();
    assert!(Arc::ptr_eq(edge.target(), &a));
}
