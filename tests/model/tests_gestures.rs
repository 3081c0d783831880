//! Membership gesture tests: add, remove, expand, collapse.

use std::sync::Arc;

use flexuml::diagram::DiagramNode;
use flexuml::workspace::{ClassDecl, InMemoryWorkspace};
use flexuml::{DiagramElement, RelationshipKind};

use crate::helpers::diagram_assertions::*;
use crate::helpers::workspace_fixtures::*;

fn nested_workspace() -> Arc<InMemoryWorkspace> {
    Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("com.acme.A"),
        ClassDecl::class("com.acme.C").extends("com.acme.A"),
        ClassDecl::class("com.acme.util.Helper"),
        ClassDecl::class("com.acme.util.io.Reader"),
        ClassDecl::class("org.other.X"),
    ]))
}

// =============================================================================
// ADD / REMOVE
// =============================================================================

#[test]
fn test_remove_class_is_not_resurrected() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;

    model.remove_element(&DiagramElement::class("com.acme.B"));
    assert_classes(model, &["com.acme.A", "com.acme.C", "com.acme.I"]);
    assert_eq!(
        edge_triples(model),
        [triple("com.acme.C", "com.acme.I", RelationshipKind::Realization)]
    );

    model.update();
    assert_classes(model, &["com.acme.A", "com.acme.C", "com.acme.I"]);
    assert!(model.selection().is_removed("com.acme.B"));
    // C's nearest shown superclass is now A.
    assert!(
        edge_triples(model).contains(&triple(
            "com.acme.C",
            "com.acme.A",
            RelationshipKind::Generalization
        ))
    );
}

#[test]
fn test_remove_node_unwraps_notes() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let target = fixture.model.find_class_node("com.acme.A").unwrap();

    fixture.model.remove_node(&DiagramNode::note(target));
    assert!(fixture.model.find_class_node("com.acme.A").is_none());
    assert!(fixture.model.selection().is_removed("com.acme.A"));
}

#[test]
fn test_remove_unshown_element_only_forgets_addition() {
    let fixture = package_fixture(nested_workspace(), "com.acme");
    let model = &fixture.model;
    let x = DiagramElement::class("org.other.X");
    assert!(model.add_element(&x).is_some());

    fixture.workspace.invalidate("org.other.X");
    model.update();
    assert!(!model.has_element(&x));
    assert!(model.selection().is_added("org.other.X"));

    model.remove_element(&x);
    let selection = model.selection();
    assert!(!selection.is_added("org.other.X"));
    assert!(!selection.is_removed("org.other.X"));
}

#[test]
fn test_add_element_rejects_duplicates_and_unresolvable() {
    let fixture = package_fixture(nested_workspace(), "com.acme");
    let model = &fixture.model;

    assert!(model.add_element(&DiagramElement::class("com.acme.A")).is_none());
    assert!(model.add_element(&DiagramElement::class("com.acme.Missing")).is_none());

    let added = model.add_element(&DiagramElement::class("org.other.X")).unwrap();
    model.update();
    let after = model.find_class_node("org.other.X").unwrap();
    assert!(Arc::ptr_eq(&added, &after));
}

#[test]
fn test_remove_unshown_package_forgets_inclusion() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;
    let later = DiagramElement::package("com.acme.later");

    assert!(model.add_element(&later).is_some());
    model.update();
    assert!(!model.has_element(&later));

    model.remove_element(&later);
    assert!(!model.selection().is_included("com.acme.later"));
    assert!(!model.selection().is_excluded("com.acme.later"));

    fixture
        .workspace
        .add_class(ClassDecl::class("com.acme.later.X"));
    model.update();
    assert!(!model.has_element(&later));
}

#[test]
fn test_removed_class_can_be_added_back() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;
    model.remove_element(&DiagramElement::class("com.acme.B"));
    model.update();

    assert!(model.add_element(&DiagramElement::class("com.acme.B")).is_some());
    model.update();
    assert!(model.find_class_node("com.acme.B").is_some());
    assert!(!model.selection().is_removed("com.acme.B"));
}

#[test]
fn test_remove_package_purges_its_classes() {
    let fixture = package_fixture(nested_workspace(), "com.acme");
    let model = &fixture.model;
    model.expand_package("com.acme.util");
    model.update();
    assert!(model.find_class_node("com.acme.util.Helper").is_some());

    model.add_element(&DiagramElement::package("com.acme.util"));
    model.remove_element(&DiagramElement::package("com.acme.util"));
    assert!(!model.selection().is_added("com.acme.util.Helper"));
    assert!(model.selection().is_excluded("com.acme.util"));
}

#[test]
fn test_remove_all_elements() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;
    model.remove_all_elements();
    assert!(model.nodes().is_empty());
    assert!(model.edges().is_empty());

    let selection = model.selection();
    assert_eq!(selection.added_classes().count(), 0);
    assert_eq!(selection.removed_classes().count(), 4);
}

// =============================================================================
// EXPAND / COLLAPSE
// =============================================================================

#[test]
fn test_expand_package_node() {
    let fixture = package_fixture(nested_workspace(), "com.acme");
    let model = &fixture.model;
    let util = model.find_package_node("com.acme.util").unwrap();

    model.expand_node(&util);
    model.update();

    assert!(model.find_package_node("com.acme.util").is_none());
    assert!(model.find_class_node("com.acme.util.Helper").is_some());
    assert!(model.find_package_node("com.acme.util.io").is_some());
    assert!(model.selection().is_excluded("com.acme.util"));
}

#[test]
fn test_expand_ignores_class_nodes() {
    let fixture = package_fixture(nested_workspace(), "com.acme");
    let before = fixture.model.selection().excluded_packages().count();
    let a = fixture.model.find_class_node("com.acme.A").unwrap();
    fixture.model.expand_node(&a);
    assert_eq!(fixture.model.selection().excluded_packages().count(), before);
}

#[test]
fn test_collapse_class_into_parent_package() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;
    let acme = DiagramElement::package("com.acme");
    assert!(model.add_element(&acme).is_some());
    model.remove_element(&acme);
    assert!(model.selection().is_excluded("com.acme"));

    let c = model.find_class_node("com.acme.C").unwrap();
    model.collapse_node(&c);
    let selection = model.selection();
    assert!(selection.is_included("com.acme"));
    assert!(!selection.is_excluded("com.acme"));
    assert_eq!(selection.added_classes().count(), 0);

    model.update();
    assert_classes(model, &[]);
    assert_eq!(model.all_package_fqns(), ["com.acme"]);
}

#[test]
fn test_collapse_drops_nested_packages() {
    let fixture = package_fixture(nested_workspace(), "com.acme");
    let model = &fixture.model;
    model.expand_package("com.acme.util");
    model.update();

    let io = model.find_package_node("com.acme.util.io").unwrap();
    model.collapse_node(&io);
    model.update();

    let selection = model.selection();
    assert!(selection.is_included("com.acme.util"));
    assert!(!selection.is_included("com.acme.util.io"));
    assert!(!selection.is_added("com.acme.util.Helper"));
    assert!(model.find_package_node("com.acme.util").is_some());
}

#[test]
fn test_collapse_top_level_is_noop() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_class(ClassDecl::class("Main")));
    let fixture = class_fixture(workspace, "Main");
    let main = fixture.model.find_class_node("Main").unwrap();

    fixture.model.collapse_node(&main);
    assert_eq!(fixture.model.selection().included_packages().count(), 0);
    assert!(fixture.model.selection().is_added("Main"));
}
