//! Edge gesture tests: source edits behind create/remove edge.

use std::sync::Arc;

use flexuml::edit::messages;
use flexuml::workspace::{ClassDecl, InMemoryWorkspace};
use flexuml::{DiagramElement, EdgeRemoval, RelationshipKind, UmlError};

use crate::helpers::collaborators::{Prompt, ScriptedPrompter};
use crate::helpers::diagram_assertions::*;
use crate::helpers::workspace_fixtures::*;

fn hidden_interface_workspace() -> Arc<InMemoryWorkspace> {
    Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::interface("com.acme.J"),
        ClassDecl::interface("com.acme.hidden.K").extends("com.acme.J"),
        ClassDecl::class("com.acme.D")
            .implements("com.acme.hidden.K")
            .imports("com.acme.hidden.K"),
    ]))
}

fn find_edge(fixture: &Fixture, source: &str, target: &str) -> flexuml::EdgeRef {
    fixture
        .model
        .edges()
        .into_iter()
        .find(|edge| {
            edge.source().fqn().as_deref() == Some(source)
                && edge.target().fqn().as_deref() == Some(target)
        })
        .unwrap_or_else(|| panic!("no edge {} -> {}", source, target))
}

// =============================================================================
// CREATE EDGE
// =============================================================================

#[test]
fn test_create_edge_through_hidden_interface() {
    let fixture = package_fixture(hidden_interface_workspace(), "com.acme");
    let model = &fixture.model;
    // K lives in a collapsed subpackage, so D reaches J through it.
    assert_eq!(
        edge_triples(model),
        [triple("com.acme.D", "com.acme.J", RelationshipKind::Realization)]
    );

    let d = model.find_class_node("com.acme.D").unwrap();
    let j = model.find_class_node("com.acme.J").unwrap();
    let existing = find_edge(&fixture, "com.acme.D", "com.acme.J");

    let edge = model.create_edge(&d, &j).unwrap().expect("edge");
    assert!(Arc::ptr_eq(&edge, &existing));
    assert_eq!(edge.relationship(), &RelationshipKind::Realization);

    let decl = fixture.workspace.class("com.acme.D").unwrap();
    assert_eq!(decl.implements, ["com.acme.hidden.K", "com.acme.J"]);
    assert_eq!(fixture.builder.requests(), 1);
    assert_eq!(
        fixture.workspace.command_names(),
        [messages::create_implements_command("com.acme.D", "com.acme.J")]
    );
}

#[test]
fn test_create_edge_when_already_related_does_nothing() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let model = &fixture.model;
    let c = model.find_class_node("com.acme.C").unwrap();
    let i = model.find_class_node("com.acme.I").unwrap();
    let b = model.find_class_node("com.acme.B").unwrap();

    assert!(model.create_edge(&c, &i).unwrap().is_none());
    assert!(model.create_edge(&c, &b).unwrap().is_none());
    assert!(model.create_edge(&c, &c).unwrap().is_none());
    assert!(fixture.workspace.command_names().is_empty());
    assert_eq!(fixture.builder.requests(), 0);
}

#[test]
fn test_create_edge_from_package_node_does_nothing() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("com.acme.A"),
        ClassDecl::class("com.acme.sub.B"),
    ]));
    let fixture = package_fixture(workspace, "com.acme");
    let sub = fixture.model.find_package_node("com.acme.sub").unwrap();
    let a = fixture.model.find_class_node("com.acme.A").unwrap();
    assert!(fixture.model.create_edge(&sub, &a).unwrap().is_none());
}

#[test]
fn test_create_edge_replaces_base_after_confirmation() {
    let workspace = acme_workspace();
    workspace.add_class(ClassDecl::class("com.acme.E"));
    let fixture = package_fixture(workspace, "com.acme");
    let model = &fixture.model;
    let c = model.find_class_node("com.acme.C").unwrap();
    let e = model.find_class_node("com.acme.E").unwrap();

    let edge = model.create_edge(&c, &e).unwrap().expect("edge");
    assert_eq!(edge.relationship(), &RelationshipKind::Generalization);
    assert_eq!(fixture.prompter.confirmations(), 1);
    assert_eq!(fixture.workspace.class("com.acme.C").unwrap().extends, ["com.acme.E"]);

    model.update();
    let triples = edge_triples(model);
    assert!(triples.contains(&triple("com.acme.C", "com.acme.E", RelationshipKind::Generalization)));
    assert!(!triples.contains(&triple("com.acme.C", "com.acme.B", RelationshipKind::Generalization)));
}

#[test]
fn test_declined_confirmation_changes_nothing() {
    let workspace = acme_workspace();
    workspace.add_class(ClassDecl::class("com.acme.E"));
    let fixture = package_fixture_with(workspace, "com.acme", ScriptedPrompter::answering(false));
    let model = &fixture.model;
    let c = model.find_class_node("com.acme.C").unwrap();
    let e = model.find_class_node("com.acme.E").unwrap();

    assert!(model.create_edge(&c, &e).unwrap().is_none());
    assert_eq!(fixture.workspace.class("com.acme.C").unwrap().extends, ["com.acme.B"]);
    assert!(fixture.workspace.command_names().is_empty());
    assert_eq!(fixture.builder.requests(), 0);
}

#[test]
fn test_refactoring_failure_propagates() {
    let fixture = package_fixture(hidden_interface_workspace(), "com.acme");
    let d = fixture.model.find_class_node("com.acme.D").unwrap();
    let j = fixture.model.find_class_node("com.acme.J").unwrap();
    fixture.workspace.fail_next_command("file is locked");

    let error = fixture.model.create_edge(&d, &j).unwrap_err();
    match error {
        UmlError::Refactoring(failure) => assert_eq!(failure.message, "file is locked"),
        #[allow(unreachable_patterns)]
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(
        fixture.workspace.class("com.acme.D").unwrap().implements,
        ["com.acme.hidden.K"]
    );
    assert_eq!(fixture.builder.requests(), 0);
}

#[test]
fn test_templated_component_base_is_replaced() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("mx.core.Canvas"),
        ClassDecl::class("mx.core.Panel"),
        ClassDecl::class("mx.core.View").extends("mx.core.Canvas").templated(),
    ]));
    let fixture = package_fixture(workspace, "mx.core");
    let view = fixture.model.find_class_node("mx.core.View").unwrap();
    let panel = fixture.model.find_class_node("mx.core.Panel").unwrap();

    assert!(fixture.model.create_edge(&view, &panel).unwrap().is_some());
    assert_eq!(fixture.prompter.confirmations(), 1);
    assert_eq!(
        fixture.workspace.class("mx.core.View").unwrap().extends,
        ["mx.core.Panel"]
    );
}

#[test]
fn test_create_edge_from_library_class_shows_error() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("lib.Widget").library(),
        ClassDecl::interface("lib.IThing"),
    ]));
    let fixture = package_fixture(workspace, "lib");
    let widget = fixture.model.find_class_node("lib.Widget").unwrap();
    let thing = fixture.model.find_class_node("lib.IThing").unwrap();

    assert!(fixture.model.create_edge(&widget, &thing).unwrap().is_none());
    assert_eq!(
        fixture.prompter.prompts(),
        [Prompt::Error {
            title: messages::CREATE_EDGE_TITLE.to_string(),
            message: messages::READ_ONLY_SOURCE.to_string(),
        }]
    );
    assert_eq!(fixture.prompter.errors(), 1);
    assert!(fixture.workspace.command_names().is_empty());
    assert_eq!(fixture.builder.requests(), 0);
}

// =============================================================================
// REMOVE EDGE
// =============================================================================

#[test]
fn test_remove_edge_through_hidden_base_is_skipped() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("com.acme.A"),
        ClassDecl::class("com.acme.hidden.B").extends("com.acme.A"),
        ClassDecl::class("com.acme.C").extends("com.acme.hidden.B"),
    ]));
    let fixture = package_fixture(workspace, "com.acme");
    let edge = find_edge(&fixture, "com.acme.C", "com.acme.A");

    assert_eq!(fixture.model.remove_edge(&edge).unwrap(), EdgeRemoval::Skipped);
    assert_eq!(fixture.prompter.confirmations(), 0);
    assert!(fixture.workspace.command_names().is_empty());
    assert_eq!(
        fixture.workspace.class("com.acme.C").unwrap().extends,
        ["com.acme.hidden.B"]
    );
    assert!(fixture.model.structural_edges().contains(&edge));
}

#[test]
fn test_remove_realization_edge() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let edge = find_edge(&fixture, "com.acme.C", "com.acme.I");

    let outcome = fixture.model.remove_edge(&edge).unwrap();
    assert_eq!(outcome, EdgeRemoval::Removed);
    assert!(fixture.workspace.class("com.acme.C").unwrap().implements.is_empty());
    assert_eq!(fixture.builder.requests(), 1);
    assert_eq!(
        fixture.workspace.command_names(),
        [messages::REMOVE_RELATIONSHIP_COMMAND]
    );

    fixture.model.update();
    assert!(
        !edge_triples(&fixture.model).contains(&triple(
            "com.acme.C",
            "com.acme.I",
            RelationshipKind::Realization
        ))
    );
}

#[test]
fn test_remove_edge_declined() {
    let fixture = package_fixture_with(acme_workspace(), "com.acme", ScriptedPrompter::answering(false));
    let edge = find_edge(&fixture, "com.acme.B", "com.acme.A");

    assert_eq!(fixture.model.remove_edge(&edge).unwrap(), EdgeRemoval::Declined);
    assert_eq!(fixture.workspace.class("com.acme.B").unwrap().extends, ["com.acme.A"]);
    assert!(fixture.model.structural_edges().contains(&edge));
}

#[test]
fn test_remove_base_of_templated_component_is_rejected() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("mx.core.Canvas"),
        ClassDecl::class("mx.core.View").extends("mx.core.Canvas").templated(),
    ]));
    let fixture = package_fixture(workspace, "mx.core");
    let edge = find_edge(&fixture, "mx.core.View", "mx.core.Canvas");

    assert_eq!(fixture.model.remove_edge(&edge).unwrap(), EdgeRemoval::Rejected);
    assert_eq!(
        fixture.prompter.prompts(),
        [Prompt::Error {
            title: messages::REMOVE_EDGE_TITLE.to_string(),
            message: messages::BASE_COMPONENT_NEEDED.to_string(),
        }]
    );
    assert_eq!(
        fixture.workspace.class("mx.core.View").unwrap().extends,
        ["mx.core.Canvas"]
    );
}

#[test]
fn test_remove_edge_from_library_class_is_skipped() {
    let workspace = Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("lib.Base").library(),
        ClassDecl::class("lib.Derived").extends("lib.Base").library(),
    ]));
    let fixture = package_fixture(workspace, "lib");
    let edge = find_edge(&fixture, "lib.Derived", "lib.Base");

    assert_eq!(fixture.model.remove_edge(&edge).unwrap(), EdgeRemoval::Skipped);
    assert_eq!(fixture.prompter.confirmations(), 0);
}

#[test]
fn test_undo_restores_removed_relationship() {
    let fixture = package_fixture(acme_workspace(), "com.acme");
    let edge = find_edge(&fixture, "com.acme.C", "com.acme.I");
    fixture.model.remove_edge(&edge).unwrap();
    fixture.model.update();

    let undone = fixture.workspace.undo("com/acme/C.as");
    assert_eq!(undone.as_deref(), Some(messages::REMOVE_RELATIONSHIP_COMMAND));
    fixture.model.update();
    assert!(
        fixture
            .model
            .has_element(&DiagramElement::class("com.acme.I"))
    );
    assert!(
        edge_triples(&fixture.model).contains(&triple(
            "com.acme.C",
            "com.acme.I",
            RelationshipKind::Realization
        ))
    );
}
