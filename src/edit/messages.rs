//! User-visible titles, prompts, and command names.

use crate::base::{DependencyKind, RelationshipKind};

pub const CREATE_EDGE_TITLE: &str = "Create Relationship";
pub const REMOVE_EDGE_TITLE: &str = "Remove Relationship";

pub const REMOVE_RELATIONSHIP_COMMAND: &str = "Remove relationship";

pub const BASE_COMPONENT_NEEDED: &str =
    "An MXML component must have a base component; replace it instead of removing it";

pub const READ_ONLY_SOURCE: &str =
    "Library classes are read-only; relationships can only start from project sources";

pub fn create_extends_command(from: &str, to: &str) -> String {
    format!("Make {from} extend {to}")
}

pub fn create_implements_command(from: &str, to: &str) -> String {
    format!("Make {from} implement {to}")
}

pub fn replace_base_class_prompt(current: &str, replacement: &str) -> String {
    format!("Class already extends {current}. Replace it with {replacement}?")
}

pub fn replace_base_component_prompt(current: &str, replacement: &str) -> String {
    format!("Component is based on {current}. Replace it with {replacement}?")
}

pub fn remove_inheritance_prompt(from: &str, to: &str) -> String {
    format!("Remove inheritance link from {from} to {to}?")
}

/// Prompt text for deleting an edge with the given relationship.
pub fn removal_message(relationship: &RelationshipKind) -> &'static str {
    match relationship.dependency_kind() {
        Some(DependencyKind::Annotation) => "Remove annotation from class",
        _ => "This will remove relationship between classes",
    }
}
