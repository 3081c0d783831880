//! Domain constants shared across the crate.

/// FQN of the universal base object every class implicitly extends.
pub const OBJECT_CLASS: &str = "Object";

/// Separator between package segments in a fully-qualified name.
pub const PACKAGE_SEPARATOR: char = '.';

/// Label prefix for class nodes (see `UmlDataModel::node_name`).
pub const CLASS_LABEL: &str = "Class";

/// Label prefix for package nodes.
pub const PACKAGE_LABEL: &str = "Package";

/// Returns true if `fqn` names the universal base object.
pub fn is_object_class(fqn: &str) -> bool {
    fqn == OBJECT_CLASS
}
