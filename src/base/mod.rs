//! Foundation types for the flexuml data model.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Fqn`] - Fully-qualified names and dotted-name helpers
//! - [`RelationshipKind`], [`DependencyKind`] - Diagram relationship types
//! - Domain constants (universal base class, separators)
//!
//! This module has NO dependencies on other flexuml modules.

pub mod constants;
mod fqn;
mod relationship;

pub use fqn::{Fqn, is_nested_in, needs_import, package_name, qualified_name, short_name};
pub use relationship::{DependencyKind, RelationshipKind};
