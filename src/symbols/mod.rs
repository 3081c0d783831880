//! Symbols: handles into the external symbol space and the queries made on it.
//!
//! The host IDE owns indexing and symbol resolution. This module defines the
//! narrow surface the diagram model consumes:
//!
//! - [`SymbolSpace`] - resolution-by-name and package index queries
//! - [`UsageAnalyzer`] - "used classes" extraction for dependency edges
//! - [`ScopeFilter`] - the optional diagram scope manager
//! - [`ClassSymbol`] - a resolved class or interface
//! - [`SymbolRef`] - a stable FQN key with lazy re-resolution
//! - [`PackageIndex`] - the package-level adapter (subpackages, members, existence)
//! - [`ClassResolver`] - per-pass resolution cache plus ancestor walks
//!
//! Symbols may become invalid at any time as source is edited. Nothing in this
//! crate holds a resolved [`ClassSymbol`] across reconciliation passes; only
//! FQN keys are stored.

mod index;
mod resolver;
mod space;
mod types;


pub use index::PackageIndex;
pub use resolver::ClassResolver;
pub use space::{ScopeFilter, SymbolSpace, UsageAnalyzer};
pub use types::{ClassKind, ClassSymbol, EntryKind, Origin, PackageEntry, SearchScope, SymbolRef};
