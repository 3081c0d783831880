//! Inbound query traits implemented by the host.

use super::types::{ClassSymbol, PackageEntry, SearchScope};
use crate::base::{Fqn, RelationshipKind};

/// Read-only access to the host's symbol index and resolver.
///
/// Results may be stale if the host is concurrently re-indexing; callers
/// re-validate what they get back.
pub trait SymbolSpace: Send + Sync {
    /// Resolve a class or interface by FQN within `scope`.
    fn find_class(&self, fqn: &str, scope: SearchScope) -> Option<ClassSymbol>;

    /// Direct children (subpackages, classes, interfaces) of `package`.
    /// The top-level package is `""`.
    fn package_entries(&self, package: &str, scope: SearchScope) -> Vec<PackageEntry>;

    /// Whether `package` currently exists within `scope`.
    fn package_exists(&self, package: &str, scope: SearchScope) -> bool;

    /// Monotonic counter bumped on every change to the symbol space.
    fn modification_count(&self) -> u64 {
        0
    }
}

/// Extracts the classes a class uses, classified by relationship.
pub trait UsageAnalyzer: Send + Sync {
    fn used_classes(&self, class: &ClassSymbol) -> Vec<(Fqn, RelationshipKind)>;
}

/// The diagram's scope manager: restricts which classes may be shown.
pub trait ScopeFilter: Send + Sync {
    fn contains(&self, class: &ClassSymbol) -> bool;
}
