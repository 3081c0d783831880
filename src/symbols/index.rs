//! Package-level adapter over the host index.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use super::resolver::ClassResolver;
use super::space::SymbolSpace;
use super::types::{ClassSymbol, EntryKind, SearchScope, SymbolRef};
use crate::base::{Fqn, qualified_name};

/// Package queries within one search scope.
///
/// Read-only; every call goes to the host, so repeated calls may observe
/// different index states.
#[derive(Clone, Copy)]
pub struct PackageIndex<'a> {
    space: &'a dyn SymbolSpace,
    scope: SearchScope,
}

impl<'a> PackageIndex<'a> {
    pub fn new(space: &'a dyn SymbolSpace, scope: SearchScope) -> Self {
        Self { space, scope }
    }

    /// FQNs of the direct subpackages of `package`.
    pub fn subpackages(&self, package: &str) -> IndexSet<Fqn> {
        self.space
            .package_entries(package, self.scope)
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Package)
            .map(|entry| qualified_name(package, &entry.name))
            .collect()
    }

    /// Handles for the classes and interfaces directly in `package` that
    /// currently resolve, collapsed by FQN.
    pub fn member_symbols(
        &self,
        package: &str,
        resolver: &mut ClassResolver<'_>,
    ) -> IndexSet<SymbolRef> {
        self.member_classes(package, resolver)
            .iter()
            .map(|class| SymbolRef::of(class))
            .collect()
    }

    /// The live classes and interfaces directly in `package`.
    pub fn member_classes(
        &self,
        package: &str,
        resolver: &mut ClassResolver<'_>,
    ) -> Vec<Arc<ClassSymbol>> {
        let mut members: IndexMap<Fqn, Arc<ClassSymbol>> = IndexMap::new();
        for entry in self.space.package_entries(package, self.scope) {
            if !matches!(entry.kind, EntryKind::Class | EntryKind::Interface) {
                continue;
            }
            let fqn = qualified_name(package, &entry.name);
            if let Some(class) = resolver.resolve(&fqn) {
                members.entry(fqn).or_insert(class);
            }
        }
        members.into_values().collect()
    }

    pub fn package_exists(&self, package: &str) -> bool {
        self.space.package_exists(package, self.scope)
    }
}
