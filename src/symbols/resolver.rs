//! Per-pass class resolution with caching and ancestor walks.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::space::SymbolSpace;
use super::types::{ClassSymbol, SearchScope};
use crate::base::Fqn;

/// Resolution cache: FQN → live symbol (or `None` if missing/invalid).
type ResolutionCache = FxHashMap<Fqn, Option<Arc<ClassSymbol>>>;

/// Resolves FQNs against a [`SymbolSpace`], caching results.
///
/// A resolver is meant to live for one reconciliation pass or one gesture;
/// the cache is never invalidated, so a long-lived resolver would serve
/// stale symbols.
pub struct ClassResolver<'a> {
    space: &'a dyn SymbolSpace,
    scope: SearchScope,
    cache: ResolutionCache,
}

impl<'a> ClassResolver<'a> {
    pub fn new(space: &'a dyn SymbolSpace, scope: SearchScope) -> Self {
        Self {
            space,
            scope,
            cache: ResolutionCache::default(),
        }
    }

    /// Resolve `fqn` to a live, valid symbol.
    pub fn resolve(&mut self, fqn: &str) -> Option<Arc<ClassSymbol>> {
        if let Some(cached) = self.cache.get(fqn) {
            return cached.clone();
        }
        let resolved = self
            .space
            .find_class(fqn, self.scope)
            .filter(|symbol| symbol.valid)
            .map(Arc::new);
        self.cache.insert(Fqn::new(fqn), resolved.clone());
        resolved
    }

    /// Declared supertypes that currently resolve, in declaration order.
    pub fn resolved_supers(&mut self, class: &ClassSymbol) -> Vec<Arc<ClassSymbol>> {
        class
            .super_classes
            .iter()
            .filter_map(|fqn| self.resolve(fqn))
            .collect()
    }

    /// The primary base of `class`, unless it is `class` itself or was
    /// already visited. Visited bases are recorded in `processed`.
    pub fn super_class(
        &mut self,
        class: &ClassSymbol,
        processed: &mut FxHashSet<Fqn>,
    ) -> Option<Arc<ClassSymbol>> {
        let base = self.resolved_supers(class).into_iter().next()?;
        if base.is_equivalent_to(class) || processed.contains(&base.fqn) {
            return None;
        }
        processed.insert(base.fqn.clone());
        Some(base)
    }

    /// Every resolvable ancestor of `class`: superclasses and interfaces,
    /// transitively, excluding `class` itself.
    pub fn all_parents(&mut self, class: &ClassSymbol) -> Vec<Arc<ClassSymbol>> {
        let mut visited = FxHashSet::default();
        visited.insert(class.fqn.clone());
        let mut pending: Vec<Fqn> = class
            .super_classes
            .iter()
            .chain(&class.interfaces)
            .cloned()
            .collect();
        let mut parents = Vec::new();

        while let Some(fqn) = pending.pop() {
            if !visited.insert(fqn.clone()) {
                continue;
            }
            let Some(parent) = self.resolve(&fqn) else {
                continue;
            };
            pending.extend(parent.super_classes.iter().chain(&parent.interfaces).cloned());
            parents.push(parent);
        }
        parents
    }
}
