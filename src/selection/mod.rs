//! Selection Set: the user-curated membership of a diagram.
//!
//! Four collections decide what a diagram shows, independent of what the
//! live index currently contains:
//!
//! - `added_classes` / `removed_classes` - classes the user explicitly added
//!   or removed, keyed by FQN
//! - `included_packages` / `excluded_packages` - packages shown as collapsed
//!   nodes, or explicitly expanded/removed
//!
//! A key never sits in both halves of a pair. This is the only persistent
//! state of a diagram; everything else is recomputed on refresh.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::base::{Fqn, is_nested_in, package_name};
use crate::symbols::{ClassResolver, ClassSymbol, PackageIndex, SymbolRef};


type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// The element a diagram was opened on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Seed {
    #[default]
    None,
    Class(SymbolRef),
    Package(Fqn),
}

/// User-curated diagram membership.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    seed: Seed,
    added_classes: FxIndexMap<Fqn, SymbolRef>,
    removed_classes: FxIndexMap<Fqn, SymbolRef>,
    included_packages: FxIndexSet<Fqn>,
    excluded_packages: FxIndexSet<Fqn>,
}

impl SelectionSet {
    /// An empty selection with no seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a class: the class and all of its ancestors.
    pub fn from_class(class: &ClassSymbol, resolver: &mut ClassResolver<'_>) -> Self {
        let mut selection = Self {
            seed: Seed::Class(SymbolRef::of(class)),
            ..Self::default()
        };
        selection.add_class(&SymbolRef::of(class));
        for parent in resolver.all_parents(class) {
            selection.add_class(&SymbolRef::of(&parent));
        }
        selection
    }

    /// Seed from a package: its direct subpackages (collapsed) and its
    /// member classes.
    pub fn from_package(
        package: &str,
        index: &PackageIndex<'_>,
        resolver: &mut ClassResolver<'_>,
    ) -> Self {
        let mut selection = Self {
            seed: Seed::Package(Fqn::new(package)),
            ..Self::default()
        };
        for subpackage in index.subpackages(package) {
            selection.include_package(subpackage);
        }
        for member in index.member_symbols(package, resolver) {
            selection.add_class(&member);
        }
        selection
    }

    // ── Query ───────────────────────────────────────────────────────

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// The seed package, if the diagram was opened on one.
    pub fn initial_package(&self) -> Option<&Fqn> {
        match &self.seed {
            Seed::Package(package) => Some(package),
            _ => None,
        }
    }

    /// The seed class handle, if the diagram was opened on one.
    pub fn initial_class(&self) -> Option<&SymbolRef> {
        match &self.seed {
            Seed::Class(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_seed_class(&self, fqn: &str) -> bool {
        self.initial_class().is_some_and(|seed| seed.fqn() == fqn)
    }

    pub fn added_classes(&self) -> impl Iterator<Item = &SymbolRef> {
        self.added_classes.values()
    }

    pub fn removed_classes(&self) -> impl Iterator<Item = &SymbolRef> {
        self.removed_classes.values()
    }

    pub fn included_packages(&self) -> impl Iterator<Item = &Fqn> {
        self.included_packages.iter()
    }

    pub fn excluded_packages(&self) -> impl Iterator<Item = &Fqn> {
        self.excluded_packages.iter()
    }

    pub fn is_added(&self, fqn: &str) -> bool {
        self.added_classes.contains_key(fqn)
    }

    pub fn is_removed(&self, fqn: &str) -> bool {
        self.removed_classes.contains_key(fqn)
    }

    pub fn is_included(&self, package: &str) -> bool {
        self.included_packages.contains(package)
    }

    pub fn is_excluded(&self, package: &str) -> bool {
        self.excluded_packages.contains(package)
    }

    /// Whether the class's own package is shown as a collapsed node.
    pub fn is_inside_included_package(&self, fqn: &str) -> bool {
        self.included_packages.contains(package_name(fqn))
    }

    /// No key is both added and removed, or both included and excluded.
    pub fn is_consistent(&self) -> bool {
        self.added_classes
            .keys()
            .all(|fqn| !self.removed_classes.contains_key(fqn))
            && self
                .included_packages
                .iter()
                .all(|package| !self.excluded_packages.contains(package))
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Mark a class as added by the user. Returns false (and changes
    /// nothing) if the handle has no usable FQN.
    pub fn add_class(&mut self, symbol: &SymbolRef) -> bool {
        let fqn = symbol.fqn();
        if fqn.is_empty() {
            return false;
        }
        self.removed_classes.shift_remove(fqn.as_str());
        self.added_classes.insert(fqn.clone(), symbol.clone());
        true
    }

    /// Mark a class as removed by the user.
    pub fn remove_class(&mut self, symbol: &SymbolRef) {
        let fqn = symbol.fqn();
        self.added_classes.shift_remove(fqn.as_str());
        self.removed_classes.insert(fqn.clone(), symbol.clone());
    }

    /// Drop a pending addition without recording a removal.
    pub fn forget_class(&mut self, fqn: &str) {
        self.added_classes.shift_remove(fqn);
    }

    /// Drop a pending inclusion without recording an exclusion.
    pub fn forget_package(&mut self, package: &str) {
        self.included_packages.shift_remove(package);
    }

    pub fn include_package(&mut self, package: impl Into<Fqn>) {
        let package = package.into();
        self.excluded_packages.shift_remove(package.as_str());
        self.included_packages.insert(package);
    }

    pub fn exclude_package(&mut self, package: impl Into<Fqn>) {
        let package = package.into();
        self.included_packages.shift_remove(package.as_str());
        self.excluded_packages.insert(package);
    }

    /// Drop added classes that live directly in `package`.
    pub fn purge_package_classes(&mut self, package: &str) {
        self.added_classes
            .retain(|fqn, _| package_name(fqn) != package);
    }

    /// Drop every included package and added class nested below `parent`.
    pub fn forget_nested(&mut self, parent: &str) {
        self.included_packages
            .retain(|package| !is_nested_in(package, parent));
        self.added_classes.retain(|fqn, _| !is_nested_in(fqn, parent));
    }

    /// Turn every addition into a removal and every inclusion into an
    /// exclusion. Earlier removals and exclusions are replaced.
    pub fn remove_all(&mut self) {
        self.removed_classes = std::mem::take(&mut self.added_classes);
        self.excluded_packages = std::mem::take(&mut self.included_packages);
    }

    // ── Reconciliation ──────────────────────────────────────────────

    /// The classes a reconciliation pass works on.
    ///
    /// Live additions, plus the members of the seed package and of every
    /// included package that still exists, minus explicit removals. Symbols
    /// that no longer resolve to a valid declaration never make it in.
    pub fn resolve_effective_classes(
        &self,
        index: &PackageIndex<'_>,
        resolver: &mut ClassResolver<'_>,
    ) -> Vec<Arc<ClassSymbol>> {
        let mut classes: FxIndexMap<Fqn, Arc<ClassSymbol>> = FxIndexMap::default();

        for symbol in self.added_classes.values() {
            if let Some(class) = symbol.resolve(resolver) {
                classes.insert(class.fqn.clone(), class);
            }
        }

        let seed_package = self.initial_package().into_iter();
        for package in seed_package.chain(self.included_packages.iter()) {
            if !index.package_exists(package) {
                continue;
            }
            for class in index.member_classes(package, resolver) {
                classes.entry(class.fqn.clone()).or_insert(class);
            }
        }

        classes.retain(|fqn, _| !self.removed_classes.contains_key(fqn));
        classes.into_values().collect()
    }

    /// Re-derive included packages after the seed package disappeared
    /// (e.g. it was renamed): pick up its live subpackages unless already
    /// tracked or excluded by the user.
    pub fn sync_packages(&mut self, index: &PackageIndex<'_>) {
        let Seed::Package(seed) = &self.seed else {
            return;
        };
        if index.package_exists(seed) {
            return;
        }
        let fresh: Vec<Fqn> = index
            .subpackages(seed)
            .into_iter()
            .filter(|package| {
                !self.included_packages.contains(package)
                    && !self.excluded_packages.contains(package)
            })
            .collect();
        if !fresh.is_empty() {
            tracing::debug!("[SELECTION] seed package gone, adopting {:?}", fresh);
            self.included_packages.extend(fresh);
        }
    }
}
