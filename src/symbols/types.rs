//! Symbol handle and resolved-symbol types.

use std::sync::Arc;

use smol_str::SmolStr;

use super::resolver::ClassResolver;
use crate::base::constants::is_object_class;
use crate::base::{Fqn, package_name};

/// Search boundary for index queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchScope {
    /// Project sources and libraries.
    #[default]
    All,
    /// Project sources only; library symbols are invisible.
    Project,
}

/// Class or interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

/// Where a symbol is declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Editable project source.
    #[default]
    Source,
    /// Compiled library; never edited by diagram gestures.
    Library,
}

/// A class or interface as currently known to the symbol space.
///
/// This is a point-in-time view: supertypes are FQN references, re-resolved
/// on demand through a [`ClassResolver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSymbol {
    /// Fully-qualified name.
    pub fqn: Fqn,
    /// Class or interface.
    pub kind: ClassKind,
    /// Declared supertypes. For classes the first entry is the primary base
    /// class; for interfaces these are the extended interfaces.
    pub super_classes: Vec<Fqn>,
    /// Interfaces in the `implements` clause (always empty for interfaces).
    pub interfaces: Vec<Fqn>,
    /// Source or library.
    pub origin: Origin,
    /// XML-templated component (the base class is the component's root tag).
    pub templated: bool,
    /// False once the underlying declaration went stale.
    pub valid: bool,
    /// Path of the containing source file.
    pub file: SmolStr,
}

impl ClassSymbol {
    /// Create a valid source class with no supertypes.
    pub fn new(fqn: impl Into<Fqn>, kind: ClassKind) -> Self {
        let fqn = fqn.into();
        let file = smol_str::format_smolstr!("{}.as", fqn.replace('.', "/"));
        Self {
            fqn,
            kind,
            super_classes: Vec::new(),
            interfaces: Vec::new(),
            origin: Origin::Source,
            templated: false,
            valid: true,
            file,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_library(&self) -> bool {
        self.origin == Origin::Library
    }

    /// True for the universal base object.
    pub fn is_object_class(&self) -> bool {
        is_object_class(&self.fqn)
    }

    /// Same logical symbol (FQN equality).
    pub fn is_equivalent_to(&self, other: &ClassSymbol) -> bool {
        self.fqn == other.fqn
    }

    /// The package containing this symbol.
    pub fn package_name(&self) -> &str {
        package_name(&self.fqn)
    }

    /// The primary base reference, if any.
    pub fn primary_super(&self) -> Option<&Fqn> {
        self.super_classes.first()
    }

    /// Interfaces this symbol declares directly: the `implements` clause of a
    /// class, or the `extends` clause of an interface.
    pub fn declared_interfaces(&self) -> &[Fqn] {
        if self.is_interface() {
            &self.super_classes
        } else {
            &self.interfaces
        }
    }

    /// Whether `fqn` appears in the reference list an edge to `target_kind`
    /// would be written into.
    pub fn references(&self, fqn: &str, target_kind: ClassKind) -> bool {
        let list = match (self.kind, target_kind) {
            (ClassKind::Class, ClassKind::Interface) => &self.interfaces,
            _ => &self.super_classes,
        };
        list.iter().any(|f| f == fqn)
    }
}

/// A stable handle to a class: the FQN key plus lazy re-resolution.
///
/// Equality and hashing use the FQN only, so a handle stays meaningful
/// while the declaration behind it is edited, renamed away, or restored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolRef {
    fqn: Fqn,
}

impl SymbolRef {
    pub fn new(fqn: impl Into<Fqn>) -> Self {
        Self { fqn: fqn.into() }
    }

    /// Handle for an already-resolved symbol.
    pub fn of(symbol: &ClassSymbol) -> Self {
        Self::new(symbol.fqn.clone())
    }

    pub fn fqn(&self) -> &Fqn {
        &self.fqn
    }

    /// Re-resolve to a live symbol. `None` if missing or no longer valid.
    pub fn resolve(&self, resolver: &mut ClassResolver<'_>) -> Option<Arc<ClassSymbol>> {
        resolver.resolve(&self.fqn)
    }
}

impl From<&ClassSymbol> for SymbolRef {
    fn from(symbol: &ClassSymbol) -> Self {
        Self::of(symbol)
    }
}

/// Kind of an entry listed by the package index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Package,
    Class,
    Interface,
}

/// One direct child of a package as reported by the index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackageEntry {
    /// Simple (unqualified) name.
    pub name: SmolStr,
    pub kind: EntryKind,
}

impl PackageEntry {
    pub fn new(name: impl Into<SmolStr>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
