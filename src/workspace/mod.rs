//! In-memory host: symbol space, usage analysis and refactoring over a
//! set of declarations. Prompts and rendering stay with the embedder.
//!
//! [`InMemoryWorkspace`] owns a set of class declarations and answers
//! symbol-space queries from them; it also applies refactoring commands to
//! those declarations, keeping a per-command undo history. The test suite
//! drives the model through it, and embedders without an IDE can use it as
//! a reference host.
//!
//! ## Usage
//!
//! ```ignore
//! use flexuml::workspace::{ClassDecl, InMemoryWorkspace};
//!
//! let workspace = InMemoryWorkspace::new()
//!     .with_class(ClassDecl::class("com.acme.A"))
//!     .with_class(ClassDecl::class("com.acme.B").extends("com.acme.A"));
//! ```
//!
//! Packages are implicit: a package exists when it is declared explicitly
//! or directly contains at least one class.

mod refactor;


use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use smol_str::SmolStr;

use crate::base::{Fqn, RelationshipKind, is_nested_in, package_name, short_name};
use crate::edit::Prompter;
use crate::model::DiagramHost;
use crate::symbols::{
    ClassKind, ClassSymbol, EntryKind, Origin, PackageEntry, SearchScope, SymbolSpace,
    UsageAnalyzer,
};

/// A class or interface declaration held by the workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub fqn: Fqn,
    pub kind: ClassKind,
    pub extends: Vec<Fqn>,
    pub implements: Vec<Fqn>,
    pub imports: Vec<Fqn>,
    pub origin: Origin,
    pub templated: bool,
    pub valid: bool,
    /// Classes this declaration uses, as reported to the usage analyzer.
    pub usages: Vec<(Fqn, RelationshipKind)>,
}

impl ClassDecl {
    pub fn class(fqn: impl Into<Fqn>) -> Self {
        Self::new(fqn.into(), ClassKind::Class)
    }

    pub fn interface(fqn: impl Into<Fqn>) -> Self {
        Self::new(fqn.into(), ClassKind::Interface)
    }

    fn new(fqn: Fqn, kind: ClassKind) -> Self {
        Self {
            fqn,
            kind,
            extends: Vec::new(),
            implements: Vec::new(),
            imports: Vec::new(),
            origin: Origin::Source,
            templated: false,
            valid: true,
            usages: Vec::new(),
        }
    }

    pub fn extends(mut self, fqn: impl Into<Fqn>) -> Self {
        self.extends.push(fqn.into());
        self
    }

    pub fn implements(mut self, fqn: impl Into<Fqn>) -> Self {
        self.implements.push(fqn.into());
        self
    }

    pub fn imports(mut self, fqn: impl Into<Fqn>) -> Self {
        self.imports.push(fqn.into());
        self
    }

    pub fn library(mut self) -> Self {
        self.origin = Origin::Library;
        self
    }

    /// Mark as an XML-templated component.
    pub fn templated(mut self) -> Self {
        self.templated = true;
        self
    }

    pub fn uses(mut self, fqn: impl Into<Fqn>, relationship: RelationshipKind) -> Self {
        self.usages.push((fqn.into(), relationship));
        self
    }

    /// Source file path: `com/acme/Widget.as`, or `.mxml` for templated
    /// components.
    pub fn file(&self) -> SmolStr {
        let extension = if self.templated { "mxml" } else { "as" };
        smol_str::format_smolstr!("{}.{extension}", self.fqn.replace('.', "/"))
    }

    pub fn to_symbol(&self) -> ClassSymbol {
        ClassSymbol {
            fqn: self.fqn.clone(),
            kind: self.kind,
            super_classes: self.extends.clone(),
            interfaces: match self.kind {
                ClassKind::Class => self.implements.clone(),
                ClassKind::Interface => Vec::new(),
            },
            origin: self.origin,
            templated: self.templated,
            valid: self.valid,
            file: self.file(),
        }
    }

    fn visible_in(&self, scope: SearchScope) -> bool {
        scope == SearchScope::All || self.origin == Origin::Source
    }
}

#[derive(Debug, Default)]
struct WorkspaceState {
    classes: IndexMap<Fqn, ClassDecl>,
    packages: IndexSet<Fqn>,
    revision: u64,
    history: Vec<refactor::HistoryEntry>,
    pending_failure: Option<String>,
}

impl WorkspaceState {
    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Class declarations plus a refactoring history.
#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    state: RwLock<WorkspaceState>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add_class`](Self::add_class).
    pub fn with_class(self, decl: ClassDecl) -> Self {
        self.add_class(decl);
        self
    }

    pub fn with_classes(self, decls: impl IntoIterator<Item = ClassDecl>) -> Self {
        for decl in decls {
            self.add_class(decl);
        }
        self
    }

    // ── Source changes ──────────────────────────────────────────────

    /// Add or replace a declaration.
    pub fn add_class(&self, decl: ClassDecl) {
        let mut state = self.state.write();
        state.classes.insert(decl.fqn.clone(), decl);
        state.touch();
    }

    pub fn remove_class(&self, fqn: &str) -> Option<ClassDecl> {
        let mut state = self.state.write();
        let removed = state.classes.shift_remove(fqn);
        state.touch();
        removed
    }

    /// Declare a package that exists even without direct members.
    pub fn declare_package(&self, package: impl Into<Fqn>) {
        let mut state = self.state.write();
        state.packages.insert(package.into());
        state.touch();
    }

    /// Mark a declaration stale; it stays indexed but no longer resolves.
    pub fn invalidate(&self, fqn: &str) {
        let mut state = self.state.write();
        if let Some(decl) = state.classes.get_mut(fqn) {
            decl.valid = false;
        }
        state.touch();
    }

    /// Move every class directly in `from` into `to`.
    pub fn move_package(&self, from: &str, to: &str) {
        let mut state = self.state.write();
        let moved: Vec<Fqn> = state
            .classes
            .keys()
            .filter(|fqn| package_name(fqn) == from)
            .cloned()
            .collect();
        for fqn in moved {
            if let Some(mut decl) = state.classes.shift_remove(&fqn) {
                decl.fqn = crate::base::qualified_name(to, short_name(&fqn));
                state.classes.insert(decl.fqn.clone(), decl);
            }
        }
        state.packages.shift_remove(from);
        state.touch();
    }

    // ── Inspection ──────────────────────────────────────────────────

    pub fn class(&self, fqn: &str) -> Option<ClassDecl> {
        self.state.read().classes.get(fqn).cloned()
    }

    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Names of executed commands, oldest first.
    pub fn command_names(&self) -> Vec<String> {
        self.state
            .read()
            .history
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Make the next refactoring command fail with `message`.
    pub fn fail_next_command(&self, message: impl Into<String>) {
        self.state.write().pending_failure = Some(message.into());
    }
}

impl SymbolSpace for InMemoryWorkspace {
    fn find_class(&self, fqn: &str, scope: SearchScope) -> Option<ClassSymbol> {
        let state = self.state.read();
        state
            .classes
            .get(fqn)
            .filter(|decl| decl.visible_in(scope))
            .map(ClassDecl::to_symbol)
    }

    fn package_entries(&self, package: &str, scope: SearchScope) -> Vec<PackageEntry> {
        let state = self.state.read();
        let mut subpackages: IndexSet<SmolStr> = IndexSet::new();
        let mut entries = Vec::new();

        let nested_packages = state
            .classes
            .values()
            .filter(|decl| decl.visible_in(scope))
            .map(|decl| package_name(&decl.fqn))
            .chain(state.packages.iter().map(|package| package.as_str()));
        for nested in nested_packages {
            if let Some(segment) = direct_child_segment(nested, package) {
                subpackages.insert(SmolStr::new(segment));
            }
        }
        entries.extend(
            subpackages
                .into_iter()
                .map(|name| PackageEntry::new(name, EntryKind::Package)),
        );

        for decl in state.classes.values() {
            if decl.visible_in(scope) && package_name(&decl.fqn) == package {
                let kind = match decl.kind {
                    ClassKind::Class => EntryKind::Class,
                    ClassKind::Interface => EntryKind::Interface,
                };
                entries.push(PackageEntry::new(short_name(&decl.fqn), kind));
            }
        }
        entries
    }

    fn package_exists(&self, package: &str, scope: SearchScope) -> bool {
        let state = self.state.read();
        state.packages.contains(package)
            || state
                .classes
                .values()
                .any(|decl| decl.visible_in(scope) && package_name(&decl.fqn) == package)
    }

    fn modification_count(&self) -> u64 {
        self.revision()
    }
}

impl UsageAnalyzer for InMemoryWorkspace {
    fn used_classes(&self, class: &ClassSymbol) -> Vec<(Fqn, RelationshipKind)> {
        self.state
            .read()
            .classes
            .get(class.fqn.as_str())
            .map(|decl| decl.usages.clone())
            .unwrap_or_default()
    }
}

/// The first segment of `nested` below `package`, if `nested` lies below it.
fn direct_child_segment<'a>(nested: &'a str, package: &str) -> Option<&'a str> {
    let rest = if package.is_empty() {
        nested
    } else if is_nested_in(nested, package) {
        &nested[package.len() + 1..]
    } else {
        return None;
    };
    let segment = rest.split('.').next()?;
    (!segment.is_empty()).then_some(segment)
}

impl InMemoryWorkspace {
    /// A host whose symbols, usages and refactorings all come from this
    /// workspace.
    pub fn host(self: &Arc<Self>, prompter: Arc<dyn Prompter>) -> DiagramHost {
        DiagramHost::new(self.clone(), self.clone(), prompter).with_usages(self.clone())
    }
}
