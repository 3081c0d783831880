//! Refactoring commands applied to in-memory declarations.

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;

use super::{ClassDecl, InMemoryWorkspace};
use crate::base::Fqn;
use crate::edit::{Refactoring, RefactoringCommand, ReferenceList, SourceEdit};
use crate::error::RefactoringError;
use crate::symbols::{ClassKind, Origin};

/// One executed command and the declarations it replaced.
#[derive(Clone, Debug)]
pub(super) struct HistoryEntry {
    pub(super) name: String,
    pub(super) file: SmolStr,
    pub(super) before: Vec<ClassDecl>,
}

impl Refactoring for InMemoryWorkspace {
    fn execute(&self, command: &RefactoringCommand) -> Result<(), RefactoringError> {
        let mut state = self.state.write();
        if let Some(message) = state.pending_failure.take() {
            return Err(RefactoringError::new(&command.name, message));
        }

        // Edits go to copies first so a failing edit leaves nothing behind.
        let mut staged: IndexMap<Fqn, ClassDecl> = IndexMap::new();
        for edit in &command.edits {
            let class = edit.class();
            let decl = match staged.entry(class.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = state.classes.get(class.as_str()).cloned().ok_or_else(|| {
                        RefactoringError::new(&command.name, format!("no declaration for {class}"))
                    })?;
                    if current.origin == Origin::Library {
                        return Err(RefactoringError::new(
                            &command.name,
                            format!("{class} is read-only"),
                        ));
                    }
                    entry.insert(current)
                }
            };
            apply_edit(decl, edit);
        }

        let mut before = Vec::with_capacity(staged.len());
        for (fqn, decl) in staged {
            if let Some(previous) = state.classes.insert(fqn, decl) {
                before.push(previous);
            }
        }
        state.history.push(HistoryEntry {
            name: command.name.clone(),
            file: command.file.clone(),
            before,
        });
        state.touch();
        tracing::debug!(
            "[WORKSPACE] executed '{}' on {} ({} edits)",
            command.name,
            command.file,
            command.edits.len()
        );
        Ok(())
    }
}

impl InMemoryWorkspace {
    /// Undo the most recent command scoped to `file`. Returns its name.
    pub fn undo(&self, file: &str) -> Option<String> {
        let mut state = self.state.write();
        let position = state.history.iter().rposition(|entry| entry.file == file)?;
        let entry = state.history.remove(position);
        for decl in entry.before {
            state.classes.insert(decl.fqn.clone(), decl);
        }
        state.touch();
        tracing::debug!("[WORKSPACE] undid '{}' on {}", entry.name, file);
        Some(entry.name)
    }
}

fn apply_edit(decl: &mut ClassDecl, edit: &SourceEdit) {
    match edit {
        SourceEdit::AddToSupers { target, list, .. } => match (list, decl.kind) {
            (ReferenceList::Extends, ClassKind::Class) => decl.extends = vec![target.clone()],
            (ReferenceList::Extends, ClassKind::Interface) => push_unique(&mut decl.extends, target),
            (ReferenceList::Implements, _) => push_unique(&mut decl.implements, target),
        },
        SourceEdit::RemoveFromSupers { target, list, .. } => {
            let references = match list {
                ReferenceList::Extends => &mut decl.extends,
                ReferenceList::Implements => &mut decl.implements,
            };
            references.retain(|fqn| fqn != target);
        }
        SourceEdit::InsertImport { import, .. } => push_unique(&mut decl.imports, import),
        SourceEdit::OptimizeImports { .. } => {
            let ClassDecl {
                imports,
                extends,
                implements,
                usages,
                ..
            } = decl;
            imports.retain(|import| {
                extends.contains(import)
                    || implements.contains(import)
                    || usages.iter().any(|(used, _)| used == import)
            });
        }
        SourceEdit::SetBaseComponent { base, .. } => decl.extends = vec![base.clone()],
    }
}

fn push_unique(list: &mut Vec<Fqn>, fqn: &Fqn) {
    if !list.contains(fqn) {
        list.push(fqn.clone());
    }
}
