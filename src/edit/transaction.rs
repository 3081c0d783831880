//! Outbound collaborators for edit gestures: refactoring transactions,
//! user prompts, and re-render requests.

use smol_str::SmolStr;

use crate::base::Fqn;
use crate::error::RefactoringError;

/// Which reference list of a class declaration an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceList {
    /// `extends` (base class, or super-interfaces of an interface).
    Extends,
    /// `implements`.
    Implements,
}

/// One source mutation inside a refactoring command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceEdit {
    /// Add `target` to a reference list of `class`. For the `extends`
    /// list of a class this replaces the current base.
    AddToSupers {
        class: Fqn,
        target: Fqn,
        list: ReferenceList,
    },
    /// Remove `target` from a reference list of `class`.
    RemoveFromSupers {
        class: Fqn,
        target: Fqn,
        list: ReferenceList,
    },
    /// Insert an import statement for `import` into `class`'s file.
    InsertImport { class: Fqn, import: Fqn },
    /// Drop unused imports from `class`'s file.
    OptimizeImports { class: Fqn },
    /// Replace the base component of an XML-templated component.
    SetBaseComponent { class: Fqn, base: Fqn },
}

impl SourceEdit {
    /// The class whose declaration this edit touches.
    pub fn class(&self) -> &Fqn {
        match self {
            Self::AddToSupers { class, .. }
            | Self::RemoveFromSupers { class, .. }
            | Self::InsertImport { class, .. }
            | Self::OptimizeImports { class }
            | Self::SetBaseComponent { class, .. } => class,
        }
    }
}

/// A named, undoable command scoped to one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefactoringCommand {
    /// User-visible name (shown in the undo history).
    pub name: String,
    /// File the command is scoped to.
    pub file: SmolStr,
    /// Edits applied as one unit.
    pub edits: Vec<SourceEdit>,
}

impl RefactoringCommand {
    pub fn new(name: impl Into<String>, file: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            edits: Vec::new(),
        }
    }

    pub fn with_edit(mut self, edit: SourceEdit) -> Self {
        self.edits.push(edit);
        self
    }

    pub fn push(&mut self, edit: SourceEdit) {
        self.edits.push(edit);
    }
}

/// Executes refactoring commands against the source of truth.
///
/// A command either applies completely or fails as a unit; rolling back
/// partial text edits is the implementor's job.
pub trait Refactoring: Send + Sync {
    fn execute(&self, command: &RefactoringCommand) -> Result<(), RefactoringError>;
}

/// User interaction for gestures that need consent.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Show a blocking error.
    fn show_error(&self, title: &str, message: &str);
}

/// The rendering collaborator.
pub trait DiagramBuilder: Send + Sync {
    /// Ask for an asynchronous re-render. Must not block on it.
    fn request_update(&self);
}
