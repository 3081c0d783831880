//! Pure edit planning.
//!
//! Given the current state of the two classes involved, decide whether an
//! edge gesture can proceed, what (if anything) to ask the user first, and
//! which source edits to apply. Nothing here talks to a collaborator.

use std::sync::Arc;

use super::messages;
use super::transaction::{RefactoringCommand, ReferenceList, SourceEdit};
use crate::base::{RelationshipKind, needs_import};
use crate::symbols::ClassSymbol;

/// Why a gesture does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    /// Source and target are the same class.
    SameClass,
    /// The target is already in the relevant reference list.
    AlreadyRelated,
    /// Interfaces cannot extend classes.
    InterfaceToClass,
    /// Only inheritance edges map to source edits.
    NotStructural,
    /// The source class is compiled library code.
    LibrarySource,
    /// Every class extends the universal base object implicitly.
    ObjectTarget,
    /// The edge is derived through hidden ancestors; the source does not
    /// name the target, so there is nothing to remove.
    NotDeclared,
}

/// A gesture that is refused with an error shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Removing the base of an XML-templated component.
    BaseComponentRequired,
    /// Drawing an edge out of compiled library code.
    ReadOnlySource,
}

impl Rejection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::BaseComponentRequired => messages::REMOVE_EDGE_TITLE,
            Self::ReadOnlySource => messages::CREATE_EDGE_TITLE,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BaseComponentRequired => messages::BASE_COMPONENT_NEEDED,
            Self::ReadOnlySource => messages::READ_ONLY_SOURCE,
        }
    }
}

/// A yes/no question to ask before applying an edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: String,
}

/// An edit ready to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedEdit {
    /// Asked first; a "no" aborts with nothing applied.
    pub confirmation: Option<Confirmation>,
    pub command: RefactoringCommand,
    /// Relationship of the edge drawn on success (creation only).
    pub relationship: Option<RelationshipKind>,
}

/// Outcome of planning a gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditPlan {
    Skip(Skip),
    Reject(Rejection),
    Proceed(PlannedEdit),
}

/// Plan drawing an edge `from → to`.
///
/// `from_supers` are the supertypes of `from` that currently resolve, in
/// declaration order; the first is the primary base.
pub fn plan_create_edge(
    from: &ClassSymbol,
    to: &ClassSymbol,
    from_supers: &[Arc<ClassSymbol>],
) -> EditPlan {
    if from.is_equivalent_to(to) {
        return EditPlan::Skip(Skip::SameClass);
    }
    if from.is_library() {
        return EditPlan::Reject(Rejection::ReadOnlySource);
    }
    if from.references(&to.fqn, to.kind) {
        return EditPlan::Skip(Skip::AlreadyRelated);
    }

    if to.is_interface() {
        return EditPlan::Proceed(plan_interface_edge(from, to));
    }
    if from.is_interface() {
        return EditPlan::Skip(Skip::InterfaceToClass);
    }

    let current = from_supers.first();
    let name = messages::create_extends_command(&from.fqn, &to.fqn);
    let mut command = RefactoringCommand::new(name, from.file.clone());

    if from.templated {
        // An unresolved base component is replaced without asking.
        let confirmation = current.map(|base| Confirmation {
            title: messages::CREATE_EDGE_TITLE,
            message: messages::replace_base_component_prompt(&base.fqn, &to.fqn),
        });
        command.push(SourceEdit::SetBaseComponent {
            class: from.fqn.clone(),
            base: to.fqn.clone(),
        });
        return EditPlan::Proceed(PlannedEdit {
            confirmation,
            command,
            relationship: Some(RelationshipKind::Generalization),
        });
    }

    let replaced = current.filter(|base| !base.is_object_class());
    let confirmation = replaced.map(|base| Confirmation {
        title: messages::CREATE_EDGE_TITLE,
        message: messages::replace_base_class_prompt(&base.fqn, &to.fqn),
    });

    let mut optimize = false;
    if let Some(base) = replaced {
        command.push(SourceEdit::RemoveFromSupers {
            class: from.fqn.clone(),
            target: base.fqn.clone(),
            list: ReferenceList::Extends,
        });
        optimize = needs_import(&from.fqn, &base.fqn);
    }
    command.push(SourceEdit::AddToSupers {
        class: from.fqn.clone(),
        target: to.fqn.clone(),
        list: ReferenceList::Extends,
    });
    if needs_import(&from.fqn, &to.fqn) {
        command.push(SourceEdit::InsertImport {
            class: from.fqn.clone(),
            import: to.fqn.clone(),
        });
        optimize = true;
    }
    if optimize {
        command.push(SourceEdit::OptimizeImports {
            class: from.fqn.clone(),
        });
    }

    EditPlan::Proceed(PlannedEdit {
        confirmation,
        command,
        relationship: Some(RelationshipKind::Generalization),
    })
}

fn plan_interface_edge(from: &ClassSymbol, to: &ClassSymbol) -> PlannedEdit {
    let (name, list, relationship) = if from.is_interface() {
        (
            messages::create_extends_command(&from.fqn, &to.fqn),
            ReferenceList::Extends,
            RelationshipKind::InterfaceGeneralization,
        )
    } else {
        (
            messages::create_implements_command(&from.fqn, &to.fqn),
            ReferenceList::Implements,
            RelationshipKind::Realization,
        )
    };

    let mut command = RefactoringCommand::new(name, from.file.clone()).with_edit(
        SourceEdit::AddToSupers {
            class: from.fqn.clone(),
            target: to.fqn.clone(),
            list,
        },
    );
    // Templated components resolve names through their XML namespaces.
    if !from.templated && needs_import(&from.fqn, &to.fqn) {
        command.push(SourceEdit::InsertImport {
            class: from.fqn.clone(),
            import: to.fqn.clone(),
        });
        command.push(SourceEdit::OptimizeImports {
            class: from.fqn.clone(),
        });
    }

    PlannedEdit {
        confirmation: None,
        command,
        relationship: Some(relationship),
    }
}

/// Plan deleting the edge `from → to` carrying `relationship`.
///
/// Library sources are skipped without an error: their edges are drawn
/// from compiled code and removal is never offered for them.
pub fn plan_remove_edge(
    from: &ClassSymbol,
    to: &ClassSymbol,
    relationship: &RelationshipKind,
) -> EditPlan {
    if !relationship.is_structural() {
        return EditPlan::Skip(Skip::NotStructural);
    }
    if from.is_library() {
        return EditPlan::Skip(Skip::LibrarySource);
    }
    if to.is_object_class() {
        return EditPlan::Skip(Skip::ObjectTarget);
    }
    if !from.references(&to.fqn, to.kind) {
        return EditPlan::Skip(Skip::NotDeclared);
    }
    if from.templated && !to.is_interface() {
        return EditPlan::Reject(Rejection::BaseComponentRequired);
    }

    let list = if !from.is_interface() && to.is_interface() {
        ReferenceList::Implements
    } else {
        ReferenceList::Extends
    };
    let mut command =
        RefactoringCommand::new(messages::REMOVE_RELATIONSHIP_COMMAND, from.file.clone())
            .with_edit(SourceEdit::RemoveFromSupers {
                class: from.fqn.clone(),
                target: to.fqn.clone(),
                list,
            });
    if !from.templated && needs_import(&from.fqn, &to.fqn) {
        command.push(SourceEdit::OptimizeImports {
            class: from.fqn.clone(),
        });
    }

    EditPlan::Proceed(PlannedEdit {
        confirmation: Some(Confirmation {
            title: messages::REMOVE_EDGE_TITLE,
            message: messages::remove_inheritance_prompt(&from.fqn, &to.fqn),
        }),
        command,
        relationship: None,
    })
}
