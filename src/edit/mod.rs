//! Edit command layer: diagram gestures.
//!
//! Membership gestures (add/remove element, expand, collapse) only touch
//! the [`SelectionSet`](crate::selection::SelectionSet) and the current
//! snapshot. Edge gestures also change source code, in three steps:
//!
//! 1. [`plan`] decides, purely, whether the edit can proceed and builds the
//!    [`RefactoringCommand`]
//! 2. the [`Prompter`] confirms (a "no" aborts with nothing applied)
//! 3. the [`Refactoring`] collaborator executes the command as one unit
//!
//! A failing refactoring is the only error this layer returns.

mod commands;
pub mod messages;
pub mod plan;
mod transaction;


pub use commands::EdgeRemoval;
pub use plan::{
    Confirmation, EditPlan, PlannedEdit, Rejection, Skip, plan_create_edge, plan_remove_edge,
};
pub use transaction::{
    DiagramBuilder, Prompter, Refactoring, RefactoringCommand, ReferenceList, SourceEdit,
};
