//! Data model tests
//!
//! End-to-end behavior of `UmlDataModel` over an in-memory workspace:
//! - Reconciliation and identity preservation
//! - Membership gestures (add, remove, expand, collapse)
//! - Edge gestures and the refactorings behind them

pub mod tests_edge_commands;
pub mod tests_gestures;
pub mod tests_reconcile;
