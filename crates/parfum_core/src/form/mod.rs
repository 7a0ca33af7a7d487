//! Form-state layer: draft input and submission gating.
//!
//! # Responsibility
//! - Hold user input before it is committed into the entity graph.
//! - Compute UI gating predicates (submit/add/delete enabled).
//!
//! # Invariants
//! - Gating predicates are pure and never return errors; a failed rule is a
//!   disabled control, not an exception path.
//! - Draft ingredient rows are addressed by id, never by list index.

pub mod medley_form;
pub mod name_check;
pub mod scenting_form;
