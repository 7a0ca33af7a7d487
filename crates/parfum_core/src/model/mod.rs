//! Domain model for the scenting → medley → ingredient tree.
//!
//! # Responsibility
//! - Define canonical entities used by form, repository and service layers.
//! - Keep enum fields typed in memory and persisted as display strings.
//!
//! # Invariants
//! - Every entity is identified by a stable, non-nil UUID.
//! - Parents own their children (`Vec`), children carry the parent id as a
//!   navigation-only back-reference.
//! - Deletion is a hard delete; Medley → Ingredient cascades.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod ingredient;
pub mod ingredient_merge;
pub mod medley;
pub mod scenting;

/// Storage-level invariant violations, independent of form gating.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Entity id is the nil UUID.
    NilId(&'static str),
    /// Ingredient amount is negative, NaN or infinite.
    InvalidAmount { ingredient: uuid::Uuid, amount: f64 },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId(entity) => write!(f, "{entity} id must not be nil"),
            Self::InvalidAmount { ingredient, amount } => write!(
                f,
                "ingredient {ingredient} amount must be a finite value >= 0, got {amount}"
            ),
        }
    }
}

impl Error for ModelValidationError {}
