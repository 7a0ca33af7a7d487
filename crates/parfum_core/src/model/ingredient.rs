//! Ingredient domain model.
//!
//! # Invariants
//! - `id` is stable across edits; merge-on-save correlates by id only.
//! - `amount` is finite and `>= 0`; `> 0` is required to be complete.

use crate::model::codec::{PersistedEnum, Unit};
use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type IngredientId = Uuid;

/// Named quantity-of-unit component of a medley.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
}

impl Ingredient {
    /// Creates an empty ingredient with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty ingredient with a caller-provided id.
    ///
    /// Used by merge-on-save, where the draft row id becomes the stored id.
    pub fn with_id(id: IngredientId) -> Self {
        Self {
            id,
            name: String::new(),
            amount: 0.0,
            unit: Unit::FALLBACK,
        }
    }

    /// Convenience constructor for fully specified rows.
    pub fn named(name: impl Into<String>, amount: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            amount,
            unit,
            ..Self::new()
        }
    }

    /// Checks storage invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId("ingredient"));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ModelValidationError::InvalidAmount {
                ingredient: self.id,
                amount: self.amount,
            });
        }
        Ok(())
    }

    /// Unit noun matching the current amount, e.g. `3 drops`, `1 drop`.
    pub fn unit_display(&self) -> &'static str {
        self.unit.display_name(self.amount)
    }
}

impl Default for Ingredient {
    fn default() -> Self {
        Self::new()
    }
}
