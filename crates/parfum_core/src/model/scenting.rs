//! Scenting (category) domain model.
//!
//! # Invariants
//! - A scenting exclusively owns its medleys.
//! - A scenting with medleys must not be deleted through use-case APIs.

use crate::model::medley::Medley;
use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ScentingId = Uuid;

/// Named category grouping related medley experiments, e.g. "Dish Soap".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenting {
    pub id: ScentingId,
    pub name: String,
    /// Sorted by name ascending when hydrated from the store.
    pub medleys: Vec<Medley>,
}

impl Scenting {
    /// Creates a childless scenting with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: ScentingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            medleys: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId("scenting"));
        }
        Ok(())
    }

    /// Deletion is allowed only once every medley has been removed.
    pub fn can_delete(&self) -> bool {
        self.medleys.is_empty()
    }

    /// Names used as the sibling set when adding or renaming a medley.
    pub fn medley_names(&self) -> Vec<String> {
        self.medleys.iter().map(|medley| medley.name.clone()).collect()
    }
}
