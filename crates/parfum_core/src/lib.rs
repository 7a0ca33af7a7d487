//! Core domain logic for ParfumVI, a scented-oil medley tracker.
//! This crate is the single source of truth for the scenting → medley →
//! ingredient invariants; UI layers call in through `parfum_ffi`.

pub mod db;
pub mod demo;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use demo::seed_demo;
pub use form::medley_form::{IngredientDraft, MedleyDraft, SubmissionCheck};
pub use form::name_check::is_submittable;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::codec::{Period, PersistedEnum, Status, Unit};
pub use model::ingredient::{Ingredient, IngredientId};
pub use model::ingredient_merge::IngredientMergePlan;
pub use model::medley::{elapsed_calendar_days, Medley, MedleyId};
pub use model::scenting::{Scenting, ScentingId};
pub use model::ModelValidationError;
pub use repo::medley_repo::{MedleyRepository, SqliteMedleyRepository};
pub use repo::scenting_repo::{ScentingRepository, SqliteScentingRepository};
pub use repo::{RepoError, RepoResult};
pub use service::medley_service::{MedleyService, MedleyServiceError};
pub use service::scenting_service::{ScentingService, ScentingServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
