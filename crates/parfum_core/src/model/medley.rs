//! Medley domain model.
//!
//! # Responsibility
//! - Define one scent-blend experiment with maturation and outcome fields.
//! - Own the experiment's ingredient list.
//! - Derive display-only elapsed calendar days since creation.
//!
//! # Invariants
//! - `scenting_id` is a navigation back-reference, never an ownership edge.
//! - `ingredients` is exclusively owned and deleted with the medley.
//! - `created_at` is Unix epoch milliseconds.

use crate::model::codec::{Period, PersistedEnum, Status};
use crate::model::ingredient::Ingredient;
use crate::model::scenting::ScentingId;
use crate::model::ModelValidationError;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type MedleyId = Uuid;

/// Single scent-blend experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medley {
    pub id: MedleyId,
    /// Parent category. Navigation only.
    pub scenting_id: ScentingId,
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub period: Period,
    pub status: Status,
    /// Free-text progress notes.
    pub update: String,
    /// Storage vessel description, e.g. "Sealed glass jar.".
    pub destination: String,
    /// Count of `period` units before the outcome is evaluated.
    pub maturity: u32,
    pub conclusion: String,
    /// Sorted by name ascending when hydrated from the store.
    pub ingredients: Vec<Ingredient>,
}

impl Medley {
    /// Creates a medley with a fresh id and default fields.
    ///
    /// # Invariants
    /// - `created_at` is the current time.
    /// - `period = day`, `status = tbd`, `maturity = 0`, text fields empty.
    pub fn new(scenting_id: ScentingId) -> Self {
        Self::with_id(Uuid::new_v4(), scenting_id, Utc::now().timestamp_millis())
    }

    /// Creates a medley with caller-provided identity and creation time.
    pub fn with_id(id: MedleyId, scenting_id: ScentingId, created_at: i64) -> Self {
        Self {
            id,
            scenting_id,
            name: String::new(),
            created_at,
            period: Period::FALLBACK,
            status: Status::FALLBACK,
            update: String::new(),
            destination: String::new(),
            maturity: 0,
            conclusion: String::new(),
            ingredients: Vec::new(),
        }
    }

    /// Checks storage invariants of the medley and its ingredients.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId("medley"));
        }
        if self.scenting_id.is_nil() {
            return Err(ModelValidationError::NilId("scenting"));
        }
        for ingredient in &self.ingredients {
            ingredient.validate()?;
        }
        Ok(())
    }

    /// Maturity with its period noun, e.g. `14 days`, `1 week`.
    pub fn maturity_display(&self) -> String {
        format!(
            "{} {}",
            self.maturity,
            self.period.display_name(f64::from(self.maturity))
        )
    }

    /// Sibling-visible names of this medley's ingredients.
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.iter().map(|item| item.name.clone()).collect()
    }

    /// Whole calendar days since creation in the device's local time zone.
    pub fn elapsed_days(&self, now: DateTime<Local>) -> i64 {
        elapsed_calendar_days(self.created_at, &now)
    }
}

/// Counts local-date boundaries between `created_at_ms` and `now`.
///
/// This is a date-component difference, not `duration / 24h`: 23:00 → 01:00
/// the next day counts as one day. Results before creation clamp to `0`.
pub fn elapsed_calendar_days<Tz: TimeZone>(created_at_ms: i64, now: &DateTime<Tz>) -> i64 {
    let Some(created) = DateTime::<Utc>::from_timestamp_millis(created_at_ms) else {
        return 0;
    };
    let created_date = created.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();
    today.signed_duration_since(created_date).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::elapsed_calendar_days;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn counts_calendar_boundaries_not_durations() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let created = tz.with_ymd_and_hms(2024, 5, 26, 23, 0, 0).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 27, 1, 0, 0).unwrap();
        assert_eq!(elapsed_calendar_days(created.timestamp_millis(), &now), 1);
    }

    #[test]
    fn same_day_is_zero_and_spans_months() {
        let created = Utc.with_ymd_and_hms(2024, 5, 30, 8, 0, 0).unwrap();
        let same_day = Utc.with_ymd_and_hms(2024, 5, 30, 22, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 13, 7, 0, 0).unwrap();
        assert_eq!(elapsed_calendar_days(created.timestamp_millis(), &same_day), 0);
        assert_eq!(elapsed_calendar_days(created.timestamp_millis(), &later), 14);
    }

    #[test]
    fn uses_the_observer_time_zone() {
        // 2024-05-26 23:30 UTC is already 2024-05-27 in UTC+2.
        let created = Utc.with_ymd_and_hms(2024, 5, 26, 23, 30, 0).unwrap();
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 27, 9, 0, 0).unwrap();
        assert_eq!(elapsed_calendar_days(created.timestamp_millis(), &now), 0);
    }

    #[test]
    fn future_creation_clamps_to_zero() {
        let created = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(elapsed_calendar_days(created.timestamp_millis(), &now), 0);
    }
}
