//! Scenting add/rename/delete gating.

use crate::form::name_check::is_submittable;
use crate::model::scenting::Scenting;

/// Add button state for a new scenting name.
pub fn can_add_scenting<S: AsRef<str>>(name: &str, existing: &[S]) -> bool {
    is_submittable(name, existing, None)
}

/// Rename button state; the scenting may keep its current name.
pub fn can_rename_scenting<S: AsRef<str>>(
    new_name: &str,
    existing: &[S],
    current_name: &str,
) -> bool {
    is_submittable(new_name, existing, Some(current_name))
}

/// Delete button state: medleys must be removed first.
pub fn can_delete_scenting(scenting: &Scenting) -> bool {
    scenting.can_delete()
}

#[cfg(test)]
mod tests {
    use super::{can_add_scenting, can_delete_scenting, can_rename_scenting};
    use crate::model::medley::Medley;
    use crate::model::scenting::Scenting;

    #[test]
    fn add_and_rename_follow_sibling_rules() {
        let existing = vec!["Dish Soap".to_string(), "Candles".to_string()];
        assert!(!can_add_scenting("Dish Soap", &existing));
        assert!(can_add_scenting("Room Spray", &existing));
        assert!(can_rename_scenting("Dish Soap", &existing, "Dish Soap"));
        assert!(!can_rename_scenting("Candles", &existing, "Dish Soap"));
    }

    #[test]
    fn delete_requires_no_medleys() {
        let mut scenting = Scenting::new("Dish Soap");
        assert!(can_delete_scenting(&scenting));
        scenting.medleys.push(Medley::new(scenting.id));
        assert!(!can_delete_scenting(&scenting));
    }
}
