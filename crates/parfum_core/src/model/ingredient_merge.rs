//! Identity-keyed reconciliation of an edited ingredient list.
//!
//! # Responsibility
//! - Compare a draft ingredient list with the persisted one and produce the
//!   update/insert/delete set that turns the latter into the former.
//!
//! # Invariants
//! - Rows are correlated by `id` only; list position is never consulted.
//! - A draft id seen twice is applied once (first occurrence wins).
//! - Every persisted id ends up in exactly one of `updates` or `deletes`.

use crate::model::ingredient::{Ingredient, IngredientId};
use std::collections::HashSet;

/// Changes required to persist an edited ingredient list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientMergePlan {
    /// Draft rows whose id matches a persisted ingredient.
    pub updates: Vec<Ingredient>,
    /// Draft rows with no persisted counterpart; the draft id is kept.
    pub inserts: Vec<Ingredient>,
    /// Persisted ingredients missing from the draft.
    pub deletes: Vec<IngredientId>,
}

impl IngredientMergePlan {
    /// Builds the plan for `draft` against `persisted`.
    pub fn build(persisted: &[Ingredient], draft: &[Ingredient]) -> Self {
        let persisted_ids: HashSet<IngredientId> = persisted.iter().map(|item| item.id).collect();
        let mut seen = HashSet::with_capacity(draft.len());
        let mut plan = Self::default();

        for row in draft {
            if !seen.insert(row.id) {
                continue;
            }
            if persisted_ids.contains(&row.id) {
                plan.updates.push(row.clone());
            } else {
                plan.inserts.push(row.clone());
            }
        }

        plan.deletes = persisted
            .iter()
            .filter(|item| !seen.contains(&item.id))
            .map(|item| item.id)
            .collect();

        plan
    }

    /// Returns whether applying the plan changes nothing structurally.
    pub fn is_structurally_empty(&self) -> bool {
        self.inserts.is_empty() && self.deletes.is_empty()
    }

    /// Applies the plan to an in-memory list, sorted by name like the store.
    pub fn apply(&self, persisted: &[Ingredient]) -> Vec<Ingredient> {
        let deleted: HashSet<IngredientId> = self.deletes.iter().copied().collect();
        let mut merged: Vec<Ingredient> = persisted
            .iter()
            .filter(|item| !deleted.contains(&item.id))
            .map(|item| {
                self.updates
                    .iter()
                    .find(|update| update.id == item.id)
                    .cloned()
                    .unwrap_or_else(|| item.clone())
            })
            .collect();
        merged.extend(self.inserts.iter().cloned());
        merged.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::IngredientMergePlan;
    use crate::model::codec::Unit;
    use crate::model::ingredient::Ingredient;

    #[test]
    fn reconciles_by_identity() {
        let a = Ingredient::named("Fennel", 2.0, Unit::Pipette);
        let b = Ingredient::named("Orange", 3.0, Unit::Pipette);
        let c = Ingredient::named("Nutmeg", 1.0, Unit::Gram);
        let persisted = vec![a.clone(), b.clone(), c.clone()];

        let mut a_modified = a.clone();
        a_modified.amount = 4.0;
        a_modified.unit = Unit::Millilitre;
        // Same content as C but a fresh identity.
        let d = Ingredient::named("Nutmeg", 1.0, Unit::Gram);

        let plan = IngredientMergePlan::build(&persisted, &[a_modified.clone(), d.clone()]);
        assert_eq!(plan.updates, vec![a_modified.clone()]);
        assert_eq!(plan.inserts, vec![d.clone()]);
        assert_eq!(plan.deletes, vec![b.id, c.id]);

        let merged = plan.apply(&persisted);
        let ids: Vec<_> = merged.iter().map(|item| item.id).collect();
        assert_eq!(merged.len(), 2);
        assert!(ids.contains(&a.id));
        assert!(ids.contains(&d.id));
        assert_eq!(merged.iter().find(|item| item.id == a.id), Some(&a_modified));
    }

    #[test]
    fn order_of_draft_rows_is_irrelevant() {
        let a = Ingredient::named("A", 1.0, Unit::Cup);
        let b = Ingredient::named("B", 1.0, Unit::Cup);
        let persisted = vec![a.clone(), b.clone()];

        let forward = IngredientMergePlan::build(&persisted, &[a.clone(), b.clone()]);
        let reversed = IngredientMergePlan::build(&persisted, &[b.clone(), a.clone()]);
        assert!(forward.deletes.is_empty() && reversed.deletes.is_empty());
        assert!(forward.inserts.is_empty() && reversed.inserts.is_empty());
        assert_eq!(forward.apply(&persisted), reversed.apply(&persisted));
    }

    #[test]
    fn duplicate_draft_ids_apply_once() {
        let a = Ingredient::named("A", 1.0, Unit::Cup);
        let mut second = a.clone();
        second.name = "A2".to_string();

        let plan = IngredientMergePlan::build(&[], &[a.clone(), second]);
        assert_eq!(plan.inserts, vec![a]);
    }

    #[test]
    fn empty_draft_deletes_everything() {
        let persisted = vec![
            Ingredient::named("A", 1.0, Unit::Cup),
            Ingredient::named("B", 2.0, Unit::Gram),
        ];
        let plan = IngredientMergePlan::build(&persisted, &[]);
        assert_eq!(plan.deletes.len(), 2);
        assert!(plan.apply(&persisted).is_empty());
        assert!(!plan.is_structurally_empty());
    }
}
