//! Medley add/edit draft and its submission gate.
//!
//! # Responsibility
//! - Collect medley fields and ingredient rows before commit.
//! - Report each submission rule separately so the UI can highlight it.
//!
//! # Invariants
//! - Submission requires every rule in `SubmissionCheck` to hold.
//! - Ingredient rows keep a stable id from creation to merge-on-save.

use crate::form::name_check::is_submittable;
use crate::model::codec::{Period, PersistedEnum, Status, Unit};
use crate::model::ingredient::{Ingredient, IngredientId};
use crate::model::medley::Medley;
use std::collections::HashSet;
use uuid::Uuid;

/// Editable ingredient row.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDraft {
    pub id: IngredientId,
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
}

impl IngredientDraft {
    /// Fresh empty row: new id, no name, amount 0, default unit.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            amount: 0.0,
            unit: Unit::FALLBACK,
        }
    }

    /// Row mirroring a persisted ingredient, keeping its id.
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            amount: ingredient.amount,
            unit: ingredient.unit,
        }
    }

    /// A row is complete with a non-blank name and a positive amount.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.amount > 0.0
    }

    pub fn to_ingredient(&self) -> Ingredient {
        Ingredient {
            id: self.id,
            name: self.name.clone(),
            amount: self.amount,
            unit: self.unit,
        }
    }
}

impl Default for IngredientDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-rule outcome of the medley submission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionCheck {
    /// Name is non-blank and unique among sibling medleys (or exempt).
    pub name_ok: bool,
    pub destination_ok: bool,
    /// `maturity > 0`.
    pub maturity_ok: bool,
    pub has_ingredients: bool,
    /// Every row has a non-blank name and `amount > 0`.
    pub ingredients_complete: bool,
    /// Ingredient names are pairwise distinct (exact match).
    pub ingredient_names_distinct: bool,
    /// No two rows share an id; merge-on-save keys rows by id.
    pub ingredient_ids_distinct: bool,
}

impl SubmissionCheck {
    pub fn is_submittable(&self) -> bool {
        self.name_ok
            && self.destination_ok
            && self.maturity_ok
            && self.has_ingredients
            && self.ingredients_complete
            && self.ingredient_names_distinct
            && self.ingredient_ids_distinct
    }
}

/// Draft of a medley being added or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct MedleyDraft {
    pub name: String,
    pub period: Period,
    pub status: Status,
    pub update: String,
    pub destination: String,
    pub maturity: u32,
    pub conclusion: String,
    pub ingredients: Vec<IngredientDraft>,
}

impl MedleyDraft {
    /// Empty add-flow draft with default enum values.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            period: Period::FALLBACK,
            status: Status::FALLBACK,
            update: String::new(),
            destination: String::new(),
            maturity: 0,
            conclusion: String::new(),
            ingredients: Vec::new(),
        }
    }

    /// Edit-flow draft seeded from a persisted medley.
    pub fn from_medley(medley: &Medley) -> Self {
        Self {
            name: medley.name.clone(),
            period: medley.period,
            status: medley.status,
            update: medley.update.clone(),
            destination: medley.destination.clone(),
            maturity: medley.maturity,
            conclusion: medley.conclusion.clone(),
            ingredients: medley
                .ingredients
                .iter()
                .map(IngredientDraft::from_ingredient)
                .collect(),
        }
    }

    /// Appends an empty ingredient row and returns its id.
    pub fn add_ingredient(&mut self) -> IngredientId {
        let row = IngredientDraft::new();
        let id = row.id;
        self.ingredients.push(row);
        id
    }

    /// Removes the row with `id`. Returns `false` when no row matched.
    pub fn remove_ingredient(&mut self, id: IngredientId) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|row| row.id != id);
        self.ingredients.len() != before
    }

    pub fn ingredient_mut(&mut self, id: IngredientId) -> Option<&mut IngredientDraft> {
        self.ingredients.iter_mut().find(|row| row.id == id)
    }

    /// Sets the unit of the row with `id`. Returns `false` when no row matched.
    pub fn set_ingredient_unit(&mut self, id: IngredientId, unit: Unit) -> bool {
        match self.ingredient_mut(id) {
            Some(row) => {
                row.unit = unit;
                true
            }
            None => false,
        }
    }

    pub fn ingredients_complete(&self) -> bool {
        self.ingredients.iter().all(IngredientDraft::is_complete)
    }

    pub fn ingredient_names_distinct(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.ingredients.len());
        self.ingredients.iter().all(|row| seen.insert(row.name.as_str()))
    }

    pub fn ingredient_ids_distinct(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.ingredients.len());
        self.ingredients.iter().all(|row| seen.insert(row.id))
    }

    /// "Add ingredient" state: only once every existing row is complete.
    pub fn can_add_ingredient(&self) -> bool {
        !self.name.trim().is_empty()
            && self.ingredients_complete()
            && self.ingredient_names_distinct()
    }

    /// Evaluates every submission rule.
    ///
    /// `sibling_names` are the other medley names under the same scenting;
    /// `exemption` is the medley's current name in the edit flow.
    pub fn check<S: AsRef<str>>(
        &self,
        sibling_names: &[S],
        exemption: Option<&str>,
    ) -> SubmissionCheck {
        SubmissionCheck {
            name_ok: is_submittable(&self.name, sibling_names, exemption),
            destination_ok: !self.destination.trim().is_empty(),
            maturity_ok: self.maturity > 0,
            has_ingredients: !self.ingredients.is_empty(),
            ingredients_complete: self.ingredients_complete(),
            ingredient_names_distinct: self.ingredient_names_distinct(),
            ingredient_ids_distinct: self.ingredient_ids_distinct(),
        }
    }

    /// Copies scalar fields onto `medley`. Ingredients are merged separately.
    pub fn apply_fields(&self, medley: &mut Medley) {
        medley.name = self.name.clone();
        medley.period = self.period;
        medley.status = self.status;
        medley.update = self.update.clone();
        medley.destination = self.destination.clone();
        medley.maturity = self.maturity;
        medley.conclusion = self.conclusion.clone();
    }

    /// Ingredient rows as entities, keeping draft ids.
    pub fn ingredient_rows(&self) -> Vec<Ingredient> {
        self.ingredients
            .iter()
            .map(IngredientDraft::to_ingredient)
            .collect()
    }
}

impl Default for MedleyDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{IngredientDraft, MedleyDraft};
    use crate::model::codec::{Period, Status, Unit};
    use crate::model::ingredient::Ingredient;
    use crate::model::medley::Medley;
    use uuid::Uuid;

    fn row(name: &str, amount: f64) -> IngredientDraft {
        IngredientDraft {
            name: name.to_string(),
            amount,
            ..IngredientDraft::new()
        }
    }

    fn valid_draft() -> MedleyDraft {
        MedleyDraft {
            name: "Orange & Fennel #1".to_string(),
            destination: "Jar".to_string(),
            maturity: 14,
            ingredients: vec![row("Fennel", 2.0), row("Orange", 3.0)],
            ..MedleyDraft::new()
        }
    }

    const NO_SIBLINGS: [&str; 0] = [];

    #[test]
    fn valid_draft_is_submittable() {
        let check = valid_draft().check(&NO_SIBLINGS, None);
        assert!(check.is_submittable(), "{check:?}");
    }

    #[test]
    fn empty_ingredient_list_blocks_submission() {
        let mut draft = valid_draft();
        draft.ingredients.clear();
        let check = draft.check(&NO_SIBLINGS, None);
        assert!(!check.has_ingredients);
        assert!(check.ingredients_complete);
        assert!(!check.is_submittable());
    }

    #[test]
    fn zero_maturity_blocks_submission() {
        let draft = MedleyDraft {
            name: "Test".to_string(),
            destination: "Jar".to_string(),
            maturity: 0,
            ingredients: vec![row("Fennel", 1.0)],
            ..MedleyDraft::new()
        };
        let check = draft.check(&NO_SIBLINGS, None);
        assert!(!check.maturity_ok);
        assert!(check.name_ok && check.destination_ok && check.has_ingredients);
        assert!(!check.is_submittable());
    }

    #[test]
    fn blank_destination_and_incomplete_rows_block_submission() {
        let mut draft = valid_draft();
        draft.destination = "  ".to_string();
        assert!(!draft.check(&NO_SIBLINGS, None).destination_ok);

        let mut draft = valid_draft();
        draft.ingredients.push(row("Nutmeg", 0.0));
        assert!(!draft.check(&NO_SIBLINGS, None).ingredients_complete);

        let mut draft = valid_draft();
        draft.ingredients.push(row("", 1.0));
        assert!(!draft.check(&NO_SIBLINGS, None).is_submittable());
    }

    #[test]
    fn duplicate_ingredient_names_block_submission() {
        let mut draft = valid_draft();
        draft.ingredients.push(row("Fennel", 1.0));
        let check = draft.check(&NO_SIBLINGS, None);
        assert!(!check.ingredient_names_distinct);
        assert!(!check.is_submittable());
        assert!(!draft.can_add_ingredient());
    }

    #[test]
    fn shared_row_ids_block_submission() {
        let mut draft = valid_draft();
        let mut twin = row("Nutmeg", 1.0);
        twin.id = draft.ingredients[0].id;
        draft.ingredients.push(twin);

        let check = draft.check(&NO_SIBLINGS, None);
        assert!(check.ingredient_names_distinct && check.ingredients_complete);
        assert!(!check.ingredient_ids_distinct);
        assert!(!check.is_submittable());
    }

    #[test]
    fn sibling_name_collision_honours_exemption() {
        let siblings = ["Orange & Fennel #1".to_string(), "Cedar".to_string()];
        let draft = valid_draft();
        assert!(!draft.check(&siblings, None).name_ok);
        assert!(draft.check(&siblings, Some("Orange & Fennel #1")).name_ok);
    }

    #[test]
    fn rows_are_removed_by_identity() {
        let mut draft = MedleyDraft::new();
        let first = draft.add_ingredient();
        let second = draft.add_ingredient();

        assert!(draft.remove_ingredient(first));
        assert!(!draft.remove_ingredient(first));
        assert_eq!(draft.ingredients.len(), 1);
        assert_eq!(draft.ingredients[0].id, second);
        assert!(!draft.remove_ingredient(Uuid::new_v4()));
    }

    #[test]
    fn unit_is_set_by_identity() {
        let mut draft = MedleyDraft::new();
        let first = draft.add_ingredient();
        let second = draft.add_ingredient();

        assert!(draft.set_ingredient_unit(second, Unit::Cup));
        assert_eq!(draft.ingredients[0].id, first);
        assert_eq!(draft.ingredients[0].unit, Unit::Pipette);
        assert_eq!(draft.ingredients[1].unit, Unit::Cup);
    }

    #[test]
    fn add_ingredient_requires_name_and_complete_rows() {
        let mut draft = MedleyDraft::new();
        assert!(!draft.can_add_ingredient());

        draft.name = "   ".to_string();
        assert!(!draft.can_add_ingredient());

        draft.name = "Test".to_string();
        assert!(draft.can_add_ingredient());

        let id = draft.add_ingredient();
        assert!(!draft.can_add_ingredient());

        let entry = draft.ingredient_mut(id).unwrap();
        entry.name = "Fennel".to_string();
        entry.amount = 2.0;
        assert!(draft.can_add_ingredient());
    }

    #[test]
    fn edit_draft_keeps_persisted_ids_and_fields() {
        let mut medley = Medley::new(Uuid::new_v4());
        medley.name = "Cedar".to_string();
        medley.period = Period::Week;
        medley.status = Status::Pass;
        medley.maturity = 2;
        medley.ingredients = vec![Ingredient::named("Cedar", 5.0, Unit::Millilitre)];

        let draft = MedleyDraft::from_medley(&medley);
        assert_eq!(draft.ingredients[0].id, medley.ingredients[0].id);
        assert_eq!(draft.period, Period::Week);
        assert_eq!(draft.status, Status::Pass);

        let mut copy = Medley::new(medley.scenting_id);
        draft.apply_fields(&mut copy);
        assert_eq!(copy.name, "Cedar");
        assert_eq!(copy.maturity, 2);
        assert_eq!(draft.ingredient_rows(), medley.ingredients);
    }
}
