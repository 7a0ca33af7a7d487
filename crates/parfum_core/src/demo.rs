//! Demo tree used by the CLI smoke run and tests.

use crate::model::codec::{Period, Status, Unit};
use crate::model::ingredient::Ingredient;
use crate::model::medley::Medley;
use crate::model::scenting::Scenting;
use crate::repo::medley_repo::{MedleyRepository, SqliteMedleyRepository};
use crate::repo::scenting_repo::{ScentingRepository, SqliteScentingRepository};
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;
use uuid::Uuid;

pub const DEMO_SCENTING_NAME: &str = "Dish Soap";
pub const DEMO_MEDLEY_NAME: &str = "Orange & Fennel #1";

/// 2023-07-01T12:00:00Z.
const DEMO_CREATED_AT_MS: i64 = 1_688_212_800_000;

/// Inserts the "Dish Soap" scenting with one three-ingredient medley and
/// returns it hydrated.
pub fn seed_demo(conn: &Connection) -> RepoResult<Scenting> {
    let scentings = SqliteScentingRepository::try_new(conn)?;
    let medleys = SqliteMedleyRepository::try_new(conn)?;

    let scenting = Scenting::new(DEMO_SCENTING_NAME);
    scentings.create_scenting(&scenting)?;

    let mut medley = Medley::with_id(Uuid::new_v4(), scenting.id, DEMO_CREATED_AT_MS);
    medley.name = DEMO_MEDLEY_NAME.to_string();
    medley.period = Period::Day;
    medley.status = Status::Tbd;
    medley.update = "Reads more like a roast glaze than a washing-up liquid.".to_string();
    medley.destination = "Sealed glass jar.".to_string();
    medley.maturity = 14;
    medley.conclusion = "Powdered nutmeg was past its best; retest with fresh.".to_string();
    medley.ingredients = vec![
        Ingredient::named("Fennel", 2.0, Unit::Pipette),
        Ingredient::named("Orange", 3.0, Unit::Pipette),
        Ingredient::named("Nutmeg", 1.0, Unit::Gram),
    ];
    medleys.create_medley(&medley)?;

    scentings
        .get_scenting(scenting.id)?
        .ok_or(RepoError::NotFound("scenting", scenting.id))
}

#[cfg(test)]
mod tests {
    use super::{seed_demo, DEMO_MEDLEY_NAME, DEMO_SCENTING_NAME};
    use crate::db::open_db_in_memory;
    use crate::model::codec::{Period, Unit};

    #[test]
    fn seeds_one_scenting_with_sorted_ingredients() {
        let conn = open_db_in_memory().expect("open db");
        let scenting = seed_demo(&conn).expect("seed demo");

        assert_eq!(scenting.name, DEMO_SCENTING_NAME);
        assert_eq!(scenting.medleys.len(), 1);
        let medley = &scenting.medleys[0];
        assert_eq!(medley.name, DEMO_MEDLEY_NAME);
        assert_eq!(medley.maturity, 14);
        assert_eq!(medley.period, Period::Day);
        assert_eq!(medley.ingredient_names(), vec!["Fennel", "Nutmeg", "Orange"]);
        assert_eq!(medley.ingredients[1].unit, Unit::Gram);
    }
}
