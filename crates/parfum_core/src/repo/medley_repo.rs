//! Medley/ingredient repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist medleys together with their exclusively owned ingredients.
//! - Apply ingredient merge plans atomically with the medley field update.
//!
//! # Invariants
//! - Enum columns are written with `PersistedEnum::encode` and read with the
//!   total `decode`, so unknown strings never fail hydration.
//! - Ingredient writes are always scoped by `medley_id`.
//! - Deleting a medley cascades to its ingredients via foreign keys.

use crate::model::codec::{Period, PersistedEnum, Status, Unit};
use crate::model::ingredient::Ingredient;
use crate::model::ingredient_merge::IngredientMergePlan;
use crate::model::medley::{Medley, MedleyId};
use crate::model::scenting::ScentingId;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const MEDLEY_SELECT_SQL: &str = "SELECT
    id,
    scenting_id,
    name,
    created_at,
    period,
    status,
    update_note,
    destination,
    maturity,
    conclusion
FROM medleys";

/// Repository interface for medley CRUD operations.
pub trait MedleyRepository {
    /// Inserts the medley and all of its ingredients.
    fn create_medley(&self, medley: &Medley) -> RepoResult<MedleyId>;
    /// Updates medley fields and applies the ingredient merge plan.
    fn update_medley(&self, medley: &Medley, plan: &IngredientMergePlan) -> RepoResult<()>;
    /// Loads one medley with its ingredients.
    fn get_medley(&self, id: MedleyId) -> RepoResult<Option<Medley>>;
    /// Lists medleys under one scenting, or all medleys when `None`.
    fn list_medleys(&self, scenting_id: Option<ScentingId>) -> RepoResult<Vec<Medley>>;
    /// Medley names under one scenting, without hydrating ingredients.
    fn list_medley_names(&self, scenting_id: ScentingId) -> RepoResult<Vec<String>>;
    /// Deletes one medley and, by cascade, its ingredients.
    fn delete_medley(&self, id: MedleyId) -> RepoResult<()>;
    /// Returns whether the parent scenting row exists.
    fn scenting_exists(&self, scenting_id: ScentingId) -> RepoResult<bool>;
}

/// SQLite-backed medley repository.
pub struct SqliteMedleyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedleyRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MedleyRepository for SqliteMedleyRepository<'_> {
    fn create_medley(&self, medley: &Medley) -> RepoResult<MedleyId> {
        medley.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO medleys (
                id,
                scenting_id,
                name,
                created_at,
                period,
                status,
                update_note,
                destination,
                maturity,
                conclusion
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                medley.id.to_string(),
                medley.scenting_id.to_string(),
                medley.name.as_str(),
                medley.created_at,
                medley.period.encode(),
                medley.status.encode(),
                medley.update.as_str(),
                medley.destination.as_str(),
                medley.maturity,
                medley.conclusion.as_str(),
            ],
        )?;
        for ingredient in &medley.ingredients {
            insert_ingredient(&tx, medley.id, ingredient)?;
        }
        tx.commit()?;

        Ok(medley.id)
    }

    fn update_medley(&self, medley: &Medley, plan: &IngredientMergePlan) -> RepoResult<()> {
        medley.validate()?;
        for ingredient in plan.updates.iter().chain(plan.inserts.iter()) {
            ingredient.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE medleys
             SET
                name = ?2,
                period = ?3,
                status = ?4,
                update_note = ?5,
                destination = ?6,
                maturity = ?7,
                conclusion = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                medley.id.to_string(),
                medley.name.as_str(),
                medley.period.encode(),
                medley.status.encode(),
                medley.update.as_str(),
                medley.destination.as_str(),
                medley.maturity,
                medley.conclusion.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound("medley", medley.id));
        }

        for ingredient in &plan.updates {
            let changed = tx.execute(
                "UPDATE ingredients
                 SET name = ?3, amount = ?4, unit = ?5
                 WHERE id = ?1 AND medley_id = ?2;",
                params![
                    ingredient.id.to_string(),
                    medley.id.to_string(),
                    ingredient.name.as_str(),
                    ingredient.amount,
                    ingredient.unit.encode(),
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound("ingredient", ingredient.id));
            }
        }
        for ingredient in &plan.inserts {
            insert_ingredient(&tx, medley.id, ingredient)?;
        }
        for id in &plan.deletes {
            tx.execute(
                "DELETE FROM ingredients WHERE id = ?1 AND medley_id = ?2;",
                params![id.to_string(), medley.id.to_string()],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_medley(&self, id: MedleyId) -> RepoResult<Option<Medley>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEDLEY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut medley = parse_medley_row(row)?;
            medley.ingredients = load_ingredients(self.conn, medley.id)?;
            medley.validate()?;
            return Ok(Some(medley));
        }
        Ok(None)
    }

    fn list_medleys(&self, scenting_id: Option<ScentingId>) -> RepoResult<Vec<Medley>> {
        load_medleys(self.conn, scenting_id)
    }

    fn list_medley_names(&self, scenting_id: ScentingId) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM medleys WHERE scenting_id = ?1 ORDER BY name ASC, id ASC;",
        )?;
        let names = stmt
            .query_map([scenting_id.to_string()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn delete_medley(&self, id: MedleyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM medleys WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound("medley", id));
        }
        Ok(())
    }

    fn scenting_exists(&self, scenting_id: ScentingId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM scentings WHERE id = ?1);",
            [scenting_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists != 0)
    }
}

/// Loads hydrated medleys ordered by name; shared with scenting hydration.
pub(crate) fn load_medleys(
    conn: &Connection,
    scenting_id: Option<ScentingId>,
) -> RepoResult<Vec<Medley>> {
    let mut medleys = Vec::new();
    match scenting_id {
        Some(scenting_id) => {
            let mut stmt = conn.prepare(&format!(
                "{MEDLEY_SELECT_SQL} WHERE scenting_id = ?1 ORDER BY name ASC, id ASC;"
            ))?;
            let mut rows = stmt.query([scenting_id.to_string()])?;
            while let Some(row) = rows.next()? {
                medleys.push(parse_medley_row(row)?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "{MEDLEY_SELECT_SQL} ORDER BY name ASC, id ASC;"
            ))?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                medleys.push(parse_medley_row(row)?);
            }
        }
    }

    for medley in &mut medleys {
        medley.ingredients = load_ingredients(conn, medley.id)?;
        medley.validate()?;
    }
    Ok(medleys)
}

fn load_ingredients(conn: &Connection, medley_id: MedleyId) -> RepoResult<Vec<Ingredient>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, unit
         FROM ingredients
         WHERE medley_id = ?1
         ORDER BY name ASC, id ASC;",
    )?;
    let mut rows = stmt.query([medley_id.to_string()])?;
    let mut ingredients = Vec::new();
    while let Some(row) = rows.next()? {
        let id_text: String = row.get("id")?;
        let unit_text: String = row.get("unit")?;
        ingredients.push(Ingredient {
            id: parse_uuid(&id_text, "ingredients.id")?,
            name: row.get("name")?,
            amount: row.get("amount")?,
            unit: Unit::decode(&unit_text),
        });
    }
    Ok(ingredients)
}

fn insert_ingredient(
    tx: &Transaction<'_>,
    medley_id: MedleyId,
    ingredient: &Ingredient,
) -> RepoResult<()> {
    ingredient.validate()?;
    tx.execute(
        "INSERT INTO ingredients (id, medley_id, name, amount, unit)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            ingredient.id.to_string(),
            medley_id.to_string(),
            ingredient.name.as_str(),
            ingredient.amount,
            ingredient.unit.encode(),
        ],
    )?;
    Ok(())
}

fn parse_medley_row(row: &Row<'_>) -> RepoResult<Medley> {
    let id_text: String = row.get("id")?;
    let scenting_text: String = row.get("scenting_id")?;
    let period_text: String = row.get("period")?;
    let status_text: String = row.get("status")?;
    let maturity_raw: i64 = row.get("maturity")?;
    let maturity = u32::try_from(maturity_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid maturity value `{maturity_raw}` in medleys.maturity"
        ))
    })?;

    Ok(Medley {
        id: parse_uuid(&id_text, "medleys.id")?,
        scenting_id: parse_uuid(&scenting_text, "medleys.scenting_id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        period: Period::decode(&period_text),
        status: Status::decode(&status_text),
        update: row.get("update_note")?,
        destination: row.get("destination")?,
        maturity,
        conclusion: row.get("conclusion")?,
        ingredients: Vec::new(),
    })
}
