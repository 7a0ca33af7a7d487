//! Scenting repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Listing returns scentings ordered `name ASC, id ASC`, each hydrated with
//!   its medleys in the same order.
//! - Removing a scenting cascades to medleys; callers gate on `count_medleys`.

use crate::model::scenting::{Scenting, ScentingId};
use crate::repo::medley_repo::load_medleys;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for scenting CRUD operations.
pub trait ScentingRepository {
    fn create_scenting(&self, scenting: &Scenting) -> RepoResult<ScentingId>;
    fn rename_scenting(&self, id: ScentingId, name: &str) -> RepoResult<()>;
    /// Loads one scenting including its medley subtree.
    fn get_scenting(&self, id: ScentingId) -> RepoResult<Option<Scenting>>;
    fn list_scentings(&self) -> RepoResult<Vec<Scenting>>;
    /// Scenting names only, sorted like `list_scentings`.
    fn list_scenting_names(&self) -> RepoResult<Vec<String>>;
    fn delete_scenting(&self, id: ScentingId) -> RepoResult<()>;
    fn count_medleys(&self, id: ScentingId) -> RepoResult<u64>;
}

/// SQLite-backed scenting repository.
pub struct SqliteScentingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScentingRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ScentingRepository for SqliteScentingRepository<'_> {
    fn create_scenting(&self, scenting: &Scenting) -> RepoResult<ScentingId> {
        scenting.validate()?;
        self.conn.execute(
            "INSERT INTO scentings (id, name) VALUES (?1, ?2);",
            params![scenting.id.to_string(), scenting.name.as_str()],
        )?;
        Ok(scenting.id)
    }

    fn rename_scenting(&self, id: ScentingId, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE scentings
             SET name = ?2, updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), name],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound("scenting", id));
        }
        Ok(())
    }

    fn get_scenting(&self, id: ScentingId) -> RepoResult<Option<Scenting>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM scentings WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let id_text: String = row.get("id")?;
        let mut scenting = Scenting::with_id(
            parse_uuid(&id_text, "scentings.id")?,
            row.get::<_, String>("name")?,
        );
        scenting.medleys = load_medleys(self.conn, Some(scenting.id))?;
        Ok(Some(scenting))
    }

    fn list_scentings(&self) -> RepoResult<Vec<Scenting>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM scentings ORDER BY name ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut scentings = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            scentings.push(Scenting::with_id(
                parse_uuid(&id_text, "scentings.id")?,
                row.get::<_, String>("name")?,
            ));
        }
        for scenting in &mut scentings {
            scenting.medleys = load_medleys(self.conn, Some(scenting.id))?;
        }
        Ok(scentings)
    }

    fn list_scenting_names(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM scentings ORDER BY name ASC, id ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn delete_scenting(&self, id: ScentingId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM scentings WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound("scenting", id));
        }
        Ok(())
    }

    fn count_medleys(&self, id: ScentingId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM medleys WHERE scenting_id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative medley count `{count}`")))
    }
}
