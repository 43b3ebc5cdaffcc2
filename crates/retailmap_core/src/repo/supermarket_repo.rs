//! Supermarket repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `supermarkets` relation. No joins.
//!
//! # Invariants
//! - Deleting a supermarket still referenced by locations fails with
//!   `ReferentialConflict`; the row is left unchanged.

use crate::model::supermarket::{Supermarket, SupermarketDraft, SupermarketId};
use crate::repo::{
    ensure_connection_ready, map_constraint_err, Entity, RepoError, RepoResult, TableRequirement,
};
use rusqlite::{params, Connection, Row};

const SUPERMARKET_SELECT_SQL: &str = "SELECT id, name FROM supermarkets";

const REQUIRED_SCHEMA: &[TableRequirement] = &[TableRequirement {
    table: "supermarkets",
    columns: &["id", "name"],
}];

/// Repository interface for supermarket CRUD operations.
pub trait SupermarketRepository {
    fn list_all(&self) -> RepoResult<Vec<Supermarket>>;
    /// Inserts the draft and returns the store-assigned identifier.
    fn insert(&self, draft: &SupermarketDraft) -> RepoResult<SupermarketId>;
    /// Fully overwrites the name for the given identifier.
    fn update(&self, id: SupermarketId, draft: &SupermarketDraft) -> RepoResult<()>;
    fn delete(&self, id: SupermarketId) -> RepoResult<()>;
    fn get_by_id(&self, id: SupermarketId) -> RepoResult<Option<Supermarket>>;
}

/// SQLite-backed supermarket repository.
pub struct SqliteSupermarketRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSupermarketRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl SupermarketRepository for SqliteSupermarketRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Supermarket>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUPERMARKET_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut supermarkets = Vec::new();
        while let Some(row) = rows.next()? {
            supermarkets.push(parse_supermarket_row(row)?);
        }
        Ok(supermarkets)
    }

    fn insert(&self, draft: &SupermarketDraft) -> RepoResult<SupermarketId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO supermarkets (name) VALUES (?1);",
                params![draft.name],
            )
            .map_err(|err| map_constraint_err(Entity::Supermarket, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: SupermarketId, draft: &SupermarketDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE supermarkets SET name = ?1 WHERE id = ?2;",
                params![draft.name, id],
            )
            .map_err(|err| map_constraint_err(Entity::Supermarket, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Supermarket,
                id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: SupermarketId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM supermarkets WHERE id = ?1;", params![id])
            .map_err(|err| map_constraint_err(Entity::Supermarket, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Supermarket,
                id,
            });
        }

        Ok(())
    }

    fn get_by_id(&self, id: SupermarketId) -> RepoResult<Option<Supermarket>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUPERMARKET_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_supermarket_row(row)?));
        }
        Ok(None)
    }
}

fn parse_supermarket_row(row: &Row<'_>) -> RepoResult<Supermarket> {
    Ok(Supermarket {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
