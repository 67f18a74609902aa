//! Rental-ledger repository contracts, SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Persist rental records keyed by `renter_id` in the `renters` table.
//!
//! # Invariants
//! - The ledger is append-only: the contract exposes no update or delete
//!   path, so a persisted record never changes.

use crate::model::renter::Renter;
use crate::repo::{ensure_migrated, ensure_table, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;

const RENTER_SELECT_SQL: &str = "SELECT
    renter_id,
    renter_user_id,
    rent_time,
    bicycle_id
FROM renters";

const RENTER_COLUMNS: &[&str] = &["renter_id", "renter_user_id", "rent_time", "bicycle_id"];

/// Repository interface for the rental ledger.
pub trait RenterRepository {
    /// Appends one new rental record and returns its id.
    fn append_renter(&mut self, renter: &Renter) -> RepoResult<String>;
    /// Gets one rental record by id.
    fn get_renter(&self, renter_id: &str) -> RepoResult<Option<Renter>>;
}

impl<R: RenterRepository + ?Sized> RenterRepository for &mut R {
    fn append_renter(&mut self, renter: &Renter) -> RepoResult<String> {
        (**self).append_renter(renter)
    }

    fn get_renter(&self, renter_id: &str) -> RepoResult<Option<Renter>> {
        (**self).get_renter(renter_id)
    }
}

/// SQLite-backed rental-ledger repository.
pub struct SqliteRenterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRenterRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        ensure_table(conn, "renters", RENTER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl RenterRepository for SqliteRenterRepository<'_> {
    fn append_renter(&mut self, renter: &Renter) -> RepoResult<String> {
        renter.validate()?;

        self.conn.execute(
            "INSERT INTO renters (
                renter_id,
                renter_user_id,
                rent_time,
                bicycle_id
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                renter.renter_id.as_str(),
                renter.renter_user_id.as_str(),
                renter.rent_time.as_str(),
                renter.bicycle_id.as_str(),
            ],
        )?;

        Ok(renter.renter_id.clone())
    }

    fn get_renter(&self, renter_id: &str) -> RepoResult<Option<Renter>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RENTER_SELECT_SQL} WHERE renter_id = ?1;"))?;

        let mut rows = stmt.query([renter_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_renter_row(row)?));
        }

        Ok(None)
    }
}

/// In-memory rental-ledger repository over an ordered map.
#[derive(Debug, Default)]
pub struct MemoryRenterRepository {
    rows: BTreeMap<String, Renter>,
}

impl MemoryRenterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RenterRepository for MemoryRenterRepository {
    fn append_renter(&mut self, renter: &Renter) -> RepoResult<String> {
        renter.validate()?;
        self.rows.insert(renter.renter_id.clone(), renter.clone());
        Ok(renter.renter_id.clone())
    }

    fn get_renter(&self, renter_id: &str) -> RepoResult<Option<Renter>> {
        Ok(self.rows.get(renter_id).cloned())
    }
}

fn parse_renter_row(row: &Row<'_>) -> RepoResult<Renter> {
    let renter = Renter {
        renter_id: row.get("renter_id")?,
        renter_user_id: row.get("renter_user_id")?,
        rent_time: row.get("rent_time")?,
        bicycle_id: row.get("bicycle_id")?,
    };
    renter.validate()?;
    Ok(renter)
}
