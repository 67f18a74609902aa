//! Bicycle repository contracts, SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Persist the fleet keyed by `bicycle_id` in the `bicycles` table.
//!
//! # Invariants
//! - `replace_bicycle` overwrites every mutable field of the stored record;
//!   `created_at` is write-once and `updated_at` is stamped by the store.
//! - Zero rows changed on replace surfaces as `NotFound`, never silence.

use crate::model::bicycle::Bicycle;
use crate::model::now_epoch_ms;
use crate::repo::{bool_to_int, ensure_migrated, ensure_table, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;

const BICYCLE_SELECT_SQL: &str = "SELECT
    bicycle_id,
    type,
    is_available,
    renter_id,
    created_at,
    updated_at
FROM bicycles";

const BICYCLE_COLUMNS: &[&str] = &[
    "bicycle_id",
    "type",
    "is_available",
    "renter_id",
    "created_at",
    "updated_at",
];

/// Repository interface for fleet storage.
pub trait BicycleRepository {
    /// Persists one new bicycle exactly as supplied and returns its id.
    fn create_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<String>;
    /// Gets one bicycle by id.
    fn get_bicycle(&self, bicycle_id: &str) -> RepoResult<Option<Bicycle>>;
    /// Overwrites the record stored under `bicycle.bicycle_id`.
    fn replace_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<()>;
}

impl<R: BicycleRepository + ?Sized> BicycleRepository for &mut R {
    fn create_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<String> {
        (**self).create_bicycle(bicycle)
    }

    fn get_bicycle(&self, bicycle_id: &str) -> RepoResult<Option<Bicycle>> {
        (**self).get_bicycle(bicycle_id)
    }

    fn replace_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<()> {
        (**self).replace_bicycle(bicycle)
    }
}

/// SQLite-backed bicycle repository.
pub struct SqliteBicycleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBicycleRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        ensure_table(conn, "bicycles", BICYCLE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl BicycleRepository for SqliteBicycleRepository<'_> {
    fn create_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<String> {
        bicycle.validate()?;

        self.conn.execute(
            "INSERT INTO bicycles (
                bicycle_id,
                type,
                is_available,
                renter_id,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                bicycle.bicycle_id.as_str(),
                bicycle.kind.as_str(),
                bool_to_int(bicycle.is_available),
                bicycle.renter_id.as_str(),
                bicycle.created_at,
                bicycle.updated_at,
            ],
        )?;

        Ok(bicycle.bicycle_id.clone())
    }

    fn get_bicycle(&self, bicycle_id: &str) -> RepoResult<Option<Bicycle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BICYCLE_SELECT_SQL} WHERE bicycle_id = ?1;"))?;

        let mut rows = stmt.query([bicycle_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_bicycle_row(row)?));
        }

        Ok(None)
    }

    fn replace_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<()> {
        bicycle.validate()?;

        let changed = self.conn.execute(
            "UPDATE bicycles
             SET
                type = ?2,
                is_available = ?3,
                renter_id = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE bicycle_id = ?1;",
            params![
                bicycle.bicycle_id.as_str(),
                bicycle.kind.as_str(),
                bool_to_int(bicycle.is_available),
                bicycle.renter_id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "bicycle",
                id: bicycle.bicycle_id.clone(),
            });
        }

        Ok(())
    }
}

/// In-memory bicycle repository over an ordered map. Honors the same
/// contract as the SQLite implementation, including `created_at`
/// preservation and `updated_at` stamping on replace.
#[derive(Debug, Default)]
pub struct MemoryBicycleRepository {
    rows: BTreeMap<String, Bicycle>,
}

impl MemoryBicycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bicycles.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl BicycleRepository for MemoryBicycleRepository {
    fn create_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<String> {
        bicycle.validate()?;
        self.rows.insert(bicycle.bicycle_id.clone(), bicycle.clone());
        Ok(bicycle.bicycle_id.clone())
    }

    fn get_bicycle(&self, bicycle_id: &str) -> RepoResult<Option<Bicycle>> {
        Ok(self.rows.get(bicycle_id).cloned())
    }

    fn replace_bicycle(&mut self, bicycle: &Bicycle) -> RepoResult<()> {
        bicycle.validate()?;

        match self.rows.get_mut(&bicycle.bicycle_id) {
            Some(stored) => {
                let created_at = stored.created_at;
                *stored = bicycle.clone();
                stored.created_at = created_at;
                stored.updated_at = Some(now_epoch_ms());
                Ok(())
            }
            None => Err(RepoError::NotFound {
                entity: "bicycle",
                id: bicycle.bicycle_id.clone(),
            }),
        }
    }
}

fn parse_bicycle_row(row: &Row<'_>) -> RepoResult<Bicycle> {
    let is_available = match row.get::<_, i64>("is_available")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_available value `{other}` in bicycles.is_available"
            )));
        }
    };

    let bicycle = Bicycle {
        bicycle_id: row.get("bicycle_id")?,
        kind: row.get("type")?,
        is_available,
        renter_id: row.get("renter_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    bicycle.validate()?;
    Ok(bicycle)
}
