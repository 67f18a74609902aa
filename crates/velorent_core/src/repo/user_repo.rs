//! User repository contracts, SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Persist registered users keyed by `user_id` in the `users` table.
//!
//! # Invariants
//! - Users are write-once: the contract exposes no update or delete path.
//! - `create_user` never overwrites silently on SQLite; a duplicate id is a
//!   primary-key violation surfaced as a `Db` error.

use crate::model::user::User;
use crate::repo::{ensure_migrated, ensure_table, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    user_name,
    user_address,
    user_age,
    created_at,
    updated_at
FROM users";

const USER_COLUMNS: &[&str] = &[
    "user_id",
    "user_name",
    "user_address",
    "user_age",
    "created_at",
    "updated_at",
];

/// Repository interface for user storage.
pub trait UserRepository {
    /// Persists one new user and returns its id.
    fn create_user(&mut self, user: &User) -> RepoResult<String>;
    /// Gets one user by id.
    fn get_user(&self, user_id: &str) -> RepoResult<Option<User>>;
}

impl<R: UserRepository + ?Sized> UserRepository for &mut R {
    fn create_user(&mut self, user: &User) -> RepoResult<String> {
        (**self).create_user(user)
    }

    fn get_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        (**self).get_user(user_id)
    }
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        ensure_table(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&mut self, user: &User) -> RepoResult<String> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (
                user_id,
                user_name,
                user_address,
                user_age,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                user.user_id.as_str(),
                user.user_name.as_str(),
                user.user_address.as_str(),
                user.user_age.as_str(),
                user.created_at,
                user.updated_at,
            ],
        )?;

        Ok(user.user_id.clone())
    }

    fn get_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;

        let mut rows = stmt.query([user_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }
}

/// In-memory user repository over an ordered map. Honors the same contract
/// as the SQLite implementation, with map-put create semantics: id
/// uniqueness is the id provider's responsibility.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    rows: BTreeMap<String, User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    fn create_user(&mut self, user: &User) -> RepoResult<String> {
        user.validate()?;
        self.rows.insert(user.user_id.clone(), user.clone());
        Ok(user.user_id.clone())
    }

    fn get_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        Ok(self.rows.get(user_id).cloned())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let user = User {
        user_id: row.get("user_id")?,
        user_name: row.get("user_name")?,
        user_address: row.get("user_address")?,
        user_age: row.get("user_age")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    user.validate()?;
    Ok(user)
}
