//! Schema migration registry and executor.
//!
//! # Responsibility
//! - Register schema steps in strictly increasing version order.
//! - Bring a connection to the latest version inside one transaction.
//!
//! # Invariants
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - A database written by a newer build is rejected, never downgraded.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;
use std::cmp::Ordering;

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Latest schema version shipped with this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every migration newer than the connection's current version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;
    let latest = latest_version();

    match current.cmp(&latest) {
        Ordering::Greater => Err(DbError::UnsupportedSchemaVersion {
            found: current,
            supported: latest,
        }),
        Ordering::Equal => Ok(()),
        Ordering::Less => {
            let tx = conn.transaction()?;
            for migration in MIGRATIONS.iter().filter(|step| step.version > current) {
                tx.execute_batch(migration.sql)?;
                tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
                debug!(
                    "event=db_migrate module=db status=ok version={}",
                    migration.version
                );
            }
            tx.commit()?;
            Ok(())
        }
    }
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
