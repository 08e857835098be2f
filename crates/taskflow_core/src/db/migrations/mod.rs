//! Ordered schema scripts and the runner that applies them.
//!
//! Scripts only ever add tables or columns. Stored blobs are never
//! rewritten by a migration.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, TransactionBehavior};

/// Scripts indexed by position: entry `i` upgrades the schema to `i + 1`.
const SCRIPTS: &[&str] = &[include_str!("0001_kv_store.sql")];

/// Schema version a fully migrated database reports.
pub fn latest_version() -> u32 {
    SCRIPTS.len() as u32
}

/// Versions before and after a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from: u32,
    pub to: u32,
}

impl MigrationReport {
    pub fn upgraded(&self) -> bool {
        self.from != self.to
    }
}

/// Upgrades `conn` to [`latest_version`] inside one immediate transaction.
///
/// # Errors
/// - `SchemaTooNew` when the file reports a version above this build's.
/// - `Migration` naming the first script that failed; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let to = latest_version();
    if from > to {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported: to,
        });
    }
    if from == to {
        return Ok(MigrationReport { from, to });
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for (index, script) in SCRIPTS.iter().enumerate().skip(from as usize) {
        let version = index as u32 + 1;
        tx.execute_batch(script)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration { version, source })?;
        debug!("event=db_migrate_step module=db status=ok version={version}");
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(MigrationReport { from, to })
}
