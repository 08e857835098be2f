//! Connection opening with timing logs.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the database at `path` with the schema applied.
///
/// Missing parent directories are created first.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    open_logged("file", || Connection::open(path))
}

/// Fresh private database, used by tests and throwaway sessions.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

fn open_logged(
    target: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect().map_err(DbError::from).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let report = apply_migrations(&mut conn)?;
        Ok((conn, report))
    });
    let elapsed_ms = started_at.elapsed().as_millis();

    match result {
        Ok((conn, report)) => {
            info!(
                "event=db_open module=db status=ok target={} schema_version={} migrated={} duration_ms={}",
                target,
                report.to,
                report.upgraded(),
                elapsed_ms
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error target={} duration_ms={} error={}",
                target, elapsed_ms, err
            );
            Err(err)
        }
    }
}
