//! Migration runner with version tracking.

use rusqlite::Connection;

use crate::error::AppError;
use crate::migrations::create_register;

/// Result of running migrations.
#[derive(Debug, Clone)]
pub struct MigrationResult {
    /// Schema version before migrations ran.
    pub previous_version: u32,
    /// Schema version after migrations ran.
    pub current_version: u32,
    /// List of migration IDs that were applied.
    pub applied_migrations: Vec<String>,
}

/// Run all pending migrations.
pub fn run_migrations(conn: &mut Connection) -> Result<MigrationResult, AppError> {
    let previous_version = schema_version(conn)?;
    let register = create_register();

    let (current_version, applied_migrations) = register.run_pending(conn, previous_version)?;

    Ok(MigrationResult {
        previous_version,
        current_version,
        applied_migrations,
    })
}

/// Current schema version (`PRAGMA user_version`).
pub fn schema_version(conn: &Connection) -> Result<u32, AppError> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version.max(0) as u32)
}
