//! Migration trait and registry.

use rusqlite::{Connection, Transaction};

use crate::error::AppError;

/// One schema step, applied inside its own transaction.
pub trait Migration {
    fn id(&self) -> &'static str;
    fn version(&self) -> u32;
    fn description(&self) -> &'static str;
    fn up(&self, tx: &Transaction<'_>) -> Result<(), AppError>;
}

pub struct Register {
    migrations: Vec<Box<dyn Migration>>,
}

impl Register {
    pub fn new() -> Self {
        Self {
            migrations: Vec::new(),
        }
    }

    pub fn register(mut self, migration: impl Migration + 'static) -> Self {
        self.migrations.push(Box::new(migration));
        self
    }

    /// Run all pending migrations above `current_version`.
    /// Each migration runs in its own transaction together with the
    /// `user_version` bump, so a failed step leaves the version untouched.
    /// Returns (new_version, applied_migration_ids).
    pub fn run_pending(
        &self,
        conn: &mut Connection,
        current_version: u32,
    ) -> Result<(u32, Vec<String>), AppError> {
        let mut applied = vec![];
        let mut new_version = current_version;

        for migration in &self.migrations {
            if migration.version() <= current_version {
                continue;
            }

            tracing::info!(
                "Applying migration {} (v{}): {}",
                migration.id(),
                migration.version(),
                migration.description()
            );

            let tx = conn.transaction()?;
            if let Err(e) = migration.up(&tx) {
                tracing::error!("Migration {} failed: {}", migration.id(), e);
                // Dropping the transaction rolls it back.
                return Err(AppError::Migration {
                    id: migration.id().to_string(),
                    message: e.to_string(),
                });
            }
            tx.pragma_update(None, "user_version", migration.version())?;
            tx.commit()?;

            new_version = migration.version();
            applied.push(migration.id().to_string());
        }

        Ok((new_version, applied))
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}
