//! Docset search index table.

use rusqlite::{Connection, Transaction};

use crate::error::AppError;
use crate::migrations::Migration;

/// `searchIndex` table and its unique `anchor` index, in the exact shape
/// Dash and Zeal read.
pub struct M001SearchIndex;

impl M001SearchIndex {
    const CREATE_TABLE: &'static str =
        "CREATE TABLE IF NOT EXISTS searchIndex(id INTEGER PRIMARY KEY, name TEXT, type TEXT, path TEXT);";

    // Keeps the oldest row of each (name, type, path) triple.
    const DEDUPLICATE: &'static str = "DELETE FROM searchIndex \
         WHERE id NOT IN (SELECT MIN(id) FROM searchIndex GROUP BY name, type, path)";

    const CREATE_INDEX: &'static str =
        "CREATE UNIQUE INDEX IF NOT EXISTS anchor ON searchIndex (name, type, path);";

    /// Create the table and index if missing.
    ///
    /// A table written by another tool may already hold repeated triples,
    /// which would make the unique index fail; those repeats are removed
    /// first. Returns the number of rows removed.
    pub fn create(conn: &Connection) -> Result<usize, AppError> {
        conn.execute_batch(Self::CREATE_TABLE)?;
        let removed = conn.execute(Self::DEDUPLICATE, [])?;
        conn.execute_batch(Self::CREATE_INDEX)?;
        Ok(removed)
    }
}

impl Migration for M001SearchIndex {
    fn id(&self) -> &'static str {
        "m001_search_index"
    }

    fn version(&self) -> u32 {
        1
    }

    fn description(&self) -> &'static str {
        "searchIndex table with unique (name, type, path) anchor index"
    }

    fn up(&self, tx: &Transaction<'_>) -> Result<(), AppError> {
        let removed = Self::create(tx)?;
        if removed > 0 {
            tracing::warn!("Removed {} duplicated searchIndex rows", removed);
        }
        Ok(())
    }
}
