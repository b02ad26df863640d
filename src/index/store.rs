//! Search index storage using SQLite.
//!
//! Writes resolved entries into the `searchIndex` table that docset
//! browsers query. Duplicate `(name, type, path)` triples are ignored by the
//! unique `anchor` index rather than rejected.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection, Transaction};

use crate::error::AppError;
use crate::migrations::{run_migrations, schema_version, M001SearchIndex};
use crate::models::{EntryType, ResolvedEntry};

/// Outcome of one [`SearchIndex::write`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Entries handed to the writer.
    pub written: usize,
    /// Rows actually inserted.
    pub inserted: usize,
    /// Entries whose triple was already present.
    pub ignored: usize,
}

/// SQLite-backed docset search index.
pub struct SearchIndex {
    conn: Connection,
}

impl SearchIndex {
    /// Open (or create) the index at the given path and bring its schema up
    /// to date.
    pub fn open(db_path: &Path) -> Result<Self, AppError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// Create an in-memory index (for testing and dry runs).
    pub fn in_memory() -> Result<Self, AppError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(mut conn: Connection) -> Result<Self, AppError> {
        let result = run_migrations(&mut conn)?;
        if !result.applied_migrations.is_empty() {
            tracing::debug!(
                "Schema migrated v{} -> v{}: {:?}",
                result.previous_version,
                result.current_version,
                result.applied_migrations
            );
        }
        Ok(Self { conn })
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> Result<u32, AppError> {
        schema_version(&self.conn)
    }

    /// Drop every row by recreating the table.
    pub fn reset(&mut self) -> Result<(), AppError> {
        let tx = self.conn.transaction()?;
        recreate(&tx)?;
        tx.commit()?;
        tracing::info!("Dropped existing searchIndex entries");
        Ok(())
    }

    /// Insert entries with insert-or-ignore semantics, all inside one
    /// transaction.
    pub fn write<I>(&mut self, entries: I) -> Result<WriteSummary, AppError>
    where
        I: IntoIterator<Item = ResolvedEntry>,
    {
        let tx = self.conn.transaction()?;
        let summary = insert_all(&tx, entries)?;
        tx.commit()?;
        Ok(summary)
    }

    /// Replace the whole table with `entries`.
    ///
    /// The drop and the inserts share one transaction: if any insert fails
    /// the previous rows are still there.
    pub fn replace<I>(&mut self, entries: I) -> Result<WriteSummary, AppError>
    where
        I: IntoIterator<Item = ResolvedEntry>,
    {
        let tx = self.conn.transaction()?;
        recreate(&tx)?;
        let summary = insert_all(&tx, entries)?;
        tx.commit()?;
        tracing::info!("Replaced searchIndex contents");
        Ok(summary)
    }

    /// Get total entry count
    pub fn count(&self) -> Result<usize, AppError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM searchIndex", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Row counts per `type` column value.
    pub fn count_by_type(&self) -> Result<BTreeMap<String, usize>, AppError> {
        let mut stmt = self
            .conn
            .prepare("SELECT type, COUNT(*) FROM searchIndex GROUP BY type ORDER BY type")?;

        let counts = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(counts)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> Result<Vec<ResolvedEntry>, AppError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type, path FROM searchIndex ORDER BY id")?;

        let entries = stmt
            .query_map([], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

fn recreate(tx: &Transaction<'_>) -> Result<(), AppError> {
    tx.execute_batch("DROP TABLE IF EXISTS searchIndex;")?;
    M001SearchIndex::create(tx)?;
    Ok(())
}

fn insert_all<I>(tx: &Transaction<'_>, entries: I) -> Result<WriteSummary, AppError>
where
    I: IntoIterator<Item = ResolvedEntry>,
{
    let mut summary = WriteSummary::default();
    let mut stmt = tx.prepare_cached(
        "INSERT OR IGNORE INTO searchIndex(name, type, path) VALUES (?1, ?2, ?3)",
    )?;

    for entry in entries {
        tracing::debug!(
            "Inserting {} \"{}\" -> {}",
            entry.entry_type,
            entry.name,
            entry.path
        );
        let changed = stmt.execute(params![entry.name, entry.entry_type.as_str(), entry.path])?;

        summary.written += 1;
        if changed > 0 {
            summary.inserted += 1;
        } else {
            summary.ignored += 1;
        }
    }

    Ok(summary)
}

/// Convert a database row to a ResolvedEntry
fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<ResolvedEntry> {
    let type_str: String = row.get(1)?;
    let entry_type = type_str.parse::<EntryType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(ResolvedEntry {
        name: row.get(0)?,
        entry_type,
        path: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> ResolvedEntry {
        ResolvedEntry::new("Foo", EntryType::Class, "classFoo.html")
    }

    fn bar() -> ResolvedEntry {
        ResolvedEntry::new("Foo::Bar", EntryType::Method, "classFoo.html#a1")
    }

    #[test]
    fn test_create_index() {
        let index = SearchIndex::in_memory().unwrap();
        assert_eq!(index.count().unwrap(), 0);
        assert_eq!(index.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_write_and_read_back() {
        let mut index = SearchIndex::in_memory().unwrap();
        let summary = index.write(vec![foo(), bar()]).unwrap();

        assert_eq!(
            summary,
            WriteSummary {
                written: 2,
                inserted: 2,
                ignored: 0
            }
        );
        assert_eq!(index.entries().unwrap(), vec![foo(), bar()]);
    }

    #[test]
    fn test_duplicate_triple_is_ignored() {
        let mut index = SearchIndex::in_memory().unwrap();

        let first = index.write(vec![foo()]).unwrap();
        let second = index.write(vec![foo()]).unwrap();

        assert_eq!(first.inserted, 1);
        assert_eq!(second.written, 1);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.ignored, 1);
        assert_eq!(index.count().unwrap(), 1);
    }

    #[test]
    fn test_same_name_different_type_is_kept() {
        let mut index = SearchIndex::in_memory().unwrap();
        index
            .write(vec![
                ResolvedEntry::new("Foo", EntryType::Class, "classFoo.html"),
                ResolvedEntry::new("Foo", EntryType::Method, "classFoo.html"),
            ])
            .unwrap();
        assert_eq!(index.count().unwrap(), 2);
    }

    #[test]
    fn test_reset_clears_rows() {
        let mut index = SearchIndex::in_memory().unwrap();
        index.write(vec![foo(), bar()]).unwrap();

        index.reset().unwrap();
        assert_eq!(index.count().unwrap(), 0);

        index.write(vec![foo()]).unwrap();
        index.write(vec![foo()]).unwrap();
        assert_eq!(index.count().unwrap(), 1);
    }

    #[test]
    fn test_count_by_type() {
        let mut index = SearchIndex::in_memory().unwrap();
        index.write(vec![foo(), bar()]).unwrap();

        let counts = index.count_by_type().unwrap();
        assert_eq!(counts.get("Class"), Some(&1));
        assert_eq!(counts.get("Method"), Some(&1));
    }

    #[test]
    fn test_replace_swaps_contents() {
        let mut index = SearchIndex::in_memory().unwrap();
        index.write(vec![foo(), bar()]).unwrap();

        let summary = index
            .replace(vec![ResolvedEntry::new("Baz", EntryType::Struct, "structBaz.html")])
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(
            index.entries().unwrap(),
            vec![ResolvedEntry::new("Baz", EntryType::Struct, "structBaz.html")]
        );
    }

    #[test]
    fn test_reopen_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Contents/Resources/docSet.dsidx");

        {
            let mut index = SearchIndex::open(&path).unwrap();
            index.write(vec![foo()]).unwrap();
        }

        let mut index = SearchIndex::open(&path).unwrap();
        assert_eq!(index.count().unwrap(), 1);
        let summary = index.write(vec![foo(), bar()]).unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.ignored, 1);
    }

    #[test]
    fn test_schema_matches_docset_layout() {
        let index = SearchIndex::in_memory().unwrap();
        let sql: String = index
            .conn
            .query_row(
                "SELECT sql FROM sqlite_master WHERE type = 'index' AND name = 'anchor'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(sql.contains("ON searchIndex (name, type, path)"));
    }
}
