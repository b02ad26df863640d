//! Versioned schema migrations for the search index database.
//!
//! Migrations are:
//! - **Idempotent**: `IF NOT EXISTS` everywhere, so re-running against an
//!   existing docset database is safe
//! - **Forward-only**: no rollback support
//! - **Version-tracked**: schema version stored in SQLite's `user_version`

mod m001_search_index;
mod runner;
mod traits;

pub use m001_search_index::M001SearchIndex;
pub use runner::{run_migrations, schema_version, MigrationResult};
pub use traits::{Migration, Register};

/// Create the migrations register.
pub fn create_register() -> Register {
    Register::new().register(M001SearchIndex)
}
