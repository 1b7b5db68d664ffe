//! Lazy schema bootstrap.
//!
//! When a store is constructed it looks for the `todos` table in the `public`
//! schema. Only when the table is missing is the bootstrap script executed,
//! verbatim and as a whole.
//!
//! The check and the creation are two separate statements. Two processes
//! initializing the same empty database at the same moment can both decide to
//! run the script; deployments with several instances must create the schema
//! before starting them.

use crate::statement::Statements;
use sqlx::PgPool;
use std::path::Path;
use todo_lists_core::store::StoreError;

/// Table whose presence marks an initialized schema.
pub const MARKER_TABLE: &str = "todos";

const MARKER_TABLE_EXISTS: &str = r"
    SELECT COUNT(*) FROM information_schema.tables
    WHERE table_schema = 'public' AND table_name = $1;
";

/// The SQL that creates the tables the store expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaScript(String);

impl SchemaScript {
    /// Use the given SQL text as bootstrap script.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// Read the bootstrap script from a file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Schema`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        std::fs::read_to_string(path).map(Self).map_err(|e| {
            StoreError::Schema(format!(
                "Failed to read schema script {}: {e}",
                path.display()
            ))
        })
    }

    /// The script's SQL text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Create the schema unless the marker table already exists.
///
/// Returns `true` when the script was executed.
///
/// # Errors
///
/// Returns [`StoreError::Schema`] if the check or the script fails.
pub(crate) async fn bootstrap(
    pool: &PgPool,
    statements: &Statements,
    script: &SchemaScript,
) -> Result<bool, StoreError> {
    statements.log("schema_check", MARKER_TABLE_EXISTS, &[MARKER_TABLE.to_string()]);
    let (tables,): (i64,) = sqlx::query_as(MARKER_TABLE_EXISTS)
        .bind(MARKER_TABLE)
        .fetch_one(pool)
        .await
        .map_err(|e| StoreError::Schema(format!("Failed to inspect schema: {e}")))?;

    if tables > 0 {
        tracing::debug!("Schema already present");
        return Ok(false);
    }

    statements.log("schema_bootstrap", script.as_str(), &[]);
    sqlx::raw_sql(script.as_str())
        .execute(pool)
        .await
        .map_err(|e| StoreError::Schema(format!("Failed to run schema script: {e}")))?;

    tracing::info!(table = MARKER_TABLE, "Schema created");
    Ok(true)
}
