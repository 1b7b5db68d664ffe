//! Observability hook for statements sent to a storage engine.
//!
//! SQL backends report every statement to a [`StatementLogger`] right before
//! executing it. The default [`TracingStatementLogger`] turns each report into
//! one `tracing` event; tests inject a recording logger instead.

use std::sync::Arc;

/// Receives each statement, with its bound parameters rendered as text,
/// before the statement is executed.
pub trait StatementLogger: Send + Sync {
    /// Record one statement. `statement` is already whitespace-normalized.
    fn log(&self, statement: &str, params: &[String]);
}

/// Shared handle to a statement logger.
pub type SharedStatementLogger = Arc<dyn StatementLogger>;

/// Emits one `INFO` event per statement on the `todo_lists::sql` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatementLogger;

impl StatementLogger for TracingStatementLogger {
    fn log(&self, statement: &str, params: &[String]) {
        tracing::info!(target: "todo_lists::sql", "{}", format_statement(statement, params));
    }
}

/// Collapse every run of whitespace (newlines included) into a single space.
///
/// # Examples
///
/// ```
/// use todo_lists_core::statement_log::normalize_statement;
///
/// let sql = "\n    SELECT name\n    FROM lists\n    WHERE id = $1\n";
/// assert_eq!(normalize_statement(sql), "SELECT name FROM lists WHERE id = $1");
/// ```
#[must_use]
pub fn normalize_statement(statement: &str) -> String {
    statement.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a statement and its parameters as a single log line.
#[must_use]
pub fn format_statement(statement: &str, params: &[String]) -> String {
    format!("{statement}: {params:?}")
}
