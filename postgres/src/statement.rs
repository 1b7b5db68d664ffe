//! Reporting of statements before they are executed.

use todo_lists_core::statement_log::{SharedStatementLogger, normalize_statement};

/// Reports every statement to the injected logger and counts it.
#[derive(Clone)]
pub(crate) struct Statements {
    logger: SharedStatementLogger,
}

impl Statements {
    pub(crate) const fn new(logger: SharedStatementLogger) -> Self {
        Self { logger }
    }

    /// Log `sql` (whitespace-normalized) with its rendered parameters.
    pub(crate) fn log(&self, operation: &'static str, sql: &str, params: &[String]) {
        self.logger.log(&normalize_statement(sql), params);
        metrics::counter!("todo_lists.store.statements", "operation" => operation).increment(1);
    }
}

impl std::fmt::Debug for Statements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statements").finish_non_exhaustive()
    }
}
