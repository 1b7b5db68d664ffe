//! # Todo Lists Testing
//!
//! Testing utilities and helpers for todo-lists stores.
//!
//! This crate provides:
//! - A statement logger that records what a SQL backend executed
//! - Contract checks every `ListStore` implementation must pass
//! - Property-based testing strategies for list and todo names
//!
//! ## Example
//!
//! ```ignore
//! use todo_lists_core::{SessionLists, SessionStore};
//! use todo_lists_testing::contract;
//!
//! #[tokio::test]
//! async fn session_store_honours_contract() {
//!     let store = SessionStore::new(SessionLists::new());
//!     contract::run_all(&store).await;
//! }
//! ```

pub mod contract;

/// Mock implementations for testing.
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};
    use todo_lists_core::statement_log::StatementLogger;

    /// One statement as reported to a [`StatementLogger`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedStatement {
        /// Whitespace-normalized statement text
        pub statement: String,
        /// Bound parameters rendered as text
        pub params: Vec<String>,
    }

    /// Statement logger that keeps every reported statement in memory.
    ///
    /// Clones share the same recording, so a clone can be handed to a store
    /// while the test keeps the original for assertions.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_lists_testing::mocks::RecordingStatementLogger;
    /// use todo_lists_core::statement_log::StatementLogger;
    ///
    /// let logger = RecordingStatementLogger::new();
    /// logger.log("SELECT 1", &[]);
    /// assert_eq!(logger.statements().len(), 1);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct RecordingStatementLogger {
        statements: Arc<Mutex<Vec<RecordedStatement>>>,
    }

    impl RecordingStatementLogger {
        /// Create an empty recording.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Everything recorded so far, oldest first.
        #[must_use]
        pub fn statements(&self) -> Vec<RecordedStatement> {
            self.statements
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Recorded statements whose text contains `fragment`.
        #[must_use]
        pub fn matching(&self, fragment: &str) -> Vec<RecordedStatement> {
            self.statements()
                .into_iter()
                .filter(|recorded| recorded.statement.contains(fragment))
                .collect()
        }

        /// Forget everything recorded so far.
        pub fn clear(&self) {
            self.statements
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }

    impl StatementLogger for RecordingStatementLogger {
        fn log(&self, statement: &str, params: &[String]) {
            self.statements
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedStatement {
                    statement: statement.to_string(),
                    params: params.to_vec(),
                });
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    /// Install a `tracing` subscriber writing to the test output.
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "todo_lists=debug".into()),
            )
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Names the validators accept: 1 to 100 characters, no surrounding
    /// whitespace. Includes multi-byte characters so length checks are
    /// exercised on characters rather than bytes.
    pub fn valid_name() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9äöüéß]([a-zA-Z0-9äöüéß ]{0,98}[a-zA-Z0-9äöüéß])?"
    }

    /// Names the validators reject: empty, or longer than 100 characters.
    pub fn invalid_name() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[a-zäöü]{101,300}",]
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{RecordedStatement, RecordingStatementLogger};
