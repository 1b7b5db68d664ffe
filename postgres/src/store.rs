//! `PostgreSQL` implementation of [`ListStore`].

use crate::retry::ConnectRetry;
use crate::rows::{ListRow, SummaryRow, TodoRow};
use crate::schema::{self, SchemaScript};
use crate::statement::Statements;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use todo_lists_core::model::{List, ListId, ListSummary, TodoId};
use todo_lists_core::statement_log::{SharedStatementLogger, TracingStatementLogger};
use todo_lists_core::store::{ListStore, StoreError, StoreFuture};

const INSERT_LIST: &str = "INSERT INTO lists (name) VALUES ($1) RETURNING id;";

const DELETE_LIST_TODOS: &str = "DELETE FROM todos WHERE list_id = $1;";

const DELETE_LIST: &str = "DELETE FROM lists WHERE id = $1;";

const SELECT_LIST: &str = "SELECT id, name FROM lists WHERE id = $1;";

const SELECT_TODOS: &str = r"
    SELECT id, name, completed
      FROM todos
     WHERE list_id = $1
     ORDER BY id;
";

const SELECT_SUMMARIES: &str = r"
    SELECT lists.id,
           lists.name,
           COUNT(todos.id) AS todos_count,
           COUNT(NULLIF(todos.completed, true)) AS todos_remaining_count
      FROM lists
      LEFT JOIN todos ON todos.list_id = lists.id
     GROUP BY lists.id
     ORDER BY lists.name;
";

const UPDATE_LIST_NAME: &str = "UPDATE lists SET name = $1 WHERE id = $2;";

const INSERT_TODO: &str = r"
    INSERT INTO todos (name, list_id)
    SELECT $1, id FROM lists WHERE id = $2
    RETURNING id;
";

const UPDATE_TODO_STATUS: &str =
    "UPDATE todos SET completed = $1 WHERE list_id = $2 AND id = $3;";

const COMPLETE_ALL_TODOS: &str = "UPDATE todos SET completed = true WHERE list_id = $1;";

const SELECT_TODO_NAME: &str = "SELECT name FROM todos WHERE list_id = $1 AND id = $2;";

const DELETE_TODO: &str = "DELETE FROM todos WHERE list_id = $1 AND id = $2;";

fn database_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

/// Connection settings for [`PostgresListStore::connect`].
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// `PostgreSQL` connection URL
    pub url: String,
    /// Size of the connection pool
    pub max_connections: u32,
    /// How long to wait for a connection from the pool
    pub connect_timeout: Duration,
    /// Backoff used while the database is not reachable yet
    pub retry: ConnectRetry,
}

impl PostgresConfig {
    /// Settings for `url` with a single connection, a 30 second timeout and
    /// the default retry policy.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(30),
            retry: ConnectRetry::default(),
        }
    }
}

/// Durable list store backed by `PostgreSQL`.
///
/// Construction bootstraps the schema when needed. Each operation runs a
/// single parameterized statement scoped by `(list_id[, todo_id])`, except
/// [`find_list`](ListStore::find_list) (list, then its todos) and
/// [`delete_list`](ListStore::delete_list) (todos, then the list, in one
/// transaction). Every statement is reported to the injected
/// [`StatementLogger`](todo_lists_core::StatementLogger) before it runs.
///
/// # Example
///
/// ```no_run
/// use todo_lists_postgres::{PostgresConfig, PostgresListStore, SchemaScript};
/// use todo_lists_core::{ListStore, TracingStatementLogger};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PostgresListStore::connect(
///     &PostgresConfig::new("postgres://localhost/todos"),
///     SchemaScript::from_file("schema.sql")?,
///     Arc::new(TracingStatementLogger),
/// )
/// .await?;
///
/// let id = store.create_list("Groceries".to_string()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostgresListStore {
    pool: PgPool,
    statements: Statements,
}

impl PostgresListStore {
    /// Connect to the database, retrying while it is unreachable, and
    /// bootstrap the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if no connection could be made and
    /// [`StoreError::Schema`] if bootstrapping fails.
    pub async fn connect(
        config: &PostgresConfig,
        schema: SchemaScript,
        logger: SharedStatementLogger,
    ) -> Result<Self, StoreError> {
        let pool = config
            .retry
            .run(|| {
                PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(config.connect_timeout)
                    .connect(&config.url)
            })
            .await
            .map_err(database_error)?;

        Self::from_pool(pool, schema, logger).await
    }

    /// Use an existing pool and bootstrap the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Schema`] if bootstrapping fails.
    pub async fn from_pool(
        pool: PgPool,
        schema: SchemaScript,
        logger: SharedStatementLogger,
    ) -> Result<Self, StoreError> {
        let statements = Statements::new(logger);
        schema::bootstrap(&pool, &statements, &schema).await?;
        Ok(Self { pool, statements })
    }

    /// Like [`from_pool`](Self::from_pool), logging statements through
    /// `tracing`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Schema`] if bootstrapping fails.
    pub async fn with_tracing(pool: PgPool, schema: SchemaScript) -> Result<Self, StoreError> {
        Self::from_pool(pool, schema, Arc::new(TracingStatementLogger)).await
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn execute(
        &self,
        operation: &'static str,
        sql: &'static str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
        params: &[String],
    ) -> Result<(), StoreError> {
        self.statements.log(operation, sql, params);
        query.execute(&self.pool).await.map_err(database_error)?;
        Ok(())
    }
}

impl ListStore for PostgresListStore {
    fn create_list(&self, name: String) -> StoreFuture<'_, ListId> {
        Box::pin(async move {
            self.statements.log("create_list", INSERT_LIST, &[name.clone()]);
            let id: i32 = sqlx::query_scalar(INSERT_LIST)
                .bind(&name)
                .fetch_one(&self.pool)
                .await
                .map_err(database_error)?;
            Ok(ListId::new(id))
        })
    }

    fn delete_list(&self, list_id: ListId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let params = [list_id.to_string()];
            let mut tx = self.pool.begin().await.map_err(database_error)?;

            self.statements.log("delete_list", DELETE_LIST_TODOS, &params);
            sqlx::query(DELETE_LIST_TODOS)
                .bind(list_id.get())
                .execute(&mut *tx)
                .await
                .map_err(database_error)?;

            self.statements.log("delete_list", DELETE_LIST, &params);
            sqlx::query(DELETE_LIST)
                .bind(list_id.get())
                .execute(&mut *tx)
                .await
                .map_err(database_error)?;

            tx.commit().await.map_err(database_error)
        })
    }

    fn find_list(&self, list_id: ListId) -> StoreFuture<'_, Option<List>> {
        Box::pin(async move {
            let params = [list_id.to_string()];

            self.statements.log("find_list", SELECT_LIST, &params);
            let Some(list) = sqlx::query_as::<_, ListRow>(SELECT_LIST)
                .bind(list_id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?
            else {
                return Ok(None);
            };

            self.statements.log("find_list", SELECT_TODOS, &params);
            let todos = sqlx::query_as::<_, TodoRow>(SELECT_TODOS)
                .bind(list_id.get())
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

            Ok(Some(list.into_list(todos)))
        })
    }

    fn all_lists(&self) -> StoreFuture<'_, Vec<ListSummary>> {
        Box::pin(async move {
            self.statements.log("all_lists", SELECT_SUMMARIES, &[]);
            let rows = sqlx::query_as::<_, SummaryRow>(SELECT_SUMMARIES)
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

            rows.into_iter().map(ListSummary::try_from).collect()
        })
    }

    fn rename_list(&self, list_id: ListId, name: String) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let params = [name.clone(), list_id.to_string()];
            let query = sqlx::query(UPDATE_LIST_NAME).bind(name).bind(list_id.get());
            self.execute("rename_list", UPDATE_LIST_NAME, query, &params).await
        })
    }

    fn create_todo(&self, list_id: ListId, name: String) -> StoreFuture<'_, Option<TodoId>> {
        Box::pin(async move {
            self.statements
                .log("create_todo", INSERT_TODO, &[name.clone(), list_id.to_string()]);
            let id: Option<i32> = sqlx::query_scalar(INSERT_TODO)
                .bind(&name)
                .bind(list_id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;
            Ok(id.map(TodoId::new))
        })
    }

    fn set_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let params = [completed.to_string(), list_id.to_string(), todo_id.to_string()];
            let query = sqlx::query(UPDATE_TODO_STATUS)
                .bind(completed)
                .bind(list_id.get())
                .bind(todo_id.get());
            self.execute("set_todo_status", UPDATE_TODO_STATUS, query, &params)
                .await
        })
    }

    fn complete_all(&self, list_id: ListId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let params = [list_id.to_string()];
            let query = sqlx::query(COMPLETE_ALL_TODOS).bind(list_id.get());
            self.execute("complete_all", COMPLETE_ALL_TODOS, query, &params)
                .await
        })
    }

    fn todo_name(&self, list_id: ListId, todo_id: TodoId) -> StoreFuture<'_, Option<String>> {
        Box::pin(async move {
            self.statements.log(
                "todo_name",
                SELECT_TODO_NAME,
                &[list_id.to_string(), todo_id.to_string()],
            );
            sqlx::query_scalar::<_, String>(SELECT_TODO_NAME)
                .bind(list_id.get())
                .bind(todo_id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)
        })
    }

    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let params = [list_id.to_string(), todo_id.to_string()];
            let query = sqlx::query(DELETE_TODO)
                .bind(list_id.get())
                .bind(todo_id.get());
            self.execute("delete_todo", DELETE_TODO, query, &params).await
        })
    }
}
