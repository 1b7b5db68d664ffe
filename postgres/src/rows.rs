//! Raw rows and their normalization into domain records.
//!
//! Rows are decoded exactly as `PostgreSQL` returns them. Converting them
//! into [`List`], [`ListSummary`] and [`Todo`] is the only place engine
//! representations turn into the types callers see.

use todo_lists_core::model::{List, ListId, ListSummary, Todo, TodoId};
use todo_lists_core::store::StoreError;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ListRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SummaryRow {
    pub id: i32,
    pub name: String,
    pub todos_count: i64,
    pub todos_remaining_count: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TodoRow {
    pub id: i32,
    pub name: String,
    pub completed: bool,
}

fn count(column: &str, value: i64) -> Result<usize, StoreError> {
    usize::try_from(value).map_err(|_| StoreError::Decode(format!("{column} out of range: {value}")))
}

impl ListRow {
    pub(crate) fn into_list(self, todos: Vec<TodoRow>) -> List {
        List {
            id: ListId::new(self.id),
            name: self.name,
            todos: todos.into_iter().map(Todo::from).collect(),
        }
    }
}

impl TryFrom<SummaryRow> for ListSummary {
    type Error = StoreError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ListId::new(row.id),
            name: row.name,
            todos_count: count("todos_count", row.todos_count)?,
            todos_remaining_count: count("todos_remaining_count", row.todos_remaining_count)?,
        })
    }
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::new(row.id),
            name: row.name,
            completed: row.completed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn summary_counts_become_usize() {
        let summary = ListSummary::try_from(SummaryRow {
            id: 3,
            name: "Groceries".to_string(),
            todos_count: 4,
            todos_remaining_count: 1,
        })
        .unwrap();

        assert_eq!(summary.id, ListId::new(3));
        assert_eq!(summary.todos_count, 4);
        assert_eq!(summary.todos_remaining_count, 1);
    }

    #[test]
    fn negative_count_is_a_decode_error() {
        let result = ListSummary::try_from(SummaryRow {
            id: 1,
            name: "Broken".to_string(),
            todos_count: -1,
            todos_remaining_count: 0,
        });

        assert!(matches!(result, Err(StoreError::Decode(message)) if message.contains("todos_count")));
    }

    #[test]
    fn list_row_keeps_todo_order() {
        let list = ListRow {
            id: 1,
            name: "Chores".to_string(),
        }
        .into_list(vec![
            TodoRow { id: 5, name: "Sweep".to_string(), completed: true },
            TodoRow { id: 9, name: "Dust".to_string(), completed: false },
        ]);

        let ids: Vec<_> = list.todos.iter().map(|todo| todo.id.get()).collect();
        assert_eq!(ids, vec![5, 9]);
        assert!(list.todos[0].completed);
        assert_eq!(list.todos_remaining_count(), 1);
    }
}
