//! Behavioural checks every [`ListStore`] implementation must pass.
//!
//! The checks only assume what both backends guarantee: they never depend on
//! concrete id values or on the order of [`ListStore::all_lists`], and every
//! check works on lists it created itself, so they can share one store.
//!
//! Failures are reported by panicking, like `assert!`.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Every check panics on a broken contract

use todo_lists_core::model::{List, ListId, ListSummary, TodoId};
use todo_lists_core::store::ListStore;

/// A list id no backend hands out in a test run.
pub const MISSING_LIST: ListId = ListId::new(i32::MAX);

/// A todo id no backend hands out in a test run.
pub const MISSING_TODO: TodoId = TodoId::new(i32::MAX);

/// Run every check in this module against `store`.
pub async fn run_all(store: &dyn ListStore) {
    created_list_is_listed_and_empty(store).await;
    new_todos_start_incomplete(store).await;
    summary_counts_track_statuses(store).await;
    complete_all_marks_every_todo(store).await;
    rename_keeps_todos(store).await;
    delete_todo_keeps_siblings(store).await;
    delete_list_removes_its_todos(store).await;
    missing_records_are_absent_not_errors(store).await;
    writes_are_scoped_to_their_list(store).await;
}

/// Find the summary for `name` in `lists`.
#[must_use]
pub fn summary_named<'a>(lists: &'a [ListSummary], name: &str) -> Option<&'a ListSummary> {
    lists.iter().find(|summary| summary.name == name)
}

async fn load(store: &dyn ListStore, list_id: ListId) -> List {
    store
        .find_list(list_id)
        .await
        .expect("find_list failed")
        .expect("list should exist")
}

async fn add_todo(store: &dyn ListStore, list_id: ListId, name: &str) -> TodoId {
    store
        .create_todo(list_id, name.to_string())
        .await
        .expect("create_todo failed")
        .expect("todo should be created on an existing list")
}

/// A created list shows up once in `all_lists` with no todos.
pub async fn created_list_is_listed_and_empty(store: &dyn ListStore) {
    let list_id = store.create_list("Groceries".to_string()).await.unwrap();

    let lists = store.all_lists().await.unwrap();
    let matches: Vec<_> = lists.iter().filter(|s| s.name == "Groceries").collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, list_id);
    assert_eq!(matches[0].todos_count, 0);
    assert_eq!(matches[0].todos_remaining_count, 0);
    assert!(!matches[0].is_complete());

    let list = load(store, list_id).await;
    assert_eq!(list.name, "Groceries");
    assert!(list.todos.is_empty());
}

/// Todos are created incomplete and kept in creation order.
pub async fn new_todos_start_incomplete(store: &dyn ListStore) {
    let list_id = store.create_list("Reading".to_string()).await.unwrap();
    let first = add_todo(store, list_id, "Dune").await;
    let second = add_todo(store, list_id, "Solaris").await;
    assert_ne!(first, second);

    let list = load(store, list_id).await;
    let names: Vec<_> = list.todos.iter().map(|todo| todo.name.as_str()).collect();
    assert_eq!(names, vec!["Dune", "Solaris"]);
    assert!(list.todos.iter().all(|todo| !todo.completed));
    assert_eq!(list.todo(first).map(|todo| todo.name.as_str()), Some("Dune"));
}

/// `all_lists` counts follow individual status changes.
pub async fn summary_counts_track_statuses(store: &dyn ListStore) {
    let list_id = store.create_list("Chores".to_string()).await.unwrap();
    let sweep = add_todo(store, list_id, "Sweep").await;
    let dust = add_todo(store, list_id, "Dust").await;
    add_todo(store, list_id, "Mop").await;

    store.set_todo_status(list_id, sweep, true).await.unwrap();
    store.set_todo_status(list_id, dust, true).await.unwrap();
    store.set_todo_status(list_id, dust, false).await.unwrap();

    let lists = store.all_lists().await.unwrap();
    let summary = summary_named(&lists, "Chores").unwrap();
    assert_eq!(summary.todos_count, 3);
    assert_eq!(summary.todos_remaining_count, 2);
    assert!(!summary.is_complete());

    let list = load(store, list_id).await;
    assert!(list.todo(sweep).unwrap().completed);
    assert!(!list.todo(dust).unwrap().completed);
}

/// `complete_all` completes every todo whatever its status, and is harmless
/// on an empty list.
pub async fn complete_all_marks_every_todo(store: &dyn ListStore) {
    let list_id = store.create_list("Packing".to_string()).await.unwrap();
    let socks = add_todo(store, list_id, "Socks").await;
    add_todo(store, list_id, "Charger").await;
    store.set_todo_status(list_id, socks, true).await.unwrap();
    assert_eq!(load(store, list_id).await.todos_remaining_count(), 1);

    store.complete_all(list_id).await.unwrap();

    let list = load(store, list_id).await;
    assert!(list.todos.iter().all(|todo| todo.completed));
    assert!(list.is_complete());

    let lists = store.all_lists().await.unwrap();
    let summary = summary_named(&lists, "Packing").unwrap();
    assert_eq!(summary.todos_remaining_count, 0);
    assert!(summary.is_complete());

    let empty_id = store.create_list("Nothing yet".to_string()).await.unwrap();
    store.complete_all(empty_id).await.unwrap();
    assert!(!load(store, empty_id).await.is_complete());
}

/// Renaming changes only the name.
pub async fn rename_keeps_todos(store: &dyn ListStore) {
    let list_id = store.create_list("Wrok".to_string()).await.unwrap();
    let todo_id = add_todo(store, list_id, "Report").await;

    store.rename_list(list_id, "Work".to_string()).await.unwrap();

    let list = load(store, list_id).await;
    assert_eq!(list.id, list_id);
    assert_eq!(list.name, "Work");
    assert_eq!(list.todo(todo_id).map(|todo| todo.name.as_str()), Some("Report"));

    let lists = store.all_lists().await.unwrap();
    assert!(summary_named(&lists, "Wrok").is_none());
    assert!(summary_named(&lists, "Work").is_some());
}

/// Deleting a todo leaves the rest of its list alone.
pub async fn delete_todo_keeps_siblings(store: &dyn ListStore) {
    let list_id = store.create_list("Errands".to_string()).await.unwrap();
    let bank = add_todo(store, list_id, "Bank").await;
    let post = add_todo(store, list_id, "Post office").await;

    assert_eq!(
        store.todo_name(list_id, bank).await.unwrap().as_deref(),
        Some("Bank")
    );

    store.delete_todo(list_id, bank).await.unwrap();

    assert_eq!(store.todo_name(list_id, bank).await.unwrap(), None);
    let list = load(store, list_id).await;
    assert_eq!(list.todos.len(), 1);
    assert_eq!(list.todos[0].id, post);
}

/// Deleting a list makes it and its todos unreachable.
pub async fn delete_list_removes_its_todos(store: &dyn ListStore) {
    let list_id = store.create_list("Old plans".to_string()).await.unwrap();
    let todo_id = add_todo(store, list_id, "Forget").await;

    store.delete_list(list_id).await.unwrap();

    assert!(store.find_list(list_id).await.unwrap().is_none());
    assert_eq!(store.todo_name(list_id, todo_id).await.unwrap(), None);
    let lists = store.all_lists().await.unwrap();
    assert!(summary_named(&lists, "Old plans").is_none());
}

/// Reads of missing records give `None`; writes to them do nothing.
pub async fn missing_records_are_absent_not_errors(store: &dyn ListStore) {
    let before = store.all_lists().await.unwrap();

    assert!(store.find_list(MISSING_LIST).await.unwrap().is_none());
    assert_eq!(store.todo_name(MISSING_LIST, MISSING_TODO).await.unwrap(), None);
    assert_eq!(
        store
            .create_todo(MISSING_LIST, "Orphan".to_string())
            .await
            .unwrap(),
        None
    );

    store.delete_list(MISSING_LIST).await.unwrap();
    store
        .rename_list(MISSING_LIST, "Ghost".to_string())
        .await
        .unwrap();
    store
        .set_todo_status(MISSING_LIST, MISSING_TODO, true)
        .await
        .unwrap();
    store.complete_all(MISSING_LIST).await.unwrap();
    store.delete_todo(MISSING_LIST, MISSING_TODO).await.unwrap();

    let after = store.all_lists().await.unwrap();
    assert_eq!(before, after);
}

/// A todo addressed through the wrong list is not touched.
pub async fn writes_are_scoped_to_their_list(store: &dyn ListStore) {
    let home = store.create_list("Home".to_string()).await.unwrap();
    let office = store.create_list("Office".to_string()).await.unwrap();
    let dishes = add_todo(store, home, "Dishes").await;
    add_todo(store, office, "Emails").await;

    store.set_todo_status(office, dishes, true).await.unwrap();
    store.complete_all(office).await.unwrap();

    let home_list = load(store, home).await;
    let dishes_todo = home_list.todo(dishes).unwrap();
    // A backend with per-list todo ids may have an office todo with the same
    // id, so only the home list's todo is checked.
    assert!(!dishes_todo.completed);

    let office_list = load(store, office).await;
    if office_list.todo(dishes).is_none() {
        store.delete_todo(office, dishes).await.unwrap();
        assert!(load(store, home).await.todo(dishes).is_some());
    }
}
