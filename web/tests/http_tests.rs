//! End-to-end tests of the HTTP surface over the session backend.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use todo_lists_web::{build_router, AppState, Persistence, SessionRegistry};
use tower::ServiceExt;

/// One browser: a router plus the session cookie it was handed.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    async fn post_empty(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send("POST", uri, None).await
    }

    async fn create_list(&mut self, name: &str) -> i64 {
        let (status, body) = self.post("/lists", json!({ "list_name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn create_todo(&mut self, list_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(&format!("/lists/{list_id}/todos"), json!({ "todo": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

fn app() -> Router {
    todo_lists_testing::init_test_tracing();
    build_router(AppState::with_sessions())
}

#[tokio::test]
async fn test_root_redirects_to_lists() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/lists");
}

#[tokio::test]
async fn test_health() {
    let mut client = Client::new(app());

    let (status, body) = client.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "session");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_full_list_lifecycle() {
    let mut client = Client::new(app());

    let (status, body) = client.post("/lists", json!({ "list_name": "  Groceries  " })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "The list has been created.");
    let list_id = body["id"].as_i64().unwrap();
    assert_eq!(list_id, 1);

    let (status, body) = client
        .post(&format!("/lists/{list_id}"), json!({ "list_name": "Shopping" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The list has been updated.");

    let (status, body) = client
        .post(&format!("/lists/{list_id}/todos"), json!({ "todo": "Milk" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "The todo was added.");
    let milk = body["id"].as_i64().unwrap();
    let bread = client.create_todo(list_id, "Bread").await;

    let (status, body) = client
        .post(
            &format!("/lists/{list_id}/todos/{milk}"),
            json!({ "completed": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The todo has been updated.");

    let (_, list) = client.get(&format!("/lists/{list_id}")).await;
    assert_eq!(list["name"], "Shopping");
    assert_eq!(list["todos_count"], 2);
    assert_eq!(list["todos_remaining_count"], 1);
    assert_eq!(list["complete"], false);
    assert_eq!(list["todos"][0]["name"], "Milk");
    assert_eq!(list["todos"][0]["completed"], true);
    assert_eq!(list["todos"][1]["id"], bread);

    let (status, body) = client
        .post_empty(&format!("/lists/{list_id}/complete_all"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "All todos have been completed.");

    let (_, lists) = client.get("/lists").await;
    assert_eq!(lists[0]["name"], "Shopping");
    assert_eq!(lists[0]["todos_remaining_count"], 0);
    assert_eq!(lists[0]["complete"], true);

    let (status, body) = client
        .post_empty(&format!("/lists/{list_id}/todos/{bread}/destroy"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The todo 'Bread' has been deleted.");

    let (status, body) = client.post_empty(&format!("/lists/{list_id}/destroy")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The list has been deleted.");

    let (status, lists) = client.get("/lists").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lists, json!([]));
}

#[tokio::test]
async fn test_invalid_list_names_rejected() {
    let mut client = Client::new(app());
    client.create_list("Work").await;

    let (status, body) = client.post("/lists", json!({ "list_name": "   " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "List name must be between 1 and 100 characters.");

    let (status, body) = client
        .post("/lists", json!({ "list_name": "x".repeat(101) }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "List name must be between 1 and 100 characters.");

    let (status, body) = client.post("/lists", json!({ "list_name": "Work" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "List name must be unique.");

    let (_, lists) = client.get("/lists").await;
    assert_eq!(lists.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_checks_other_lists_only() {
    let mut client = Client::new(app());
    let work = client.create_list("Work").await;
    client.create_list("Home").await;

    let (status, _) = client
        .post(&format!("/lists/{work}"), json!({ "list_name": "Work" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = client
        .post(&format!("/lists/{work}"), json!({ "list_name": "Home" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "List name must be unique.");
}

#[tokio::test]
async fn test_invalid_todo_rejected() {
    let mut client = Client::new(app());
    let list_id = client.create_list("Chores").await;

    let (status, body) = client
        .post(&format!("/lists/{list_id}/todos"), json!({ "todo": "" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Todo must be between 1 and 100 characters.");

    let (_, list) = client.get(&format!("/lists/{list_id}")).await;
    assert_eq!(list["todos"], json!([]));
}

#[tokio::test]
async fn test_unknown_list_is_not_found() {
    let mut client = Client::new(app());

    for (method, uri, body) in [
        ("GET", "/lists/7", None),
        ("POST", "/lists/7", Some(json!({ "list_name": "Ghost" }))),
        ("POST", "/lists/7/destroy", None),
        ("POST", "/lists/7/todos", Some(json!({ "todo": "Boo" }))),
        ("POST", "/lists/7/todos/1", Some(json!({ "completed": true }))),
        ("POST", "/lists/7/todos/1/destroy", None),
        ("POST", "/lists/7/complete_all", None),
    ] {
        let (status, response) = client.send(method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(response["message"], "The specified list was not found.");
    }
}

#[tokio::test]
async fn test_unknown_todo_is_not_found_on_destroy() {
    let mut client = Client::new(app());
    let list_id = client.create_list("Errands").await;

    let (status, body) = client
        .post_empty(&format!("/lists/{list_id}/todos/42/destroy"))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The specified todo was not found.");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = app();
    let mut alice = Client::new(app.clone());
    let mut bob = Client::new(app);

    alice.create_list("Alice's list").await;
    let (_, bobs) = bob.get("/lists").await;
    assert_eq!(bobs, json!([]));

    let (_, alices) = alice.get("/lists").await;
    assert_eq!(alices[0]["name"], "Alice's list");
}

#[tokio::test]
async fn test_lists_survive_within_a_session() {
    let mut client = Client::new(app());

    let first = client.create_list("One").await;
    let second = client.create_list("Two").await;
    assert_eq!((first, second), (1, 2));

    let (_, lists) = client.get("/lists").await;
    let names: Vec<_> = lists
        .as_array()
        .unwrap()
        .iter()
        .map(|list| list["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_cookieless_requests_do_not_outlive_idle_timeout() {
    todo_lists_testing::init_test_tracing();
    let registry = SessionRegistry::with_idle_timeout(Duration::ZERO);
    let app = build_router(AppState::new(Persistence::Session(registry.clone())));

    for _ in 0..50 {
        let (status, _) = Client::new(app.clone()).get("/lists").await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(registry.len(), 50);

    assert_eq!(registry.evict_idle(), 50);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_active_session_survives_eviction() {
    todo_lists_testing::init_test_tracing();
    let registry = SessionRegistry::with_idle_timeout(Duration::from_secs(3600));
    let app = build_router(AppState::new(Persistence::Session(registry.clone())));
    let mut client = Client::new(app);
    client.create_list("Kept").await;

    assert_eq!(registry.evict_idle(), 0);

    let (_, lists) = client.get("/lists").await;
    assert_eq!(lists[0]["name"], "Kept");
}
