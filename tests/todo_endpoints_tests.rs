use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

mod common;

use common::{get, send, send_raw, test_app};

fn todo(title: &str, priority: i64) -> Value {
    json!({
        "title": title,
        "description": "Something to do",
        "priority": priority
    })
}

#[tokio::test]
async fn lists_empty_then_created_todos() {
    let app = test_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 0);

    send(&app, Method::POST, "/todo", Some(todo("Buy milk", 2)), &[]).await;
    send(&app, Method::POST, "/todo", Some(todo("Walk dog", 3)), &[]).await;
    let (_, body) = get(&app, "/").await;
    let titles: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Buy milk", "Walk dog"]);
}

#[tokio::test]
async fn create_defaults_completed_and_reads_back() {
    let app = test_app();
    let (status, created) = send(&app, Method::POST, "/todo", Some(todo("Buy milk", 2)), &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["id"], 1);
    assert_eq!(created["data"]["completed"], false);

    let (status, read) = get(&app, "/todo/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["data"], created["data"]);
}

#[tokio::test]
async fn create_with_explicit_id_and_duplicate_conflicts() {
    let app = test_app();
    let mut body = todo("Pinned id", 1);
    body["id"] = json!(10);
    let (status, created) = send(&app, Method::POST, "/todo", Some(body.clone()), &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["id"], 10);

    let (status, err) = send(&app, Method::POST, "/todo", Some(body), &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"]["code"], "conflict");
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let app = test_app();
    let bad = json!({
        "id": 0,
        "title": "ab",
        "description": "x".repeat(101),
        "priority": 6,
        "completed": "yes"
    });
    let (status, body) = send(&app, Method::POST, "/todo", Some(bad), &[]).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<_> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["id", "title", "description", "priority", "completed"]);

    let (_, list) = get(&app, "/").await;
    assert_eq!(list["meta"]["count"], 0);
}

#[tokio::test]
async fn missing_required_fields_are_reported() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/todo", Some(json!({})), &[]).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 3);
    assert_eq!(body["error"]["details"][0]["message"], "field required");
}

#[tokio::test]
async fn read_rejects_non_positive_and_malformed_ids() {
    let app = test_app();
    let (status, body) = get(&app, "/todo/0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "id");
    let (status, body) = get(&app, "/todo/abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "id");
    assert_eq!(body["error"]["details"][0]["message"], "must be an integer");
    let (status, body) = get(&app, "/todo/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["message"].as_str().unwrap().contains("Todo not found"));
}

#[tokio::test]
async fn update_replaces_fields_but_keeps_id() {
    let app = test_app();
    send(&app, Method::POST, "/todo", Some(todo("Buy milk", 2)), &[]).await;
    let replacement = json!({
        "id": 77,
        "title": "Buy oat milk",
        "description": "The barista kind",
        "priority": 5,
        "completed": true
    });
    let (status, body) = send(&app, Method::PUT, "/todo/1", Some(replacement), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "id": 1,
            "title": "Buy oat milk",
            "description": "The barista kind",
            "priority": 5,
            "completed": true
        })
    );
    let (status, _) = get(&app, "/todo/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let app = test_app();
    let (status, _) = send(&app, Method::PUT, "/todo/3", Some(todo("Nothing here", 1)), &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_invalid_body_is_rejected_before_lookup() {
    let app = test_app();
    let (status, _) = send(&app, Method::PUT, "/todo/3", Some(todo("x", 1)), &[]).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_body_is_rejected_with_field_details() {
    let app = test_app();
    let (status, body) = send_raw(&app, Method::POST, "/todo", "{\"title\": \"Half").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "body");
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let app = test_app();
    send(&app, Method::POST, "/todo", Some(todo("Buy milk", 2)), &[]).await;
    let (status, body) = send(&app, Method::DELETE, "/todo/1", None, &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    let (status, _) = get(&app, "/todo/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/todo/1", None, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
