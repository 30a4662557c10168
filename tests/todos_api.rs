mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{json_request, register, send, test_app};

#[tokio::test]
async fn todos_require_a_token() {
    let app = test_app();

    let (status, body) = send(&app, json_request("GET", "/api/todos", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);

    let (status, _) = send(&app, json_request("GET", "/api/todos", Some("not.a.jwt"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = test_app();
    let token = register(&app, "alice").await;

    // Flip one character in the middle of the signature
    let at = token.rfind('.').unwrap() + 5;
    let replacement = if &token[at..at + 1] == "A" { "B" } else { "A" };
    let mut tampered = token.clone();
    tampered.replace_range(at..at + 1, replacement);

    let (status, _) = send(&app, json_request("GET", "/api/todos", Some(&tampered), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn buy_milk_lifecycle() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            Some(&token),
            Some(json!({ "taskName": "Buy milk", "taskDescription": "2%" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let item = &body;
    assert_eq!(item["taskName"], "Buy milk");
    assert_eq!(item["taskDescription"], "2%");
    assert_eq!(item["done"], false);
    assert_eq!(item["type"], "task");
    let id = item["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, json_request("PATCH", &format!("/api/todos/{}/toggle", id), Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["done"], true);

    let (status, body) = send(&app, json_request("DELETE", &format!("/api/todos/{}", id), Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo deleted successfully");

    let (status, body) = send(&app, json_request("GET", "/api/todos", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert!(!ids.contains(&id.as_str()));
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = test_app();
    let token = register(&app, "alice").await;

    for name in ["first", "second", "third"] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/todos",
                Some(&token),
                Some(json!({ "taskName": name, "taskDescription": "x" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, json_request("GET", "/api/todos", Some(&token), None)).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["taskName"].as_str())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
    assert_eq!(body[0]["done"], false);
}

#[tokio::test]
async fn double_toggle_restores_done() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            Some(&token),
            Some(json!({ "taskName": "t", "taskDescription": "d" })),
        ),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();
    let uri = format!("/api/todos/{}/toggle", id);

    let (_, once) = send(&app, json_request("PATCH", &uri, Some(&token), None)).await;
    let (_, twice) = send(&app, json_request("PATCH", &uri, Some(&token), None)).await;
    assert_eq!(once["done"], true);
    assert_eq!(twice["done"], false);
}

#[tokio::test]
async fn other_users_items_are_not_found() {
    let app = test_app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            Some(&alice),
            Some(json!({ "taskName": "private", "taskDescription": "alice only" })),
        ),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/api/todos/{}", id), Some(&bob), Some(json!({ "done": true }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("PATCH", &format!("/api/todos/{}/toggle", id), Some(&bob), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, json_request("DELETE", &format!("/api/todos/{}", id), Some(&bob), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo not found");

    let (_, body) = send(&app, json_request("GET", "/api/todos", Some(&bob), None)).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = send(&app, json_request("GET", "/api/todos", Some(&alice), None)).await;
    assert_eq!(body[0]["done"], false);
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let uri = format!("/api/todos/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("DELETE", "/api/todos/not-an-id", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn incomplete_items_are_rejected_and_not_created() {
    let app = test_app();
    let token = register(&app, "alice").await;

    for payload in [
        json!({ "taskName": "no description" }),
        json!({ "taskDescription": "no name" }),
        json!({ "taskName": "  ", "taskDescription": "  " }),
        json!({ "type": "image", "taskName": "no url" }),
    ] {
        let (status, body) = send(&app, json_request("POST", "/api/todos", Some(&token), Some(payload))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body["message"], "Task name and description are required");
    }

    let (status, _) = send(
        &app,
        json_request("POST", "/api/todos", Some(&token), Some(json!({ "type": "podcast", "taskDescription": "x" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, json_request("GET", "/api/todos", Some(&token), None)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn bookmarks_do_not_need_a_name() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            Some(&token),
            Some(json!({ "type": "youtube", "taskDescription": "https://youtu.be/dQw4w9WgXcQ" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["type"], "youtube");
}

#[tokio::test]
async fn put_updates_only_given_fields() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            Some(&token),
            Some(json!({ "taskName": "Buy milk", "taskDescription": "2%" })),
        ),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/todos/{}", id),
            Some(&token),
            Some(json!({ "taskDescription": "whole", "done": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskName"], "Buy milk");
    assert_eq!(body["taskDescription"], "whole");
    assert_eq!(body["done"], true);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/todos")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn put_rejects_blank_task_name() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            Some(&token),
            Some(json!({ "taskName": "Buy milk", "taskDescription": "2%" })),
        ),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/api/todos/{}", id), Some(&token), Some(json!({ "taskName": "   " }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    let (_, body) = send(&app, json_request("GET", "/api/todos", Some(&token), None)).await;
    assert_eq!(body[0]["taskName"], "Buy milk");
}
