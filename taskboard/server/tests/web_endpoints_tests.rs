use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod common;

use common::{get, send};

#[tokio::test]
async fn can_check_health() {
    let ctx = common::setup().await.unwrap();

    let (status, body) = send(&ctx.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn can_render_welcome_page() {
    let ctx = common::setup().await.unwrap();

    let (status, body) = send(&ctx.app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("hx-get=\"/admin/manager-tasks/stats\""));
    assert!(body.contains("hx-get=\"/teamlead/distribution-preview\""));
}

#[tokio::test]
async fn can_render_distribution_preview() {
    let ctx = common::setup().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        get("/teamlead/distribution-preview?total=7&assignees=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("4 leads per assignee across 2 assignees"));
    assert!(body.contains("8 allocated for 7 required, 1 over"));
}

#[tokio::test]
async fn can_render_manager_task_stats() {
    let ctx = common::setup().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/admin/manager-tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [
                {"_id": "1", "status": "completed"},
                {"_id": "2", "status": "pending"}
            ]
        })))
        .mount(&ctx.upstream)
        .await;

    let (status, body) = send(&ctx.app, get("/admin/manager-tasks/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Manager tasks"));
    assert!(body.contains("50%"));
}

#[tokio::test]
async fn shows_error_page_when_upstream_is_down() {
    let ctx = common::setup().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/admin/manager-tasks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&ctx.upstream)
        .await;

    let (status, body) = send(&ctx.app, get("/admin/manager-tasks/stats")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Something went wrong"));
}

#[tokio::test]
async fn serves_openapi_document() {
    let ctx = common::setup().await.unwrap();

    let (status, body) = send(&ctx.app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(doc["paths"]["/api/v1/teamlead/distribution"].is_object());
    assert!(doc["paths"]["/api/v1/manager/submissions"].is_object());
}

#[tokio::test]
async fn openapi_document_describes_request_bodies_and_parameters() {
    let ctx = common::setup().await.unwrap();

    let (_, body) = send(&ctx.app, get("/api-docs/openapi.json")).await;

    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    let paths = &doc["paths"];
    assert!(paths["/api/v1/admin/employee-tasks/{id}"]["post"]["requestBody"].is_object());
    assert!(paths["/api/v1/employee/leads/{id}"]["put"]["requestBody"].is_object());
    assert!(paths["/api/v1/manager/posts"]["post"]["requestBody"].is_object());
    assert!(paths["/api/v1/manager/posts/{id}"]["patch"]["requestBody"].is_object());
    assert!(paths["/api/v1/manager/submissions/{id}"]["put"]["requestBody"].is_object());
    let names = |path: &str, verb: &str| -> Vec<String> {
        paths[path][verb]["parameters"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|param| param["name"].as_str().map(str::to_string))
            .collect()
    };
    assert!(names("/api/v1/manager/submissions", "get").contains(&"search".to_string()));
    assert!(names("/api/v1/teamlead/{group}", "get").contains(&"group".to_string()));
    assert!(names("/api/v1/manager/posts/{id}", "delete").contains(&"confirm".to_string()));
}
