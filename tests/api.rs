use announcement_api::{app, AppState, Config, MemoryStore};
use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

const TIMESTAMP: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}\+\d{2}:\d{2}$";

fn router(page_size: Option<usize>) -> Router {
    let config = Config {
        public_host: Some("api.example.com".into()),
        ..Config::default()
    };
    app(AppState::new(Arc::new(MemoryStore::new(page_size)), config))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

/// Path and query of a `next_page` URL, so it can be replayed against the router.
fn relative(url: &str) -> &str {
    url.strip_prefix("https://api.example.com").unwrap()
}

async fn post_title(app: &Router, title: &str) {
    let body = format!(r#"{{"title":"{}","description":"description"}}"#, title);
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/announcements", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// --- create ---

#[tokio::test]
async fn create_announcement_returns_201() {
    let resp = router(None)
        .oneshot(json_request(
            "POST",
            "/announcements",
            r#"{"title":"Maintenance Window","description":"System down 2am-4am UTC"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()["content-type"], "application/json");
    assert_eq!(resp.headers()["access-control-allow-methods"], "OPTIONS,POST");
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Added a new announcement");
    assert_eq!(body["details"]["title"], "Maintenance Window");
    assert_eq!(body["details"]["description"], "System down 2am-4am UTC");
    let ts = body["details"]["date-time"].as_str().unwrap();
    assert!(Regex::new(TIMESTAMP).unwrap().is_match(ts), "{}", ts);
}

#[tokio::test]
async fn create_with_missing_description_returns_415() {
    let resp = router(None)
        .oneshot(json_request("POST", "/announcements", r#"{"title":"Valid title"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Unsupported Media Type");
    assert_eq!(body["details"][0]["field"], "description");
    assert_eq!(body["details"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let resp = router(None)
        .oneshot(json_request("PUT", "/announcements", r#"{"title":"abcd","description":"abcd"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Method Not Allowed");
    assert!(body["details"].is_null());
}

#[tokio::test]
async fn oversized_body_returns_413_envelope() {
    let resp = router(None)
        .oneshot(json_request("POST", "/announcements", &"x".repeat(70_000)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(resp.headers()["content-type"], "application/json");
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert_eq!(resp.headers()["access-control-allow-methods"], "OPTIONS,POST");
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Payload Too Large");
    assert_eq!(body["details"][0]["field"], "body");
    assert!(body["details"][0]["message"].is_string());
}

#[tokio::test]
async fn create_ignores_query_parameters() {
    let resp = router(None)
        .oneshot(json_request(
            "POST",
            "/announcements?title=ab&next-page-number=1",
            r#"{"title":"Release Notes","description":"Version 2 is out"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()["access-control-allow-methods"], "OPTIONS,POST");
}

// --- list ---

#[tokio::test]
async fn list_empty_table_is_first_page() {
    let resp = router(None).oneshot(get("/announcements")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-methods"], "OPTIONS,GET");
    let body = body_json(resp).await;
    assert_eq!(body["details"]["page"], 1);
    assert_eq!(body["details"]["announcements"], serde_json::json!([]));
    assert!(body["details"]["next_page"].is_null());
}

#[tokio::test]
async fn replaying_next_page_walks_the_table_without_gaps() {
    let app = router(Some(2));
    let titles = ["Alpha notice", "Bravo notice", "Charlie notice", "Delta notice", "Echo notice"];
    for t in titles {
        post_title(&app, t).await;
    }

    let mut seen: Vec<String> = Vec::new();
    let mut uri = "/announcements".to_string();
    let mut expected_page = 1;
    loop {
        let resp = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["details"]["page"], expected_page);
        for a in body["details"]["announcements"].as_array().unwrap() {
            seen.push(a["title"].as_str().unwrap().to_string());
        }
        match body["details"]["next_page"].as_str() {
            Some(next) => {
                let query: HashMap<String, String> =
                    serde_urlencoded::from_str(next.split_once('?').unwrap().1).unwrap();
                assert!(query.contains_key("title"));
                assert_eq!(query["date-time"].len(), 32);
                assert_eq!(query["next-page-number"], (expected_page + 1).to_string());
                uri = relative(next).to_string();
                expected_page += 1;
            }
            None => break,
        }
    }

    assert_eq!(seen, titles);
    assert_eq!(expected_page, 3);
}

#[tokio::test]
async fn short_cursor_title_returns_422() {
    let resp = router(None)
        .oneshot(get(
            "/announcements?title=ab&date-time=2024-03-01T02%3A00%3A00.123456%2B00%3A00&next-page-number=2",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Unprocessable Entity");
    assert_eq!(
        body["details"],
        serde_json::json!([{"field": "title", "message": "must be at least 4 characters"}])
    );
}

#[tokio::test]
async fn incomplete_cursor_enumerates_every_missing_parameter() {
    let resp = router(None)
        .oneshot(get("/announcements?next-page-number=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "date-time", "next-page-number"]);
}

// --- common ---

#[tokio::test]
async fn health_and_ready() {
    let app = router(None);
    let resp = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["store"], "ok");
}
