use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use kamoes::config::Config;
use kamoes::models::Definition;
use kamoes::server::App;
use kamoes::test_utils::{fixtures, init_test_logging};
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;

use super::common::Upstream;

async fn app(data_dir: &Path, upstream: &Upstream) -> App {
    let config = Config {
        data_dir: Some(data_dir.to_path_buf()),
        upstream_url: upstream.url(),
        rate_limit_max: 100,
        ..Config::default()
    };
    App::init(config).await.unwrap()
}

async fn get(router: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    assert!(response.headers().contains_key("x-response-time"));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_get_word_end_to_end() {
    init_test_logging(None);
    let upstream = Upstream::start().await;
    let temp = tempdir().unwrap();
    fixtures::write_word_list(temp.path(), &["rumah", "jaman"]).unwrap();
    let router = app(temp.path(), &upstream).await.router();

    let (status, body) = get(&router, "/rumah").await;
    assert_eq!(status, StatusCode::OK);
    let definitions: Vec<Definition> = serde_json::from_value(body).unwrap();
    assert_eq!(definitions[0].syllabification.as_deref(), Some("ru.mah"));

    let (status, body) = get(&router, "/jaman").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["isCanonical"], false);
    assert_eq!(body[0]["alternateForm"], "za.man");
    assert!(!body[0]["senses"].as_array().unwrap().is_empty());

    assert_eq!(upstream.hits("rumah"), 1);
    assert_eq!(upstream.hits("zaman"), 1);
}

#[tokio::test]
async fn test_second_request_is_served_from_disk() {
    let upstream = Upstream::start().await;
    let temp = tempdir().unwrap();
    fixtures::write_word_list(temp.path(), &["rumah"]).unwrap();

    let (_, first) = get(&app(temp.path(), &upstream).await.router(), "/rumah").await;
    assert!(temp.path().join("dictionary").join("rumah.json").exists());

    // A fresh app over the same data dir must not refetch.
    let (status, second) = get(&app(temp.path(), &upstream).await.router(), "/rumah").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(upstream.hits("rumah"), 1);
}

#[tokio::test]
async fn test_not_found_cases() {
    let upstream = Upstream::start().await;
    let temp = tempdir().unwrap();
    fixtures::write_word_list(temp.path(), &["kosong"]).unwrap();
    let router = app(temp.path(), &upstream).await.router();

    let (status, body) = get(&router, "/tidakada").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"message": "Not Found"}));
    assert_eq!(upstream.hits("tidakada"), 0);

    let (status, _) = get(&router, "/kosong").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!temp.path().join("dictionary").join("kosong.json").exists());
}

#[tokio::test]
async fn test_upstream_throttling_is_internal_error() {
    let upstream = Upstream::start().await;
    let temp = tempdir().unwrap();
    fixtures::write_word_list(temp.path(), &["sibuk"]).unwrap();
    let router = app(temp.path(), &upstream).await.router();

    let (status, body) = get(&router, "/sibuk").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"message": "Internal Server Error"}));
    assert_eq!(upstream.hits("sibuk"), 1);
}

#[tokio::test]
async fn test_missing_word_list_fails_init() {
    let upstream = Upstream::start().await;
    let temp = tempdir().unwrap();
    let config = Config {
        data_dir: Some(temp.path().to_path_buf()),
        upstream_url: upstream.url(),
        ..Config::default()
    };

    let err = App::init(config).await.unwrap_err();
    assert!(format!("{err:#}").contains("words.json"));
}
