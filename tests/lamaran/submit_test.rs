use crate::util::{spawn_server, spawn_server_with_config, test_config, MemLamaranStore};
use assert_json_diff::assert_json_include;
use database_entity::dto::AFLamaran;
use reqwest::StatusCode;
use serde_json::{json, Value};
use shared_entity::response::{AppErrorResponse, AppResponse, ErrorType};
use std::sync::Arc;
use std::time::Duration;

fn jane_doe() -> Value {
  json!({
    "fullName": "Jane Doe",
    "email": "jane@example.com",
    "phone": "0800000000"
  })
}

#[tokio::test]
async fn submit_lamaran_creates_record() {
  let store = Arc::new(MemLamaranStore::default());
  let server = spawn_server(store.clone()).await;

  let resp = server.submit(&jane_doe()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = resp.json().await.unwrap();
  assert_json_include!(
    actual: body.clone(),
    expected: json!({
      "success": true,
      "message": "Lamaran berhasil disimpan!",
      "data": {
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "phone": "0800000000"
      }
    })
  );

  let resp: AppResponse<AFLamaran> = serde_json::from_value(body).unwrap();
  let lamaran = resp.into_data().unwrap();
  assert!(!lamaran.id.is_nil());
  assert_eq!(store.get(&lamaran.id), Some(lamaran));
}

#[tokio::test]
async fn submit_drops_unknown_fields() {
  let server = spawn_server(Arc::new(MemLamaranStore::default())).await;

  let mut payload = jane_doe();
  payload["salary"] = json!(1000);
  let resp = server.submit(&payload).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = resp.json().await.unwrap();
  assert!(body["data"].get("salary").is_none());
}

#[tokio::test]
async fn submit_empty_object_is_rejected() {
  let store = Arc::new(MemLamaranStore::default());
  let server = spawn_server(store.clone()).await;

  let resp = server.submit(&json!({})).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(
    body,
    AppErrorResponse {
      success: false,
      message: "Request body cannot be empty".to_string(),
      error_type: None,
    }
  );
  assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn submit_without_body_is_rejected() {
  let server = spawn_server(Arc::new(MemLamaranStore::default())).await;

  let resp = server.submit_raw("").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(body.message, "Request body cannot be empty");

  let resp = server.submit_raw("null").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(body.message, "Request body cannot be empty");
}

#[tokio::test]
async fn submit_missing_fields_lists_them() {
  let store = Arc::new(MemLamaranStore::default());
  let server = spawn_server(store.clone()).await;

  let resp = server.submit(&json!({ "fullName": "Jane" })).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert!(!body.success);
  assert_eq!(
    body.message,
    "Path `email` is required., Path `phone` is required."
  );
  assert_eq!(body.error_type, Some(ErrorType::ValidationError));
  assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn submit_malformed_json_is_rejected() {
  let server = spawn_server(Arc::new(MemLamaranStore::default())).await;

  let resp = server.submit_raw(r#"{"fullName": "Jane""#).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(body.error_type, Some(ErrorType::InvalidRequest));
}

#[tokio::test]
async fn submit_times_out_on_slow_store() {
  let store = Arc::new(MemLamaranStore::default().with_delay(Duration::from_millis(800)));
  let mut config = test_config();
  config.lamaran.submit_timeout = Duration::from_millis(100);
  let server = spawn_server_with_config(config, store.clone()).await;

  let resp = server.submit(&jane_doe()).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(
    body.message,
    "Database operation timed out. Please try again."
  );
  assert_eq!(body.error_type, Some(ErrorType::TimeoutError));

  // The abandoned write is not cancelled.
  tokio::time::sleep(Duration::from_millis(1500)).await;
  assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn submit_reports_store_failure() {
  let store = MemLamaranStore::default().with_failure("connection pool exhausted");
  let server = spawn_server(Arc::new(store)).await;

  let resp = server.submit(&jane_doe()).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(body.message, "connection pool exhausted");
  assert_eq!(body.error_type, Some(ErrorType::StoreError));
}

#[tokio::test]
async fn routes_follow_configured_prefix() {
  let mut config = test_config();
  config.application.route_prefix = String::new();
  let server = spawn_server_with_config(config, Arc::new(MemLamaranStore::default())).await;

  let resp = server.submit(&jane_doe()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let resp = server
    .api_client
    .post(format!("{}/api/submit-lamaran", server.address))
    .json(&jane_doe())
    .send()
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_html_form_creates_record() {
  let store = Arc::new(MemLamaranStore::default());
  let server = spawn_server(store.clone()).await;

  let resp = server
    .submit_form(&[
      ("fullName", "Jane Doe"),
      ("email", "jane@example.com"),
      ("phone", "0800000000"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let resp: AppResponse<AFLamaran> = resp.json().await.unwrap();
  let lamaran = resp.into_data().unwrap();
  assert_eq!(lamaran.full_name, "Jane Doe");
  assert_eq!(lamaran.email, "jane@example.com");
  assert_eq!(store.get(&lamaran.id), Some(lamaran));
}

#[tokio::test]
async fn submit_html_form_with_missing_fields_is_rejected() {
  let store = Arc::new(MemLamaranStore::default());
  let server = spawn_server(store.clone()).await;

  let resp = server.submit_form(&[("fullName", "Jane Doe")]).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: AppErrorResponse = resp.json().await.unwrap();
  assert_eq!(
    body.message,
    "Path `email` is required., Path `phone` is required."
  );
  assert_eq!(body.error_type, Some(ErrorType::ValidationError));
  assert_eq!(store.len(), 0);
}
