#![allow(missing_docs)]

mod vk_support;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use omni_vk::{ApiClient, ApiError, HttpApiClient, HttpApiClientConfig};
use serde_json::json;

use vk_support::spawn_test_server;

type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

async fn handle_method(
    State(seen): State<Seen>,
    Path(method): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    seen.lock()
        .expect("seen lock")
        .push((method.clone(), form));
    match method.as_str() {
        "groups.getById" => Json(json!({"response": [{"id": 42, "name": "Club"}]})).into_response(),
        "messages.send" => Json(json!({
            "error": {"error_code": 901, "error_msg": "Can't send messages for users without permission"}
        }))
        .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn spawn_api() -> Result<Option<(String, Seen, tokio::task::JoinHandle<()>)>> {
    let seen = Seen::default();
    let app = Router::new()
        .route("/method/{method}", post(handle_method))
        .with_state(Arc::clone(&seen));
    let Some((base_url, server)) =
        spawn_test_server(app, "skipping api client tests: local socket bind is not permitted")
            .await?
    else {
        return Ok(None);
    };
    Ok(Some((format!("{base_url}/method/"), seen, server)))
}

fn client(base_url: String, language: Option<&str>) -> Result<HttpApiClient> {
    Ok(HttpApiClient::new(HttpApiClientConfig {
        access_token: "token-1".to_string(),
        base_url: Some(base_url),
        language: language.map(str::to_string),
        ..HttpApiClientConfig::default()
    })?)
}

#[tokio::test]
async fn successful_call_unwraps_response_and_sends_credentials() -> Result<()> {
    let Some((base_url, seen, server)) = spawn_api().await? else {
        return Ok(());
    };
    let api = client(base_url, Some("en"))?;
    assert_eq!(api.version(), "5.80");
    assert!(!api.base_url().ends_with('/'));

    let response = api
        .request("groups.getById", &[("group_id", "42".to_string())])
        .await?;
    assert_eq!(response, json!([{"id": 42, "name": "Club"}]));

    let calls = seen.lock().expect("seen lock").clone();
    assert_eq!(calls.len(), 1);
    let (method, form) = &calls[0];
    assert_eq!(method, "groups.getById");
    assert_eq!(form.get("group_id").map(String::as_str), Some("42"));
    assert_eq!(form.get("access_token").map(String::as_str), Some("token-1"));
    assert_eq!(form.get("v").map(String::as_str), Some("5.80"));
    assert_eq!(form.get("lang").map(String::as_str), Some("en"));

    server.abort();
    Ok(())
}

#[tokio::test]
async fn error_envelope_and_bad_status_map_to_typed_errors() -> Result<()> {
    let Some((base_url, seen, server)) = spawn_api().await? else {
        return Ok(());
    };
    let api = client(base_url, None)?;

    let err = api
        .request("messages.send", &[])
        .await
        .expect_err("api error envelope");
    assert!(matches!(err, ApiError::Api { code: 901, .. }));
    assert_eq!(err.api_code(), Some(901));

    let err = api
        .request("wall.post", &[])
        .await
        .expect_err("http 500");
    assert!(matches!(err, ApiError::Http { status } if status.as_u16() == 500));
    assert_eq!(err.api_code(), None);

    assert!(
        seen.lock()
            .expect("seen lock")
            .iter()
            .all(|(_, form)| !form.contains_key("lang"))
    );
    server.abort();
    Ok(())
}

#[test]
fn empty_token_is_rejected_up_front() {
    let err = HttpApiClient::new(HttpApiClientConfig {
        access_token: "   ".to_string(),
        ..HttpApiClientConfig::default()
    })
    .expect_err("token required");
    assert!(matches!(err, ApiError::MissingToken));
}
