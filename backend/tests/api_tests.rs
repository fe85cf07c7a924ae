//! Router-level tests: every request goes through the real axum router,
//! handlers, services and a file store in a temporary directory.

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use cat_care_backend::advisor::{AdvisoryGateway, GenerationRequest, TextGenerator};
use cat_care_backend::storage::CsvConnection;
use cat_care_backend::{cors_layer, create_router, AppState};

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
        let kind = if request.image.is_some() { "immagine" } else { "testo" };
        Ok(Some(format!("Risposta ({kind})")))
    }
}

struct TestApp {
    router: Router,
    _data_dir: TempDir,
}

impl TestApp {
    fn new(gateway: AdvisoryGateway) -> Self {
        let data_dir = TempDir::with_prefix("cat_care_api_").unwrap();
        let connection = CsvConnection::new(data_dir.path()).unwrap();
        let state = AppState::new(connection, gateway);
        let router = create_router(state, cors_layer("http://localhost:8080").unwrap());
        Self {
            router,
            _data_dir: data_dir,
        }
    }

    fn with_echo_assistant() -> Self {
        Self::new(AdvisoryGateway::new(Arc::new(EchoGenerator)))
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, value)
    }

    async fn create_cat(&self, body: Value) -> Value {
        let (status, response) = self.send_json(Method::POST, "/api/cats", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{response}");
        response["cat"].clone()
    }
}

#[tokio::test]
async fn health_check() {
    let app = TestApp::with_echo_assistant();
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn create_fetch_and_list_cats() {
    let app = TestApp::with_echo_assistant();

    let (status, response) = app
        .send_json(Method::POST, "/api/cats", Some(json!({ "name": "Luna", "weight": 4.1 })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["success_message"], "Cat 'Luna' created successfully");

    let cat = response["cat"].clone();
    let id = cat["id"].as_str().unwrap();
    assert!(id.starts_with("cat-"));
    assert_eq!(cat["breed"], "Misto");
    assert_eq!(cat["gender"], "Maschio");
    assert_eq!(cat["weight"], 4.1);

    let (status, fetched) = app.send_json(Method::GET, &format!("/api/cats/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, cat);

    app.create_cat(json!({ "name": "Tigre", "gender": "Femmina" })).await;
    let (status, list) = app.send_json(Method::GET, "/api/cats", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list["cats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Luna", "Tigre"]);
}

#[tokio::test]
async fn validation_and_not_found_statuses() {
    let app = TestApp::with_echo_assistant();

    let (status, _) = app
        .send_json(Method::POST, "/api/cats", Some(json!({ "name": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.send(Method::GET, "/api/cats/cat-missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Cat not found: cat-missing");

    let (status, _) = app.send(Method::DELETE, "/api/cats/cat-missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::GET, "/api/cats/cat-missing/logs", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_cat_profile() {
    let app = TestApp::with_echo_assistant();
    let cat = app.create_cat(json!({ "name": "Luna", "weight": 4.0 })).await;
    let id = cat["id"].as_str().unwrap();

    let (status, response) = app
        .send_json(
            Method::PUT,
            &format!("/api/cats/{id}"),
            Some(json!({ "name": "Luna Bella", "breed": "Certosino", "age": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["cat"]["name"], "Luna Bella");
    assert_eq!(response["cat"]["breed"], "Certosino");
    assert_eq!(response["cat"]["age"], 5.0);
    assert_eq!(response["cat"]["weight"], 4.0);
}

#[tokio::test]
async fn add_and_list_logs() {
    let app = TestApp::with_echo_assistant();
    let cat = app.create_cat(json!({ "name": "Luna" })).await;
    let id = cat["id"].as_str().unwrap();
    let logs_uri = format!("/api/cats/{id}/logs");

    let (status, empty) = app.send_json(Method::GET, &logs_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["logs"], json!([]));

    for (log_type, notes) in [("FEEDING", "Crocchette"), ("Lettiera", "Pulita"), ("grooming", "Spazzolato")] {
        let (status, log) = app
            .send_json(
                Method::POST,
                &logs_uri,
                Some(json!({ "type": log_type, "notes": notes })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(log["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    let (status, listed) = app
        .send_json(Method::GET, &format!("{logs_uri}?limit=2"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let logs = listed["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["type"], "Toelettatura");
    assert_eq!(logs[1]["type"], "Lettiera");

    let (status, _) = app
        .send_json(Method::POST, &logs_uri, Some(json!({ "type": "SLEEP" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weight_log_updates_cat_and_chart() {
    let app = TestApp::with_echo_assistant();
    let cat = app.create_cat(json!({ "name": "Luna", "weight": 4.0 })).await;
    let id = cat["id"].as_str().unwrap();

    let (status, log) = app
        .send_json(
            Method::POST,
            &format!("/api/cats/{id}/logs"),
            Some(json!({ "type": "WEIGHT", "value": "4.0" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["type"], "Peso");

    let (status, observation) = app
        .send_json(
            Method::POST,
            &format!("/api/cats/{id}/weight"),
            Some(json!({ "weight": 4.3, "notes": "Dopo cena" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(observation["log"]["value"], "4.3");
    assert_eq!(observation["cat"]["weight"], 4.3);

    let (status, history) = app
        .send_json(Method::GET, &format!("/api/cats/{id}/weight"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["trend"], "increasing");
    let weights: Vec<f64> = history["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["weight"].as_f64().unwrap())
        .collect();
    assert_eq!(weights, vec![4.0, 4.3]);

    let (status, dashboard) = app
        .send_json(Method::GET, &format!("/api/cats/{id}/dashboard"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["cat"]["weight"], 4.3);
    assert_eq!(dashboard["recent_logs"].as_array().unwrap().len(), 2);
    assert_eq!(dashboard["trend"], "increasing");

    let (status, reconciled) = app
        .send_json(Method::POST, &format!("/api/cats/{id}/weight/reconcile"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reconciled["corrected"], false);

    let (status, _) = app
        .send_json(
            Method::POST,
            &format!("/api/cats/{id}/weight"),
            Some(json!({ "weight": -1.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_cat_cascades() {
    let app = TestApp::with_echo_assistant();
    let cat = app.create_cat(json!({ "name": "Luna" })).await;
    let id = cat["id"].as_str().unwrap();
    let other = app.create_cat(json!({ "name": "Tigre" })).await;

    for _ in 0..3 {
        app.send_json(
            Method::POST,
            &format!("/api/cats/{id}/logs"),
            Some(json!({ "type": "Medico", "notes": "Controllo" })),
        )
        .await;
    }

    let (status, _) = app.send(Method::DELETE, &format!("/api/cats/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(Method::GET, &format!("/api/cats/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.send_json(Method::GET, "/api/cats", None).await;
    assert_eq!(list["cats"], json!([other]));
}

#[tokio::test]
async fn advice_and_vision() {
    let app = TestApp::with_echo_assistant();
    let cat = app.create_cat(json!({ "name": "Luna" })).await;
    let id = cat["id"].as_str().unwrap();

    let (status, advice) = app
        .send_json(
            Method::POST,
            &format!("/api/cats/{id}/advice"),
            Some(json!({ "question": "Mangia abbastanza?" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advice["text"], "Risposta (testo)");
    assert!(advice["timestamp"].as_str().unwrap().ends_with('Z'));

    let (status, _) = app
        .send_json(
            Method::POST,
            &format!("/api/cats/{id}/advice"),
            Some(json!({ "question": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, vision) = app
        .send_json(
            Method::POST,
            "/api/vision/identify",
            Some(json!({ "image_base64": "aGVsbG8=", "prompt": "Che razza è" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vision["text"], "Risposta (immagine)");

    let (status, _) = app
        .send_json(
            Method::POST,
            "/api/vision/identify",
            Some(json!({ "image_base64": "", "prompt": "Che razza è" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disabled_assistant_answers_with_fallback() {
    let app = TestApp::new(AdvisoryGateway::disabled());
    let cat = app.create_cat(json!({ "name": "Luna" })).await;
    let id = cat["id"].as_str().unwrap();

    let (status, advice) = app
        .send_json(
            Method::POST,
            &format!("/api/cats/{id}/advice"),
            Some(json!({ "question": "Come sta?" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        advice["text"],
        "Si è verificato un errore nel contattare l'assistente AI."
    );
}
