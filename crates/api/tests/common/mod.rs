#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vitalwatch_api::config::ServerConfig;
use vitalwatch_api::router::build_app_router;
use vitalwatch_api::state::AppState;
use vitalwatch_core::notification::memory::RecordingChannel;
use vitalwatch_core::record::encode_record;
use vitalwatch_core::store::memory::{MemoryAlertStore, MemoryReadingStore};
use vitalwatch_pipeline::{BatchCoordinator, PipelineConfig};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    }
}

/// The application router plus handles on the in-memory collaborators it
/// writes to.
pub struct TestApp {
    pub router: Router,
    pub readings: Arc<MemoryReadingStore>,
    pub alerts: Arc<MemoryAlertStore>,
    pub channel: Arc<RecordingChannel>,
}

/// Build the full application router with all middleware layers over
/// in-memory stores and a recording notification channel.
pub fn build_test_app() -> TestApp {
    let readings = Arc::new(MemoryReadingStore::new("vital_readings"));
    let alerts = Arc::new(MemoryAlertStore::new("vital_alerts"));
    let channel = Arc::new(RecordingChannel::new("log"));

    let coordinator = BatchCoordinator::new(
        readings.clone(),
        alerts.clone(),
        channel.clone(),
        &PipelineConfig::new("log:"),
    );
    let state = AppState {
        coordinator: Arc::new(coordinator),
        pool: None,
        config: Arc::new(test_config()),
    };

    TestApp {
        router: build_app_router(state),
        readings,
        alerts,
        channel,
    }
}

/// One stream record carrying the given vitals.
pub fn kinesis_record(sequence: &str, patient: &str, hr: f64, spo2: f64, bp: f64) -> Value {
    let data = encode_record(&json!({
        "patient_id": patient,
        "hr": hr,
        "spo2": spo2,
        "bp_sys": bp,
    }));
    json!({
        "eventID": format!("shardId-000000000000:{sequence}"),
        "kinesis": {
            "data": data,
            "sequenceNumber": sequence,
            "partitionKey": patient,
        }
    })
}

/// Wrap records in the transport envelope.
pub fn batch(records: Vec<Value>) -> Value {
    json!({ "Records": records })
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
