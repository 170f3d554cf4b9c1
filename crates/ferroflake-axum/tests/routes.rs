use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use core::time::Duration;
use ferroflake::{Parts, Settings, Sonyflake, SystemClock, TimeSource};
use ferroflake_axum::routes::{AppState, router};
use tower::ServiceExt;

fn app(settings: Settings) -> Router {
    router(AppState::new(Sonyflake::new(settings).unwrap()))
}

fn default_app() -> Router {
    app(Settings::default().with_machine_id(|| Ok(127)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn root_returns_decomposed_new_id() {
    let (status, body) = get(default_app(), "/").await;
    assert_eq!(status, StatusCode::OK);

    let parts: Parts = serde_json::from_slice(&body).unwrap();
    assert_eq!(parts.machine, 127);
    assert!(parts.time > 0);
    assert_eq!(parts.id >> 24, parts.time);
}

#[tokio::test]
async fn successive_ids_increase() {
    let app = default_app();

    let (_, first) = get(app.clone(), "/").await;
    let (_, second) = get(app, "/").await;

    let first: Parts = serde_json::from_slice(&first).unwrap();
    let second: Parts = serde_json::from_slice(&second).unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn decompose_uses_generator_layout() {
    let (status, body) = get(default_app(), "/decompose/1677721727").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": 1_677_721_727u64, "time": 100, "sequence": 0, "machine": 127})
    );
}

#[tokio::test]
async fn decompose_rejects_out_of_range_and_malformed_ids() {
    let (status, _) = get(default_app(), "/decompose/9223372036854775808").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(default_app(), "/decompose/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_time_field_is_a_server_error() {
    // 32 time bits of 1 ms last about 49.7 days.
    let settings = Settings::default()
        .with_bits_sequence(1)
        .with_bits_machine_id(30)
        .with_time_unit(Duration::from_millis(1))
        .with_start_time(SystemClock.now() - Duration::from_secs(60 * 24 * 60 * 60))
        .with_machine_id(|| Ok(1));

    let (status, body) = get(app(settings), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(body).unwrap().contains("over the time limit"));
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(default_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}
