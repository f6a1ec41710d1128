//! End-to-end tests for the full eigerdashd stack.
//!
//! Each test starts a fake detector control server on a loopback port, then
//! wires the real reqwest client, real services and the real axum router
//! against it. The dashboard itself is exercised via
//! `tower::ServiceExt::oneshot`, so no port is bound for it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, Uri, header};
use axum::routing::get;
use eigerdash_adapter_http_axum::router;
use eigerdash_adapter_http_axum::state::AppState;
use eigerdash_adapter_http_reqwest::{Config, ReqwestStatusApi};
use eigerdash_app::alerts::AlertQueue;
use eigerdash_app::dashboard::{Dashboard, DashboardSettings};
use eigerdash_app::services::poller::{Poller, PollerConfig};
use eigerdash_app::services::status_service::StatusService;
use eigerdash_app::update_bus::UpdateBus;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

const DETECTOR: &str = "/api/0.1/eiger/detector/api/1.6.0";

type Puts = Arc<Mutex<Vec<(String, Value)>>>;

async fn record_put(
    State(puts): State<Puts>,
    uri: Uri,
    body: axum::body::Bytes,
) -> (StatusCode, Json<Value>) {
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    puts.lock().unwrap().push((uri.path().to_string(), value));
    if uri.path().ends_with("/config/nimages") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "nimages out of range"})),
        );
    }
    (StatusCode::OK, Json(json!({})))
}

fn detector_server(puts: Puts) -> Router {
    Router::new()
        .route("/api", get(|| async { Json(json!({"api": "0.1"})) }))
        .route(
            "/api/0.1/adapters/",
            get(|| async { Json(json!({"adapters": ["eiger", "fr", "fp"]})) }),
        )
        .route(
            &format!("{DETECTOR}/config"),
            get(|| async {
                Json(json!({
                    "count_time": {"value": 0.25},
                    "frame_time": {"value": 0.5},
                    "nimages": {"value": 12},
                }))
            }),
        )
        .route(
            &format!("{DETECTOR}/status"),
            get(|| async {
                Json(json!({
                    "acquisition_complete": {"value": true},
                    "state": {"value": "idle"},
                }))
            }),
        )
        .route(
            "/api/0.1/fr/status/",
            get(|| async {
                Json(json!({"value": [{
                    "connected": true,
                    "status": {
                        "buffer_manager_configured": true,
                        "rx_thread_configured": true,
                        "decoder_configured": true,
                        "ipc_configured": true,
                        "configuration_complete": "true"
                    },
                    "buffers": {"empty": 292},
                    "frames": {"received": 17, "timedout": 0, "released": 17}
                }]}))
            }),
        )
        .route(
            "/api/0.1/fp/status/",
            get(|| async { Json(json!({"value": [{"connected": false}]})) }),
        )
        .fallback(record_put)
        .with_state(puts)
}

struct Stack {
    app: Router,
    poller: Poller<ReqwestStatusApi>,
    state: AppState<ReqwestStatusApi>,
}

async fn serve_detector() -> (String, Puts) {
    let puts = Puts::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = detector_server(Arc::clone(&puts));
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), puts)
}

fn stack(base_url: String) -> Stack {
    let api = Arc::new(
        Config {
            base_url,
            timeout: Some(Duration::from_secs(2)),
        }
        .build()
        .unwrap(),
    );
    let bus = UpdateBus::default();
    let dashboard = Arc::new(Dashboard::new(DashboardSettings::default(), bus.clone()));
    let alerts = Arc::new(AlertQueue::new(bus, 8));
    let state = AppState::new(Arc::clone(&api), Arc::clone(&dashboard), alerts);
    let poller = Poller::new(
        StatusService::new(api, dashboard),
        &PollerConfig {
            detector_interval: Duration::from_millis(20),
            units_interval: Duration::from_millis(20),
        },
    );
    Stack {
        app: router::build(state.clone()),
        poller,
        state,
    }
}

async fn page(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn wait_for(app: &Router, needle: &str) -> String {
    for _ in 0..100 {
        let html = page(app).await;
        if html.contains(needle) {
            return html;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("page never contained {needle}");
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (base_url, _) = serve_detector().await;
    let stack = stack(base_url);

    let response = stack
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Views and polling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_show_summary_when_home_view_is_entered() {
    let (base_url, _) = serve_detector().await;
    let stack = stack(base_url);

    stack.state.navigator.navigate("#/home-view").await;
    let html = page(&stack.app).await;

    assert!(html.contains("<title>Eiger (home-view)</title>"));
    assert!(html.contains(r#"<td id="api-version">0.1</td>"#));
    assert!(html.contains(r#"<td id="api-adapters">eiger, fr, fp</td>"#));
}

#[tokio::test]
async fn should_render_polled_status_when_poller_runs() {
    let (base_url, _) = serve_detector().await;
    let mut stack = stack(base_url);

    stack.poller.start();
    wait_for(&stack.app, r#"<td id="fr1-frames-received">17</td>"#).await;
    wait_for(&stack.app, r#"<td id="get-state">idle</td>"#).await;
    let html = wait_for(&stack.app, r#"<td id="get-exposure">0.25</td>"#).await;
    stack.poller.stop();

    assert!(html.contains(r#"<td id="get-nimages">12</td>"#));
    assert!(html.contains(r#"<tr id="fr4">"#));
}

#[tokio::test]
async fn should_switch_panel_when_view_link_is_followed() {
    let (base_url, _) = serve_detector().await;
    let stack = stack(base_url);

    let response = stack
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/view/detector-view")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = page(&stack.app).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(html.contains("<title>Eiger (detector-view)</title>"));
    assert!(html.contains(r#"<section id="detector-view" class="detector-view">"#));
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn should_put_exposure_to_detector_when_form_is_posted() {
    let (base_url, puts) = serve_detector().await;
    let stack = stack(base_url);

    let response = stack
        .app
        .clone()
        .oneshot(post_form("/detector/exposure", "value=0.004"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        puts.lock().unwrap().clone(),
        vec![(format!("{DETECTOR}/config/count_time"), json!(0.004))]
    );
    assert!(!page(&stack.app).await.contains("FAILED"));
}

#[tokio::test]
async fn should_alert_with_server_text_when_put_is_rejected() {
    let (base_url, _) = serve_detector().await;
    let stack = stack(base_url);

    stack
        .app
        .clone()
        .oneshot(post_form("/detector/nimages", "value=100000"))
        .await
        .unwrap();

    assert!(page(&stack.app).await.contains("FAILED: nimages out of range"));
}

#[tokio::test]
async fn should_stay_quiet_when_control_server_is_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let mut stack = stack(format!("http://{addr}"));

    stack.poller.start();
    stack.state.navigator.navigate("").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    stack.poller.stop();
    let html = page(&stack.app).await;

    assert!(!html.contains("FAILED"));
    assert!(html.contains("last update <span id=\"last-update\">never</span>"));
}
