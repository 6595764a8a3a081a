//! Mock device HTTP API for integration tests.
//!
//! Serves the Underwater GPS endpoint set with fixed payloads and counts
//! requests per endpoint. The master endpoint can be configured to fail
//! with HTTP 500 to exercise the degraded-reading path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Clone)]
struct DeviceState {
    hits: Arc<Mutex<HashMap<&'static str, u64>>>,
    master_healthy: bool,
}

impl DeviceState {
    fn hit(&self, endpoint: &'static str) {
        *self.hits.lock().unwrap().entry(endpoint).or_insert(0) += 1;
    }
}

/// A mock device API server on an ephemeral port.
pub struct MockDeviceServer {
    addr: SocketAddr,
    state: DeviceState,
    handle: JoinHandle<()>,
}

impl MockDeviceServer {
    /// Start a server where every endpoint responds successfully.
    pub async fn start() -> Self {
        Self::start_inner(true).await
    }

    /// Start a server whose master endpoint always returns HTTP 500.
    pub async fn start_with_failing_master() -> Self {
        Self::start_inner(false).await
    }

    async fn start_inner(master_healthy: bool) -> Self {
        let state = DeviceState {
            hits: Arc::new(Mutex::new(HashMap::new())),
            master_healthy,
        };

        let app = Router::new()
            .route("/api/v1/config/antenna", get(antenna))
            .route("/api/v1/position/acoustic/filtered", get(acoustic))
            .route("/api/v1/position/global", get(global))
            .route("/api/v1/position/master", get(master))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL of the mock device.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received on one endpoint ("antenna", "acoustic", "global",
    /// "master").
    pub fn hits(&self, endpoint: &str) -> u64 {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Shutdown the server.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

async fn antenna(State(state): State<DeviceState>) -> Json<Value> {
    state.hit("antenna");
    Json(json!({"depth": 1.5, "height": 2.0, "x": 0.0, "y": 0.0}))
}

async fn acoustic(State(state): State<DeviceState>) -> Json<Value> {
    state.hit("acoustic");
    Json(json!({"x": 1.0, "y": 2.0, "z": 3.0, "std": 0.25}))
}

async fn global(State(state): State<DeviceState>) -> Json<Value> {
    state.hit("global");
    Json(json!({"lat": 63.4225, "lon": 10.3942}))
}

async fn master(State(state): State<DeviceState>) -> Response {
    state.hit("master");
    if state.master_healthy {
        Json(json!({"lat": 63.4226, "lon": 10.3943})).into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "master gnss unavailable").into_response()
    }
}
