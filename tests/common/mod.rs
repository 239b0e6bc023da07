//! Common test utilities and helpers

#![allow(dead_code)]

use assert_cmd::Command;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into a test run
const ECOSCI_ENV: [&str; 9] = [
    "ECOSCI_API_KEY",
    "GEMINI_API_KEY",
    "API_KEY",
    "ECOSCI_MODEL",
    "ECOSCI_BASE_URL",
    "ECOSCI_TIMEOUT_SECS",
    "ECOSCI_DATA_FILE",
    "ECOSCI_LOG",
    "RUST_LOG",
];

/// One request received by the stub Gemini server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Last path segment, e.g. `gemini-2.5-flash:generateContent`
    pub call: String,
    pub api_key: Option<String>,
    pub body: Value,
}

struct StubState {
    status: StatusCode,
    reply: Value,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle to a running stub server
pub struct StubServer {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Serve `reply` with `status` for every generateContent call
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            status,
            reply,
            recorded: recorded.clone(),
        });
        let app = Router::new()
            .route("/v1beta/models/{call}", post(handle_generate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            recorded,
        }
    }

    /// Stub answering with a single candidate holding `text`
    pub async fn with_text(text: &str) -> Self {
        Self::start(StatusCode::OK, text_reply(text)).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn handle_generate(
    State(state): State<Arc<StubState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.recorded.lock().unwrap().push(RecordedRequest {
        call,
        api_key,
        body,
    });
    (state.status, Json(state.reply.clone()))
}

pub fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}

/// The `ecosci` binary with a clean environment and an empty config file
pub fn ecosci_cmd(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("ecosci").unwrap();
    for var in ECOSCI_ENV {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(&config);
    cmd
}
