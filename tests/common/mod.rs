//! Shared utilities for integration testing.

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use actions_gateway::{GatewayConfig, GatewayServer, Shutdown};

/// One request as observed by a mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Vec<u8>,
    pub request_id: Option<String>,
}

/// Handle to the requests a mock upstream has received.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    pub fn last(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Start a mock upstream that records every request and returns a fixed
/// response.
pub async fn start_recording_upstream(
    status: u16,
    response: &'static str,
) -> (SocketAddr, Recorder) {
    let recorder = Recorder::default();
    let requests = recorder.requests.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
        let requests = requests.clone();
        async move {
            requests.lock().unwrap().push(RecordedRequest {
                path: uri.path().to_string(),
                body: body.to_vec(),
                request_id: headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
            });
            (StatusCode::from_u16(status).unwrap(), response)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorder)
}

/// Start the gateway on an ephemeral port, returning its address and the
/// shutdown handle keeping it alive.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = GatewayServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
