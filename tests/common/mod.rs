//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use crisp_relay::dispatch::Dispatcher;
use crisp_relay::{AppState, HttpServer, RelayConfig, Shutdown};
use tokio::net::TcpListener;

/// A request as seen by a stub upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Stub upstream that records every request and answers with a fixed
/// status and body.
pub struct StubUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl StubUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> CapturedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call");
        requests.into_iter().next().unwrap()
    }
}

pub async fn start_stub_upstream(status: u16, body: &'static str) -> StubUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let sink = captured.clone();
    let app = Router::new().fallback(move |req: Request<Body>| {
        let sink = sink.clone();
        async move {
            let (parts, body_in) = req.into_parts();
            let bytes = to_bytes(body_in, usize::MAX).await.unwrap();
            sink.lock().unwrap().push(CapturedRequest {
                method: parts.method,
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(str::to_string),
                headers: parts.headers,
                body: bytes,
            });
            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubUpstream { addr, captured }
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Config pointing the relay at the given backend and Crisp URLs.
pub fn relay_config(backend_url: &str, crisp_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.backend.url = backend_url.to_string();
    config.backend.anon_key = "anon-key".into();
    config.backend.service_key = "service-key".into();
    config.crisp.api_url = crisp_url.to_string();
    config.crisp.identifier = "ident".into();
    config.crisp.key = "secret".into();
    config.reply.template = "You said: {content}".into();
    config.static_files.enabled = false;
    config.timeouts.upstream_secs = 5;
    config
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(
    config: RelayConfig,
    dispatcher: Option<Arc<dyn Dispatcher>>,
) -> (SocketAddr, Shutdown) {
    let state = match dispatcher {
        Some(d) => AppState::with_dispatcher(config, d).unwrap(),
        None => AppState::from_config(config).unwrap(),
    };
    let server = HttpServer::new(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
