//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared state (config, HTTP client, backend client, pipeline) once
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS, bearer gate, request metrics)
//! - Serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::backend::BackendClient;
use crate::config::{RelayConfig, TimeoutConfig};
use crate::dispatch::{self, Dispatcher};
use crate::http::handlers::{auth, knowledge, method_not_allowed, not_found, webhook};
use crate::http::middleware::{cors, require_bearer, track_requests};
use crate::http::{request, static_pages};
use crate::lifecycle::shutdown;
use crate::webhook::{TemplateResponder, WebhookPipeline};

/// Application state injected into handlers. Built once, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub backend: Arc<BackendClient>,
    pub pipeline: Arc<WebhookPipeline>,
}

impl AppState {
    /// Build the state with the dispatcher selected by `crisp.mode`.
    pub fn from_config(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(&config.timeouts)?;
        let dispatcher = dispatch::from_config(http.clone(), &config.crisp);
        Ok(Self::assemble(config, http, dispatcher))
    }

    /// Build the state around a caller-supplied dispatcher.
    pub fn with_dispatcher(
        config: RelayConfig,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Result<Self, reqwest::Error> {
        let http = build_http_client(&config.timeouts)?;
        Ok(Self::assemble(config, http, dispatcher))
    }

    fn assemble(
        config: RelayConfig,
        http: reqwest::Client,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        let responder = Arc::new(TemplateResponder::new(config.reply.template.clone()));
        let backend = Arc::new(BackendClient::new(http, &config.backend));

        Self {
            config: Arc::new(config),
            backend,
            pipeline: Arc::new(WebhookPipeline::new(responder, dispatcher)),
        }
    }
}

/// One client for every outbound call, so connections are pooled across
/// Crisp and Supabase requests.
fn build_http_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.upstream_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();
        let max_body = config.security.max_body_size;

        let protected = Router::new()
            .route(
                "/knowledge/upload",
                post(knowledge::upload).fallback(method_not_allowed),
            )
            .route("/knowledge/", any(knowledge::missing_id))
            .route("/knowledge/{id}", any(knowledge::detail))
            .route_layer(middleware::from_fn(require_bearer));

        let api = Router::new()
            .route("/auth/login", post(auth::login).fallback(method_not_allowed))
            .route(
                "/knowledge",
                get(knowledge::list)
                    .head(method_not_allowed)
                    .fallback(method_not_allowed),
            )
            .merge(protected)
            .fallback(not_found)
            .layer(middleware::from_fn(cors))
            .layer(middleware::from_fn(track_requests));

        Router::new()
            .route(
                "/crisp/message",
                post(webhook::crisp_message).fallback(method_not_allowed),
            )
            .nest("/api", api)
            .merge(static_pages::routes(&config.static_files))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(max_body))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(DefaultBodyLimit::max(max_body)),
            )
    }

    /// Run the server, accepting connections on the given listener until a
    /// signal arrives or `stop` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        stop: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(stop))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
