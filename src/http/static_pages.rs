//! The three HTML pages of the browser client.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::config::schema::StaticFilesConfig;

pub fn routes<S>(config: &StaticFilesConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if !config.enabled {
        return Router::new();
    }

    let root = Path::new(&config.root);
    Router::new()
        .route_service("/", ServeFile::new(root.join("index.html")))
        .route_service("/login", ServeFile::new(root.join("login.html")))
        .route_service("/knowledge", ServeFile::new(root.join("knowledge.html")))
}
