pub use crate::common::RouteResult;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use config::ServerConfig;
use mission::SequenceEditor;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

pub mod api;
pub mod common;
pub mod config;

/// The editor is the only mutable state. Requests take turns on the mutex, so
/// events reach it one at a time.
#[derive(Clone, FromRef)]
pub struct WebState {
    pub editor: Arc<Mutex<SequenceEditor>>,
}

impl WebState {
    pub fn new(editor: SequenceEditor) -> Self {
        Self {
            editor: Arc::new(Mutex::new(editor)),
        }
    }
}

pub fn router(state: WebState, config: &ServerConfig) -> Router {
    let static_content = ServeDir::new(&config.static_dir)
        .not_found_service(ServeFile::new(config.static_dir.join("error404.html")));

    Router::new()
        .nest("/api", api::routes(state))
        .fallback_service(static_content)
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(state: WebState, config: ServerConfig) -> std::io::Result<()> {
    let routes = router(state, &config);

    let listener = TcpListener::bind(&config.address).await?;
    log::info!("mission planner listening on {}", config.address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
