//! HTTP surface of the portfolio site: the contact form endpoint and the
//! read-only article API.

pub mod extract;
pub mod handlers;

#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use eyre::{Context, Result, bail};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::constants::{FAILURE_MARKER, SUCCESS_MARKER};
use crate::config::{MessagesConfig, ServerConfig};
use crate::content::ArcContent;
use crate::storage::ArcStore;

const ARTICLES_PATH: &str = "/api/articles";

#[derive(Clone)]
pub struct AppState {
    pub store: ArcStore,
    pub content: ArcContent,
    pub messages: Arc<MessagesConfig>,
}

impl AppState {
    pub fn new(store: ArcStore, content: ArcContent, messages: MessagesConfig) -> Self {
        // Plain text clients only see these markers.
        if !messages.success.contains(SUCCESS_MARKER) {
            log::warn!("messages.success has no {} marker", SUCCESS_MARKER);
        }
        if !messages.failure_prefix.contains(FAILURE_MARKER) {
            log::warn!("messages.failure_prefix has no {} marker", FAILURE_MARKER);
        }
        Self {
            store,
            content,
            messages: Arc::new(messages),
        }
    }
}

pub fn router(state: AppState, endpoint: &str) -> Result<Router> {
    if !endpoint.starts_with('/') || endpoint == "/" || endpoint.starts_with(ARTICLES_PATH) {
        bail!("invalid contact endpoint path {:?}", endpoint);
    }

    let app = Router::new()
        .route("/", get(handlers::root))
        .route(
            endpoint,
            post(handlers::save_message).fallback(handlers::not_posted),
        )
        .route(ARTICLES_PATH, get(handlers::list_articles))
        .route(
            &format!("{}/{{key}}", ARTICLES_PATH),
            get(handlers::get_article),
        )
        .with_state(state);
    Ok(app)
}

pub async fn serve(config: &ServerConfig, state: AppState, token: CancellationToken) -> Result<()> {
    let app = router(state, &config.endpoint)?;
    let listener = TcpListener::bind(&config.listen)
        .await
        .wrap_err(format!("binding {}", config.listen))?;
    serve_with_listener(listener, app, token).await
}

/// Serves until the token is cancelled, then drains in-flight requests.
pub async fn serve_with_listener(
    listener: TcpListener,
    app: Router,
    token: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr().wrap_err("reading local address")?;
    log::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await
        .wrap_err("serving http")?;

    log::info!("Server on {} stopped", addr);
    Ok(())
}

#[cfg(test)]
pub(crate) async fn spawn_test_server(state: AppState, endpoint: &str) -> (String, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let url = format!("http://{}", listener.local_addr().expect("local address"));
    let app = router(state, endpoint).expect("build router");
    let token = CancellationToken::new();
    tokio::spawn(serve_with_listener(listener, app, token.clone()));
    (url, token)
}
