use std::{any::Any, sync::Arc};

use axum::{
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod codegen;
mod config;
mod error;
mod handlers;
mod models;
mod store;

use store::{JsonFileStore, LinkStore};

// ── Shared application state ───────────────────────────────────────────────

/// Produces a short code when the caller does not pick one.
pub type CodeGenerator = fn() -> String;

pub struct AppState {
    pub config: config::AppConfig,
    pub store: Arc<dyn LinkStore>,
    /// Held across load → insert → save in `create_link`.
    /// Readers never take it; saves replace the snapshot atomically.
    pub write_lock: Mutex<()>,
    pub generate_code: CodeGenerator,
}

impl AppState {
    pub fn new(
        config: config::AppConfig,
        store: Arc<dyn LinkStore>,
        generate_code: CodeGenerator,
    ) -> Self {
        Self {
            config,
            store,
            write_lock: Mutex::new(()),
            generate_code,
        }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    use handlers::{assets, links, redirect};

    // A known path hit with the wrong method goes through the same fallback
    // as an unknown path: GET resolves a code, anything else is a 404.
    Router::new()
        .route("/", get(assets::index).fallback(redirect::fallback))
        .route(
            "/style.css",
            get(assets::stylesheet).fallback(redirect::fallback),
        )
        .route(
            "/shorten",
            post(links::create_link).fallback(redirect::fallback),
        )
        .route("/links", get(links::list_links).fallback(redirect::fallback))
        .fallback(redirect::fallback)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Last-resort 500 for a handler that panicked.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    error::internal_error()
}

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent — env vars may already be set)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shortly=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::AppConfig::from_env()?;
    let store = JsonFileStore::new(&config.data_file);
    tracing::info!("Link snapshot: {}", store.path().display());
    tracing::info!("Static files: {}", config.public_dir.display());

    // Fail fast on an unreadable snapshot and create it if missing.
    let links = store.load().await?;
    if links.is_empty() {
        tracing::info!("Link snapshot is empty");
    } else {
        tracing::info!("Loaded {} link(s)", links.len());
    }

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, Arc::new(store), codegen::generate));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
