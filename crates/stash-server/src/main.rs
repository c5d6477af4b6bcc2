//! String Stash Server
//!
//! Small HTTP/JSON service for creating, listing and deleting short text
//! entries. Entries are kept either in process memory or in a Redis list,
//! selected with `STORE_BACKEND`.

mod config;
mod error;
mod handlers;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get},
    Router,
};
use stash_core::EntryStore;
use std::any::Any;
use std::sync::Arc;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{Config, StoreBackend};
use storage::{MemoryStore, RedisStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
}

#[tokio::main]
async fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }
    install_panic_hook();

    info!("Starting String Stash Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Route panics through tracing, then fall through to the default hook.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let message = panic_message(panic.payload());
        match panic.location() {
            Some(at) => error!(file = at.file(), line = at.line(), "panic: {}", message),
            None => error!("panic: {}", message),
        }
        default_hook(panic);
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

async fn run_server() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Config loaded: port={}, backend={:?}",
        config.port, config.store_backend
    );

    let store = open_store(&config).await?;
    let app = build_router(AppState { store });

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn EntryStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            info!("Using Redis store at {}", config.redis_url);
            let store = RedisStore::new(&config.redis_url, config.redis_key.clone())?;
            // Unreachable Redis is not fatal; requests will report it.
            store.connect().await;
            Ok(Arc::new(store))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/strings",
            get(handlers::strings::list).post(handlers::strings::create),
        )
        .route("/api/strings/:id", delete(handlers::strings::delete))
        .layer(
            CorsLayer::new()
                .allow_origin(CorsAny)
                .allow_methods(CorsAny)
                .allow_headers(CorsAny),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down...");
}
