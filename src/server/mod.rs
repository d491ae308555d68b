//! HTTP surface of the note store.
//!
//! Routes:
//!
//! | Method | Path          | Success                  |
//! |--------|---------------|--------------------------|
//! | GET    | `/notes`      | 200, array of notes      |
//! | GET    | `/notes/{id}` | 200, note                |
//! | POST   | `/notes`      | 201, created note        |
//! | PUT    | `/notes/{id}` | 200, updated note        |
//! | DELETE | `/notes/{id}` | 200, delete acknowledged |
//! | GET    | `/health`     | 200                      |

pub mod error;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::{NotekeeperError, Result};
use crate::storage::NoteStore;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The note store (wrapped in Mutex so one request touches it at a time).
    pub store: Arc<Mutex<NoteStore>>,
    /// Origin echoed in CORS headers, if cross-origin calls are allowed.
    pub cors_origin: Option<HeaderValue>,
}

impl AppState {
    pub fn new(store: NoteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            cors_origin: None,
        }
    }

    pub fn with_cors_origin(mut self, origin: &str) -> Result<Self> {
        let value = HeaderValue::from_str(origin)
            .map_err(|e| NotekeeperError::Config(format!("invalid CORS origin '{}': {}", origin, e)))?;
        self.cors_origin = Some(value);
        Ok(self)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::cors,
        ))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "note store listening");
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    tracing::info!("note store stopped");
    Ok(())
}
