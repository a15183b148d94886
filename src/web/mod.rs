//! In-memory stand-in for the hosted to-do service, for local development
//! and tests. It speaks the same routes and JSON shapes as the real one.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod errors;
mod handlers;
pub mod store;

use errors::AppError;
use store::Store;

/// Shared state for the stand-in service.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    /// Base URL clients reach this server at; used to build image URLs.
    pub public_url: String,
}

impl AppState {
    pub fn new(public_url: impl Into<String>) -> Self {
        AppState {
            store: Arc::new(Mutex::new(Store::new())),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))
    }
}

/// Build the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{tenant}/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/{tenant}/items/{id}",
            get(handlers::get_item)
                .patch(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/{tenant}/images/upload", post(handlers::upload_image))
        .route("/{tenant}/images/{file}", get(handlers::get_image))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the stand-in service on the given port until Ctrl-C.
pub async fn serve(port: u16) -> Result<(), String> {
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("failed to bind to {addr}: {e}"))?;
    let local = listener
        .local_addr()
        .map_err(|e| format!("failed to read local address: {e}"))?;
    let public_url = format!("http://{local}");

    let app = create_router(AppState::new(public_url.clone()));
    println!("todoboard stand-in service: {public_url}");
    info!(%public_url, "serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
