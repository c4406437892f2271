//! CRM Server
//!
//! Customer management REST service: axum handlers over a service layer,
//! backed by one of two interchangeable storage backends (in-memory or
//! SQLite) selected at startup.

pub mod handlers;
pub mod services;
pub mod storage;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use services::CustomerService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService>,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // REST API routes
        .route(
            "/customers",
            get(handlers::customers::list).post(handlers::customers::register),
        )
        .route(
            "/customers/:id",
            get(handlers::customers::get)
                .put(handlers::customers::update)
                .delete(handlers::customers::delete),
        )
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
