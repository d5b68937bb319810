//! Client Portal Kernel Library
//!
//! HTTP server, locale-aware routing, and the credential service.
//! The library exposes the router assembly and internals for
//! integration testing; the `portal` binary is the entry point for
//! running the server.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{Config, Language, SiteConfig};
pub use state::AppState;

use axum::Router;

/// Assemble the application router with the full middleware stack.
///
/// Request flow (outermost first): locale redirector → path protection
/// gate → routes. Observability and CORS layers are added by the
/// binary on top of this.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(routes::front::router())
        .merge(routes::auth::router())
        .merge(routes::health::router());

    if state.dev_mode() {
        router = router.merge(routes::seed::router());
    }

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::protect_paths,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::localize_path,
        ))
        .with_state(state)
}
