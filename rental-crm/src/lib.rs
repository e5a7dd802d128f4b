//! Car rental CRM service.
//!
//! Exposes the order store over HTTP and routes freshly authenticated users
//! to their role's home page.

pub mod config;
pub mod controllers;
pub mod models;
pub mod services;
pub mod state;

use rental_core::http::{middleware, Router};
use rental_core::{catch_panic_layer, default_trace};
use rental_security::forwarded_identity;

pub use config::CrmSettings;
pub use state::AppState;

/// Assemble every route with the identity, tracing and panic layers.
pub fn router(state: AppState) -> Router {
    let identity_headers = state.identity_headers.clone();
    Router::new()
        .merge(controllers::orders::routes())
        .merge(controllers::login::routes())
        .merge(controllers::health::routes())
        .layer(middleware::from_fn_with_state(
            identity_headers,
            forwarded_identity,
        ))
        .layer(default_trace())
        .layer(catch_panic_layer())
        .with_state(state)
}
