//! Axum re-exports, so downstream crates name one HTTP vocabulary.

pub use axum::body::Body;
pub use axum::extract::{FromRequestParts, Path, Query, Request, State};
pub use axum::http::header::{HeaderMap, HeaderValue, COOKIE, LOCATION, SET_COOKIE};
pub use axum::http::request::Parts;
pub use axum::http::StatusCode;
pub use axum::middleware;
pub use axum::response::{IntoResponse, Response};
pub use axum::routing;
pub use axum::{Json, Router};
