//! In-process HTTP testing for rental CRM routers.
//!
//! [`TestApp`] dispatches requests straight into an axum `Router` with
//! `tower::ServiceExt::oneshot`; no port is bound.

mod app;
mod json_path;

pub use app::{TestApp, TestRequest, TestResponse};
pub use json_path::{parse_path, resolve_path, PathSegment};
