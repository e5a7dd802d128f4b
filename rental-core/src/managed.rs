//! Resources with an acquire/release lifecycle scoped to one request.
//!
//! A handler acquires the resource from application state, works with it, then
//! releases it with the outcome of its work:
//!
//! ```ignore
//! let mut tx = Tx::acquire(&state).await?;
//! let result = service.confirm(&mut tx, id).await;
//! tx.release(result.is_ok()).await?;
//! result
//! ```
//!
//! `release(false)` must leave no trace of the work done with the resource; for
//! database transactions this means rollback.

use crate::error::HttpError;
use crate::http::{IntoResponse, Response};
use std::future::Future;

/// A resource with managed lifecycle (acquire/release).
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `ManagedResource<{S}>`",
    label = "this type cannot be acquired from this state",
    note = "implement `ManagedResource<S>` with `acquire()` and `release()` methods for your type"
)]
pub trait ManagedResource<S>: Sized {
    /// Error type returned by acquire/release operations.
    /// Must be convertible to an HTTP response.
    type Error: Into<Response>;

    /// Acquires the resource from the application state.
    fn acquire(state: &S) -> impl Future<Output = Result<Self, Self::Error>> + Send;

    /// Releases the resource after the handler's work completes.
    ///
    /// - `success: true`: the work succeeded; commit/finalize
    /// - `success: false`: the work failed; discard
    fn release(self, success: bool) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Error wrapper for managed resource operations using `HttpError`.
pub struct ManagedError(pub HttpError);

impl From<HttpError> for ManagedError {
    fn from(err: HttpError) -> Self {
        ManagedError(err)
    }
}

impl From<ManagedError> for HttpError {
    fn from(err: ManagedError) -> Self {
        err.0
    }
}

impl From<ManagedError> for Response {
    fn from(err: ManagedError) -> Self {
        err.0.into_response()
    }
}

impl std::fmt::Display for ManagedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for ManagedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ManagedError({:?})", self.0)
    }
}
