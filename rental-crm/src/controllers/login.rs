use rental_core::http::{
    routing, HeaderMap, IntoResponse, Query, Response, Router, State, SET_COOKIE,
};
use rental_security::{
    session_cookie, AuthenticatedUser, PendingRedirect, SecurityError, SessionAttributes,
};
use serde::Deserialize;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login/success", routing::get(login_success))
        .route("/login/failure", routing::get(login_failure))
}

/// Lands here once the authentication pipeline has accepted the credentials.
///
/// Redirects to the principal's home page and clears the failure left in the
/// session by any earlier attempt.
async fn login_success(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    headers: HeaderMap,
) -> Result<PendingRedirect, SecurityError> {
    let mut response = PendingRedirect::new();
    let mut session = state.sessions.from_headers(&headers);
    state.login_handler.on_authentication_success(
        &user,
        &mut response,
        session.as_mut().map(|s| s as &mut dyn SessionAttributes),
    )?;
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct FailureParams {
    reason: Option<String>,
}

/// Lands here when the authentication pipeline rejected the credentials.
///
/// Remembers the reason in the caller's session, creating one if needed, and
/// sends the user back to the login page.
async fn login_failure(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FailureParams>,
) -> Response {
    let reason = params.reason.as_deref().unwrap_or("Bad credentials");
    let mut response = PendingRedirect::new();
    let session_id = {
        let mut session = state.sessions.from_headers_or_create(&headers);
        state
            .failure_handler
            .on_authentication_failure(reason, &mut response, &mut session);
        session.id().to_string()
    };
    ([(SET_COOKIE, session_cookie(&session_id))], response).into_response()
}
