//! Where a user lands after a successful login.
//!
//! [`determine_target_url`] is the pure decision; [`RoleRedirectSuccessHandler`]
//! applies it to a response and a session through the [`RedirectResponse`]
//! and [`SessionAttributes`] seams. [`RedirectFailureHandler`] is the other
//! half: it records a failed attempt in the session for the success handler
//! to clear.

use rental_core::http::{IntoResponse, Response, StatusCode, LOCATION};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::SecurityError;
use crate::identity::RoleBasedIdentity;
use crate::roles::Role;
use crate::session::{SessionAttributes, AUTHENTICATION_EXCEPTION};

/// Select the home page for a set of role labels.
///
/// Priority is fixed: `USER`, then `MANAGER`, then `ADMIN`, whatever order the
/// labels come in. A set with none of them has no destination.
pub fn determine_target_url<R: AsRef<str>>(roles: &[R]) -> Result<&'static str, SecurityError> {
    roles
        .iter()
        .filter_map(|r| Role::from_authority(r.as_ref()))
        .min()
        .map(Role::home)
        .ok_or_else(|| SecurityError::NoRedirectTarget {
            roles: roles.iter().map(|r| r.as_ref().to_string()).collect(),
        })
}

/// The part of an HTTP response the router needs.
pub trait RedirectResponse {
    /// Whether status and headers have already been sent.
    fn is_committed(&self) -> bool;

    fn send_redirect(&mut self, location: &str);
}

/// Turns a target into the `Location` actually sent.
pub trait RedirectStrategy: Send + Sync {
    fn send_redirect(&self, response: &mut dyn RedirectResponse, url: &str);
}

/// Prefixes non-absolute targets with the application's context path.
///
/// With the default empty context path targets pass through unchanged, so
/// `/userHome` stays absolute and `managerHome` stays relative.
#[derive(Clone, Debug, Default)]
pub struct DefaultRedirectStrategy {
    context_path: String,
}

impl DefaultRedirectStrategy {
    pub fn with_context_path(context_path: impl Into<String>) -> Self {
        Self {
            context_path: context_path.into(),
        }
    }

    pub fn redirect_url(&self, url: &str) -> String {
        if url.contains("://") {
            url.to_string()
        } else {
            format!("{}{url}", self.context_path)
        }
    }
}

impl RedirectStrategy for DefaultRedirectStrategy {
    fn send_redirect(&self, response: &mut dyn RedirectResponse, url: &str) {
        let location = self.redirect_url(url);
        debug!(%location, "redirecting");
        response.send_redirect(&location);
    }
}

/// What the success handler did with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOutcome {
    Redirected(&'static str),
    /// The response was already committed; nothing was sent.
    ResponseCommitted,
}

/// Post-authentication handler sending each user to its role's home page.
#[derive(Clone, Debug, Default)]
pub struct RoleRedirectSuccessHandler<R = DefaultRedirectStrategy> {
    strategy: R,
}

impl RoleRedirectSuccessHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RedirectStrategy> RoleRedirectSuccessHandler<R> {
    pub fn with_strategy(strategy: R) -> Self {
        Self { strategy }
    }

    /// Redirect the principal to its home page and clear the stale
    /// authentication failure from its session.
    ///
    /// A role set with no home page fails before the response or session is
    /// touched. A committed response is left alone, but the session attribute
    /// is still cleared.
    pub fn on_authentication_success(
        &self,
        identity: &impl RoleBasedIdentity,
        response: &mut impl RedirectResponse,
        session: Option<&mut dyn SessionAttributes>,
    ) -> Result<RedirectOutcome, SecurityError> {
        let outcome = self.handle(identity, response)?;
        if let Some(session) = session {
            session.remove_attribute(AUTHENTICATION_EXCEPTION);
        }
        Ok(outcome)
    }

    fn handle(
        &self,
        identity: &impl RoleBasedIdentity,
        response: &mut impl RedirectResponse,
    ) -> Result<RedirectOutcome, SecurityError> {
        let target = determine_target_url(identity.roles())?;

        if response.is_committed() {
            debug!(sub = identity.sub(), home = target, "response already committed, not redirecting");
            return Ok(RedirectOutcome::ResponseCommitted);
        }

        info!(sub = identity.sub(), home = target, "login succeeded");
        self.strategy.send_redirect(response, target);
        Ok(RedirectOutcome::Redirected(target))
    }
}

/// Post-authentication-failure handler: stores the failure reason in the
/// session and sends the user back to the login page.
#[derive(Clone, Debug)]
pub struct RedirectFailureHandler {
    failure_url: String,
}

impl Default for RedirectFailureHandler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAILURE_URL)
    }
}

impl RedirectFailureHandler {
    pub const DEFAULT_FAILURE_URL: &'static str = "/login?error";

    pub fn new(failure_url: impl Into<String>) -> Self {
        Self {
            failure_url: failure_url.into(),
        }
    }

    pub fn failure_url(&self) -> &str {
        &self.failure_url
    }

    /// Returns whether a redirect was sent. The reason is stored even when the
    /// response is already committed.
    pub fn on_authentication_failure(
        &self,
        reason: &str,
        response: &mut impl RedirectResponse,
        session: &mut dyn SessionAttributes,
    ) -> bool {
        session.set_attribute(AUTHENTICATION_EXCEPTION, Value::from(reason));

        if response.is_committed() {
            debug!(reason, "response already committed, not redirecting");
            return false;
        }

        info!(reason, "login failed");
        response.send_redirect(&self.failure_url);
        true
    }
}

/// A not-yet-sent axum response that can receive a redirect.
///
/// Becomes `302 Found` with a `Location` header once redirected, or
/// `204 No Content` otherwise.
#[derive(Debug, Default)]
pub struct PendingRedirect {
    location: Option<String>,
    committed: bool,
}

impl PendingRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl RedirectResponse for PendingRedirect {
    fn is_committed(&self) -> bool {
        self.committed
    }

    fn send_redirect(&mut self, location: &str) {
        self.location = Some(location.to_string());
        self.committed = true;
    }
}

impl IntoResponse for PendingRedirect {
    fn into_response(self) -> Response {
        match self.location {
            Some(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
