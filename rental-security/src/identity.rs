use rental_core::http::middleware::Next;
use rental_core::http::{FromRequestParts, Parts, Request, Response, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SecurityError;

/// An authenticated identity that carries role labels.
pub trait RoleBasedIdentity: Send + Sync {
    /// Unique subject identifier (login name, user id).
    fn sub(&self) -> &str;

    /// Roles granted to this identity, as raw labels.
    fn roles(&self) -> &[String];
}

/// The principal established by the authentication pipeline for this request.
///
/// The pipeline (or [`forwarded_identity`]) stores it in the request
/// extensions; handlers receive it as an extractor. Requests without one are
/// rejected with `401 Unauthorized`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject - unique user identifier.
    pub sub: String,

    /// Role labels granted to the user, e.g. `USER` or `ROLE_ADMIN`.
    pub roles: Vec<String>,
}

impl RoleBasedIdentity for AuthenticatedUser {
    fn sub(&self) -> &str {
        &self.sub
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl AuthenticatedUser {
    pub fn new(sub: impl Into<String>, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            sub: sub.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = SecurityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthenticatedUser>().cloned().ok_or_else(|| {
            warn!(uri = %parts.uri, "no authenticated principal on request");
            SecurityError::MissingPrincipal
        })
    }
}

/// Names of the headers a trusted upstream proxy uses to forward the principal.
#[derive(Clone, Debug)]
pub struct IdentityHeaders {
    /// Header carrying the subject.
    pub principal: String,
    /// Header carrying comma-separated role labels.
    pub roles: String,
}

impl Default for IdentityHeaders {
    fn default() -> Self {
        Self {
            principal: "x-authenticated-user".to_string(),
            roles: "x-authenticated-roles".to_string(),
        }
    }
}

impl IdentityHeaders {
    /// Build the principal from the forwarded headers, if the subject header is present.
    pub fn read(&self, parts: &Parts) -> Option<AuthenticatedUser> {
        let sub = parts
            .headers
            .get(self.principal.as_str())?
            .to_str()
            .ok()?
            .trim();
        if sub.is_empty() {
            return None;
        }
        let roles = parts
            .headers
            .get(self.roles.as_str())
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Some(AuthenticatedUser {
            sub: sub.to_string(),
            roles,
        })
    }
}

/// Middleware that turns forwarded identity headers into an [`AuthenticatedUser`]
/// request extension.
///
/// Only mount this behind a proxy that strips these headers from client traffic.
///
/// ```ignore
/// router.layer(middleware::from_fn_with_state(IdentityHeaders::default(), forwarded_identity))
/// ```
pub async fn forwarded_identity(
    State(headers): State<IdentityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    if let Some(user) = headers.read(&parts) {
        debug!(sub = %user.sub, roles = ?user.roles, "principal forwarded by upstream");
        parts.extensions.insert(user);
    }
    next.run(Request::from_parts(parts, body)).await
}
