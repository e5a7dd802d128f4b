use rental_core::http::{IntoResponse, Json, Response, StatusCode};

/// Security-related errors for principal extraction and post-login routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// No authenticated principal is attached to the request.
    MissingPrincipal,

    /// The principal holds none of the roles that have a home page.
    ///
    /// This is an invalid state for the request: there is no default destination.
    NoRedirectTarget { roles: Vec<String> },
}

impl std::fmt::Display for SecurityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityError::MissingPrincipal => write!(f, "No authenticated principal"),
            SecurityError::NoRedirectTarget { roles } => {
                write!(f, "No redirect target for roles {roles:?}")
            }
        }
    }
}

impl std::error::Error for SecurityError {}

impl SecurityError {
    pub fn status(&self) -> StatusCode {
        match self {
            SecurityError::MissingPrincipal => StatusCode::UNAUTHORIZED,
            SecurityError::NoRedirectTarget { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            SecurityError::MissingPrincipal => "Unauthorized",
            SecurityError::NoRedirectTarget { .. } => "No home page for the granted roles",
        }
    }
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        if let SecurityError::NoRedirectTarget { roles } = &self {
            tracing::error!(?roles, "post-login redirect impossible");
        }
        let body = serde_json::json!({ "error": self.public_message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<SecurityError> for rental_core::HttpError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::MissingPrincipal => {
                rental_core::HttpError::Unauthorized(err.public_message().to_string())
            }
            SecurityError::NoRedirectTarget { .. } => {
                rental_core::HttpError::Internal(err.to_string())
            }
        }
    }
}
