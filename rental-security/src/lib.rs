pub mod error;
pub mod identity;
pub mod redirect;
pub mod roles;
pub mod session;

// Re-export primary public types for convenience.
pub use error::SecurityError;
pub use identity::{forwarded_identity, AuthenticatedUser, IdentityHeaders, RoleBasedIdentity};
pub use redirect::{
    determine_target_url, DefaultRedirectStrategy, PendingRedirect, RedirectFailureHandler,
    RedirectOutcome, RedirectResponse, RedirectStrategy, RoleRedirectSuccessHandler,
};
pub use roles::Role;
pub use session::{
    session_cookie, session_id, InMemorySessionStore, Session, SessionAttributes,
    AUTHENTICATION_EXCEPTION, DEFAULT_SESSION_TTL, SESSION_COOKIE,
};

pub mod prelude {
    //! Re-exports of the most commonly used security types.
    pub use crate::{
        AuthenticatedUser, InMemorySessionStore, PendingRedirect, RedirectFailureHandler,
        RoleBasedIdentity, RoleRedirectSuccessHandler, SessionAttributes,
    };
}
