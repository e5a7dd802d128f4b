pub mod config;
pub mod error;
pub mod http;
pub mod layers;
pub mod managed;
pub mod validation;

pub use config::{ConfigError, ConfigValue, FromConfigValue, RentalConfig};
pub use error::HttpError;
pub use layers::{catch_panic_layer, default_trace, init_tracing};
pub use managed::{ManagedError, ManagedResource};
pub use validation::{validate, FieldError, ValidationErrorResponse};

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::http::{IntoResponse, Json, Path, Response, State, StatusCode};
    pub use crate::{HttpError, ManagedResource, RentalConfig};
}
