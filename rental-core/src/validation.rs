use serde::Serialize;

use crate::error::HttpError;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl From<&garde::Report> for ValidationErrorResponse {
    fn from(report: &garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                let field = path.to_string();
                FieldError {
                    field: if field.is_empty() { "value".to_string() } else { field },
                    message: error.message().to_string(),
                    code: "validation".to_string(),
                }
            })
            .collect();
        ValidationErrorResponse { errors }
    }
}

/// Validate a request payload, mapping a garde report to `HttpError::Validation`.
pub fn validate<T>(value: &T) -> Result<(), HttpError>
where
    T: garde::Validate,
    T::Context: Default,
{
    value
        .validate()
        .map_err(|report| HttpError::Validation(ValidationErrorResponse::from(&report)))
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;
