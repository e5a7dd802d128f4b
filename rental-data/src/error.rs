/// Errors that can occur in the data layer.
///
/// An absent row is not an error for lookups; those return `Option`/empty
/// collections. `NotFound` is reserved for writes that target a row which does
/// not exist.
#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    /// A store constraint (foreign key, unique, not-null, check) rejected the write.
    Constraint(String),
    Database(Box<dyn std::error::Error + Send + Sync>),
    Other(String),
}

impl DataError {
    /// Construct a `Database` variant from any error type.
    ///
    /// Used by backend crates (e.g. `rental-data-sqlx`) to wrap driver-specific errors.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::Constraint(msg) => write!(f, "Constraint violation: {msg}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
            DataError::Other(msg) => write!(f, "Data error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<DataError> for rental_core::HttpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => rental_core::HttpError::NotFound(msg),
            DataError::Constraint(msg) => rental_core::HttpError::BadRequest(msg),
            DataError::Database(e) => rental_core::HttpError::Internal(e.to_string()),
            DataError::Other(msg) => rental_core::HttpError::Internal(msg),
        }
    }
}
