use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::serializers::ValidationErrors;

/// Observer system errors with structured error types
#[derive(Debug, Error, Clone)]
pub enum ObserverError {
    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Pipeline execution failed: {0}")]
    PipelineError(String),
}

impl From<ValidationErrors> for ObserverError {
    fn from(errors: ValidationErrors) -> Self {
        ObserverError::ValidationError(errors)
    }
}

/// Convert from database errors
impl From<DatabaseError> for ObserverError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(msg) => ObserverError::NotFound(msg),
            other => ObserverError::DatabaseError(other.to_string()),
        }
    }
}
