use thiserror::Error;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const QUERY_VALIDATION_FAILED: &str = "Query validation failed";

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Missing, malformed, expired or forged bearer token
    #[error("{0}")]
    Unauthenticated(String),

    /// Email/password pair does not match a stored user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated, but the role does not grant access
    #[error("You do not have permission to access this resource")]
    Forbidden,

    /// Input did not conform to its schema; carries every violation
    #[error("{message}: {}", .details.join(", "))]
    Validation { message: &'static str, details: Vec<String> },

    /// Document with the given identifier does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique index violation in the document store
    #[error("Duplicate key: {field} \"{value}\" already exists")]
    DuplicateKey { field: &'static str, value: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl CatalogError {
    pub fn validation(details: Vec<String>) -> Self {
        CatalogError::Validation {
            message: VALIDATION_FAILED,
            details,
        }
    }

    pub fn query_validation(details: Vec<String>) -> Self {
        CatalogError::Validation {
            message: QUERY_VALIDATION_FAILED,
            details,
        }
    }
}
