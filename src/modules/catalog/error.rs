use thiserror::Error;

use super::models::BookId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("book '{0}' not found")]
    NotFound(BookId),

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl CatalogError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<CatalogError> for libraryhub_http::error::AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound(_) => Self::not_found(message),
            CatalogError::Validation { field, message: reason } => {
                Self::invalid_field(field, &reason, message)
            }
        }
    }
}
