use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::domain::repo::RepoError;
use crate::domain::validation::collect_field_errors;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found with id: {id}")]
    UserNotFound { id: Uuid },

    #[error("User already exists with email: {email}")]
    EmailAlreadyExists { email: String },

    /// Field name (snake_case) to message, one entry per violated field.
    #[error("Validation failed")]
    Validation { errors: BTreeMap<String, String> },

    #[error("Invalid paging: {message}")]
    InvalidPaging { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn invalid_paging(message: impl Into<String>) -> Self {
        Self::InvalidPaging {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self::Validation { errors }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation {
            errors: collect_field_errors(&errors),
        }
    }
}

/// Store failures the service does not translate itself are infrastructure errors.
impl From<RepoError> for DomainError {
    fn from(e: RepoError) -> Self {
        Self::database(format!("{e:#}"))
    }
}
