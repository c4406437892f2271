//! Error types for the CRM service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CustomerError>;

#[derive(Error, Debug)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(i64),

    #[error("Email already taken: {0}")]
    DuplicateEmail(String),

    #[error("Update contains no changes")]
    NoChanges,

    #[error("Database error: {0}")]
    Database(String),
}
