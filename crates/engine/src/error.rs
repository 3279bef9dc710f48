//! The module contains the errors the engine can throw.
//!
//! Handlers at the HTTP boundary map each variant to a status code, so the
//! variants follow the kind of failure rather than the operation:
//!
//! - [`MissingField`] and [`InvalidField`] for bad form input.
//! - [`InvalidDate`] for a membership date that does not parse.
//! - [`KeyNotFound`] when a member or membership does not exist.
//! - [`ExistingKey`] when an id or username is already taken.
//! - [`InvalidCredentials`] and [`Forbidden`] for authentication and
//!   authorization failures.
//! - [`PasswordHash`] when the hashing task could not complete.
//!
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidCredentials`]: EngineError::InvalidCredentials
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`PasswordHash`]: EngineError::PasswordHash
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Missing data: {0}")]
    MissingField(String),
    #[error("Invalid {0}")]
    InvalidField(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("{0}")]
    KeyNotFound(String),
    #[error("{0}")]
    ExistingKey(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Forbidden(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
