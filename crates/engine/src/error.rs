//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when no row matches the requested id.
//! - [`Decode`] thrown when a stored row cannot be turned back into an
//!   [`Expense`].
//!
//! [`KeyNotFound`]: EngineError::KeyNotFound
//! [`Decode`]: EngineError::Decode
//! [`Expense`]: super::Expense
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Cannot decode stored value: {0}")]
    Decode(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Decode(a), Self::Decode(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
