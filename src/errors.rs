//! Unified error types for the Shop API.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP mapping of these
//! variants lives in [`crate::api::error`].

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The shopping list does not exist or is not owned by the caller
    #[error("Shopping list not found: {id}")]
    ListNotFound {
        /// Requested list id
        id: i64,
    },

    /// The item does not exist or its list is not owned by the caller
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Requested item id
        id: i64,
    },

    /// Malformed input to a create or update operation
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// Missing or unknown bearer credential
    #[error("Unauthenticated: {reason}")]
    Unauthenticated {
        /// Human-readable reason
        reason: String,
    },

    /// A stored decimal column could not be parsed back
    #[error("Corrupt decimal in column {column}: {value:?}")]
    CorruptDecimal {
        /// Column name
        column: &'static str,
        /// Raw stored text
        value: String,
    },

    /// A list's totals do not fit the decimal range
    #[error("Amounts on shopping list {list_id} exceed the supported range")]
    AmountOutOfRange {
        /// List being summarized
        list_id: i64,
    },

    /// I/O failure (config file, listener bind)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::Unauthenticated`] error.
    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
