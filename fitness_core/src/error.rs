//! Error types for the fitness_core library.

use crate::EntityId;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause carried by [`Error::Database`]
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for fitness_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Entity failed validation before reaching storage
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No row exists for the requested identifier
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    /// An entity with the same name already exists
    #[error("{entity} with name '{name}' already exists")]
    Duplicate { entity: &'static str, name: String },

    /// Underlying storage failure, wrapping the original cause
    #[error("Database error: {context}")]
    Database {
        context: String,
        #[source]
        source: BoxedCause,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a storage-level failure with a description of what was attempted
    pub fn database(context: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Error::Database {
            context: context.into(),
            source: source.into(),
        }
    }

    /// True for the "resource not found" kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
