//! Error handling for the LunchSplit session layer
//!
//! The allocation engine never fails. Everything that can go wrong happens
//! before it runs (user input rejected by validation, unknown participants or
//! dishes) or after it (persisting the session, writing an export).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input. Raised before any value reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or duplicate display name
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Non-numeric, negative or zero price, negative percentage
    #[error("Invalid {field} '{input}': {reason}")]
    InvalidAmount { field: String, input: String, reason: String },

    /// Non-integer or non-positive quantity
    #[error("Invalid quantity '{input}': {reason}")]
    InvalidQuantity { input: String, reason: String },
}

/// Convenience constructors for common validation failures
impl ValidationError {
    /// A name that is empty once trimmed
    pub fn empty_name() -> Self {
        Self::InvalidName { name: String::new(), reason: "name must not be empty".to_string() }
    }

    /// A participant name already taken (case-insensitive)
    pub fn duplicate_name(name: &str) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: "a participant with this name already exists".to_string(),
        }
    }

    /// An amount-like input that failed a check
    pub fn amount(field: &str, input: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.to_string(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// A quantity input that failed a check
    pub fn quantity(input: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidQuantity { input: input.to_string(), reason: reason.into() }
    }
}

/// Errors raised by session update operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Participant not found: {0}")]
    UnknownParticipant(String),

    #[error("Dish not found: {0}")]
    UnknownItem(String),
}

/// Errors raised by a [`crate::store::SessionStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Errors raised while rendering or writing an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: add at least one participant and one dish")]
    NothingToExport,

    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Umbrella error for every fallible LunchSplit operation
#[derive(Error, Debug)]
pub enum LunchSplitError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<ValidationError> for LunchSplitError {
    fn from(err: ValidationError) -> Self {
        Self::Session(SessionError::Validation(err))
    }
}

impl LunchSplitError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            LunchSplitError::Session(SessionError::Validation(_)) => "validation",
            LunchSplitError::Session(_) => "session",
            LunchSplitError::Store(_) => "storage",
            LunchSplitError::Export(_) => "export",
        }
    }

    /// Whether the user can fix this by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LunchSplitError::Session(_) | LunchSplitError::Export(ExportError::NothingToExport)
        )
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for LunchSplit operations
pub type LunchSplitResult<T> = Result<T, LunchSplitError>;
