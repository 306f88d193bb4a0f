#![allow(missing_docs)]
//! Core functionality for LunchSplit.
//!
//! This crate owns everything around the allocation engine: the explicit
//! session state and its update operations, input validation, persistence of
//! the current session, and one-way exports of the computed summary.

/// Error types for validation, session updates, storage and export
pub mod error;
/// Spreadsheet, document and JSON exports
pub mod export;
/// Human-readable money formatting
pub mod format;
/// The bill-splitting session and its update operations
pub mod session;
/// Persistence of the current session
pub mod store;
/// Parsing and validation of user input
pub mod validation;

pub use error::{
    ExportError, LunchSplitError, LunchSplitResult, SessionError, SessionResult, StoreError,
    ValidationError,
};
pub use export::{ExportFormat, Exporter, export_to_path, exporter_for, render_to_string};
pub use format::format_money;
pub use session::{LineItemPatch, LunchSession, NewLineItem};
pub use store::{InMemoryStore, JsonFileStore, SessionStore, load_or_new};
pub use validation::{parse_amount, parse_percent, parse_quantity};
