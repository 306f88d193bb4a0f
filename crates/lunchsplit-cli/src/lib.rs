//! Command-line front end for LunchSplit.
//!
//! The binary parses a [`cli::Cli`], loads a [`config::LunchSplitConfig`],
//! sets up logging and hands the command to an [`app::App`].

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

use lunchsplit_core::{ExportError, LunchSplitError, SessionError, ValidationError};

pub use app::App;
pub use cli::{Cli, Command};
pub use config::{ConfigError, LunchSplitConfig};

/// Whether `err` was caused by the user's input rather than the environment.
pub fn is_user_error(err: &anyhow::Error) -> bool {
    if let Some(err) = err.downcast_ref::<LunchSplitError>() {
        return err.is_user_error();
    }
    err.is::<SessionError>()
        || err.is::<ValidationError>()
        || matches!(err.downcast_ref::<ExportError>(), Some(ExportError::NothingToExport))
}
