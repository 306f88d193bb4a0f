//! One-way export of a session and its computed summary.
//!
//! Exporters read the raw participants and dishes plus the [`BillSummary`]
//! derived from them, and render a file. They never feed anything back into the
//! session.

use crate::error::ExportError;
use crate::session::LunchSession;
use chrono::NaiveDate;
use lunchsplit_calculator::BillSummary;
use lunchsplit_types::LineItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument};

pub mod csv;
pub mod json;
pub mod markdown;

pub use self::csv::CsvExporter;
pub use self::json::JsonExporter;
pub use self::markdown::MarkdownExporter;

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Spreadsheet: dishes, breakdown and summary sections
    #[default]
    Csv,
    /// Printable document
    Markdown,
    /// Machine-readable summary
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "spreadsheet" => Ok(ExportFormat::Csv),
            "md" | "markdown" | "document" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// Everything an exporter reads
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    pub session: &'a LunchSession,
    pub summary: BillSummary,
    /// Currency shown next to human-readable amounts
    pub currency: String,
}

impl<'a> ExportContext<'a> {
    /// Computes the summary of `session`. Refuses sessions with no dishes or no participants.
    pub fn new(
        session: &'a LunchSession,
        currency: impl Into<String>,
    ) -> Result<Self, ExportError> {
        if session.items().is_empty() || session.participants().is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(Self { session, summary: session.summary(), currency: currency.into() })
    }

    /// Display names of a dish's sharers in participant order, then `?` for
    /// each id that matches nobody.
    pub fn sharer_names(&self, item: &LineItem) -> Vec<&'a str> {
        let session: &'a LunchSession = self.session;
        let mut names: Vec<&'a str> = session
            .participants()
            .iter()
            .filter(|p| item.is_shared_by(&p.id))
            .map(|p| p.name.as_str())
            .collect();
        let dangling =
            item.participant_ids.iter().filter(|id| session.participant(id).is_none()).count();
        names.extend(std::iter::repeat_n("?", dangling));
        names
    }
}

/// Renders an [`ExportContext`] into some output.
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    fn render(&self, ctx: &ExportContext<'_>, out: &mut dyn Write) -> Result<(), ExportError>;
}

/// The exporter for `format`.
pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Markdown => Box::new(MarkdownExporter),
        ExportFormat::Json => Box::new(JsonExporter),
    }
}

/// `LunchSplit_<date>.<ext>`
pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("LunchSplit_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Renders `session` to a string.
pub fn render_to_string(
    session: &LunchSession,
    format: ExportFormat,
    currency: &str,
) -> Result<String, ExportError> {
    let ctx = ExportContext::new(session, currency)?;
    let mut buffer = Vec::new();
    exporter_for(format).render(&ctx, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Writes an export of `session` to `path`, or to `dir/<default file name>`
/// when `path` is a directory.
#[instrument(skip(session), fields(session_id = %session.id()))]
pub fn export_to_path(
    session: &LunchSession,
    format: ExportFormat,
    path: &Path,
    currency: &str,
) -> Result<PathBuf, ExportError> {
    let ctx = ExportContext::new(session, currency)?;
    let target = if path.is_dir() {
        path.join(default_file_name(format, session.date()))
    } else {
        path.to_path_buf()
    };

    let exporter = exporter_for(format);
    let mut writer = BufWriter::new(File::create(&target)?);
    exporter.render(&ctx, &mut writer)?;
    writer.flush()?;

    info!(format = %exporter.format(), path = %target.display(), "Export written");
    Ok(target)
}
