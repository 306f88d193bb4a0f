use super::{ExportContext, ExportFormat, Exporter};
use crate::error::ExportError;
use chrono::NaiveDate;
use lunchsplit_calculator::BillSummary;
use lunchsplit_types::{ExtraCostConfig, LineItem, Participant, SessionId};
use serde::Serialize;
use std::io::Write;

/// Machine-readable export: the raw session data next to its summary.
pub struct JsonExporter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    session_id: SessionId,
    date: NaiveDate,
    currency: &'a str,
    participants: &'a [Participant],
    items: &'a [LineItem],
    extra_costs: &'a ExtraCostConfig,
    summary: &'a BillSummary,
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, ctx: &ExportContext<'_>, out: &mut dyn Write) -> Result<(), ExportError> {
        let report = JsonReport {
            session_id: ctx.session.id(),
            date: ctx.session.date(),
            currency: &ctx.currency,
            participants: ctx.session.participants(),
            items: ctx.session.items(),
            extra_costs: ctx.session.extra_costs(),
            summary: &ctx.summary,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LunchSession, NewLineItem};
    use rust_decimal_macros::dec;

    #[test]
    fn test_json_report_contains_summary() {
        let mut session = LunchSession::new();
        let alice = session.add_participant("Alice").unwrap();
        session.add_item(NewLineItem::new("Soup", dec!(7.5)).shared_by([alice])).unwrap();

        let ctx = ExportContext::new(&session, "TJS").unwrap();
        let mut out = Vec::new();
        JsonExporter.render(&ctx, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["currency"], "TJS");
        assert_eq!(value["summary"]["grandTotal"], "7.50");
        assert_eq!(value["summary"]["breakdowns"][0]["participant"]["name"], "Alice");
        assert_eq!(value["items"][0]["quantity"], 1);
    }
}
