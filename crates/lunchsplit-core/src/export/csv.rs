//! Spreadsheet export.
//!
//! One CSV file with three sections, each introduced by a title row:
//! `Dishes` (Dish, Price, Quantity, Total, SharedBy), `Breakdown`
//! (Colleague, Subtotal, Extras, Total) and `Summary` (Label, Value).

use super::{ExportContext, ExportFormat, Exporter};
use crate::error::ExportError;
use crate::format::plain_amount;
use csv::WriterBuilder;
use lunchsplit_calculator::line_item_total;
use std::io::Write;

pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, ctx: &ExportContext<'_>, out: &mut dyn Write) -> Result<(), ExportError> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(out);
        let summary = &ctx.summary;

        writer.write_record(["Dishes"])?;
        writer.write_record(["Dish", "Price", "Quantity", "Total", "SharedBy"])?;
        for item in ctx.session.items() {
            writer.write_record([
                item.name.clone(),
                plain_amount(item.price),
                item.quantity.to_string(),
                plain_amount(line_item_total(item)),
                ctx.sharer_names(item).join(", "),
            ])?;
        }

        writer.write_record(["Breakdown"])?;
        writer.write_record(["Colleague", "Subtotal", "Extras", "Total"])?;
        for breakdown in &summary.breakdowns {
            writer.write_record([
                breakdown.participant.name.clone(),
                plain_amount(breakdown.subtotal),
                plain_amount(breakdown.extra_costs),
                plain_amount(breakdown.total),
            ])?;
        }

        writer.write_record(["Summary"])?;
        writer.write_record(["Label", "Value"])?;
        for (label, value) in [
            ("Subtotal", summary.subtotal),
            ("Extra Costs", summary.extra_total()),
            ("Grand Total", summary.grand_total),
        ] {
            writer.write_record([label.to_string(), plain_amount(value)])?;
        }

        writer.flush()?;
        Ok(())
    }
}
