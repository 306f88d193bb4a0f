//! Printable report, rendered as Markdown.

use super::{ExportContext, ExportFormat, Exporter};
use crate::error::ExportError;
use crate::format::format_money;
use lunchsplit_calculator::line_item_total;
use lunchsplit_types::TipKind;
use std::io::Write;

pub struct MarkdownExporter;

// Pipes would break the table layout.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Exporter for MarkdownExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, ctx: &ExportContext<'_>, out: &mut dyn Write) -> Result<(), ExportError> {
        let money = |amount| format_money(amount, &ctx.currency);
        let session = ctx.session;
        let summary = &ctx.summary;

        writeln!(out, "# LunchSplit report ({})", session.date().format("%Y-%m-%d"))?;
        writeln!(out)?;

        writeln!(out, "## Dishes")?;
        writeln!(out)?;
        writeln!(out, "| Dish | Price | Qty | Total | Shared by |")?;
        writeln!(out, "|------|------:|----:|------:|-----------|")?;
        for item in session.items() {
            let sharers = ctx.sharer_names(item);
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                cell(&item.name),
                money(item.price),
                item.quantity,
                money(line_item_total(item)),
                if sharers.is_empty() { "-".to_string() } else { cell(&sharers.join(", ")) },
            )?;
        }
        writeln!(out)?;

        writeln!(out, "## Breakdown")?;
        writeln!(out)?;
        writeln!(out, "| Colleague | Subtotal | Extras | Total |")?;
        writeln!(out, "|-----------|---------:|-------:|------:|")?;
        for breakdown in &summary.breakdowns {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                cell(&breakdown.participant.name),
                money(breakdown.subtotal),
                money(breakdown.extra_costs),
                money(breakdown.total),
            )?;
        }
        writeln!(out)?;

        for breakdown in summary.breakdowns.iter().filter(|b| !b.items.is_empty()) {
            writeln!(out, "### {}", breakdown.participant.name)?;
            writeln!(out)?;
            for share in &breakdown.items {
                writeln!(out, "- {}: {}", share.item.name, money(share.amount))?;
            }
            if !breakdown.extra_costs.is_zero() {
                writeln!(out, "- Extras: {}", money(breakdown.extra_costs))?;
            }
            writeln!(out, "- **Total: {}**", money(breakdown.total))?;
            writeln!(out)?;
        }

        let extras = session.extra_costs();
        let detail = &summary.extra_costs;
        writeln!(out, "## Summary")?;
        writeln!(out)?;
        writeln!(out, "- Subtotal: {}", money(summary.subtotal))?;
        writeln!(out, "- Tax ({}%): {}", extras.tax_percent.normalize(), money(detail.tax))?;
        writeln!(
            out,
            "- Service ({}%): {}",
            extras.service_percent.normalize(),
            money(detail.service)
        )?;
        match extras.tip_kind {
            TipKind::Percent => {
                writeln!(out, "- Tip ({}%): {}", extras.tip_value.normalize(), money(detail.tip))?
            }
            TipKind::Fixed => writeln!(out, "- Tip: {}", money(detail.tip))?,
        }
        writeln!(out, "- Extra costs: {}", money(summary.extra_total()))?;
        writeln!(out, "- **Grand total: {}**", money(summary.grand_total))?;
        if !summary.unattributed.is_zero() {
            writeln!(out, "- Not assigned to anyone: {}", money(summary.unattributed))?;
        }

        Ok(())
    }
}
