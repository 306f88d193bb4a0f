//! Plain-text output for the terminal.

use lunchsplit_calculator::{BillSummary, line_item_total, per_person_share, total_owed};
use lunchsplit_core::{LunchSession, format_money};
use lunchsplit_types::{ExtraCostConfig, TipKind};
use std::io::{self, Write};

/// One line per colleague with the amount they owe.
pub fn write_participants(
    session: &LunchSession,
    currency: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    if session.participants().is_empty() {
        return writeln!(out, "No colleagues yet.");
    }
    for participant in session.participants() {
        let owed = total_owed(
            &participant.id,
            session.participants(),
            session.items(),
            session.extra_costs(),
        );
        writeln!(
            out,
            "{}  {}  owes {}",
            participant.id,
            participant.name,
            format_money(owed, currency)
        )?;
    }
    Ok(())
}

pub fn write_items(session: &LunchSession, currency: &str, out: &mut dyn Write) -> io::Result<()> {
    if session.items().is_empty() {
        return writeln!(out, "No dishes yet.");
    }
    for item in session.items() {
        let sharers: Vec<&str> = session
            .participants()
            .iter()
            .filter(|p| item.is_shared_by(&p.id))
            .map(|p| p.name.as_str())
            .collect();
        writeln!(
            out,
            "{}  {} x{} @ {} = {}",
            item.id,
            item.name,
            item.quantity,
            format_money(item.price, currency),
            format_money(line_item_total(item), currency),
        )?;
        match per_person_share(item) {
            Some(share) => writeln!(
                out,
                "    shared by {} ({} each)",
                sharers.join(", "),
                format_money(share, currency)
            )?,
            None => writeln!(out, "    not assigned")?,
        }
    }
    Ok(())
}

pub fn write_extras(
    config: &ExtraCostConfig,
    currency: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "Tax:     {}%", config.tax_percent.normalize())?;
    writeln!(out, "Service: {}%", config.service_percent.normalize())?;
    match config.tip_kind {
        TipKind::Fixed => writeln!(out, "Tip:     {}", format_money(config.tip_value, currency)),
        TipKind::Percent => writeln!(out, "Tip:     {}%", config.tip_value.normalize()),
    }
}

pub fn write_summary(summary: &BillSummary, currency: &str, out: &mut dyn Write) -> io::Result<()> {
    let money = |amount| format_money(amount, currency);
    let width = summary
        .breakdowns
        .iter()
        .map(|b| b.participant.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Colleague".len());

    writeln!(
        out,
        "{:<width$}  {:>16}  {:>16}  {:>16}",
        "Colleague", "Subtotal", "Extras", "Total"
    )?;
    for breakdown in &summary.breakdowns {
        writeln!(
            out,
            "{:<width$}  {:>16}  {:>16}  {:>16}",
            breakdown.participant.name,
            money(breakdown.subtotal),
            money(breakdown.extra_costs),
            money(breakdown.total),
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Subtotal:    {}", money(summary.subtotal))?;
    writeln!(out, "Tax:         {}", money(summary.extra_costs.tax))?;
    writeln!(out, "Service:     {}", money(summary.extra_costs.service))?;
    writeln!(out, "Tip:         {}", money(summary.extra_costs.tip))?;
    writeln!(out, "Grand total: {}", money(summary.grand_total))?;
    if !summary.unattributed.is_zero() {
        writeln!(out, "Unassigned:  {}", money(summary.unattributed))?;
    }
    Ok(())
}
