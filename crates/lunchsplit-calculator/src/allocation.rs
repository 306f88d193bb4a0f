//! The allocation engine.
//!
//! Every function here is a pure recomputation over plain data: no caching, no
//! validation, no errors. Amounts are rounded to minor units after each
//! arithmetic step, in a fixed order, so results are reproducible to the cent.
//! Changing the order (for example deriving a person's extra share from an
//! unrounded subtotal) changes cent-level results.

use crate::built_in::{
    even_split::even_split, percentage_of::percentage_of, proportional_allocator,
};
use crate::rounding::round2;
use lunchsplit_types::{
    Amount, Breakdown, ExtraCostConfig, ItemShare, LineItem, Participant, ParticipantId, TipKind,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three extra-cost components, each rounded, and their rounded sum
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtraCostsDetail {
    /// Tax on the subtotal
    pub tax: Amount,
    /// Service charge on the subtotal
    pub service: Amount,
    /// Tip, fixed or proportional to the subtotal
    pub tip: Amount,
    /// `round2(tax + service + tip)`
    pub total: Amount,
}

/// `round2(price * quantity)`. Zero price or quantity yields zero.
pub fn line_item_total(item: &LineItem) -> Amount {
    round2(item.price * Decimal::from(item.quantity))
}

/// Sum of the individually rounded item totals, rounded again.
pub fn bill_subtotal(items: &[LineItem]) -> Amount {
    round2(items.iter().map(line_item_total).sum())
}

/// Tax, service and tip computed on `subtotal`.
pub fn extra_costs_detail(subtotal: Amount, config: &ExtraCostConfig) -> ExtraCostsDetail {
    let tax = percentage_of(subtotal, config.tax_percent);
    let service = percentage_of(subtotal, config.service_percent);
    let tip = match config.tip_kind {
        TipKind::Percent => percentage_of(subtotal, config.tip_value),
        TipKind::Fixed => round2(config.tip_value),
    };
    ExtraCostsDetail {
        tax,
        service,
        tip,
        total: round2(tax + service + tip),
    }
}

/// Total of tax, service and tip on `subtotal`.
pub fn extra_costs_total(subtotal: Amount, config: &ExtraCostConfig) -> Amount {
    extra_costs_detail(subtotal, config).total
}

/// Subtotal plus extra costs, both derived from one subtotal value.
pub fn grand_total(items: &[LineItem], config: &ExtraCostConfig) -> Amount {
    let subtotal = bill_subtotal(items);
    round2(subtotal + extra_costs_total(subtotal, config))
}

/// Per-participant breakdowns, in participant order.
pub fn breakdowns(
    participants: &[Participant],
    items: &[LineItem],
    config: &ExtraCostConfig,
) -> Vec<Breakdown> {
    let subtotal = bill_subtotal(items);
    let extra_total = extra_costs_total(subtotal, config);
    breakdowns_with_totals(participants, items, subtotal, extra_total)
}

/// Breakdowns against an already computed bill subtotal and extra-costs total.
pub(crate) fn breakdowns_with_totals(
    participants: &[Participant],
    items: &[LineItem],
    subtotal: Amount,
    extra_total: Amount,
) -> Vec<Breakdown> {
    participants
        .iter()
        .map(|participant| breakdown_for(participant, items, subtotal, extra_total))
        .collect()
}

fn breakdown_for(
    participant: &Participant,
    items: &[LineItem],
    subtotal: Amount,
    extra_total: Amount,
) -> Breakdown {
    let mut shares = Vec::new();
    let mut running = Decimal::ZERO;

    for item in items.iter().filter(|item| item.is_shared_by(&participant.id)) {
        // The participant is in the set, so the share count is at least one.
        let Some(amount) = even_split(line_item_total(item), item.share_count()) else {
            continue;
        };
        running += amount;
        shares.push(ItemShare { item: item.clone(), amount });
    }

    let person_subtotal = round2(running);
    let person_extra = proportional_allocator::allocate(extra_total, person_subtotal, subtotal);

    Breakdown {
        participant: participant.clone(),
        items: shares,
        subtotal: person_subtotal,
        extra_costs: person_extra,
        total: round2(person_subtotal + person_extra),
    }
}

/// What each sharer pays for `item` alone, or `None` when nobody shares it.
pub fn per_person_share(item: &LineItem) -> Option<Amount> {
    even_split(line_item_total(item), item.share_count())
}

/// Total owed by one participant. Unknown ids owe nothing.
pub fn total_owed(
    participant: &ParticipantId,
    participants: &[Participant],
    items: &[LineItem],
    config: &ExtraCostConfig,
) -> Amount {
    breakdowns(participants, items, config)
        .into_iter()
        .find(|b| b.participant.id == *participant)
        .map_or(round2(Decimal::ZERO), |b| b.total)
}
