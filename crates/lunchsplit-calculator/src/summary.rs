use crate::allocation::{
    ExtraCostsDetail, bill_subtotal, breakdowns_with_totals, extra_costs_detail,
};
use crate::rounding::round2;
use lunchsplit_types::{Amount, Breakdown, ExtraCostConfig, LineItem, Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Everything an export consumer needs about a bill, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Bill subtotal before extra costs
    pub subtotal: Amount,
    /// Tax, service and tip on the subtotal
    pub extra_costs: ExtraCostsDetail,
    /// `round2(subtotal + extra_costs.total)`
    pub grand_total: Amount,
    /// Per-participant breakdowns, in participant order
    pub breakdowns: Vec<Breakdown>,
    /// Part of the grand total not covered by any participant
    pub unattributed: Amount,
}

impl BillSummary {
    /// Computes subtotal, extras, grand total and breakdowns from one subtotal value.
    pub fn compute(
        participants: &[Participant],
        items: &[LineItem],
        config: &ExtraCostConfig,
    ) -> Self {
        let subtotal = bill_subtotal(items);
        let extra_costs = extra_costs_detail(subtotal, config);
        let grand_total = round2(subtotal + extra_costs.total);
        let breakdowns = breakdowns_with_totals(participants, items, subtotal, extra_costs.total);
        let attributed = round2(breakdowns.iter().map(|b| b.total).sum());
        let unattributed = round2(grand_total - attributed);

        trace!(
            %subtotal,
            extra_total = %extra_costs.total,
            %grand_total,
            %unattributed,
            participants = participants.len(),
            items = items.len(),
            "Computed bill summary"
        );

        Self {
            subtotal,
            extra_costs,
            grand_total,
            breakdowns,
            unattributed,
        }
    }

    /// Total of the extra costs.
    pub fn extra_total(&self) -> Amount {
        self.extra_costs.total
    }

    /// The breakdown of one participant, if present.
    pub fn breakdown_of(&self, participant: &ParticipantId) -> Option<&Breakdown> {
        self.breakdowns.iter().find(|b| b.participant.id == *participant)
    }
}
