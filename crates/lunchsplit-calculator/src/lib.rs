//! The allocation engine of LunchSplit.
//!
//! This crate turns participants, line items and an extra-cost configuration into
//! bill totals and a per-participant breakdown. Tax, service and tip cannot be
//! attributed to a single dish, so they are spread across participants in
//! proportion to each participant's share of the bill subtotal.
//!
//! All functions are stateless and deterministic. They perform no validation and
//! never fail; input checking belongs to the session layer in `lunchsplit-core`.

pub mod allocation;
pub mod built_in;
pub mod rounding;
pub mod summary;

// Re-export the engine surface
pub use allocation::{
    ExtraCostsDetail, bill_subtotal, breakdowns, extra_costs_detail, extra_costs_total,
    grand_total, line_item_total, per_person_share, total_owed,
};
pub use rounding::round2;
pub use summary::BillSummary;
