//! LunchSplit Prelude
//!
//! Re-exports the items most applications need from `lunchsplit-types`,
//! `lunchsplit-calculator` and `lunchsplit-core`, so that a front end can get
//! by with a single `use lunchsplit_prelude::*;`.

#![deny(missing_docs)]

// Data model ----------------------------------------------------------------------------------

pub use lunchsplit_types::{
    Amount, Breakdown, ExtraCostConfig, ItemShare, LineItem, LineItemId, Participant,
    ParticipantId, SessionId, TipKind,
};

// Allocation engine ---------------------------------------------------------------------------

pub use lunchsplit_calculator::{
    BillSummary, ExtraCostsDetail, bill_subtotal, breakdowns, extra_costs_total, grand_total,
    line_item_total,
};

// Session, persistence and export -------------------------------------------------------------

pub use lunchsplit_core::{
    ExportFormat, LineItemPatch, LunchSession, LunchSplitError, LunchSplitResult, NewLineItem,
    SessionStore, format_money, parse_amount, parse_percent, parse_quantity,
};
