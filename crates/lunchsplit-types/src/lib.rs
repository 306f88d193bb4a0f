//! LunchSplit Types
//!
//! This crate defines the data model shared by the LunchSplit crates: participants,
//! line items, the extra-cost configuration and the derived per-person breakdown.
//! It has no behavior beyond construction, lookup and (de)serialization, which
//! keeps `lunchsplit-calculator` and `lunchsplit-core` free of circular
//! dependencies.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]

mod ids;
mod types;

pub use ids::{LineItemId, ParticipantId, SessionId};
pub use types::{Amount, Breakdown, ExtraCostConfig, ItemShare, LineItem, Participant, TipKind};

