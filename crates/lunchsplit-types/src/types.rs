use crate::ids::{LineItemId, ParticipantId};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Monetary amount. Always carried with at most 2 fractional digits once it has
/// passed through the calculator.
pub type Amount = Decimal;

/// A person sharing the bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Identity
    pub id: ParticipantId,
    /// Display name
    pub name: String,
}

impl Participant {
    /// Creates a participant with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: ParticipantId::new(), name: name.into() }
    }
}

/// A priced, quantified purchase ("dish") shared among zero or more participants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identity
    pub id: LineItemId,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: Amount,
    /// Number of units ordered
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Participants sharing this item
    #[serde(default)]
    pub participant_ids: BTreeSet<ParticipantId>,
}

const fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Creates an unassigned line item with a freshly generated id.
    pub fn new(name: impl Into<String>, price: Amount, quantity: u32) -> Self {
        Self {
            id: LineItemId::new(),
            name: name.into(),
            price,
            quantity,
            participant_ids: BTreeSet::new(),
        }
    }

    /// Builder-style helper assigning the item to the given participants.
    #[must_use]
    pub fn shared_by<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        self.participant_ids.extend(ids);
        self
    }

    /// Whether `participant` is in the assignment set.
    #[must_use]
    pub fn is_shared_by(&self, participant: &ParticipantId) -> bool {
        self.participant_ids.contains(participant)
    }

    /// Number of participants sharing the item.
    #[must_use]
    pub fn share_count(&self) -> usize {
        self.participant_ids.len()
    }
}

/// How the tip value of an [`ExtraCostConfig`] is interpreted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    /// The tip value is an absolute amount
    #[default]
    Fixed,
    /// The tip value is a percentage of the bill subtotal
    Percent,
}

impl fmt::Display for TipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Percent => write!(f, "percent"),
        }
    }
}

impl FromStr for TipKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "amount" => Ok(Self::Fixed),
            "percent" | "%" => Ok(Self::Percent),
            other => Err(anyhow!("Unsupported tip kind: {}", other)),
        }
    }
}

/// Tax, service charge and tip applied on top of the bill subtotal
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraCostConfig {
    /// Tax as a percentage of the subtotal
    #[serde(default)]
    pub tax_percent: Decimal,
    /// Service charge as a percentage of the subtotal
    #[serde(default)]
    pub service_percent: Decimal,
    /// Interpretation of `tip_value`
    #[serde(default)]
    pub tip_kind: TipKind,
    /// Fixed tip amount or tip percentage, depending on `tip_kind`
    #[serde(default)]
    pub tip_value: Decimal,
}

impl ExtraCostConfig {
    /// Whether every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.tax_percent.is_zero() && self.service_percent.is_zero() && self.tip_value.is_zero()
    }
}

/// One line of a participant's breakdown: an item and the part of it they pay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemShare {
    /// The shared item
    pub item: LineItem,
    /// Apportioned amount
    pub amount: Amount,
}

/// Derived per-participant summary of owed amounts. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Who this breakdown belongs to
    pub participant: Participant,
    /// Items this participant shares, in bill order
    pub items: Vec<ItemShare>,
    /// Sum of the item shares
    pub subtotal: Amount,
    /// Proportional share of tax, service and tip
    pub extra_costs: Amount,
    /// `subtotal + extra_costs`
    pub total: Amount,
}
