//! The bill-splitting session.
//!
//! A [`LunchSession`] is a plain value owned by the application controller. It
//! is changed only through the update methods below, each of which validates its
//! input first and leaves the session untouched on error. Totals are never stored
//! on the session; call [`LunchSession::summary`] to derive them.

use crate::error::{SessionError, SessionResult};
use crate::validation::{
    MAX_QUANTITY, validate_extra_costs, validate_name, validate_participant_name,
    validate_price, validate_quantity,
};
use chrono::{Local, NaiveDate};
use lunchsplit_calculator::BillSummary;
use lunchsplit_types::{
    Amount, ExtraCostConfig, LineItem, LineItemId, Participant, ParticipantId, SessionId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// A dish about to be added to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub name: String,
    pub price: Amount,
    pub quantity: u32,
    pub shared_by: Vec<ParticipantId>,
}

impl NewLineItem {
    /// A dish of quantity 1 that nobody shares yet.
    pub fn new(name: impl Into<String>, price: Amount) -> Self {
        Self { name: name.into(), price, quantity: 1, shared_by: Vec::new() }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn shared_by(mut self, participants: impl IntoIterator<Item = ParticipantId>) -> Self {
        self.shared_by.extend(participants);
        self
    }
}

/// Partial update of a dish. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemPatch {
    pub name: Option<String>,
    pub price: Option<Amount>,
    pub quantity: Option<u32>,
    pub shared_by: Option<Vec<ParticipantId>>,
}

/// The single current bill-splitting session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LunchSession {
    id: SessionId,
    date: NaiveDate,
    #[serde(default)]
    participants: Vec<Participant>,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    extra_costs: ExtraCostConfig,
}

impl Default for LunchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LunchSession {
    /// An empty session dated today.
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    /// An empty session for the given date.
    pub fn with_date(date: NaiveDate) -> Self {
        Self {
            id: SessionId::new(),
            date,
            participants: Vec::new(),
            items: Vec::new(),
            extra_costs: ExtraCostConfig::default(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn extra_costs(&self) -> &ExtraCostConfig {
        &self.extra_costs
    }

    /// Whether there is nothing to split yet.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty() && self.items.is_empty()
    }

    /// Totals and per-person breakdowns for the current state.
    pub fn summary(&self) -> BillSummary {
        BillSummary::compute(&self.participants, &self.items, &self.extra_costs)
    }

    // ---------------------------------------------------------------------------------------
    // Participants
    // ---------------------------------------------------------------------------------------

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == *id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_participant_by_name(&self, name: &str) -> Option<&Participant> {
        let wanted = name.trim().to_lowercase();
        self.participants.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// Resolves a participant from an id or a display name.
    pub fn resolve_participant(&self, query: &str) -> SessionResult<ParticipantId> {
        query
            .parse::<ParticipantId>()
            .ok()
            .and_then(|id| self.participant(&id))
            .or_else(|| self.find_participant_by_name(query))
            .map(|p| p.id)
            .ok_or_else(|| SessionError::UnknownParticipant(query.trim().to_string()))
    }

    #[instrument(skip(self))]
    pub fn add_participant(&mut self, name: &str) -> SessionResult<ParticipantId> {
        let name = validate_participant_name(name, &self.participants, None)?;
        let participant = Participant::new(name);
        let id = participant.id;
        info!(participant_id = %id, name = %participant.name, "Participant added");
        self.participants.push(participant);
        Ok(id)
    }

    #[instrument(skip(self))]
    pub fn rename_participant(&mut self, id: &ParticipantId, name: &str) -> SessionResult<()> {
        let name = validate_participant_name(name, &self.participants, Some(id))?;
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| SessionError::UnknownParticipant(id.to_string()))?;
        info!(participant_id = %id, from = %participant.name, to = %name, "Participant renamed");
        participant.name = name;
        Ok(())
    }

    /// Removes a participant and drops them from every dish they shared.
    #[instrument(skip(self))]
    pub fn remove_participant(&mut self, id: &ParticipantId) -> SessionResult<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| SessionError::UnknownParticipant(id.to_string()))?;
        let removed = self.participants.remove(index);

        let mut unassigned = 0usize;
        for item in &mut self.items {
            if item.participant_ids.remove(id) {
                unassigned += 1;
            }
        }

        info!(participant_id = %id, name = %removed.name, unassigned, "Participant removed");
        Ok(removed)
    }

    // ---------------------------------------------------------------------------------------
    // Dishes
    // ---------------------------------------------------------------------------------------

    pub fn item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|d| d.id == *id)
    }

    /// Case-insensitive lookup by dish name. The first match wins.
    pub fn find_item_by_name(&self, name: &str) -> Option<&LineItem> {
        let wanted = name.trim().to_lowercase();
        self.items.iter().find(|d| d.name.to_lowercase() == wanted)
    }

    /// Resolves a dish from an id or a name.
    pub fn resolve_item(&self, query: &str) -> SessionResult<LineItemId> {
        query
            .parse::<LineItemId>()
            .ok()
            .and_then(|id| self.item(&id))
            .or_else(|| self.find_item_by_name(query))
            .map(|d| d.id)
            .ok_or_else(|| SessionError::UnknownItem(query.trim().to_string()))
    }

    fn item_mut(&mut self, id: &LineItemId) -> SessionResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))
    }

    fn known_participants(
        &self,
        ids: impl IntoIterator<Item = ParticipantId>,
    ) -> SessionResult<BTreeSet<ParticipantId>> {
        ids.into_iter()
            .map(|id| match self.participant(&id) {
                Some(_) => Ok(id),
                None => Err(SessionError::UnknownParticipant(id.to_string())),
            })
            .collect()
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn add_item(&mut self, draft: NewLineItem) -> SessionResult<LineItemId> {
        let name = validate_name(&draft.name)?;
        let price = validate_price(draft.price)?;
        let quantity = validate_quantity(draft.quantity)?;
        let participant_ids = self.known_participants(draft.shared_by)?;

        let item = LineItem { participant_ids, ..LineItem::new(name, price, quantity) };
        let id = item.id;
        info!(item_id = %id, %price, quantity, sharers = item.share_count(), "Dish added");
        self.items.push(item);
        Ok(id)
    }

    #[instrument(skip(self, patch))]
    pub fn edit_item(&mut self, id: &LineItemId, patch: LineItemPatch) -> SessionResult<()> {
        // Validate everything before touching the dish.
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let price = patch.price.map(validate_price).transpose()?;
        let quantity = patch.quantity.map(validate_quantity).transpose()?;
        let sharers = patch.shared_by.map(|ids| self.known_participants(ids)).transpose()?;

        let item = self.item_mut(id)?;
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(price) = price {
            item.price = price;
        }
        if let Some(quantity) = quantity {
            item.quantity = quantity;
        }
        if let Some(sharers) = sharers {
            item.participant_ids = sharers;
        }
        debug!(item_id = %id, "Dish updated");
        Ok(())
    }

    /// Adds `delta` to a dish's quantity, keeping it between 1 and [`MAX_QUANTITY`].
    #[instrument(skip(self))]
    pub fn adjust_quantity(&mut self, id: &LineItemId, delta: i64) -> SessionResult<u32> {
        let item = self.item_mut(id)?;
        let adjusted = i64::from(item.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(MAX_QUANTITY));
        item.quantity = u32::try_from(adjusted).unwrap_or(MAX_QUANTITY);
        debug!(item_id = %id, quantity = item.quantity, "Dish quantity adjusted");
        Ok(item.quantity)
    }

    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &LineItemId) -> SessionResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|d| d.id == *id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))?;
        let removed = self.items.remove(index);
        info!(item_id = %id, name = %removed.name, "Dish removed");
        Ok(removed)
    }

    /// Adds a participant to a dish's sharers. Returns `false` if already there.
    pub fn assign(
        &mut self,
        item: &LineItemId,
        participant: &ParticipantId,
    ) -> SessionResult<bool> {
        if self.participant(participant).is_none() {
            return Err(SessionError::UnknownParticipant(participant.to_string()));
        }
        let added = self.item_mut(item)?.participant_ids.insert(*participant);
        debug!(item_id = %item, participant_id = %participant, added, "Dish assigned");
        Ok(added)
    }

    /// Removes a participant from a dish's sharers. Returns `false` if they were not there.
    pub fn unassign(
        &mut self,
        item: &LineItemId,
        participant: &ParticipantId,
    ) -> SessionResult<bool> {
        let removed = self.item_mut(item)?.participant_ids.remove(participant);
        debug!(item_id = %item, participant_id = %participant, removed, "Dish unassigned");
        Ok(removed)
    }

    /// Flips a participant's membership of a dish. Returns the new membership.
    pub fn toggle_assignment(
        &mut self,
        item: &LineItemId,
        participant: &ParticipantId,
    ) -> SessionResult<bool> {
        let shared = self
            .item(item)
            .ok_or_else(|| SessionError::UnknownItem(item.to_string()))?
            .is_shared_by(participant);
        if shared {
            self.unassign(item, participant)?;
        } else {
            self.assign(item, participant)?;
        }
        Ok(!shared)
    }

    // ---------------------------------------------------------------------------------------
    // Extra costs
    // ---------------------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub fn set_extra_costs(&mut self, config: ExtraCostConfig) -> SessionResult<()> {
        validate_extra_costs(&config)?;
        info!(
            tax = %config.tax_percent,
            service = %config.service_percent,
            tip_kind = %config.tip_kind,
            tip = %config.tip_value,
            "Extra costs updated"
        );
        self.extra_costs = config;
        Ok(())
    }

    /// Replaces this session with a brand new, empty one.
    pub fn clear(&mut self) {
        info!(session_id = %self.id, "Session cleared");
        *self = Self::new();
    }
}
