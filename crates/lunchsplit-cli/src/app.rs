//! The application controller.
//!
//! Owns the current [`LunchSession`] and the store it is persisted in. Each
//! command is applied to the session and, if it changed anything, the session
//! is saved before the command returns.

use crate::cli::{Command, ExtrasCommand, ItemCommand, ParticipantCommand};
use crate::config::{LunchSplitConfig, StorageBackend, StorageConfig};
use crate::report;
use anyhow::{Context, Result};
use lunchsplit_core::export::export_to_path;
use lunchsplit_core::{
    InMemoryStore, JsonFileStore, LineItemPatch, LunchSession, NewLineItem, SessionStore,
    StoreError, load_or_new, parse_amount, parse_percent, parse_quantity,
};
use lunchsplit_types::{ExtraCostConfig, ParticipantId};
use std::fs;
use std::io::Write;
use tracing::{info, instrument, warn};

/// Builds the store selected by the configuration.
pub fn store_for(config: &StorageConfig) -> Box<dyn SessionStore> {
    match config.backend {
        StorageBackend::File => Box::new(JsonFileStore::new(&config.data_dir)),
        StorageBackend::Memory => {
            warn!("In-memory storage selected; the session will not outlive this run");
            Box::new(InMemoryStore::new())
        }
    }
}

pub struct App {
    config: LunchSplitConfig,
    store: Box<dyn SessionStore>,
    session: LunchSession,
}

impl App {
    /// Opens the configured store and loads the current session from it.
    pub fn open(config: LunchSplitConfig) -> Result<Self, StoreError> {
        let store = store_for(&config.storage);
        Self::with_store(config, store)
    }

    pub fn with_store(
        config: LunchSplitConfig,
        store: Box<dyn SessionStore>,
    ) -> Result<Self, StoreError> {
        let session = load_or_new(store.as_ref())?;
        info!(
            backend = store.backend_name(),
            session_id = %session.id(),
            "Session ready"
        );
        Ok(Self { config, store, session })
    }

    pub fn session(&self) -> &LunchSession {
        &self.session
    }

    fn currency(&self) -> &str {
        self.config.display.currency()
    }

    fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.session)
    }

    /// Runs one command, writing any report to `out`.
    #[instrument(skip(self, out))]
    pub fn run(&mut self, command: Command, out: &mut dyn Write) -> Result<()> {
        match command {
            Command::Participant(cmd) => self.run_participant(cmd, out),
            Command::Item(cmd) => self.run_item(cmd, out),
            Command::Extras(cmd) => self.run_extras(cmd, out),
            Command::Summary { json } => {
                let summary = self.session.summary();
                if json {
                    serde_json::to_writer_pretty(&mut *out, &summary)?;
                    writeln!(out)?;
                } else {
                    report::write_summary(&summary, self.currency(), out)?;
                }
                Ok(())
            }
            Command::Export { format, output } => {
                let format = format.unwrap_or(self.config.export.default_format);
                let target = match output {
                    Some(path) => path,
                    None => {
                        let dir = self.config.export.directory.clone();
                        fs::create_dir_all(&dir).with_context(|| {
                            format!("Failed to create export directory {}", dir.display())
                        })?;
                        dir
                    }
                };
                let written = export_to_path(&self.session, format, &target, self.currency())?;
                writeln!(out, "Exported to {}", written.display())?;
                Ok(())
            }
            Command::Clear => {
                self.session.clear();
                self.store.clear()?;
                writeln!(out, "Bill cleared.")?;
                Ok(())
            }
        }
    }

    fn run_participant(&mut self, command: ParticipantCommand, out: &mut dyn Write) -> Result<()> {
        match command {
            ParticipantCommand::Add { name } => {
                let id = self.session.add_participant(&name)?;
                self.save()?;
                writeln!(out, "Added {} ({id})", self.participant_name(&id))?;
            }
            ParticipantCommand::Rename { participant, new_name } => {
                let id = self.session.resolve_participant(&participant)?;
                self.session.rename_participant(&id, &new_name)?;
                self.save()?;
                writeln!(out, "Renamed to {}", self.participant_name(&id))?;
            }
            ParticipantCommand::Remove { participant } => {
                let id = self.session.resolve_participant(&participant)?;
                let removed = self.session.remove_participant(&id)?;
                self.save()?;
                writeln!(out, "Removed {}", removed.name)?;
            }
            ParticipantCommand::List => {
                report::write_participants(&self.session, self.currency(), out)?
            }
        }
        Ok(())
    }

    fn run_item(&mut self, command: ItemCommand, out: &mut dyn Write) -> Result<()> {
        match command {
            ItemCommand::Add { name, price, quantity, shared_by } => {
                let mut draft = NewLineItem::new(name, parse_amount(&price)?)
                    .shared_by(self.resolve_participants(&shared_by)?);
                if let Some(quantity) = quantity {
                    draft = draft.with_quantity(parse_quantity(&quantity)?);
                }
                let id = self.session.add_item(draft)?;
                self.save()?;
                writeln!(out, "Added dish {id}")?;
            }
            ItemCommand::Edit { item, name, price, quantity, adjust, shared_by } => {
                let id = self.session.resolve_item(&item)?;
                let patch = LineItemPatch {
                    name,
                    price: price.as_deref().map(parse_amount).transpose()?,
                    quantity: quantity.as_deref().map(parse_quantity).transpose()?,
                    shared_by: shared_by
                        .as_deref()
                        .map(|names| self.resolve_participants(names))
                        .transpose()?,
                };
                self.session.edit_item(&id, patch)?;
                if let Some(delta) = adjust {
                    self.session.adjust_quantity(&id, delta)?;
                }
                self.save()?;
                writeln!(out, "Updated dish {id}")?;
            }
            ItemCommand::Remove { item } => {
                let id = self.session.resolve_item(&item)?;
                let removed = self.session.remove_item(&id)?;
                self.save()?;
                writeln!(out, "Removed dish {}", removed.name)?;
            }
            ItemCommand::Assign { item, participant } => {
                let item = self.session.resolve_item(&item)?;
                let participant = self.session.resolve_participant(&participant)?;
                if self.session.assign(&item, &participant)? {
                    self.save()?;
                    writeln!(out, "Assigned")?;
                } else {
                    writeln!(out, "Already assigned")?;
                }
            }
            ItemCommand::Unassign { item, participant } => {
                let item = self.session.resolve_item(&item)?;
                let participant = self.session.resolve_participant(&participant)?;
                if self.session.unassign(&item, &participant)? {
                    self.save()?;
                    writeln!(out, "Unassigned")?;
                } else {
                    writeln!(out, "Was not assigned")?;
                }
            }
            ItemCommand::List => report::write_items(&self.session, self.currency(), out)?,
        }
        Ok(())
    }

    fn run_extras(&mut self, command: ExtrasCommand, out: &mut dyn Write) -> Result<()> {
        match command {
            ExtrasCommand::Set { tax, service, tip_kind, tip } => {
                let current = self.session.extra_costs();
                let config = ExtraCostConfig {
                    tax_percent: match tax {
                        Some(input) => parse_percent("tax percent", &input)?,
                        None => current.tax_percent,
                    },
                    service_percent: match service {
                        Some(input) => parse_percent("service percent", &input)?,
                        None => current.service_percent,
                    },
                    tip_kind: tip_kind.unwrap_or(current.tip_kind),
                    tip_value: match tip {
                        Some(input) => parse_percent("tip", &input)?,
                        None => current.tip_value,
                    },
                };
                self.session.set_extra_costs(config)?;
                self.save()?;
                report::write_extras(self.session.extra_costs(), self.currency(), out)?;
            }
            ExtrasCommand::Show => {
                report::write_extras(self.session.extra_costs(), self.currency(), out)?
            }
        }
        Ok(())
    }

    fn resolve_participants(&self, names: &[String]) -> Result<Vec<ParticipantId>> {
        names
            .iter()
            .map(|name| self.session.resolve_participant(name).map_err(Into::into))
            .collect()
    }

    fn participant_name(&self, id: &ParticipantId) -> &str {
        self.session.participant(id).map_or("?", |p| p.name.as_str())
    }
}
