//! Persistence of the single current session.
//!
//! A store holds at most one snapshot, under a fixed key. The engine never talks
//! to a store; the application controller loads the session on start-up and
//! saves it after every successful change.

use crate::error::StoreError;
use crate::session::LunchSession;

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

/// Fixed key under which the current session is stored.
pub const STORAGE_KEY: &str = "lunchsplit_session";

/// Save, load and clear the current session snapshot.
pub trait SessionStore: Send + Sync {
    /// Replaces the stored snapshot.
    fn save(&self, session: &LunchSession) -> Result<(), StoreError>;

    /// The stored snapshot, or `None` when nothing usable is stored.
    fn load(&self) -> Result<Option<LunchSession>, StoreError>;

    /// Forgets the stored snapshot. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Loads the stored session, or starts a new one when nothing is stored.
pub fn load_or_new(store: &dyn SessionStore) -> Result<LunchSession, StoreError> {
    Ok(store.load()?.unwrap_or_default())
}
