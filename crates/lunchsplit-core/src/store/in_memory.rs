use super::SessionStore;
use crate::error::StoreError;
use crate::session::LunchSession;
use std::sync::Mutex;
use tracing::debug;

/// A store that keeps the snapshot in process memory.
///
/// The snapshot is kept in its serialized form so a round trip through this
/// store exercises the same encoding as [`super::JsonFileStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // The guarded value is a plain String, so a poisoned lock is still usable.
        self.snapshot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for InMemoryStore {
    fn save(&self, session: &LunchSession) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(session)?;
        debug!(bytes = encoded.len(), "Session saved in memory");
        *self.slot() = Some(encoded);
        Ok(())
    }

    fn load(&self) -> Result<Option<LunchSession>, StoreError> {
        match self.slot().as_deref() {
            Some(encoded) => Ok(Some(serde_json::from_str(encoded)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
