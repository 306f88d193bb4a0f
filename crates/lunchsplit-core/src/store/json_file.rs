use super::{STORAGE_KEY, SessionStore};
use crate::error::StoreError;
use crate::session::LunchSession;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A store that keeps the snapshot as a JSON file in a data directory.
///
/// A missing file loads as "no session". So does a file that cannot be parsed:
/// it is logged and ignored, and overwritten by the next save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store writing `<data_dir>/lunchsplit_session.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self { path: data_dir.as_ref().join(format!("{STORAGE_KEY}.json")) }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SessionStore for JsonFileStore {
    #[instrument(skip(self, session), fields(path = %self.path.display()))]
    fn save(&self, session: &LunchSession) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }
        let encoded = serde_json::to_vec_pretty(session)?;

        // Write then rename so a crash never leaves a half-written snapshot.
        let temp = self.temp_path();
        fs::write(&temp, &encoded).map_err(|e| StoreError::io(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(bytes = encoded.len(), "Session saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<LunchSession>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved session");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        match serde_json::from_slice::<LunchSession>(&raw) {
            Ok(session) => {
                info!(
                    session_id = %session.id(),
                    participants = session.participants().len(),
                    items = session.items().len(),
                    "Session loaded"
                );
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "Saved session is unreadable; starting fresh");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Saved session removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
