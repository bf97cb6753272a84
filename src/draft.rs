//! Autosaved in-progress session ("draft").
//!
//! The app keeps an unsaved session alive across restarts in a local
//! key-value slot. The core's side of that contract is small: serialize
//! the current state to a string, restore it on next launch, clear it on
//! explicit discard or successful save.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::SetInput;

/// Snapshot of a session being entered but not yet saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub workout_id: i64,
    pub workout_name: String,
    pub entries: Vec<DraftEntry>,
    /// When the snapshot was taken, RFC 3339.
    pub saved_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEntry {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub sets: Vec<SetInput>,
}

/// Where the draft string lives. The mobile app uses a key-value slot;
/// anything that can hold one string per key works.
pub trait DraftStore {
    fn load(&self) -> io::Result<Option<SessionDraft>>;
    fn save(&self, draft: &SessionDraft) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// File-backed store: one JSON document at a fixed path.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> io::Result<Option<SessionDraft>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        match serde_json::from_str(&contents) {
            Ok(draft) => Ok(Some(draft)),
            Err(err) => {
                // An unreadable draft is dropped, never a startup failure.
                tracing::warn!("Discarding unreadable session draft: {}", err);
                Ok(None)
            }
        }
    }

    fn save(&self, draft: &SessionDraft) -> io::Result<()> {
        let json = serde_json::to_string(draft)?;
        fs::write(&self.path, json)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}
