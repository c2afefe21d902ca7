//! User preference persistence for the user layer.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, LayerFormat, RawSettings, loader::parse_layer};

/// Whether saving a preference also updates the live user layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SavePolicy {
    /// Persist and re-resolve immediately.
    #[default]
    ApplyNow,
    /// Persist only; the saved value takes effect on the next load.
    NextLoad,
}

/// Storage for per-user preference layers.
pub trait PreferenceStore: Send + Sync {
    /// Load the saved preference for `user`, if any.
    fn load(&self, user: &str) -> Result<Option<RawSettings>, Error>;

    /// Persist the preference for `user`, replacing any previous value.
    fn save(&self, user: &str, raw: &RawSettings) -> Result<(), Error>;
}

/// In-memory preference store.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    /// Saved layers by user id.
    entries: Mutex<HashMap<String, RawSettings>>,
}

impl MemoryPreferences {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self, user: &str) -> Result<Option<RawSettings>, Error> {
        Ok(self.entries.lock().get(user).cloned())
    }

    fn save(&self, user: &str, raw: &RawSettings) -> Result<(), Error> {
        self.entries.lock().insert(user.to_string(), raw.clone());
        Ok(())
    }
}

/// Preference store keeping one `<user>.json` file per user in a directory.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    /// Directory holding preference files.
    dir: PathBuf,
}

impl FilePreferences {
    /// Store preferences under `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the preference files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `user`, rejecting ids that would escape the directory.
    pub fn path_for(&self, user: &str) -> Result<PathBuf, Error> {
        let bad = user.is_empty()
            || user.starts_with('.')
            || user.chars().any(|c| c == '/' || c == '\\' || c.is_control());
        if bad {
            return Err(Error::validation(format!("invalid user id: {user:?}")));
        }
        Ok(self.dir.join(format!("{user}.json")))
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self, user: &str) -> Result<Option<RawSettings>, Error> {
        let path = self.path_for(user)?;
        let source = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Read {
                    path: Some(path),
                    message: e.to_string(),
                });
            }
        };
        let raw = parse_layer(&source, LayerFormat::Json).map_err(|e| e.with_path(&path))?;
        debug!(user, path = %path.display(), "loaded preference");
        Ok(Some(raw))
    }

    fn save(&self, user: &str, raw: &RawSettings) -> Result<(), Error> {
        let path = self.path_for(user)?;
        let io_err = |e: io::Error| Error::Read {
            path: Some(path.clone()),
            message: e.to_string(),
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let body = serde_json::to_string_pretty(raw).map_err(|e| Error::Validation {
            path: Some(path.clone()),
            message: e.to_string(),
        })?;
        fs::write(&path, body).map_err(io_err)?;
        debug!(user, path = %path.display(), "saved preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folded() -> RawSettings {
        let mut raw = RawSettings::default();
        raw.layout_config_mut().navbar.get_or_insert_with(Default::default).folded = Some(true);
        raw
    }

    #[test]
    fn memory_roundtrip() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.load("ada").unwrap(), None);
        prefs.save("ada", &folded()).unwrap();
        assert_eq!(prefs.load("ada").unwrap(), Some(folded()));
        assert_eq!(prefs.load("bob").unwrap(), None);
    }

    #[test]
    fn file_store_persists_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path().join("prefs"));
        assert_eq!(prefs.load("ada").unwrap(), None);
        prefs.save("ada", &folded()).unwrap();

        let reopened = FilePreferences::new(dir.path().join("prefs"));
        assert_eq!(reopened.load("ada").unwrap(), Some(folded()));
        assert!(dir.path().join("prefs").join("ada.json").exists());
    }

    #[test]
    fn rejects_path_like_user_ids() {
        let prefs = FilePreferences::new("/tmp/unused");
        for user in ["", "../etc", "a/b", ".hidden"] {
            assert!(matches!(
                prefs.path_for(user),
                Err(Error::Validation { .. })
            ));
        }
    }

    #[test]
    fn corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ada.json"), "{ not json").unwrap();
        let prefs = FilePreferences::new(dir.path());
        let err = prefs.load("ada").unwrap_err();
        assert_eq!(err.path(), Some(dir.path().join("ada.json").as_path()));
    }
}
