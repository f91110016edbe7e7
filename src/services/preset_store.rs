//! Preset persistence between sessions

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info, warn};

use crate::{error::PresetError, state::Preset};

/// Where the setup form is remembered between launches.
///
/// `load` never fails: unreadable or malformed data is discarded and
/// reported as absent.
pub trait PresetStore: Send + Sync {
    fn load(&self) -> Option<Preset>;
    fn save(&self, preset: &Preset) -> Result<(), PresetError>;
    fn clear(&self) -> Result<(), PresetError>;
}

/// Parse stored preset text, `None` if it is not a JSON object
fn parse_stored(raw: &str) -> Option<Preset> {
    match serde_json::from_str::<Preset>(raw) {
        Ok(preset) => Some(preset),
        Err(e) => {
            warn!("Discarding malformed preset: {}", e);
            None
        }
    }
}

/// Preset kept as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFilePresetStore {
    path: PathBuf,
}

impl JsonFilePresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PresetStore for JsonFilePresetStore {
    fn load(&self) -> Option<Preset> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preset stored at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read preset at {}: {}", self.path.display(), e);
                return None;
            }
        };

        let preset = match std::str::from_utf8(&bytes) {
            Ok(raw) => parse_stored(raw),
            Err(e) => {
                warn!("Discarding preset that is not valid UTF-8: {}", e);
                None
            }
        };

        match &preset {
            Some(_) => info!("Loaded preset from {}", self.path.display()),
            None => {
                if let Err(e) = self.clear() {
                    warn!("{}", e);
                }
            }
        }
        preset
    }

    fn save(&self, preset: &Preset) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(preset)?;
        fs::write(&self.path, json).map_err(|source| PresetError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved preset to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), PresetError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PresetError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Preset kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    slot: Mutex<Option<String>>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text as if it had been written by an earlier session
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl PresetStore for MemoryPresetStore {
    fn load(&self) -> Option<Preset> {
        let mut slot = self.slot.lock().ok()?;
        let preset = parse_stored(slot.as_deref()?);
        if preset.is_none() {
            *slot = None;
        }
        preset
    }

    fn save(&self, preset: &Preset) -> Result<(), PresetError> {
        let json = serde_json::to_string(preset)?;
        let mut slot = self.slot.lock().map_err(|_| PresetError::Poisoned)?;
        *slot = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), PresetError> {
        let mut slot = self.slot.lock().map_err(|_| PresetError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimeMode;

    fn sample() -> Preset {
        Preset {
            player_count: 2,
            starting_minutes: 5,
            time_mode: TimeMode::PerTurn,
            color_tagging: true,
            player_names: vec!["Ann".to_string(), "Bo".to_string()],
            player_colors: vec!["#112233".to_string(), "#aabbcc".to_string()],
            ..Preset::default()
        }
    }

    #[test]
    fn file_store_saves_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePresetStore::new(dir.path().join("preset.json"));

        assert!(store.load().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn file_store_discards_malformed_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFilePresetStore::new(&path);
        assert!(store.load().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn file_store_discards_non_utf8_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();

        let store = JsonFilePresetStore::new(&path);
        assert!(store.load().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn file_store_coerces_legacy_string_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        fs::write(
            &path,
            r#"{"playerCount": 3, "autoStart": "false", "individualPause": "true", "timeMode": "perTurn"}"#,
        )
        .unwrap();

        let preset = JsonFilePresetStore::new(&path).load().unwrap();
        assert_eq!(preset.player_count, 3);
        assert!(!preset.auto_start);
        assert!(preset.individual_pause);
        assert_eq!(preset.time_mode, TimeMode::PerTurn);
    }

    #[test]
    fn memory_store_clears_malformed_entry() {
        let store = MemoryPresetStore::with_raw("[1, 2, 3]");
        assert!(store.load().is_none());
        assert!(store.raw().is_none());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryPresetStore::new();
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
