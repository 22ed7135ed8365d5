//! On-disk preset storage.
//!
//! One JSON file per preset, human-readable and shareable. A file carries
//! exactly the four data fields of [`HubState`]; `source` is recomputed on
//! load from the file path.

use crate::error::{HubError, Result};
use crate::state::HubState;
use std::fs;
use std::path::{Path, PathBuf};

/// Name and description of a stored preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetInfo {
    /// File stem, without directory or `.json` extension
    pub name: String,
    /// Description captured when the preset was saved
    pub description: String,
}

/// Directory-backed preset store
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    /// Create a store over the given directory.
    ///
    /// The directory is created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Whether a preset with this name already exists
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Save a state as a named preset, overwriting any existing file
    pub fn save(&self, name: &str, state: &HubState) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&path, json)?;
        tracing::info!("Preset saved to {}", path.display());
        Ok(path)
    }

    /// Load a named preset.
    ///
    /// The returned state carries the same four data fields that were
    /// saved, with `source` set to the file path.
    pub fn load(&self, name: &str) -> Result<HubState> {
        let path = self.path(name);
        let json = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HubError::PresetNotFound(name.to_string())
            } else {
                e.into()
            }
        })?;
        let mut state: HubState = serde_json::from_str(&json)?;
        state.source = Some(path.display().to_string());
        Ok(state)
    }

    /// Delete a named preset
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path(name);
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HubError::PresetNotFound(name.to_string())
            } else {
                e.into()
            }
        })?;
        tracing::info!("Preset deleted: {}", path.display());
        Ok(())
    }

    /// List stored presets with their descriptions, sorted by name.
    ///
    /// Files that cannot be parsed are skipped with a warning; a missing
    /// store directory yields an empty list.
    pub fn list(&self) -> Result<Vec<PresetInfo>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut presets = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match fs::read_to_string(&path)
                .map_err(HubError::from)
                .and_then(|json| serde_json::from_str::<HubState>(&json).map_err(HubError::from))
            {
                Ok(state) => presets.push(PresetInfo {
                    name: name.to_string(),
                    description: state.description,
                }),
                Err(e) => {
                    tracing::warn!("Skipping unreadable preset {}: {}", path.display(), e);
                }
            }
        }

        presets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(presets)
    }
}
