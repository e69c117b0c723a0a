//! Boss lookup service.
//!
//! Wraps the static boss table with user-supplied overrides loaded once at
//! startup from a TOML file. The registry is read-only after construction and
//! is handed to the tracker by whoever owns the process lifecycle; there is no
//! global state.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::Deserialize;
use thiserror::Error;

use super::bosses::lookup_boss;

/// Errors while loading boss override data.
#[derive(Debug, Error)]
pub enum GameDataError {
    #[error("failed to read boss override file {path}")]
    ReadOverrides {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse boss override file {path}")]
    ParseOverrides {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A single user-defined boss entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BossOverride {
    pub npc_id: i32,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct OverrideFile {
    #[serde(default)]
    bosses: Vec<BossOverride>,
}

/// Read-only boss lookup combining the static table with user overrides.
/// Overrides take precedence, so a user can rename a known boss or mark a
/// custom NPC as a boss.
#[derive(Debug, Clone, Default)]
pub struct BossRegistry {
    overrides: HashMap<i32, String>,
}

impl BossRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with overrides loaded from a TOML file.
    pub fn with_overrides(path: &Path) -> Result<Self, GameDataError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| GameDataError::ReadOverrides {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_override_toml(&content, path)
    }

    fn from_override_toml(content: &str, path: &Path) -> Result<Self, GameDataError> {
        let file: OverrideFile =
            toml::from_str(content).map_err(|source| GameDataError::ParseOverrides {
                path: path.to_path_buf(),
                source,
            })?;

        let overrides = file
            .bosses
            .into_iter()
            .map(|b| (b.npc_id, b.name))
            .collect();
        Ok(Self { overrides })
    }

    /// Whether this NPC id should start a boss fight.
    pub fn is_boss(&self, npc_id: i32) -> bool {
        self.overrides.contains_key(&npc_id) || lookup_boss(npc_id).is_some()
    }

    /// Display name for a boss NPC, if known.
    pub fn boss_name(&self, npc_id: i32) -> Option<&str> {
        self.overrides
            .get(&npc_id)
            .map(String::as_str)
            .or_else(|| lookup_boss(npc_id).map(|info| info.name))
    }
}
