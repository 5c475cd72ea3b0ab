//! Stage configuration: the elements a host document starts with.
//!
//! ```toml
//! [log]
//! filter = "debug"
//!
//! [[element]]
//! id = "player-1"
//! state = "playing"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use mediabind_types::{ElementId, PlaybackState};

#[derive(Debug, Default, Deserialize)]
pub struct StageConfig {
    pub log: Option<LogConfig>,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` takes precedence.
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ElementConfig {
    pub id: ElementId,
    /// Defaults to playing.
    #[serde(default)]
    pub state: PlaybackState,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read stage file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse stage file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl StageConfig {
    /// Load the stage at the default location. `Ok(None)` when there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = stage_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Failed to read stage file");
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Failed to parse stage file");
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.log.as_ref().and_then(|log| log.filter.as_deref())
    }

    /// `(id, state)` pairs in file order. Duplicate ids are passed through.
    pub fn element_states(&self) -> impl Iterator<Item = (ElementId, PlaybackState)> + '_ {
        self.elements.iter().map(|e| (e.id.clone(), e.state))
    }
}

#[must_use]
pub fn stage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mediabind").join("stage.toml"))
}
