use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use turret_survivor_core::{Tuning, TuningError};
use turret_survivor_rendering::Theme;

const DEFAULT_WINDOW_TITLE: &str = "Turret Survivor";

/// Settings loaded from a session file.
///
/// ```toml
/// [simulation.spawning]
/// seed = 42
///
/// [presentation]
/// theme = "basic"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Game balance handed to the simulation.
    pub(crate) simulation: Tuning,
    /// Cosmetic settings consumed by the rendering adapter.
    pub(crate) presentation: PresentationConfig,
}

/// `[presentation]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PresentationConfig {
    pub(crate) theme: Theme,
    pub(crate) window_title: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            window_title: DEFAULT_WINDOW_TITLE.to_owned(),
        }
    }
}

/// Failures raised while loading a session file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config file {} holds invalid tuning", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: TuningError,
    },
}

impl SessionConfig {
    /// Reads and validates the session file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .simulation
            .validate()
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }
}
