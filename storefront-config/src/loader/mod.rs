pub mod error;

use crate::models::{SearchConfig, SearchConfigSource};
use crate::validation::{ConfigWarnings, apply_guard_rails};
use error::ConfigLoadError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the loaded configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub source: SearchConfigSource,
    pub env_file_loaded: bool,
}

/// A configuration that passed the guard rails, plus any warnings.
///
/// Warnings are returned rather than logged; callers report them once their
/// subscriber is installed.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: SearchConfig,
    pub warnings: ConfigWarnings,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this env file instead of searching for `.env`. A missing file is
    /// an error when set explicitly.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let (config, source) =
            SearchConfig::load_from_env().map_err(ConfigLoadError::Search)?;
        Self::finish(config, source, env_file_loaded)
    }

    /// Load from an explicit config file, skipping environment lookup.
    pub fn load_file(&self, path: &Path) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let config = SearchConfig::load_from_file(path).map_err(ConfigLoadError::Search)?;
        Self::finish(
            config,
            SearchConfigSource::File(path.to_path_buf()),
            env_file_loaded,
        )
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        match &self.env_file {
            Some(path) => dotenvy::from_path(path)
                .map(|()| true)
                .map_err(|source| ConfigLoadError::EnvFileIo {
                    path: path.clone(),
                    source,
                }),
            None => match dotenvy::dotenv() {
                Ok(path) => {
                    debug!("Loaded environment from {}", path.display());
                    Ok(true)
                }
                Err(err) if err.not_found() => Ok(false),
                Err(err) => Err(ConfigLoadError::EnvFile(err)),
            },
        }
    }

    fn finish(
        config: SearchConfig,
        source: SearchConfigSource,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let warnings = apply_guard_rails(&config)?;
        debug!("Search configuration loaded from {:?}", source);

        Ok(ConfigLoad {
            config,
            warnings,
            metadata: ConfigMetadata {
                source,
                env_file_loaded,
            },
        })
    }
}
