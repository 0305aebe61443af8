//! Run configuration, read from YAML once per process.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scan::split_call;

static CONFIG: OnceCell<RenderConfig> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config YAML {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("config file {0:?} does not exist")]
    NotFound(PathBuf),
    #[error("config already initialized")]
    AlreadyInitialized,
}

/// What to emit for a template the dispatch table does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// The raw call, verbatim.
    #[default]
    Keep,
    /// Nothing.
    Drop,
    /// The template name as written.
    Name,
}

impl UnknownPolicy {
    pub fn apply(self, raw: &str) -> String {
        match self {
            UnknownPolicy::Keep => raw.to_string(),
            UnknownPolicy::Drop => String::new(),
            UnknownPolicy::Name => split_call(raw).name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub unknown: UnknownPolicy,
    /// 0 = auto-detect
    pub threads: usize,
    pub batch_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            unknown: UnknownPolicy::Keep,
            threads: 0,
            batch_size: 1000,
        }
    }
}

pub fn load_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    let mut file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    if contents.trim().is_empty() {
        return Ok(RenderConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// First existing default config file, if any.
pub fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("wikitmpl.yaml"),
        PathBuf::from("config/wikitmpl.yaml"),
    ];
    candidates.into_iter().find(|p| p.exists())
}

/// Resolve the config for this run without storing it.
///
/// An explicit path must exist; with no path the default locations are
/// tried and built-in defaults used if none is there.
pub fn resolve_config(path: Option<&Path>) -> Result<RenderConfig, ConfigError> {
    match path {
        Some(p) if !p.exists() => Err(ConfigError::NotFound(p.to_path_buf())),
        Some(p) => load_config(p),
        None => match find_config_file() {
            Some(p) => {
                tracing::debug!(path = ?p, "using config file");
                load_config(&p)
            }
            None => Ok(RenderConfig::default()),
        },
    }
}

pub fn init_config(config: RenderConfig) -> Result<(), ConfigError> {
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The process-wide config, or defaults if none was installed.
pub fn get_config() -> &'static RenderConfig {
    CONFIG.get_or_init(RenderConfig::default)
}
