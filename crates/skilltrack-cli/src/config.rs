//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file,
//! `SKILLTRACK_*` environment variables (a `.env` file is honoured), then
//! command-line flags.
//!
//! ```toml
//! [storage]
//! backend = "sqlite"
//! path = "data/skilltrack.db"
//!
//! [logging]
//! level = "warn"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_FILE: &str = "skilltrack.toml";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SQLite key-value slot.
    #[default]
    Sqlite,
    /// Single JSON file.
    Json,
}

impl Backend {
    fn default_path(self) -> PathBuf {
        match self {
            Self::Sqlite => PathBuf::from("data/skilltrack.db"),
            Self::Json => PathBuf::from("data/skilltrack.json"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            other => bail!("unknown storage backend `{other}` (expected sqlite or json)"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Defaults to a file under `data/` named for the backend.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The effective storage location.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| self.backend.default_path())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read the config file.
    ///
    /// An explicitly named file must exist. The implicit default file
    /// (`$SKILLTRACK_CONFIG` or `./skilltrack.toml`) may be missing, in
    /// which case defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var_os("SKILLTRACK_CONFIG") {
                Some(path) => (PathBuf::from(path), true),
                None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse TOML text. Unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `SKILLTRACK_BACKEND`, `SKILLTRACK_DATA` and `SKILLTRACK_LOG`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(backend) = var("SKILLTRACK_BACKEND") {
            self.storage.backend = backend.parse().context("SKILLTRACK_BACKEND")?;
        }
        if let Some(path) = var("SKILLTRACK_DATA").filter(|p| !p.is_empty()) {
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(level) = var("SKILLTRACK_LOG").filter(|l| !l.is_empty()) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_flags(&mut self, data: Option<PathBuf>, backend: Option<Backend>) {
        if let Some(backend) = backend {
            self.storage.backend = backend;
        }
        if let Some(data) = data {
            self.storage.path = Some(data);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
