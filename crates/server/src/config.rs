//! Server configuration structures and loaders.
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use realm_core::GameConfig;
use realm_runtime::RuntimeConfig;

/// Everything needed to start a realm process.
///
/// Loaded from an optional TOML file, then overridden by environment
/// variables.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub game: GameConfig,
    pub regeneration_interval_ms: u64,
    pub session_buffer_size: usize,
    pub observer_buffer_size: usize,
    /// Also write logs to daily rolling files in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            game: runtime.game,
            regeneration_interval_ms: runtime.regeneration_interval.as_millis() as u64,
            session_buffer_size: runtime.session_buffer_size,
            observer_buffer_size: runtime.observer_buffer_size,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Loads the process configuration.
    ///
    /// Environment variables:
    /// - `REALM_CONFIG` - Path of a TOML file to start from (default: built-in defaults)
    /// - `REALM_AREA_SKILL_HITS_PLAYERS` - Let area skills hit players (default: false)
    /// - `REALM_REGENERATION_INTERVAL_MS` - Regeneration period (default: 3000)
    /// - `REALM_LOG_DIR` - Directory for rolling log files (default: stderr only)
    pub fn load() -> Result<Self> {
        let config = match env::var_os("REALM_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Applies `REALM_*` overrides read through `lookup`. Unparsable values
    /// are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(hits) = read_var::<bool>(&lookup, "REALM_AREA_SKILL_HITS_PLAYERS") {
            self.game.area_skill_hits_players = hits;
        }
        if let Some(interval) = read_var::<u64>(&lookup, "REALM_REGENERATION_INTERVAL_MS") {
            self.regeneration_interval_ms = interval.max(1);
        }
        if let Some(dir) = lookup("REALM_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game: self.game.clone(),
            regeneration_interval: Duration::from_millis(self.regeneration_interval_ms.max(1)),
            session_buffer_size: self.session_buffer_size.max(1),
            observer_buffer_size: self.observer_buffer_size.max(1),
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}
