use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// On-disk settings. Loaded once at startup and treated as read-only for the
/// rest of the invocation; `install` is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URI scheme this handler answers to.
    pub scheme: String,
    /// Append diagnostics to `log_path` instead of logging to stderr.
    pub enable_log: bool,
    /// Destination of the append-only log.
    pub log_path: PathBuf,
    /// Pause between consecutive player launches, in milliseconds.
    pub launch_delay_ms: u64,
    /// Target identifier → player executable path.
    pub players: HashMap<String, PathBuf>,
    /// URL-path substring → user agent handed to the player. Patterns are
    /// tried in key order; first match wins.
    pub user_agents: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: "jelly-player".to_owned(),
            enable_log: false,
            log_path: default_log_path(),
            launch_delay_ms: 50,
            players: HashMap::new(),
            user_agents: BTreeMap::new(),
        }
    }
}

/// `<local data dir>/jelly-handler/jelly-handler.log`, falling back to the
/// current directory when the OS reports no user directories.
fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jelly-handler")
        .join("jelly-handler.log")
}

/// `<config dir>/jelly-handler/config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jelly-handler")
        .join("config.toml")
}

/// Read the configuration, or defaults when no file exists yet.
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

fn load_from(path: &Path) -> Result<Config> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    toml::from_str(&text).with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Write the configuration back, creating the directory on first use.
pub fn save(config: &Config) -> Result<()> {
    save_to(config, &config_path())
}

fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).context("failed to serialize configuration")?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
