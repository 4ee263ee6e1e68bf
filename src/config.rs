use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ToolupError};

/// Per-command timeout applied when neither the config file nor the
/// command line says otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Per-command timeout, e.g. "300s" or "5m".
    #[serde(default)]
    pub timeout: Option<String>,

    /// Extra packages merged over the built-in registry, keyed by id.
    /// An entry whose id matches a built-in replaces it.
    #[serde(default)]
    pub packages: BTreeMap<String, PackageSpec>,
}

/// A user-defined package entry from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageSpec {
    /// Executable probed on the search path. Defaults to the entry's key.
    #[serde(default)]
    pub executable: Option<String>,

    pub install: String,

    pub upgrade: String,

    /// Display-only source tag.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "custom".to_string()
}

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| ToolupError::Config("Cannot determine config directory".to_string()))?;
        Ok(base.join("toolup"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load the config file. The file is optional: when it does not exist
    /// the built-in defaults apply.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // An empty file is a valid "all defaults" config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| ToolupError::Config(format!("Invalid config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Effective per-command timeout: the configured value, or 5 minutes.
    pub fn command_timeout(&self) -> Duration {
        self.timeout
            .as_deref()
            .and_then(parse_duration)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn validate(&self) -> Result<()> {
        if let Some(ref timeout) = self.timeout {
            if parse_duration(timeout).is_none() {
                return Err(ToolupError::Config(format!(
                    "Invalid timeout '{}'. Use format like '5m', '300s' or '300'",
                    timeout
                )));
            }
        }

        for (id, spec) in &self.packages {
            if spec.install.trim().is_empty() || spec.upgrade.trim().is_empty() {
                return Err(ToolupError::Config(format!(
                    "Package '{}' must define non-empty install and upgrade commands",
                    id
                )));
            }
        }

        Ok(())
    }
}

pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        hours.parse::<u64>().ok().map(|h| Duration::from_secs(h * 3600))
    } else if let Some(minutes) = s.strip_suffix('m') {
        minutes.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else if let Some(seconds) = s.strip_suffix('s') {
        seconds.parse::<u64>().ok().map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
