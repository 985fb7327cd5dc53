//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use fluxview_types::{Channel, MAX_POINTS};
use serde::{Deserialize, Serialize};

use crate::cli::{ConfigKey, OutputFormat};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FLUXVIEW_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Reading database path
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Directory holding `YYYY-MM-DD.log` files
    #[serde(default)]
    pub logs_dir: Option<PathBuf>,

    /// Channel plotted when none is given
    #[serde(default)]
    pub channel: Channel,

    /// Point budget at the highest detail level
    #[serde(default = "default_max_points")]
    pub max_points: usize,

    /// Number of detail levels
    #[serde(default = "default_detail_steps")]
    pub detail_steps: usize,

    /// Detail level used when neither `--points` nor `--detail` is given
    #[serde(default = "default_detail_steps")]
    pub default_detail: usize,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

fn default_max_points() -> usize {
    MAX_POINTS
}

fn default_detail_steps() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            logs_dir: None,
            channel: Channel::default(),
            max_points: default_max_points(),
            detail_steps: default_detail_steps(),
            default_detail: default_detail_steps(),
            format: None,
            no_color: false,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fluxviewer")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`, or return default if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Current value of `key`, or `None` when unset
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Database => self.database.as_ref().map(|p| p.display().to_string()),
            ConfigKey::LogsDir => self.logs_dir.as_ref().map(|p| p.display().to_string()),
            ConfigKey::Channel => Some(self.channel.to_string()),
            ConfigKey::MaxPoints => Some(self.max_points.to_string()),
            ConfigKey::DetailSteps => Some(self.detail_steps.to_string()),
            ConfigKey::DefaultDetail => Some(self.default_detail.to_string()),
            ConfigKey::Format => self.format.clone(),
            ConfigKey::NoColor => Some(self.no_color.to_string()),
        }
    }

    /// Parse and store `value` under `key`
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::Database => self.database = Some(PathBuf::from(value)),
            ConfigKey::LogsDir => self.logs_dir = Some(PathBuf::from(value)),
            ConfigKey::Channel => self.channel = value.parse()?,
            ConfigKey::MaxPoints => self.max_points = parse_positive(value, "max-points")?,
            ConfigKey::DetailSteps => self.detail_steps = parse_positive(value, "detail-steps")?,
            ConfigKey::DefaultDetail => {
                self.default_detail = parse_positive(value, "default-detail")?
            }
            ConfigKey::Format => {
                let format = OutputFormat::from_str(value, true).map_err(|_| {
                    anyhow::anyhow!("Invalid format '{}'. Use text, json or csv", value)
                })?;
                self.format = format
                    .to_possible_value()
                    .map(|v| v.get_name().to_string());
            }
            ConfigKey::NoColor => {
                self.no_color = value
                    .parse()
                    .with_context(|| format!("Invalid boolean '{}'. Use true or false", value))?
            }
        }
        Ok(())
    }

    /// Reset `key` to its default value
    pub fn unset(&mut self, key: ConfigKey) {
        let defaults = Self::default();
        match key {
            ConfigKey::Database => self.database = defaults.database,
            ConfigKey::LogsDir => self.logs_dir = defaults.logs_dir,
            ConfigKey::Channel => self.channel = defaults.channel,
            ConfigKey::MaxPoints => self.max_points = defaults.max_points,
            ConfigKey::DetailSteps => self.detail_steps = defaults.detail_steps,
            ConfigKey::DefaultDetail => self.default_detail = defaults.default_detail,
            ConfigKey::Format => self.format = defaults.format,
            ConfigKey::NoColor => self.no_color = defaults.no_color,
        }
    }

    /// Configured output format, if it names a known one
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
    }
}

fn parse_positive(value: &str, key: &str) -> Result<usize> {
    let n: usize = value
        .parse()
        .with_context(|| format!("Invalid {} '{}'. Use a whole number", key, value))?;
    if n == 0 {
        bail!("{} must be at least 1", key);
    }
    Ok(n)
}

/// Resolve the database path: explicit flag or env var, then config, then the
/// platform default
pub fn resolve_database(database: Option<PathBuf>, config: &Config) -> PathBuf {
    database
        .or_else(|| config.database.clone())
        .unwrap_or_else(fluxview_store::default_db_path)
}

/// Resolve the output format: explicit flag, then config, then text
pub fn resolve_format(format: Option<OutputFormat>, config: &Config) -> OutputFormat {
    format
        .or_else(|| config.output_format())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.channel, Channel::Flux);
        assert_eq!(config.max_points, 100_000);
        assert_eq!(config.detail_steps, 10);
        assert_eq!(config.default_detail, 10);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("channel = \"pressure\"\ndetail_steps = 4\n").unwrap();
        assert_eq!(config.channel, Channel::Pressure);
        assert_eq!(config.detail_steps, 4);
        assert_eq!(config.max_points, 100_000);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.database = Some(PathBuf::from("/data/readings.db"));
        config.channel = Channel::Humidity;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Config::load_from(&dir.path().join("missing.toml")),
            Config::default()
        );
    }

    #[test]
    fn test_load_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_points = \"many\"").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set(ConfigKey::Channel, "Temp").unwrap();
        config.set(ConfigKey::MaxPoints, "5000").unwrap();
        config.set(ConfigKey::Format, "JSON").unwrap();
        config.set(ConfigKey::NoColor, "true").unwrap();

        assert_eq!(config.get(ConfigKey::Channel).as_deref(), Some("temperature"));
        assert_eq!(config.get(ConfigKey::MaxPoints).as_deref(), Some("5000"));
        assert_eq!(config.get(ConfigKey::Format).as_deref(), Some("json"));
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert!(config.no_color);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set(ConfigKey::Channel, "radon").is_err());
        assert!(config.set(ConfigKey::DetailSteps, "0").is_err());
        assert!(config.set(ConfigKey::MaxPoints, "-5").is_err());
        assert!(config.set(ConfigKey::Format, "xml").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unset_restores_default() {
        let mut config = Config::default();
        config.set(ConfigKey::LogsDir, "/var/log/flux").unwrap();
        config.set(ConfigKey::DetailSteps, "4").unwrap();

        config.unset(ConfigKey::LogsDir);
        config.unset(ConfigKey::DetailSteps);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_database_prefers_arg() {
        let mut config = Config::default();
        config.database = Some(PathBuf::from("/config.db"));

        assert_eq!(
            resolve_database(Some(PathBuf::from("/arg.db")), &config),
            PathBuf::from("/arg.db")
        );
        assert_eq!(resolve_database(None, &config), PathBuf::from("/config.db"));
    }

    #[test]
    fn test_resolve_database_falls_back_to_default() {
        assert_eq!(
            resolve_database(None, &Config::default()),
            fluxview_store::default_db_path()
        );
    }

    #[test]
    fn test_resolve_format() {
        let mut config = Config::default();
        assert_eq!(resolve_format(None, &config), OutputFormat::Text);

        config.format = Some("csv".to_string());
        assert_eq!(resolve_format(None, &config), OutputFormat::Csv);
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
    }
}
