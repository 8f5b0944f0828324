//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::search::SearchOptions;
use crate::store::daily::DEFAULT_DAILY_TEMPLATE;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default data directory
    pub dir: Option<PathBuf>,

    /// Fuzzy search threshold
    pub threshold: Option<f64>,

    /// Number of past searches to keep
    pub history_limit: Option<usize>,

    /// Template for new daily notes
    pub daily_template: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/garden/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("garden")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Platform data directory (`garden` under e.g. `~/.local/share`)
    /// 4. Current working directory
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join("garden")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Search options from config, with an optional threshold override.
    pub fn search_options(&self, threshold: Option<f64>) -> SearchOptions {
        let mut options = SearchOptions::default();
        if let Some(threshold) = threshold.or(self.threshold) {
            options.threshold = threshold;
        }
        if let Some(limit) = self.history_limit {
            options.max_history = limit;
        }
        options
    }

    pub fn daily_template(&self) -> &str {
        self.daily_template
            .as_deref()
            .unwrap_or(DEFAULT_DAILY_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{DEFAULT_MAX_HISTORY, DEFAULT_THRESHOLD};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
    }

    #[test]
    fn data_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/garden")),
            ..Default::default()
        };
        let cli_dir = PathBuf::from("/cli/garden");
        assert_eq!(config.data_dir(Some(&cli_dir)), PathBuf::from("/cli/garden"));
    }

    #[test]
    fn data_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/garden")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(None), PathBuf::from("/config/garden"));
    }

    #[test]
    fn data_dir_falls_back_to_platform_dir() {
        let expected = dirs::data_dir()
            .map(|d| d.join("garden"))
            .unwrap_or_else(|| PathBuf::from("."));
        assert_eq!(Config::default().data_dir(None), expected);
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("garden/config.toml"));
    }

    #[test]
    fn parses_all_fields() {
        let config: Config = toml::from_str(
            r##"
            dir = "/srv/garden"
            threshold = 0.5
            history_limit = 3
            daily_template = "# {{ date }}"
            "##,
        )
        .unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("/srv/garden")));
        assert_eq!(config.daily_template(), "# {{ date }}");
        let options = config.search_options(None);
        assert_eq!(options.threshold, 0.5);
        assert_eq!(options.max_history, 3);
    }

    #[test]
    fn search_options_override_and_defaults() {
        let config = Config {
            threshold: Some(0.5),
            ..Default::default()
        };
        assert_eq!(config.search_options(Some(0.1)).threshold, 0.1);

        let defaults = Config::default().search_options(None);
        assert_eq!(defaults.threshold, DEFAULT_THRESHOLD);
        assert_eq!(defaults.max_history, DEFAULT_MAX_HISTORY);
        assert_eq!(Config::default().daily_template(), DEFAULT_DAILY_TEMPLATE);
    }
}
