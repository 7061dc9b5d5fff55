//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Default output format when `--json` is not passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format used unless `--json` overrides it.
    pub format: OutputFormat,

    /// Worker threads for batch checks. Unset uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATTEND_*)
        figment = figment.merge(Env::prefixed("ATTEND_"));

        figment.extract()
    }

    /// Whether output should be JSON, given the command's own `--json` flag.
    pub const fn wants_json(&self, flag: bool) -> bool {
        flag || matches!(self.format, OutputFormat::Json)
    }
}

/// Returns the platform-specific config directory for attend.
///
/// On Linux: `~/.config/attend`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("attend"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_attend() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "attend");
    }

    #[test]
    fn test_default_config_is_human_output() {
        let config = Config::default();
        assert_eq!(config.format, OutputFormat::Human);
        assert_eq!(config.threads, None);
        assert!(!config.wants_json(false));
        assert!(config.wants_json(true));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("attend.toml");
        std::fs::write(&path, "format = \"json\"\nthreads = 2\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.threads, Some(2));
        assert!(config.wants_json(false));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("attend.toml");
        std::fs::write(&path, "format = \"yaml\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
