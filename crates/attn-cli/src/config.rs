//! Configuration loading and management.

use std::path::{Path, PathBuf};

use attn_core::{DEFAULT_DATE_PATTERN, DEFAULT_DATETIME_PATTERN};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default XML input when `--input` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Default CSV destination when `--output` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Pattern for timestamps inside `<start>`/`<end>`.
    pub datetime_pattern: String,

    /// Pattern for `--start-date`/`--end-date`.
    pub date_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            datetime_pattern: DEFAULT_DATETIME_PATTERN.to_string(),
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later layers win: defaults, the user config file, `config_path`, the
    /// bare `input`/`output` environment variables, then `ATTN_*` variables.
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

        // Exports are often driven by plain `input=... output=...` variables
        figment = figment.merge(Env::raw().only(&["input", "output"]));

        // Load from environment variables (ATTN_*)
        figment = figment.merge(Env::prefixed("ATTN_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for attn.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("attn"))
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.datetime_pattern, "%d-%m-%Y %H:%M:%S");
        assert_eq!(config.date_pattern, "%d-%m-%Y");
        assert!(config.input.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_config_file_and_env_layering() {
        Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("HOME", &home);
            jail.set_env("XDG_CONFIG_HOME", &home);
            jail.create_file(
                "attn.toml",
                r#"
                datetime_pattern = "%Y-%m-%d %H:%M:%S"
                input = "from-file.xml"
                "#,
            )?;
            jail.set_env("input", "from-env.xml");
            jail.set_env("ATTN_DATE_PATTERN", "%Y-%m-%d");

            let config = Config::load_from(Some(Path::new("attn.toml")))?;

            assert_eq!(config.datetime_pattern, "%Y-%m-%d %H:%M:%S");
            assert_eq!(config.date_pattern, "%Y-%m-%d");
            assert_eq!(config.input, Some(PathBuf::from("from-env.xml")));
            assert!(config.output.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_dirs_config_path_ends_with_attn() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "attn");
        }
    }
}
