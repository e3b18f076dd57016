//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "BURNWATCH_DATA_DIR";
/// Config file looked up in the current directory.
pub const LOCAL_CONFIG: &str = "burnwatch.toml";

/// Top-level burnwatch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnwatchConfig {
    /// Directory holding the profile, mood log and task files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Look-ahead for upcoming task lists, in days.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: i64,
    /// Mood entries shown by `mood history` when no limit is given.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Where `report --export` writes dated report files.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_upcoming_days() -> i64 {
    7
}
fn default_history_limit() -> usize {
    10
}
fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BurnwatchConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            upcoming_days: default_upcoming_days(),
            history_limit: default_history_limit(),
            report_dir: default_report_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables resolve to the empty string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `burnwatch.toml` in the current directory
/// 2. `~/.config/burnwatch/config.toml`
///
/// `BURNWATCH_DATA_DIR` overrides `data_dir` from either file.
pub fn load_config_from(path: Option<&Path>) -> Result<BurnwatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => BurnwatchConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.report_dir = resolve_path(&config.report_dir);
    Ok(config)
}

fn parse_config(content: &str) -> Result<BurnwatchConfig> {
    let config: BurnwatchConfig = toml::from_str(content)?;
    if config.upcoming_days < 0 {
        anyhow::bail!("upcoming_days must not be negative");
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("burnwatch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_BURNWATCH_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_BURNWATCH_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_BURNWATCH_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_BURNWATCH_UNSET_VAR}/x"), "/x");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_BURNWATCH_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = BurnwatchConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.upcoming_days, 7);
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("history_limit = 3\n").unwrap();
        assert_eq!(config.history_limit, 3);
        assert_eq!(config.upcoming_days, 7);
        assert_eq!(config.report_dir, PathBuf::from("."));
    }

    #[test]
    fn negative_look_ahead_rejected() {
        assert!(parse_config("upcoming_days = -1\n").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "data_dir = \"/tmp/bw\"\nupcoming_days = 14\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.upcoming_days, 14);
    }
}
