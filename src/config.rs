// Configuration: built-in defaults, then `~/.resume_match.json`, then
// environment variables, then command-line overrides. Validation runs once,
// after every layer is applied.

use crate::error::ConfigError;
use crate::render::DisplayOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8080/match-resume";
pub const CONFIG_FILE_NAME: &str = ".resume_match.json";

pub const ENV_ENDPOINT: &str = "RESUME_MATCH_ENDPOINT";
pub const ENV_SHOW_MATCHED: &str = "RESUME_MATCH_SHOW_MATCHED";
pub const ENV_MISSING_LIMIT: &str = "RESUME_MATCH_MISSING_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint_url: String,
    pub display: DisplayOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            display: DisplayOptions::default(),
        }
    }
}

/// Optional overrides read from the JSON config file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub show_matched_skills: Option<bool>,
    /// 0 means no cap.
    #[serde(default)]
    pub missing_skills_limit: Option<usize>,
}

impl FileConfig {
    /// Read a config file; a missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let parsed = serde_json::from_str(&data).map_err(|source| ConfigError::FileParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config file {}", path.display());
        Ok(Some(parsed))
    }
}

/// `~/.resume_match.json`, or the current directory when there is no home.
pub fn default_config_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(CONFIG_FILE_NAME)
}

/// Command-line values; they win over every other layer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub endpoint_url: Option<String>,
    pub show_matched_skills: Option<bool>,
    /// `Some(None)` removes the cap.
    pub missing_skills_limit: Option<Option<usize>>,
}

impl AppConfig {
    /// Load from the default config file, the process environment and
    /// `overrides`.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = FileConfig::load(&default_config_path())?;
        Self::from_sources(file.as_ref(), |key| std::env::var(key).ok(), overrides)
    }

    /// Merge the layers. `env` looks up a variable by name. Environment
    /// values shadowed by an override are never parsed.
    pub fn from_sources<F>(
        file: Option<&FileConfig>,
        env: F,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(file) = file {
            if let Some(url) = &file.endpoint_url {
                cfg.endpoint_url = url.clone();
            }
            if let Some(show) = file.show_matched_skills {
                cfg.display.show_matched_skills = show;
            }
            if let Some(limit) = file.missing_skills_limit {
                cfg.display.missing_skills_limit = limit_from(limit);
            }
        }

        match &overrides.endpoint_url {
            Some(url) => cfg.endpoint_url = url.clone(),
            None => {
                if let Some(url) = env(ENV_ENDPOINT) {
                    cfg.endpoint_url = url;
                }
            }
        }
        match overrides.show_matched_skills {
            Some(show) => cfg.display.show_matched_skills = show,
            None => {
                if let Some(raw) = env(ENV_SHOW_MATCHED) {
                    cfg.display.show_matched_skills = parse_bool(ENV_SHOW_MATCHED, &raw)?;
                }
            }
        }
        match overrides.missing_skills_limit {
            Some(limit) => cfg.display.missing_skills_limit = limit.and_then(limit_from),
            None => {
                if let Some(raw) = env(ENV_MISSING_LIMIT) {
                    cfg.display.missing_skills_limit = parse_limit(ENV_MISSING_LIMIT, &raw)?;
                }
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(())
    }
}

fn limit_from(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

pub fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// `all` or `0` disable the cap; any other positive integer sets it.
pub fn parse_limit(key: &str, raw: &str) -> Result<Option<usize>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed
        .parse::<usize>()
        .map(limit_from)
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
