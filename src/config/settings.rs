//! TOML-based configuration.
//!
//! Supports a config file (schemastate.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [render]
//! partition_engine = "${PARTITION_ENGINE}"
//!
//! [advisor]
//! max_index_keys = 5
//! level = "error"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::advisor::Status;
use crate::state::RenderOptions;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// DDL rendering settings.
    pub render: RenderSettings,

    /// Statement review settings.
    pub advisor: AdvisorSettings,
}

/// DDL rendering settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Storage engine annotated on partition lines (supports ${ENV_VAR} expansion).
    pub partition_engine: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            partition_engine: RenderOptions::default().partition_engine,
        }
    }
}

impl From<&RenderSettings> for RenderOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            partition_engine: settings.partition_engine.clone(),
        }
    }
}

/// Statement review settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Maximum keys per index; 0 disables the check.
    pub max_index_keys: usize,

    /// Status reported for violations.
    pub level: Status,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            max_index_keys: 5,
            level: Status::Warning,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text, expanding environment variables.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.render.partition_engine = expand_env_vars(&settings.render.partition_engine)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SCHEMASTATE_CONFIG`
    /// 2. `./schemastate.toml`
    /// 3. `~/.config/schemastate/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SCHEMASTATE_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("schemastate.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schemastate").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Settings::default())
    }

    /// Options for the DDL renderer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::from(&self.render)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let engine = &self.render.partition_engine;
        if engine.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "render.partition_engine must not be empty".to_string(),
            ));
        }
        if !engine.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(SettingsError::InvalidConfig(format!(
                "render.partition_engine is not an engine name: {}",
                engine
            )));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
