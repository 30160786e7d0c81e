//! Configuration module.
//!
//! Handles rendering and review-rule settings loaded from TOML.

mod settings;

pub use settings::{expand_env_vars, AdvisorSettings, RenderSettings, Settings, SettingsError};
