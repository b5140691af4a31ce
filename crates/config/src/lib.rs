//! Configuration management for the service agent
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (`SERVICE_AGENT__` prefix, `__` separator)
//!
//! Every field has a built-in default, so a missing file yields the stock
//! TechCorp agent.

pub mod agent;
pub mod constants;
pub mod settings;

pub use agent::{AgentProfile, LanguageConfig, PromptSection};
pub use settings::{
    load_settings, load_settings_from, load_settings_with_env, CompanyConfig, CustomerEntry,
    ObservabilityConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
