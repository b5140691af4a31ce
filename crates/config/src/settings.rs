//! Main settings module

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use service_agent_core::{
    BusinessHours, CompanyInfo, CustomerDirectory, CustomerRecord, CustomerTier,
};

use crate::constants::{company, sources, DEFAULT_TOOL_HISTORY};
use crate::{AgentProfile, ConfigError};

/// Main application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Agent identity, language and prompt
    #[serde(default)]
    pub agent: AgentProfile,

    /// Company details seeded into each session
    #[serde(default)]
    pub company: CompanyConfig,

    /// Customer directory; the built-in demo directory when unset
    #[serde(default)]
    pub customers: Option<Vec<CustomerEntry>>,

    /// Tool calls remembered per session
    #[serde(default = "default_tool_history")]
    pub tool_history_limit: usize,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_tool_history() -> usize {
    DEFAULT_TOOL_HISTORY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            agent: AgentProfile::default(),
            company: CompanyConfig::default(),
            customers: None,
            tool_history_limit: default_tool_history(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Company contact details and opening window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyConfig {
    #[serde(default = "default_company_name")]
    pub name: String,
    #[serde(default = "default_support_email")]
    pub support_email: String,
    #[serde(default = "default_support_phone")]
    pub support_phone: String,
    /// Spoken description of the opening hours
    #[serde(default = "default_business_hours")]
    pub business_hours: String,
    /// Hour window used for `is_business_hours`
    #[serde(default)]
    pub hours: BusinessHours,
}

fn default_company_name() -> String {
    company::NAME.to_string()
}
fn default_support_email() -> String {
    company::SUPPORT_EMAIL.to_string()
}
fn default_support_phone() -> String {
    company::SUPPORT_PHONE.to_string()
}
fn default_business_hours() -> String {
    company::BUSINESS_HOURS.to_string()
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            support_email: default_support_email(),
            support_phone: default_support_phone(),
            business_hours: default_business_hours(),
            hours: BusinessHours::default(),
        }
    }
}

impl CompanyConfig {
    /// Session-facing company details
    pub fn info(&self) -> CompanyInfo {
        CompanyInfo {
            name: self.name.clone(),
            support_email: self.support_email.clone(),
            support_phone: self.support_phone.clone(),
            business_hours: self.business_hours.clone(),
        }
    }
}

/// One configured customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEntry {
    pub phone: String,
    pub id: String,
    pub name: String,
    pub tier: CustomerTier,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a YAML document, then validate
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build the customer directory
    pub fn customer_directory(&self) -> CustomerDirectory {
        match &self.customers {
            Some(entries) => CustomerDirectory::from_entries(entries.iter().map(|entry| {
                (
                    entry.phone.clone(),
                    CustomerRecord::new(entry.id.clone(), entry.name.clone(), entry.tier),
                )
            })),
            None => CustomerDirectory::builtin(),
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_agent()?;
        self.validate_company()?;
        self.validate_customers()?;
        self.validate_observability()?;

        if self.tool_history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tool_history_limit".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    fn validate_agent(&self) -> Result<(), ConfigError> {
        if self.agent.name.trim().is_empty() {
            return Err(ConfigError::MissingField("agent.name".to_string()));
        }
        if self.agent.language.code.trim().is_empty() {
            return Err(ConfigError::MissingField("agent.language.code".to_string()));
        }
        Ok(())
    }

    fn validate_company(&self) -> Result<(), ConfigError> {
        if self.company.name.trim().is_empty() {
            return Err(ConfigError::MissingField("company.name".to_string()));
        }

        let hours = &self.company.hours;
        if hours.close_hour > 24 {
            return Err(ConfigError::InvalidValue {
                field: "company.hours.close_hour".to_string(),
                message: format!("Must be at most 24, got {}", hours.close_hour),
            });
        }
        if hours.open_hour >= hours.close_hour {
            return Err(ConfigError::InvalidValue {
                field: "company.hours".to_string(),
                message: format!(
                    "open_hour ({}) must be before close_hour ({})",
                    hours.open_hour, hours.close_hour
                ),
            });
        }

        Ok(())
    }

    fn validate_customers(&self) -> Result<(), ConfigError> {
        let Some(entries) = &self.customers else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        for entry in entries {
            if entry.phone.trim().is_empty() {
                return Err(ConfigError::MissingField("customers[].phone".to_string()));
            }
            if entry.id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "customers[].id".to_string(),
                    message: format!("Empty id for phone {}", entry.phone),
                });
            }
            if !seen.insert(entry.phone.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "customers[].phone".to_string(),
                    message: format!("Duplicate phone number {}", entry.phone),
                });
            }
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown level {:?}", self.observability.log_level),
            });
        }
        Ok(())
    }
}

fn env_source(
    builder: ConfigBuilder<DefaultState>,
    overrides: Option<HashMap<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(sources::ENV_PREFIX)
            .separator(sources::ENV_SEPARATOR)
            .try_parsing(true)
            .source(overrides),
    )
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    tracing::debug!(
        agent = %settings.agent.name,
        company = %settings.company.name,
        customers = settings.customers.as_ref().map_or(0, |c| c.len()),
        "Settings loaded"
    );
    Ok(settings)
}

/// Load settings from the conventional locations.
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name(sources::DEFAULT_FILE).required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(
            File::with_name(&format!("{}/{}", sources::CONFIG_DIR, env_name)).required(false),
        );
    }

    finish(env_source(builder, None))
}

/// Load settings from one explicit file with environment overrides on top
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let builder = Config::builder().add_source(File::from(path));
    finish(env_source(builder, None))
}

/// Like [`load_settings_from`], with an explicit environment map instead of
/// the process environment
pub fn load_settings_with_env(
    path: Option<&Path>,
    env: HashMap<String, String>,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(File::from(path));
    }
    finish(env_source(builder, Some(env)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.company.name, "TechCorp");
        assert_eq!(settings.company.support_email, "support@techcorp.com");
        assert_eq!(settings.company.support_phone, "1-800-TECH");
        assert_eq!(settings.company.business_hours, "9 AM to 6 PM EST");
        assert_eq!(settings.company.hours, BusinessHours::new(9, 18));
        assert_eq!(settings.tool_history_limit, 100);
        assert_eq!(settings.customer_directory().len(), 3);
    }

    #[test]
    fn test_hours_validation() {
        let mut settings = Settings::default();
        settings.company.hours = BusinessHours::new(18, 9);
        assert!(settings.validate().is_err());

        settings.company.hours = BusinessHours::new(9, 25);
        assert!(settings.validate().is_err());

        settings.company.hours = BusinessHours::new(0, 24);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_company_name_required() {
        let mut settings = Settings::default();
        settings.company.name = "  ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingField(field)) if field == "company.name"
        ));
    }

    #[test]
    fn test_customer_validation() {
        let entry = |phone: &str, id: &str| CustomerEntry {
            phone: phone.to_string(),
            id: id.to_string(),
            name: "Someone".to_string(),
            tier: CustomerTier::Bronze,
        };

        let mut settings = Settings::default();
        settings.customers = Some(vec![entry("+1", "A"), entry("+1", "B")]);
        assert!(settings.validate().is_err());

        settings.customers = Some(vec![entry("+1", "")]);
        assert!(settings.validate().is_err());

        settings.customers = Some(vec![entry("+1", "A"), entry("+2", "B")]);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.customer_directory().len(), 2);
        assert!(settings.customer_directory().lookup("+15551234567").is_none());
    }

    #[test]
    fn test_log_level_validation() {
        let mut settings = Settings::default();
        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());

        settings.observability.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
company:
  name: Acme
  hours:
    open_hour: 8
    close_hour: 20
customers:
  - phone: "+4420000000"
    id: A1
    name: Ada Lovelace
    tier: gold
"#;
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.company.name, "Acme");
        assert_eq!(settings.company.support_phone, "1-800-TECH");
        assert_eq!(settings.company.hours, BusinessHours::new(8, 20));

        let directory = settings.customer_directory();
        let ada = directory.lookup("+4420000000").unwrap();
        assert_eq!(ada.tier, CustomerTier::Gold);
    }

    #[test]
    fn test_from_yaml_str_rejects_invalid() {
        let yaml = "company:\n  hours:\n    open_hour: 12\n    close_hour: 12\n";
        assert!(Settings::from_yaml_str(yaml).is_err());
        assert!(Settings::from_yaml_str("company: [").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "company:\n  name: FileCorp\ntool_history_limit: 5\nobservability:\n  log_json: true"
        )
        .unwrap();

        let settings = load_settings_with_env(Some(file.path()), HashMap::new()).unwrap();
        assert_eq!(settings.company.name, "FileCorp");
        assert_eq!(settings.tool_history_limit, 5);
        assert!(settings.observability.log_json);
        assert_eq!(settings.agent.name, "service-agent");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "company:\n  name: FileCorp").unwrap();

        let env = HashMap::from([
            (
                "SERVICE_AGENT__COMPANY__NAME".to_string(),
                "EnvCorp".to_string(),
            ),
            (
                "SERVICE_AGENT__COMPANY__HOURS__OPEN_HOUR".to_string(),
                "8".to_string(),
            ),
        ]);

        let settings = load_settings_with_env(Some(file.path()), env).unwrap();
        assert_eq!(settings.company.name, "EnvCorp");
        assert_eq!(settings.company.hours.open_hour, 8);
        assert_eq!(settings.company.hours.close_hour, 18);
    }

    #[test]
    fn test_missing_file() {
        let result = load_settings_from(Path::new("/nonexistent/service-agent.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let settings = load_settings_with_env(None, HashMap::new()).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
