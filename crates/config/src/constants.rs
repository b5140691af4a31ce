//! Default values for the service agent
//!
//! Every setting falls back to these when no config file or environment
//! override provides it.

/// Company contact details seeded into each session
pub mod company {
    pub const NAME: &str = "TechCorp";
    pub const SUPPORT_EMAIL: &str = "support@techcorp.com";
    pub const SUPPORT_PHONE: &str = "1-800-TECH";
    /// Spoken description of the opening window
    pub const BUSINESS_HOURS: &str = "9 AM to 6 PM EST";
}

/// Agent identity and voice
pub mod agent {
    pub const NAME: &str = "service-agent";
    pub const LANGUAGE_NAME: &str = "English";
    pub const LANGUAGE_CODE: &str = "en-US";
    pub const VOICE: &str = "rime.spore";
}

/// Config file and environment lookup
pub mod sources {
    /// Prefix of environment overrides, e.g. `SERVICE_AGENT__COMPANY__NAME`
    pub const ENV_PREFIX: &str = "SERVICE_AGENT";
    pub const ENV_SEPARATOR: &str = "__";
    /// Selects `config/{env}` on top of `config/default`
    pub const ENV_SELECTOR: &str = "SERVICE_AGENT_ENV";
    pub const DEFAULT_FILE: &str = "config/default";
    pub const CONFIG_DIR: &str = "config";
}

/// Maximum tool calls remembered per session
pub const DEFAULT_TOOL_HISTORY: usize = 100;
