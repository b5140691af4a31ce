//! Customer Service Agent
//!
//! Features:
//! - Agent definition (identity, language, prompt, tool declarations)
//! - Per-conversation sessions owning their own state
//! - Tool dispatch with patch merging and call history
//! - Host response envelopes (`response` + `set_global_data`)
//! - JSON-lines request loop for local hosting

pub mod agent;
pub mod harness;
pub mod prompt;
pub mod session;

pub use agent::ServiceAgent;
pub use harness::run;
pub use prompt::render_prompt;
pub use session::{ServiceSession, ToolRequest, ToolResult};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<service_agent_core::ToolError> for AgentError {
    fn from(err: service_agent_core::ToolError) -> Self {
        AgentError::Tool(err.to_string())
    }
}

impl From<service_agent_config::ConfigError> for AgentError {
    fn from(err: service_agent_config::ConfigError) -> Self {
        AgentError::Config(err.to_string())
    }
}
