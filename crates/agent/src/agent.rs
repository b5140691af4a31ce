//! Service Agent
//!
//! The agent definition shared by all conversations: identity, language,
//! system prompt and the tool set. Conversations are started from it with
//! [`ServiceAgent::start_session`].

use chrono::{Local, NaiveDateTime};
use serde_json::{json, Value};
use std::sync::Arc;

use service_agent_config::{AgentProfile, CompanyConfig, Settings};
use service_agent_core::{SessionGreeting, SessionState};
use service_agent_tools::{create_service_registry, ToolExecutor};

use crate::prompt::render_prompt;
use crate::session::ServiceSession;
use crate::AgentError;

/// Customer service agent
pub struct ServiceAgent {
    profile: AgentProfile,
    company: CompanyConfig,
    tools: Arc<dyn ToolExecutor>,
    history_limit: usize,
}

impl ServiceAgent {
    /// Build the agent from validated settings
    pub fn new(settings: &Settings) -> Result<Self, AgentError> {
        settings.validate()?;

        let directory = Arc::new(settings.customer_directory());
        let tools: Arc<dyn ToolExecutor> = Arc::new(create_service_registry(directory));

        tracing::info!(
            agent = %settings.agent.name,
            company = %settings.company.name,
            language = %settings.agent.language.code,
            "Service agent created"
        );

        Ok(Self {
            profile: settings.agent.clone(),
            company: settings.company.clone(),
            tools,
            history_limit: settings.tool_history_limit,
        })
    }

    /// Agent with built-in defaults
    pub fn with_defaults() -> Result<Self, AgentError> {
        Self::new(&Settings::default())
    }

    /// Replace the tool set, e.g. with a registry whose escalation tool
    /// notifies a supervisor queue
    pub fn with_tools(mut self, tools: Arc<dyn ToolExecutor>) -> Self {
        self.tools = tools;
        self
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub fn tools(&self) -> &Arc<dyn ToolExecutor> {
        &self.tools
    }

    /// System prompt text
    pub fn render_prompt(&self) -> String {
        render_prompt(&self.profile.prompt)
    }

    /// Tool declarations: `[{name, description, parameters}]`
    pub fn tool_definitions(&self) -> Value {
        json!(self.tools.list_tools())
    }

    /// Everything the host framework needs to serve this agent
    pub fn definition(&self) -> Value {
        json!({
            "name": self.profile.name,
            "language": {
                "name": self.profile.language.name,
                "code": self.profile.language.code,
                "voice": self.profile.language.voice,
            },
            "prompt": self.render_prompt(),
            "functions": self.tool_definitions(),
        })
    }

    /// Start a conversation now
    pub fn start_session(&self) -> ServiceSession {
        self.start_session_at(Local::now().naive_local())
    }

    /// Start a conversation as of `now`; greeting and business-hours flag
    /// are fixed at this point
    pub fn start_session_at(&self, now: NaiveDateTime) -> ServiceSession {
        let greeting = SessionGreeting::at(now, &self.company.hours);
        let state = SessionState::new(self.company.info(), &greeting);

        tracing::debug!(
            greeting = greeting.greeting,
            is_business_hours = greeting.is_business_hours,
            "Session started"
        );

        ServiceSession::new(state, self.tools.clone(), self.history_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_default_agent() {
        let agent = ServiceAgent::with_defaults().unwrap();
        assert_eq!(agent.name(), "service-agent");
        assert!(agent.render_prompt().starts_with("## Role\n"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.company.name.clear();
        assert!(matches!(ServiceAgent::new(&settings), Err(AgentError::Config(_))));
    }

    #[test]
    fn test_definition() {
        let agent = ServiceAgent::with_defaults().unwrap();
        let definition = agent.definition();

        assert_eq!(definition["name"], "service-agent");
        assert_eq!(definition["language"]["voice"], "rime.spore");
        assert!(definition["prompt"].as_str().unwrap().contains("## Process"));

        let functions = definition["functions"].as_array().unwrap();
        assert_eq!(functions.len(), 6);
        let identify = functions
            .iter()
            .find(|f| f["name"] == "identify_customer")
            .unwrap();
        assert_eq!(identify["description"], "Identify customer by phone number");
        assert_eq!(identify["parameters"]["required"], json!(["phone"]));
        assert_eq!(identify["parameters"]["properties"]["phone"]["type"], "string");
    }

    #[test]
    fn test_session_seeding() {
        let agent = ServiceAgent::with_defaults().unwrap();

        let morning = agent.start_session_at(at(8));
        assert_eq!(morning.state().greeting.as_deref(), Some("Good morning"));
        assert!(!morning.state().is_business_hours);

        let afternoon = agent.start_session_at(at(14));
        assert_eq!(afternoon.state().greeting.as_deref(), Some("Good afternoon"));
        assert!(afternoon.state().is_business_hours);

        let evening = agent.start_session_at(at(20));
        assert_eq!(evening.state().greeting.as_deref(), Some("Good evening"));
        assert!(!evening.state().is_business_hours);

        let data = afternoon.global_data();
        assert_eq!(data["company_name"], "TechCorp");
        assert_eq!(data["support_email"], "support@techcorp.com");
        assert_eq!(data["business_hours"], "9 AM to 6 PM EST");
        assert_eq!(data["greeting"], "Good afternoon");
    }

    #[test]
    fn test_custom_business_hours() {
        let mut settings = Settings::default();
        settings.company.hours = service_agent_core::BusinessHours::new(7, 9);
        let agent = ServiceAgent::new(&settings).unwrap();
        assert!(agent.start_session_at(at(8)).state().is_business_hours);
        assert!(!agent.start_session_at(at(14)).state().is_business_hours);
    }
}
