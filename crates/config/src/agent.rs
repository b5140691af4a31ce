//! Agent profile: identity, language and system prompt sections

use serde::{Deserialize, Serialize};

use crate::constants::agent;

/// Agent profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Agent name registered with the host framework
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Spoken language and voice
    #[serde(default)]
    pub language: LanguageConfig,

    /// System prompt, in order
    #[serde(default = "default_prompt_sections")]
    pub prompt: Vec<PromptSection>,
}

fn default_agent_name() -> String {
    agent::NAME.to_string()
}

fn default_prompt_sections() -> Vec<PromptSection> {
    vec![
        PromptSection::text(
            "Role",
            "You are a customer service agent for TechCorp. \
             Help customers with inquiries and track issues.",
        ),
        PromptSection::bullets(
            "Process",
            [
                "Identify the customer by phone number",
                "Create support tickets for issues",
                "Add notes to track conversation details",
                "Provide ticket summary when requested",
            ],
        ),
    ]
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            language: LanguageConfig::default(),
            prompt: default_prompt_sections(),
        }
    }
}

/// Language and TTS voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Display name, e.g. "English"
    #[serde(default = "default_language_name")]
    pub name: String,
    /// BCP-47 code, e.g. "en-US"
    #[serde(default = "default_language_code")]
    pub code: String,
    /// Voice identifier
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_language_name() -> String {
    agent::LANGUAGE_NAME.to_string()
}
fn default_language_code() -> String {
    agent::LANGUAGE_CODE.to_string()
}
fn default_voice() -> String {
    agent::VOICE.to_string()
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            name: default_language_name(),
            code: default_language_code(),
            voice: default_voice(),
        }
    }
}

/// A titled prompt section with a body, bullets, or both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

impl PromptSection {
    pub fn text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Some(body.into()),
            bullets: Vec::new(),
        }
    }

    pub fn bullets<I, S>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            body: None,
            bullets: bullets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.as_deref().map_or(true, |b| b.trim().is_empty()) && self.bullets.is_empty()
    }
}
