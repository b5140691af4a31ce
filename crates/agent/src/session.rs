//! Conversation session
//!
//! A `ServiceSession` owns the state of one conversation. Every tool call
//! runs against a snapshot of that state; the returned patch is merged
//! before the next call, so calls observe each other strictly in order.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use service_agent_core::{SessionState, StatePatch, ToolContext};
use service_agent_tools::{ToolCall, ToolCallTracker, ToolExecutor};

use crate::AgentError;

/// Inbound tool call as sent by the host framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Tool name
    pub function: String,
    /// Call arguments
    #[serde(default, alias = "arguments")]
    pub argument: Value,
}

/// Outcome of one tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub tool: String,
    pub message: String,
    /// Patch already merged into the session
    pub patch: Option<StatePatch>,
}

impl ToolResult {
    /// Response envelope for the host framework.
    ///
    /// `{"response": ...}` plus `"action": [{"set_global_data": {...}}]`
    /// when the call changed session data.
    pub fn to_json(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert("response".into(), json!(self.message));
        if let Some(patch) = &self.patch {
            envelope.insert(
                "action".into(),
                json!([{ "set_global_data": Value::Object(patch.to_global_data()) }]),
            );
        }
        Value::Object(envelope)
    }
}

/// One conversation with the agent
pub struct ServiceSession {
    state: SessionState,
    tools: Arc<dyn ToolExecutor>,
    history: ToolCallTracker,
}

impl ServiceSession {
    pub(crate) fn new(
        state: SessionState,
        tools: Arc<dyn ToolExecutor>,
        history_limit: usize,
    ) -> Self {
        Self {
            state,
            tools,
            history: ToolCallTracker::new(history_limit),
        }
    }

    /// Invoke a tool at the current local time
    pub fn call(&mut self, name: &str, arguments: Value) -> Result<ToolResult, AgentError> {
        self.call_at(name, arguments, Local::now().naive_local())
    }

    /// Invoke a tool as of `now`
    pub fn call_at(
        &mut self,
        name: &str,
        arguments: Value,
        now: NaiveDateTime,
    ) -> Result<ToolResult, AgentError> {
        let output = {
            let ctx = ToolContext::new(&self.state, now);
            self.tools.execute(name, arguments.clone(), &ctx)?
        };

        if let Some(patch) = &output.patch {
            self.state.apply(patch.clone());
        }

        tracing::debug!(
            tool = name,
            patched = output.is_patched(),
            "Tool call completed"
        );

        self.history.record(ToolCall {
            name: name.to_string(),
            arguments,
            message: output.message.clone(),
            patched: output.is_patched(),
            timestamp: now,
        });

        Ok(ToolResult {
            tool: name.to_string(),
            message: output.message,
            patch: output.patch,
        })
    }

    /// Dispatch a host request
    pub fn handle(&mut self, request: ToolRequest) -> Result<ToolResult, AgentError> {
        self.call(&request.function, request.argument)
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Flat key/value view of the session state
    pub fn global_data(&self) -> Map<String, Value> {
        self.state.to_global_data()
    }

    /// Calls made so far, bounded by the configured history limit
    pub fn history(&self) -> &ToolCallTracker {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use service_agent_core::{TicketNote, TicketState};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_tool_request_parsing() {
        let request: ToolRequest =
            serde_json::from_str(r#"{"function": "create_ticket", "argument": {"issue": "x"}}"#)
                .unwrap();
        assert_eq!(request.function, "create_ticket");
        assert_eq!(request.argument["issue"], "x");

        let request: ToolRequest =
            serde_json::from_str(r#"{"function": "get_company_info"}"#).unwrap();
        assert!(request.argument.is_null());

        let request: ToolRequest =
            serde_json::from_str(r#"{"function": "add_ticket_note", "arguments": {"note": "n"}}"#)
                .unwrap();
        assert_eq!(request.argument["note"], "n");
    }

    #[test]
    fn test_envelope_without_patch() {
        let result = ToolResult {
            tool: "get_ticket_summary".into(),
            message: "No active ticket.".into(),
            patch: None,
        };
        assert_eq!(result.to_json(), json!({ "response": "No active ticket." }));
    }

    #[test]
    fn test_envelope_with_patch() {
        let result = ToolResult {
            tool: "add_ticket_note".into(),
            message: "Added note to ticket TKT-1. Total notes: 1.".into(),
            patch: Some(StatePatch::replace_notes(vec![TicketNote::new("A", at(10))])),
        };
        assert_eq!(
            result.to_json(),
            json!({
                "response": "Added note to ticket TKT-1. Total notes: 1.",
                "action": [{
                    "set_global_data": {
                        "ticket_notes": [{ "time": "2026-03-14T10:00:00.000000", "content": "A" }]
                    }
                }]
            })
        );

        let result = ToolResult {
            tool: "create_ticket".into(),
            message: "created".into(),
            patch: Some(StatePatch::open_ticket(TicketState::open("TKT-1", "x", at(10)))),
        };
        let data = &result.to_json()["action"][0]["set_global_data"];
        assert_eq!(data["ticket_id"], "TKT-1");
        assert_eq!(data["ticket_created"], "2026-03-14T10:00:00.000000");
    }
}
