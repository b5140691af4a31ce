//! Ticket Escalation Tool
//!
//! Hand the active ticket to a supervisor.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use service_agent_core::{
    lenient_string, parse_arguments, Escalation, InputSchema, PropertySchema, StatePatch, Tool,
    ToolContext, ToolOutput,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EscalateTicketArgs {
    #[serde(deserialize_with = "lenient_string")]
    pub reason: String,
}

/// Callback invoked with `(ticket_id, reason)` on every escalation
pub type EscalationCallback = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Ticket escalation tool
#[derive(Default)]
pub struct EscalateTicketTool {
    on_escalate: Option<EscalationCallback>,
}

impl EscalateTicketTool {
    pub fn new() -> Self {
        Self { on_escalate: None }
    }

    /// Notify an external party (e.g. a supervisor queue) on escalation
    pub fn with_callback<F>(callback: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        Self {
            on_escalate: Some(Arc::new(callback)),
        }
    }

    pub fn handle(&self, args: EscalateTicketArgs, ctx: &ToolContext<'_>) -> ToolOutput {
        let Some(ticket) = &ctx.state.ticket else {
            return ToolOutput::text("No ticket to escalate. Let me create one first.");
        };

        if let Some(callback) = &self.on_escalate {
            callback(&ticket.id, &args.reason);
        }

        tracing::info!(
            ticket_id = %ticket.id,
            reason = %args.reason,
            "Ticket escalated to supervisor"
        );

        ToolOutput::text(format!(
            "Ticket {} has been escalated. A supervisor will contact you within 2 hours.",
            ticket.id
        ))
        .with_patch(StatePatch::escalate(Escalation {
            reason: args.reason,
            time: ctx.now,
        }))
    }
}

impl Tool for EscalateTicketTool {
    fn name(&self) -> &str {
        "escalate_ticket"
    }

    fn description(&self) -> &str {
        "Escalate ticket to supervisor"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::object().property("reason", PropertySchema::of_type("string"), true)
    }

    fn execute(&self, input: Value, ctx: &ToolContext<'_>) -> ToolOutput {
        self.handle(parse_arguments(self.name(), input), ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_tools::test_support::{at, seeded_state};
    use serde_json::json;
    use service_agent_core::TicketState;
    use std::sync::Mutex;

    #[test]
    fn test_escalate_without_ticket() {
        let state = seeded_state();
        let output = EscalateTicketTool::new()
            .execute(json!({ "reason": "angry" }), &ToolContext::new(&state, at(17, 0, 0)));
        assert_eq!(output.message, "No ticket to escalate. Let me create one first.");
        assert!(!output.is_patched());
    }

    #[test]
    fn test_escalate_patch() {
        let mut state = seeded_state();
        state.ticket = Some(TicketState::open("TKT-1", "issue", at(15, 0, 0)));

        let output = EscalateTicketTool::new().execute(
            json!({ "reason": "unresolved after 3 days" }),
            &ToolContext::new(&state, at(17, 30, 0)),
        );
        assert_eq!(
            output.message,
            "Ticket TKT-1 has been escalated. A supervisor will contact you within 2 hours."
        );

        let data = output.patch.unwrap().to_global_data();
        assert_eq!(data["escalated"], true);
        assert_eq!(data["escalation_reason"], "unresolved after 3 days");
        assert_eq!(data["escalation_time"], "2026-03-14T17:30:00.000000");
    }

    #[test]
    fn test_escalation_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let tool = EscalateTicketTool::with_callback(move |id, reason| {
            sink.lock().unwrap().push(format!("{}:{}", id, reason));
        });

        let mut state = seeded_state();
        tool.execute(json!({ "reason": "ignored" }), &ToolContext::new(&state, at(17, 0, 0)));
        assert!(seen.lock().unwrap().is_empty());

        state.ticket = Some(TicketState::open("TKT-9", "issue", at(15, 0, 0)));
        tool.execute(json!({ "reason": "urgent" }), &ToolContext::new(&state, at(17, 0, 0)));
        assert_eq!(*seen.lock().unwrap(), vec!["TKT-9:urgent".to_string()]);
    }
}
