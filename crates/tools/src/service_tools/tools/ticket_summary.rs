//! Ticket Summary Tool

use serde_json::Value;

use service_agent_core::{Tool, ToolContext, ToolOutput};

/// Reads back the active ticket
#[derive(Debug, Default)]
pub struct TicketSummaryTool;

impl TicketSummaryTool {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, ctx: &ToolContext<'_>) -> ToolOutput {
        let Some(ticket) = &ctx.state.ticket else {
            return ToolOutput::text("No active ticket.");
        };
        let customer_name = ctx.state.customer_name().unwrap_or("Customer");

        tracing::debug!(ticket_id = %ticket.id, "Ticket summary requested");

        ToolOutput::text(format!(
            "Ticket {} for {}: {}. {} note(s) added.",
            ticket.id,
            customer_name,
            ticket.issue,
            ticket.note_count()
        ))
    }
}

impl Tool for TicketSummaryTool {
    fn name(&self) -> &str {
        "get_ticket_summary"
    }

    fn description(&self) -> &str {
        "Get ticket summary"
    }

    fn execute(&self, _input: Value, ctx: &ToolContext<'_>) -> ToolOutput {
        self.handle(ctx)
    }
}
