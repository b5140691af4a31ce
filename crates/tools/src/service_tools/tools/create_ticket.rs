//! Ticket Creation Tool
//!
//! Opens a new support ticket for the session, replacing any earlier one.

use serde::Deserialize;
use serde_json::Value;

use service_agent_core::{
    lenient_string, parse_arguments, InputSchema, PropertySchema, StatePatch, TicketState, Tool,
    ToolContext, ToolOutput,
};

use crate::service_tools::utils::ticket_id_for;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTicketArgs {
    #[serde(deserialize_with = "lenient_string")]
    pub issue: String,
}

/// Ticket creation tool
#[derive(Debug, Default)]
pub struct CreateTicketTool;

impl CreateTicketTool {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, args: CreateTicketArgs, ctx: &ToolContext<'_>) -> ToolOutput {
        let ticket = TicketState::open(ticket_id_for(ctx.now), args.issue, ctx.now);
        let customer_name = ctx.state.customer_name().unwrap_or("Customer");

        if let Some(previous) = &ctx.state.ticket {
            tracing::debug!(previous = %previous.id, "Replacing active ticket");
        }
        tracing::info!(
            ticket_id = %ticket.id,
            customer_id = ctx.state.customer.as_ref().map(|c| c.id.as_str()).unwrap_or("UNKNOWN"),
            "Ticket created"
        );

        ToolOutput::text(format!(
            "I've created ticket {} for you, {}. Is there anything else about this issue?",
            ticket.id, customer_name
        ))
        .with_patch(StatePatch::open_ticket(ticket))
    }
}

impl Tool for CreateTicketTool {
    fn name(&self) -> &str {
        "create_ticket"
    }

    fn description(&self) -> &str {
        "Create a support ticket"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::object().property(
            "issue",
            PropertySchema::string("Description of the issue"),
            true,
        )
    }

    fn execute(&self, input: Value, ctx: &ToolContext<'_>) -> ToolOutput {
        self.handle(parse_arguments(self.name(), input), ctx)
    }
}
