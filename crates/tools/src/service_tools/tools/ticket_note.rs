//! Ticket Note Tool

use serde::Deserialize;
use serde_json::Value;

use service_agent_core::{
    lenient_string, parse_arguments, InputSchema, PropertySchema, StatePatch, TicketNote, Tool,
    ToolContext, ToolOutput,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddTicketNoteArgs {
    #[serde(deserialize_with = "lenient_string")]
    pub note: String,
}

/// Appends a timestamped note to the active ticket
#[derive(Debug, Default)]
pub struct AddTicketNoteTool;

impl AddTicketNoteTool {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, args: AddTicketNoteArgs, ctx: &ToolContext<'_>) -> ToolOutput {
        let Some(ticket) = &ctx.state.ticket else {
            return ToolOutput::text("No ticket found. Would you like me to create one?");
        };

        let mut notes = ticket.notes.clone();
        notes.push(TicketNote::new(args.note, ctx.now));

        tracing::debug!(ticket_id = %ticket.id, notes = notes.len(), "Ticket note added");

        ToolOutput::text(format!(
            "Added note to ticket {}. Total notes: {}.",
            ticket.id,
            notes.len()
        ))
        .with_patch(StatePatch::replace_notes(notes))
    }
}

impl Tool for AddTicketNoteTool {
    fn name(&self) -> &str {
        "add_ticket_note"
    }

    fn description(&self) -> &str {
        "Add a note to the current ticket"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::object().property(
            "note",
            PropertySchema::string("Additional information"),
            true,
        )
    }

    fn execute(&self, input: Value, ctx: &ToolContext<'_>) -> ToolOutput {
        self.handle(parse_arguments(self.name(), input), ctx)
    }
}
