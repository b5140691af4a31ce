//! Tools for the customer service agent
//!
//! Each tool is a synchronous handler over the session state: it reads a
//! snapshot, answers with a message, and may request a state patch.

pub mod registry;
pub mod service_tools;

pub use registry::{
    create_service_registry, ToolCall, ToolCallTracker, ToolExecutor, ToolRegistry,
    DEFAULT_HISTORY_LIMIT,
};
pub use service_tools::{
    ticket_id_for, AddTicketNoteTool, CompanyInfoTool, CreateTicketTool, EscalateTicketTool,
    IdentifyCustomerTool, TicketSummaryTool, TICKET_ID_PREFIX,
};

pub use service_agent_core::{Tool, ToolContext, ToolError, ToolOutput, ToolSchema};
