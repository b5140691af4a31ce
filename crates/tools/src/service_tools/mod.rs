//! Service Tools
//!
//! The six customer-service tools:
//! - `identify_customer`: phone-number lookup
//! - `get_company_info`: company contact details
//! - `create_ticket`, `add_ticket_note`, `get_ticket_summary`, `escalate_ticket`:
//!   the session's support ticket

mod tools;
mod utils;

pub use utils::{ticket_id_for, TICKET_ID_PREFIX};

pub use tools::{
    AddTicketNoteTool, CompanyInfoTool, CreateTicketTool, EscalateTicketTool,
    IdentifyCustomerTool, TicketSummaryTool,
};
