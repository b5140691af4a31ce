//! Tool implementations

mod company_info;
mod create_ticket;
mod escalate;
mod identify_customer;
mod ticket_note;
mod ticket_summary;

pub use company_info::CompanyInfoTool;
pub use create_ticket::CreateTicketTool;
pub use escalate::EscalateTicketTool;
pub use identify_customer::IdentifyCustomerTool;
pub use ticket_note::AddTicketNoteTool;
pub use ticket_summary::TicketSummaryTool;
