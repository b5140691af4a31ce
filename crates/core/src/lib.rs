//! Core types for the customer service agent
//!
//! This crate provides the types shared by every other crate:
//! - Customer records and the phone-number directory
//! - Per-conversation session state and patches
//! - Greeting and business-hours derivation
//! - The `Tool` trait and its schema/output types

pub mod customer;
pub mod greeting;
pub mod session;
pub mod traits;

pub use customer::{CustomerDirectory, CustomerRecord, CustomerTier};
pub use greeting::{greeting_for_hour, BusinessHours, DayPeriod, SessionGreeting};
pub use session::{
    iso_timestamp, CompanyInfo, Escalation, SessionState, StatePatch, TicketNote, TicketState,
};

pub use traits::{
    lenient_string, parse_arguments, InputSchema, PropertySchema, Tool, ToolContext, ToolError,
    ToolOutput, ToolSchema,
};
