//! Core traits for the service agent
//!
//! ```text
//! Tools:
//!   - Tool: named, schema-described session handler
//! ```

mod tool;

pub use tool::{
    lenient_string, parse_arguments, InputSchema, PropertySchema, Tool, ToolContext, ToolError,
    ToolOutput, ToolSchema,
};
