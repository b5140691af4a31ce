//! Customer Identification Tool
//!
//! Look up the caller by phone number in the customer directory.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use service_agent_core::{
    lenient_string, parse_arguments, CustomerDirectory, InputSchema, PropertySchema, StatePatch,
    Tool, ToolContext, ToolOutput,
};

/// Fallback greeting when the session was started without one
const DEFAULT_GREETING: &str = "Hello";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdentifyCustomerArgs {
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
}

/// Customer identification tool
pub struct IdentifyCustomerTool {
    directory: Arc<CustomerDirectory>,
}

impl IdentifyCustomerTool {
    pub fn new(directory: Arc<CustomerDirectory>) -> Self {
        Self { directory }
    }

    pub fn handle(&self, args: IdentifyCustomerArgs, ctx: &ToolContext<'_>) -> ToolOutput {
        let Some(customer) = self.directory.lookup(&args.phone) else {
            tracing::info!("Caller phone number not in directory");
            return ToolOutput::text(
                "I don't recognize that number. Could you provide your account ID?",
            );
        };

        let greeting = ctx.state.greeting.as_deref().unwrap_or(DEFAULT_GREETING);

        tracing::info!(
            customer_id = %customer.id,
            tier = %customer.tier,
            "Customer identified"
        );

        ToolOutput::text(format!(
            "{}, {}! I see you're a {} member. How can I help?",
            greeting, customer.name, customer.tier
        ))
        .with_patch(StatePatch::identify(customer.clone()))
    }
}

impl Tool for IdentifyCustomerTool {
    fn name(&self) -> &str {
        "identify_customer"
    }

    fn description(&self) -> &str {
        "Identify customer by phone number"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::object().property(
            "phone",
            PropertySchema::string("Customer phone number"),
            true,
        )
    }

    fn execute(&self, input: Value, ctx: &ToolContext<'_>) -> ToolOutput {
        self.handle(parse_arguments(self.name(), input), ctx)
    }
}
