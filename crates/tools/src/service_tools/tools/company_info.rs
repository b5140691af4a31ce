//! Company Information Tool

use serde_json::Value;

use service_agent_core::{Tool, ToolContext, ToolOutput};

/// Company information tool
#[derive(Debug, Default)]
pub struct CompanyInfoTool;

impl CompanyInfoTool {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, ctx: &ToolContext<'_>) -> ToolOutput {
        let company = &ctx.state.company;
        ToolOutput::text(format!(
            "You've reached {}. Our hours are {}. Email us at {}.",
            company.name, company.business_hours, company.support_email
        ))
    }
}

impl Tool for CompanyInfoTool {
    fn name(&self) -> &str {
        "get_company_info"
    }

    fn description(&self) -> &str {
        "Get company information"
    }

    fn execute(&self, _input: Value, ctx: &ToolContext<'_>) -> ToolOutput {
        self.handle(ctx)
    }
}
