//! Tool Registry
//!
//! Manages tool registration, discovery, and execution.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use service_agent_core::{CustomerDirectory, Tool, ToolContext, ToolError, ToolOutput, ToolSchema};

use crate::service_tools::{
    AddTicketNoteTool, CompanyInfoTool, CreateTicketTool, EscalateTicketTool,
    IdentifyCustomerTool, TicketSummaryTool,
};

/// Default number of calls kept by a [`ToolCallTracker`]
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Tool executor trait
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    fn execute(
        &self,
        name: &str,
        arguments: Value,
        ctx: &ToolContext<'_>,
    ) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Replaced previously registered tool");
        }
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolExecutor for ToolRegistry {
    fn execute(
        &self,
        name: &str,
        arguments: Value,
        ctx: &ToolContext<'_>,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self.tools.get(name).ok_or_else(|| {
            tracing::warn!(tool = name, "Unknown tool requested");
            ToolError::not_found(name)
        })?;

        tracing::trace!(tool = name, "Executing tool");
        Ok(tool.execute(arguments, ctx))
    }

    /// Schemas sorted by tool name
    fn list_tools(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

/// Create the customer service registry with all six tools
pub fn create_service_registry(directory: Arc<CustomerDirectory>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(IdentifyCustomerTool::new(directory.clone()));
    registry.register(CompanyInfoTool::new());
    registry.register(CreateTicketTool::new());
    registry.register(AddTicketNoteTool::new());
    registry.register(TicketSummaryTool::new());
    registry.register(EscalateTicketTool::new());

    tracing::info!(
        tools = registry.len(),
        customers = directory.len(),
        "Created service tool registry"
    );

    registry
}

/// Tool call result for conversation tracking
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Tool name
    pub name: String,
    /// Input arguments
    pub arguments: Value,
    /// Response message
    pub message: String,
    /// Whether the call changed session data
    pub patched: bool,
    /// Local time of the call
    pub timestamp: NaiveDateTime,
}

/// Bounded tool call history, oldest evicted first
pub struct ToolCallTracker {
    calls: VecDeque<ToolCall>,
    max_history: usize,
}

impl ToolCallTracker {
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            calls: VecDeque::with_capacity(max_history.min(DEFAULT_HISTORY_LIMIT)),
            max_history,
        }
    }

    /// Record a tool call
    pub fn record(&mut self, call: ToolCall) {
        if self.calls.len() >= self.max_history {
            self.calls.pop_front();
        }
        self.calls.push_back(call);
    }

    /// Up to `n` most recent calls, oldest first
    pub fn recent(&self, n: usize) -> Vec<&ToolCall> {
        let start = self.calls.len().saturating_sub(n);
        self.calls.iter().skip(start).collect()
    }

    /// All calls, oldest first
    pub fn all(&self) -> impl Iterator<Item = &ToolCall> {
        self.calls.iter()
    }

    /// Get calls by tool name
    pub fn by_name(&self, name: &str) -> Vec<&ToolCall> {
        self.calls.iter().filter(|c| c.name == name).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Clear history
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for ToolCallTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
