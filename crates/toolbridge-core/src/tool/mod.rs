use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

mod processor;
mod runtime;

pub use processor::ToolProcessor;
pub use runtime::ToolRuntime;

#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("Runtime Error {0}")]
    RuntimeError(#[from] Box<dyn std::error::Error + Sync + Send>),

    #[error("Serde Error {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub trait ToolT: ToolRuntime {
    /// The name of the tool.
    fn name(&self) -> &str;
    /// A description explaining the tool’s purpose.
    fn description(&self) -> &str;
    /// Return a description of the expected arguments.
    fn args_schema(&self) -> Value;
}

pub trait ToolInputT {
    fn io_schema() -> &'static str;
}

/// Function signature advertised to an orchestration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Discovery record for a single tool, in the `{"type": "function", ...}`
/// layout used by function-calling APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

impl From<&dyn ToolT> for ToolDefinition {
    fn from(tool: &dyn ToolT) -> Self {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.args_schema(),
            },
        }
    }
}

/// Result emitted after executing a single tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub tool_name: String,
    pub success: bool,
    pub arguments: Value,
    pub result: Value,
}
