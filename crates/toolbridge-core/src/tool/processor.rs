use super::{ToolCallResult, ToolT};
use serde_json::Value;
use std::sync::Arc;

/// Dispatches tool calls by name and folds failures into `ToolCallResult`s.
pub struct ToolProcessor;

impl ToolProcessor {
    /// Find the tool named `tool_name` and run it with JSON-encoded arguments.
    pub async fn process_tool_call(
        tools: &[Arc<dyn ToolT>],
        tool_name: &str,
        tool_args: &str,
    ) -> ToolCallResult {
        match tools.iter().find(|t| t.name() == tool_name) {
            Some(tool) => Self::execute_tool(tool.as_ref(), tool_args).await,
            None => Self::create_error_result(
                tool_name,
                tool_args,
                &format!("Tool '{tool_name}' not found"),
            ),
        }
    }

    /// Execute a tool and return the result
    pub async fn execute_tool(tool: &dyn ToolT, tool_args: &str) -> ToolCallResult {
        let tool_name = tool.name();
        match serde_json::from_str::<Value>(tool_args) {
            Ok(parsed_args) => match tool.execute(parsed_args.clone()).await {
                Ok(output) => ToolCallResult {
                    tool_name: tool_name.to_string(),
                    success: true,
                    arguments: parsed_args,
                    result: output,
                },
                Err(e) => {
                    log::warn!("Tool '{}' failed: {}", tool_name, e);
                    Self::create_error_result(
                        tool_name,
                        tool_args,
                        &format!("Tool execution failed: {e}"),
                    )
                }
            },
            Err(e) => Self::create_error_result(
                tool_name,
                tool_args,
                &format!("Failed to parse arguments: {e}"),
            ),
        }
    }

    /// Create an error result for tool execution
    fn create_error_result(tool_name: &str, tool_args: &str, error: &str) -> ToolCallResult {
        ToolCallResult {
            tool_name: tool_name.to_string(),
            success: false,
            arguments: serde_json::from_str(tool_args).unwrap_or(Value::Null),
            result: serde_json::json!({"error": error}),
        }
    }
}
