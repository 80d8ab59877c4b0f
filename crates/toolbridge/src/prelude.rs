//! toolbridge prelude: common traits, types, and macros for declaring tools.

// Macros and derives
pub use toolbridge_derive::{ToolInput, tool};

// Tools
pub use crate::core::tool::{
    ToolCallError, ToolCallResult, ToolDefinition, ToolInputT, ToolProcessor, ToolRuntime, ToolT,
};

// Documents
pub use crate::core::Document;

// Utils
pub use crate::async_trait;
pub use crate::init_logging;
