pub mod config;
pub mod error;
pub mod registry;
pub mod tools;

pub(crate) mod utils;

// Re-export commonly used items
pub use config::ToolkitConfig;
pub use error::{Result, ToolkitError};
pub use registry::{Category, ManagedTool, ToolCatalog};
