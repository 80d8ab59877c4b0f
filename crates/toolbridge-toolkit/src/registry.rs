use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use strum::{Display, EnumString};
use toolbridge::core::tool::ToolT;

use crate::config::ToolkitConfig;
use crate::error::{Result, ToolkitError};

#[cfg(feature = "python-interpreter")]
use crate::tools::python_interpreter::{PythonInterpreter, PythonInterpreterArgs};
#[cfg(feature = "retrieval")]
use crate::tools::retrieval::{XmosRetriever, XmosRetrieverArgs};
#[cfg(any(feature = "python-interpreter", feature = "retrieval"))]
use crate::utils::constant::{ENV_PYTHON_INTERPRETER_URL, ENV_XMOS_RETRIEVER_URL};
#[cfg(any(feature = "python-interpreter", feature = "retrieval"))]
use toolbridge::core::tool::ToolInputT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Category {
    #[serde(rename = "Data loader")]
    #[strum(serialize = "Data loader")]
    DataLoader,
    #[serde(rename = "File loader")]
    #[strum(serialize = "File loader")]
    FileLoader,
    #[serde(rename = "Function")]
    #[strum(serialize = "Function")]
    Function,
    #[serde(rename = "Web search")]
    #[strum(serialize = "Web search")]
    WebSearch,
}

/// Discovery record for one tool the toolkit knows how to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedTool {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: Category,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub parameter_definitions: Value,
}

struct ToolDescriptor {
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    category: Category,
    env_var: &'static str,
    is_available: fn(&ToolkitConfig) -> bool,
    io_schema: fn() -> &'static str,
    build: fn(&ToolkitConfig) -> Result<Arc<dyn ToolT>>,
}

impl ToolDescriptor {
    fn managed(&self, config: &ToolkitConfig) -> ManagedTool {
        let is_available = (self.is_available)(config);
        ManagedTool {
            name: self.name.to_string(),
            display_name: self.display_name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            is_available,
            error_message: (!is_available).then(|| self.unavailable_message()),
            parameter_definitions: serde_json::from_str((self.io_schema)()).unwrap_or_default(),
        }
    }

    fn unavailable_message(&self) -> String {
        format!(
            "{} not available, please make sure to set the {} environment variable.",
            self.display_name, self.env_var
        )
    }
}

#[cfg(feature = "python-interpreter")]
fn python_interpreter() -> ToolDescriptor {
    ToolDescriptor {
        name: "python_interpreter",
        display_name: "Python Interpreter",
        description: "Executes python code and returns the result. The code runs in a static sandbox without interactive mode, so print output or save output to a file.",
        category: Category::Function,
        env_var: ENV_PYTHON_INTERPRETER_URL,
        is_available: PythonInterpreter::is_available,
        io_schema: PythonInterpreterArgs::io_schema,
        build: |config| {
            let tool: Arc<dyn ToolT> = Arc::new(PythonInterpreter::new(config)?);
            Ok(tool)
        },
    }
}

#[cfg(feature = "retrieval")]
fn xmos_retriever() -> ToolDescriptor {
    ToolDescriptor {
        name: "xmos_retriever",
        display_name: "XMOS Retriever",
        description: "Retrieves sections of the XMOS documentation relevant to a query.",
        category: Category::DataLoader,
        env_var: ENV_XMOS_RETRIEVER_URL,
        is_available: XmosRetriever::is_available,
        io_schema: XmosRetrieverArgs::io_schema,
        build: |config| {
            let tool: Arc<dyn ToolT> = Arc::new(XmosRetriever::new(config)?);
            Ok(tool)
        },
    }
}

fn descriptors() -> Vec<ToolDescriptor> {
    #[allow(unused_mut)]
    let mut descriptors = Vec::new();
    #[cfg(feature = "python-interpreter")]
    descriptors.push(python_interpreter());
    #[cfg(feature = "retrieval")]
    descriptors.push(xmos_retriever());
    descriptors
}

/// The tools compiled into this build, bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    config: ToolkitConfig,
}

impl ToolCatalog {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ToolkitConfig::from_env()?))
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Every known tool, available or not.
    pub fn list(&self) -> Vec<ManagedTool> {
        descriptors()
            .iter()
            .map(|descriptor| descriptor.managed(&self.config))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<ManagedTool> {
        descriptors()
            .iter()
            .find(|descriptor| descriptor.name == name)
            .map(|descriptor| descriptor.managed(&self.config))
    }

    /// Builds the named tool. Unknown and unavailable tools are errors.
    pub fn create_tool(&self, name: &str) -> Result<Arc<dyn ToolT>> {
        let descriptors = descriptors();
        let Some(descriptor) = descriptors.iter().find(|descriptor| descriptor.name == name) else {
            return Err(ToolkitError::UnknownTool(format!(
                "Tool '{name}' not found or feature not enabled"
            )));
        };
        if !(descriptor.is_available)(&self.config) {
            return Err(ToolkitError::Config(descriptor.unavailable_message()));
        }
        (descriptor.build)(&self.config)
    }

    /// Builds every tool whose configuration is present.
    pub fn available_tools(&self) -> Result<Vec<Arc<dyn ToolT>>> {
        descriptors()
            .iter()
            .filter(|descriptor| (descriptor.is_available)(&self.config))
            .map(|descriptor| (descriptor.build)(&self.config))
            .collect()
    }
}
