use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use toolbridge::core::tool::{ToolCallResult, ToolProcessor};
use toolbridge_toolkit::{ToolCatalog, ToolkitConfig};

const PYTHON_INTERPRETER: &str = "python_interpreter";
const XMOS_RETRIEVER: &str = "xmos_retriever";

#[derive(Parser, Debug)]
#[command(name = "toolbridge")]
#[command(about = "Toolbridge CLI - List and invoke remote service tools", long_about = None)]
struct Cli {
    /// TOML file with a [toolkit] table; environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every known tool and whether it is configured
    Tools,
    /// Run code on the Python interpreter service
    Python(PythonArgs),
    /// Query the XMOS documentation retriever
    Retrieve {
        /// Text to search for
        #[arg(short, long)]
        query: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct PythonArgs {
    /// Code to execute
    #[arg(short, long)]
    code: Option<String>,

    /// File whose contents are executed
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    toolbridge::init_logging();

    let cli = Cli::parse();
    let catalog = ToolCatalog::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&catalog.list())?);
        }
        Commands::Python(PythonArgs { code, file }) => {
            let code = match (code, file) {
                (Some(code), _) => code,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("Either --code or --file must be specified"),
            };
            let result = run_tool(&catalog, PYTHON_INTERPRETER, json!({ "code": code })).await?;
            println!("{}", serde_json::to_string_pretty(&result.result)?);
        }
        Commands::Retrieve { query } => {
            let result = run_tool(&catalog, XMOS_RETRIEVER, json!({ "query": query })).await?;
            println!("{}", serde_json::to_string_pretty(&result.result)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ToolkitConfig> {
    let base = match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            ToolkitConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => ToolkitConfig::default(),
    };
    Ok(base.merge_env()?)
}

async fn run_tool(
    catalog: &ToolCatalog,
    name: &str,
    args: serde_json::Value,
) -> Result<ToolCallResult> {
    let tool = catalog.create_tool(name)?;
    log::debug!("Running {name} with {args}");

    let result = ToolProcessor::execute_tool(tool.as_ref(), &args.to_string()).await;
    if !result.success {
        anyhow::bail!(
            "{name} failed: {}",
            result.result["error"].as_str().unwrap_or("unknown error")
        );
    }
    Ok(result)
}
