use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolbridge::async_trait;
use toolbridge::core::Document;
use toolbridge::core::tool::{ToolCallError, ToolRuntime};
use toolbridge_derive::{ToolInput, tool};

use super::{RemoteRunnable, RetrievedDocument, Retriever};
use crate::config::ToolkitConfig;
use crate::error::{Result, ToolkitError};

/// Metadata key holding the section breadcrumb of a chunk.
pub const HEADER_PATH_KEY: &str = "Header Path";
const URL_KEY: &str = "url";
const TITLE_KEY: &str = "title";

#[derive(Serialize, Deserialize, ToolInput, Debug)]
pub struct XmosRetrieverArgs {
    #[input(description = "Query to search the XMOS documentation for.")]
    query: String,
}

#[tool(
    name = "xmos_retriever",
    description = "Retrieves sections of the XMOS documentation relevant to a query.",
    input = XmosRetrieverArgs,
)]
pub struct XmosRetriever {
    runnable: RemoteRunnable,
}

impl XmosRetriever {
    /// Fails with a configuration error when no retriever URL is set.
    pub fn new(config: &ToolkitConfig) -> Result<Self> {
        let Some(url) = config.xmos_retriever_endpoint()? else {
            return Err(ToolkitError::Config(
                "XMOS_RETRIEVER_URL is not set".to_string(),
            ));
        };
        Ok(Self {
            runnable: RemoteRunnable::new(url, config.http_client()?),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ToolkitConfig::from_env()?)
    }

    pub fn is_available(config: &ToolkitConfig) -> bool {
        config.is_xmos_retriever_available()
    }
}

fn to_record(doc: &Document) -> Result<RetrievedDocument> {
    let field = |key: &str| {
        doc.metadata_str(key).ok_or_else(|| {
            ToolkitError::MalformedResponse(format!(
                "retrieved document is missing string metadata `{key}`"
            ))
        })
    };

    Ok(RetrievedDocument {
        text: format!("{}\n{}", field(HEADER_PATH_KEY)?, doc.page_content),
        url: field(URL_KEY)?.to_string(),
        title: field(TITLE_KEY)?.to_string(),
    })
}

#[async_trait]
impl Retriever for XmosRetriever {
    async fn retrieve_documents(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
        let docs: Vec<Document> = self.runnable.invoke(query).await?;
        debug!("XMOS retriever returned {} documents", docs.len());
        docs.iter().map(to_record).collect()
    }
}

#[async_trait]
impl ToolRuntime for XmosRetriever {
    async fn execute(&self, args: Value) -> std::result::Result<Value, ToolCallError> {
        let XmosRetrieverArgs { query } = serde_json::from_value(args)?;
        let records = self.retrieve_documents(&query).await?;
        Ok(serde_json::to_value(records)?)
    }
}
