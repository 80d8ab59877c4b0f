use serde::{Deserialize, Serialize};
use toolbridge::async_trait;

use crate::error::Result;

mod remote_runnable;
mod xmos;

pub use remote_runnable::RemoteRunnable;
pub use xmos::{HEADER_PATH_KEY, XmosRetriever, XmosRetrieverArgs};

/// Flat record handed back to the caller for each retrieved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    pub url: String,
    pub title: String,
}

/// A source of documents relevant to a text query. Ranking happens
/// upstream; implementations keep the order they receive.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve_documents(&self, query: &str) -> Result<Vec<RetrievedDocument>>;
}
