use log::{debug, warn};
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{Result, ToolkitError};
use crate::utils::constant::RestHeaders;
use crate::utils::http::read_json;

const INVOKE_PATH: &str = "invoke";
const OUTPUT_KEY: &str = "output";

/// Client for a runnable served over LangServe's HTTP protocol.
#[derive(Debug, Clone)]
pub struct RemoteRunnable {
    url: Url,
    client: Client,
}

impl RemoteRunnable {
    pub fn new(url: Url, client: Client) -> Self {
        Self { url, client }
    }

    /// Base URL the runnable is mounted at.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL of a route below the runnable's base path.
    pub fn endpoint(&self, route: &str) -> Result<Url> {
        let joined = format!("{}/{}", self.url.as_str().trim_end_matches('/'), route);
        Url::parse(&joined)
            .map_err(|err| ToolkitError::Config(format!("invalid runnable route {joined}: {err}")))
    }

    /// Runs the remote runnable once on `input` and decodes its `output`.
    pub async fn invoke<I, O>(&self, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let endpoint = self.endpoint(INVOKE_PATH)?;
        let body = json!({
            "input": serde_json::to_value(input)?,
            "config": {},
            "kwargs": {},
        });

        debug!("Invoking remote runnable at {endpoint}");
        let response = self
            .client
            .post(endpoint)
            .header(
                RestHeaders::Accept.as_str(),
                RestHeaders::ApplicationJson.as_str(),
            )
            .json(&body)
            .send()
            .await?;

        let mut payload = read_json(response).await?;
        let Some(output) = payload.get_mut(OUTPUT_KEY).map(Value::take) else {
            warn!("Remote runnable response has no `{OUTPUT_KEY}` field");
            return Err(ToolkitError::MalformedResponse(format!(
                "runnable response is missing `{OUTPUT_KEY}`"
            )));
        };

        serde_json::from_value(output).map_err(|err| {
            ToolkitError::MalformedResponse(format!("unexpected runnable output: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn runnable(base: &str) -> RemoteRunnable {
        RemoteRunnable::new(Url::parse(base).unwrap(), Client::new())
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let with_slash = runnable("http://localhost:8000/xmos/");
        let without_slash = runnable("http://localhost:8000/xmos");

        assert_eq!(
            with_slash.endpoint("invoke").unwrap().as_str(),
            "http://localhost:8000/xmos/invoke"
        );
        assert_eq!(
            without_slash.endpoint("invoke").unwrap().as_str(),
            "http://localhost:8000/xmos/invoke"
        );
        assert_eq!(without_slash.url().path(), "/xmos");
    }

    #[tokio::test]
    async fn test_invoke_wraps_input_and_unwraps_output() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/echo/invoke")
                    .json_body(json!({"input": "ping", "config": {}, "kwargs": {}}));
                then.status(200)
                    .body(r#"{"output": ["pong"], "metadata": {"run_id": "1"}}"#);
            })
            .await;

        let output: Vec<String> = runnable(&server.url("/echo"))
            .invoke("ping")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(output, vec!["pong".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_output_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/echo/invoke");
                then.status(200).body(r#"{"metadata": {}}"#);
            })
            .await;

        let err = runnable(&server.url("/echo"))
            .invoke::<str, Value>("ping")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_wrong_output_shape_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/echo/invoke");
                then.status(200).body(r#"{"output": 42}"#);
            })
            .await;

        let err = runnable(&server.url("/echo"))
            .invoke::<str, Vec<String>>("ping")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/echo/invoke");
                then.status(422).body(r#"{"detail": "bad input"}"#);
            })
            .await;

        let err = runnable(&server.url("/echo"))
            .invoke::<str, Value>("ping")
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
