use log::debug;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use toolbridge::async_trait;
use toolbridge::core::tool::{ToolCallError, ToolRuntime};
use toolbridge_derive::{ToolInput, tool};

use crate::config::ToolkitConfig;
use crate::error::{Result, ToolkitError};
use crate::utils::constant::RestHeaders;
use crate::utils::http::read_json;

mod normalize;
mod stringify;

pub use normalize::{ResultItem, normalize_response};

#[derive(Serialize, Deserialize, ToolInput, Debug)]
pub struct PythonInterpreterArgs {
    #[serde(default)]
    #[input(description = "Python code to execute.")]
    code: String,
}

/// Runs code on a remote Python sandbox and returns the normalized result
/// items as a JSON array.
#[tool(
    name = "python_interpreter",
    description = "Executes python code and returns the result. The code runs in a static sandbox without interactive mode, so print output or save output to a file.",
    input = PythonInterpreterArgs,
)]
pub struct PythonInterpreter {
    interpreter_url: Option<Url>,
    client: Client,
}

impl PythonInterpreter {
    /// Builds the tool from configuration. A missing endpoint is accepted
    /// here and reported when the tool is called; a malformed one is not.
    pub fn new(config: &ToolkitConfig) -> Result<Self> {
        Ok(Self {
            interpreter_url: config.python_interpreter_endpoint()?,
            client: config.http_client()?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ToolkitConfig::from_env()?)
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn is_available(config: &ToolkitConfig) -> bool {
        config.is_python_interpreter_available()
    }

    /// Sends `code` to the interpreter and normalizes its answer.
    pub async fn run_code(&self, code: &str) -> Result<Vec<ResultItem>> {
        let Some(url) = &self.interpreter_url else {
            return Err(ToolkitError::Config(
                "Python Interpreter tool called while URL not set".to_string(),
            ));
        };

        debug!("Posting {} bytes of code to {url}", code.len());
        let response = self
            .client
            .post(url.clone())
            .header(
                RestHeaders::Accept.as_str(),
                RestHeaders::ApplicationJson.as_str(),
            )
            .json(&json!({ "code": code }))
            .send()
            .await?;

        let payload = read_json(response).await?;
        normalize_response(payload)
    }
}

#[async_trait]
impl ToolRuntime for PythonInterpreter {
    async fn execute(&self, args: Value) -> std::result::Result<Value, ToolCallError> {
        let PythonInterpreterArgs { code } = serde_json::from_value(args)?;
        let items = self.run_code(&code).await?;
        Ok(serde_json::to_value(items)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use toolbridge::core::tool::ToolT;

    fn interpreter(server: &MockServer) -> PythonInterpreter {
        let config = ToolkitConfig::new().with_python_interpreter_url(server.url("/run"));
        PythonInterpreter::new(&config).unwrap()
    }

    #[test]
    fn test_tool_metadata() {
        let tool = PythonInterpreter::new(&ToolkitConfig::new()).unwrap();
        assert_eq!(tool.name(), "python_interpreter");
        assert!(tool.description().starts_with("Executes python code"));
        assert!(!PythonInterpreter::is_available(&ToolkitConfig::new()));
        assert!(PythonInterpreter::is_available(
            &ToolkitConfig::new().with_python_interpreter_url("http://localhost:8080")
        ));

        let schema = tool.args_schema();
        assert_eq!(schema["properties"]["code"]["type"], "string");
        assert_eq!(
            schema["properties"]["code"]["description"],
            "Python code to execute."
        );
    }

    #[test]
    fn test_malformed_url_is_config_error() {
        let config = ToolkitConfig::new().with_python_interpreter_url("::nope::");
        let err = PythonInterpreter::new(&config).unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_call_without_url_fails_before_network() {
        let tool = PythonInterpreter::new(&ToolkitConfig::new()).unwrap();
        let err = tool.run_code("print(1)").await.unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: Python Interpreter tool called while URL not set"
        );

        let err = tool.execute(json!({"code": "print(1)"})).await.unwrap_err();
        assert!(matches!(err, ToolCallError::RuntimeError(_)));
    }

    #[tokio::test]
    async fn test_posts_code_and_normalizes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/run")
                    .json_body(json!({"code": "print('hi')"}));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"sucess": true, "std_out": "hi\n"}"#);
            })
            .await;

        let result = interpreter(&server)
            .execute(json!({"code": "print('hi')"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            json!([{"success": "True", "std_out": "hi\n", "text": "hi\n"}])
        );
    }

    #[tokio::test]
    async fn test_missing_code_defaults_to_empty() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/run").json_body(json!({"code": ""}));
                then.status(200)
                    .body(r#"{"success": true, "std_out": ""}"#);
            })
            .await;

        let result = interpreter(&server).execute(json!({})).await.unwrap();
        mock.assert_async().await;
        assert_eq!(result[0]["text"], "");
    }

    #[tokio::test]
    async fn test_reported_failure_is_a_normal_result() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/run");
                then.status(200)
                    .body(r#"{"success": false, "error": {"message": "SyntaxError"}}"#);
            })
            .await;

        let items = interpreter(&server).run_code("print(").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("success"), Some("False"));
        assert_eq!(items[0].get("error"), Some(r#"{"message": "SyntaxError"}"#));
        assert_eq!(items[0].text(), Some("SyntaxError"));
    }

    #[tokio::test]
    async fn test_output_files_are_split_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/run");
                then.status(200).body(
                    r#"{"success": true, "std_out": "done", "output_files": [{"filename": "plot.png"}]}"#,
                );
            })
            .await;

        let items = interpreter(&server).run_code("plot()").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text(), Some("done"));
        assert_eq!(
            items[1].get("output_file"),
            Some(r#"{"filename": "plot.png"}"#)
        );
        assert_eq!(items[1].text(), Some("Created output file plot.png"));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/run");
                then.status(500).body("sandbox crashed");
            })
            .await;

        let err = interpreter(&server).run_code("1").await.unwrap_err();
        assert!(err.is_transport());
        match err {
            ToolkitError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "sandbox crashed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/run");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let err = interpreter(&server).run_code("1").await.unwrap_err();
        assert!(matches!(err, ToolkitError::Json(_)));
    }

    #[tokio::test]
    async fn test_non_object_json_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/run");
                then.status(200).body("[1, 2]");
            })
            .await;

        let err = interpreter(&server).run_code("1").await.unwrap_err();
        assert!(matches!(err, ToolkitError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = ToolkitConfig::new().with_python_interpreter_url("http://127.0.0.1:1/run");
        let err = PythonInterpreter::new(&config)
            .unwrap()
            .run_code("1")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::Transport(_)));
    }
}
