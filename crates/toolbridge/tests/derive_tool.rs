use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use toolbridge::prelude::*;

#[derive(Serialize, Deserialize, ToolInput, Debug)]
pub struct WordCountArgs {
    #[input(description = "Text whose words are counted")]
    text: String,
    #[serde(default)]
    #[input(description = "Count only words longer than this")]
    min_len: Option<u32>,
    #[serde(default)]
    #[input(description = "Counting strategy", choice = ["whitespace", "alphanumeric"])]
    mode: Option<String>,
}

#[tool(
    name = "word_count",
    description = "Counts the words in a piece of text",
    input = WordCountArgs,
)]
pub struct WordCount {
    label: String,
}

#[async_trait]
impl ToolRuntime for WordCount {
    async fn execute(&self, args: Value) -> Result<Value, ToolCallError> {
        let WordCountArgs {
            text,
            min_len,
            mode,
        } = serde_json::from_value(args)?;
        let min_len = min_len.unwrap_or(0) as usize;
        let count = match mode.as_deref() {
            Some("alphanumeric") => text
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty() && w.len() > min_len)
                .count(),
            _ => text.split_whitespace().filter(|w| w.len() > min_len).count(),
        };
        Ok(json!({ "label": self.label, "count": count }))
    }
}

fn word_count() -> WordCount {
    WordCount {
        label: "words".to_string(),
    }
}

#[test]
fn tool_macro_exposes_name_and_description() {
    let tool = word_count();
    assert_eq!(tool.name(), "word_count");
    assert_eq!(tool.description(), "Counts the words in a piece of text");
    assert!(format!("{tool:?}").contains("WordCount"));
}

#[test]
fn tool_input_schema_is_valid_json() {
    let schema: Value = serde_json::from_str(WordCountArgs::io_schema()).unwrap();
    assert_eq!(schema, word_count().args_schema());
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["text"]));
    assert_eq!(schema["properties"]["min_len"]["type"], "integer");
    assert_eq!(
        schema["properties"]["mode"]["enum"],
        json!(["whitespace", "alphanumeric"])
    );
}

#[test]
fn tool_definition_uses_macro_metadata() {
    let tool = word_count();
    let definition = ToolDefinition::from(&tool as &dyn ToolT);
    assert_eq!(definition.function.name, "word_count");
    assert_eq!(
        definition.function.parameters["properties"]["text"]["description"],
        "Text whose words are counted"
    );
}

#[tokio::test]
async fn derived_tool_runs_through_processor() {
    let tools: Vec<Arc<dyn ToolT>> = vec![Arc::new(word_count())];

    let result =
        ToolProcessor::process_tool_call(&tools, "word_count", r#"{"text": "a bb ccc"}"#).await;
    assert!(result.success);
    assert_eq!(result.result, json!({"label": "words", "count": 3}));

    let result = ToolProcessor::process_tool_call(
        &tools,
        "word_count",
        r#"{"text": "a, bb; ccc", "min_len": 1, "mode": "alphanumeric"}"#,
    )
    .await;
    assert_eq!(result.result["count"], 2);
}

#[tokio::test]
async fn missing_required_argument_is_a_serde_error() {
    let err = word_count().execute(json!({})).await.unwrap_err();
    assert!(matches!(err, ToolCallError::SerdeError(_)));
}
