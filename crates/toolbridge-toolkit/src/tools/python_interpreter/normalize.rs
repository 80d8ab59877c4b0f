use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::iter;

use super::stringify::{display_string, dumps};
use crate::error::{Result, ToolkitError};

const FINAL_EXPRESSION: &str = "final_expression";
const OUTPUT_FILES: &str = "output_files";
const OUTPUT_FILE: &str = "output_file";
const SUCCESS: &str = "success";
// Upstream spelling of `success`; drop once the interpreter service sends
// the corrected key.
const SUCCESS_MISSPELLED: &str = "sucess";
const TEXT: &str = "text";

/// One flattened interpreter result. Every value is a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem(IndexMap<String, String>);

impl ResultItem {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Human-readable summary of the item, when one was derived.
    pub fn text(&self) -> Option<&str> {
        self.get(TEXT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl From<IndexMap<String, String>> for ResultItem {
    fn from(fields: IndexMap<String, String>) -> Self {
        Self(fields)
    }
}

/// Reshapes a raw interpreter response into citable result items.
///
/// The primary item comes first and is followed by one `output_file` item per
/// generated file. A `text` field already present in the response is never
/// overwritten.
pub fn normalize_response(response: Value) -> Result<Vec<ResultItem>> {
    let Value::Object(mut primary) = response else {
        return Err(ToolkitError::MalformedResponse(format!(
            "expected a JSON object from the interpreter, got {}",
            kind_of(&response)
        )));
    };

    if let Some(expression) = primary.get_mut(FINAL_EXPRESSION) {
        *expression = Value::String(display_string(expression));
    }

    let output_files = match primary.shift_remove(OUTPUT_FILES) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(files)) => files,
        Some(other) => {
            return Err(ToolkitError::MalformedResponse(format!(
                "`{OUTPUT_FILES}` must be a list, got {}",
                kind_of(&other)
            )));
        }
    };

    let file_items = output_files.into_iter().map(|file| {
        let mut item = Map::new();
        item.insert(OUTPUT_FILE.to_string(), file);
        item
    });

    iter::once(primary)
        .chain(file_items)
        .map(normalize_item)
        .collect()
}

fn normalize_item(mut item: Map<String, Value>) -> Result<ResultItem> {
    if let Some(flag) = item.get(SUCCESS_MISSPELLED).filter(|v| !v.is_null()).cloned() {
        item.insert(SUCCESS.to_string(), flag);
        item.shift_remove(SUCCESS_MISSPELLED);
    }

    let text = match item.get(SUCCESS) {
        Some(Value::Bool(true)) => Some(item.get("std_out").cloned().unwrap_or(Value::Null)),
        Some(Value::Bool(false)) => Some(
            item.get("error")
                .and_then(Value::as_object)
                .and_then(|error| error.get("message"))
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        ),
        _ => created_file_name(&item)
            .map(|filename| Value::String(format!("Created output file {filename}"))),
    };
    if let Some(text) = text {
        item.entry(TEXT).or_insert(text);
    }

    let mut fields = IndexMap::with_capacity(item.len());
    for (key, value) in item {
        let value = match &value {
            Value::Object(_) => dumps(&value)?,
            other => display_string(other),
        };
        fields.insert(key, value);
    }
    Ok(ResultItem(fields))
}

fn created_file_name(item: &Map<String, Value>) -> Option<String> {
    let file = item.get(OUTPUT_FILE).filter(|file| is_truthy(file))?;
    let filename = file.get("filename").filter(|name| is_truthy(name))?;
    Some(display_string(filename))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
