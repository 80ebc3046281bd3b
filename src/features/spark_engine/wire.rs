//! Spark Engine wire format
//!
//! The engine answers with one of several shapes: an error flag, a plain
//! string, or a list of named outputs. [`EngineReply`] collapses them into a
//! single enum so normalization is one `match`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompletionRequest<'a> {
    pub api_key: &'a str,
    pub project_id: &'a str,
    pub prompt: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub usage: Option<Value>,
}

/// One named output of a multi-node project
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineReply {
    Text(String),
    Items(Vec<OutputItem>),
    Error,
    Invalid,
}

impl CompletionResponse {
    /// Decode a JSON body. Anything but an object yields an empty response,
    /// which classifies as [`EngineReply::Invalid`].
    pub fn from_body(body: Value) -> Self {
        if body.is_object() {
            serde_json::from_value(body).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Classify the decoded body into one of the known reply shapes
    pub fn reply(&self) -> EngineReply {
        if self.error.as_ref().is_some_and(is_truthy) {
            return EngineReply::Error;
        }
        match &self.data {
            Some(Value::String(text)) => EngineReply::Text(text.clone()),
            Some(items @ Value::Array(list)) if !list.is_empty() => {
                match Vec::<OutputItem>::deserialize(items) {
                    Ok(items) => EngineReply::Items(items),
                    Err(_) => EngineReply::Invalid,
                }
            }
            _ => EngineReply::Invalid,
        }
    }

    /// Numeric usage counters reported by the engine; anything else is dropped
    pub fn usage_map(&self) -> HashMap<String, f64> {
        match &self.usage {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect(),
            _ => HashMap::new(),
        }
    }
}

impl EngineReply {
    /// Text for the successful shapes, `None` for `Error` and `Invalid`
    pub fn into_text(self) -> Option<String> {
        match self {
            EngineReply::Text(text) => Some(text.trim().to_string()),
            EngineReply::Items(mut items) if items.len() == 1 => {
                items.pop().map(|i| i.output.unwrap_or_default())
            }
            EngineReply::Items(items) => Some(
                items
                    .iter()
                    .map(|item| {
                        let output = item.output.as_deref().unwrap_or_default();
                        format!("{}\n{output}", item.name)
                    })
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            ),
            EngineReply::Error | EngineReply::Invalid => None,
        }
    }
}

/// Loose truthiness for the `error` field: absent, null, false, 0 and "" mean no error
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
