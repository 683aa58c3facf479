//! Alert payload value object

use serde_json::{Map, Value};

/// Title used when the payload carries none
pub const DEFAULT_TITLE: &str = "S3NS3 Alert";

/// Key holding the request body when it is not valid JSON
pub const RAW_BODY_KEY: &str = "raw";

/// Human-readable alert extracted from a webhook body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPayload {
    title: String,
    message: String,
}

impl AlertPayload {
    /// Create a payload from explicit parts
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Decode a request body.
    ///
    /// Never fails: an empty body decodes as `{}` and a body that is not
    /// JSON is wrapped as `{"raw": "<text>"}`.
    pub fn from_body(body: &[u8]) -> Self {
        Self::from_value(&decode_body(body), DEFAULT_TITLE)
    }

    /// Like [`from_body`](Self::from_body) with a custom fallback title
    pub fn from_body_with_title(body: &[u8], default_title: &str) -> Self {
        Self::from_value(&decode_body(body), default_title)
    }

    /// Extract title and message from a decoded document.
    ///
    /// A missing `message` is replaced by the whole document, pretty-printed.
    pub fn from_value(value: &Value, default_title: &str) -> Self {
        let field = |key: &str| value.as_object().and_then(|obj| obj.get(key)).map(render_field);

        let title = field("title").unwrap_or_else(|| default_title.to_string());
        let message = field("message").unwrap_or_else(|| pretty(value));

        Self { title, message }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Decode a body into a JSON document, falling back to the raw text.
///
/// Object keys keep the order the sender used.
pub fn decode_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Object(Map::new());
    }

    serde_json::from_slice(body).unwrap_or_else(|_| {
        let mut obj = Map::new();
        obj.insert(
            RAW_BODY_KEY.to_string(),
            Value::String(String::from_utf8_lossy(body).into_owned()),
        );
        Value::Object(obj)
    })
}

/// Strings pass through untouched; anything else is rendered as compact JSON
fn render_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
