//! Response payloads returned by the executor

use serde_json::{json, Map, Value};

/// Key holding the body text when it was not valid JSON
pub const RAW_RESPONSE_KEY: &str = "raw_response";
/// Key holding the actual status code of a failed call
pub const STATUS_CODE_KEY: &str = "status_code";
/// Key holding the expected status code of a failed call
pub const EXPECTED_STATUS_KEY: &str = "expected_status";
/// Key holding a transport or precondition error description
pub const ERROR_KEY: &str = "error";
/// Key wrapping a non-object payload before diagnostics are attached
pub const BODY_KEY: &str = "body";

/// Outcome of one executor call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Actual status equals expected status
    pub success: bool,
    /// Actual status, absent when no response was received
    pub status: Option<u16>,
    pub payload: Value,
}

impl ApiResponse {
    /// Build a response from a received status and body text
    pub fn from_exchange(status: u16, expected_status: u16, body: &str) -> Self {
        let success = status == expected_status;
        let mut payload = parse_body(body);

        if !success {
            payload = with_diagnostics(payload, status, expected_status);
        }

        Self {
            success,
            status: Some(status),
            payload,
        }
    }

    /// A failed call that never produced an HTTP response
    pub fn error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            success: false,
            status: None,
            payload: json!({ ERROR_KEY: message }),
        }
    }

    /// Look up a top-level field of an object payload
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.as_object().and_then(|obj| obj.get(key))
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Value::as_bool)
    }

    /// Number of entries when the payload is a JSON array
    pub fn list_len(&self) -> Option<usize> {
        self.payload.as_array().map(Vec::len)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.str_field(ERROR_KEY)
    }
}

/// Parse a response body: empty becomes `{}`, malformed becomes a raw-text wrapper
pub fn parse_body(body: &str) -> Value {
    if body.is_empty() {
        return Value::Object(Map::new());
    }

    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => json!({ RAW_RESPONSE_KEY: body }),
    }
}

/// Attach actual and expected status codes to a payload
pub fn with_diagnostics(payload: Value, status: u16, expected_status: u16) -> Value {
    let mut obj = match payload {
        Value::Object(obj) => obj,
        other => {
            let mut wrapper = Map::new();
            wrapper.insert(BODY_KEY.to_string(), other);
            wrapper
        }
    };

    obj.insert(STATUS_CODE_KEY.to_string(), json!(status));
    obj.insert(EXPECTED_STATUS_KEY.to_string(), json!(expected_status));
    Value::Object(obj)
}
