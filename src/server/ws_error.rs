/// Centralized helpers for WebSocket error frames.
///
/// Use these helpers so every error sent to a client has the same shape: a code, a message and a context.
use serde_json::json;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_MESSAGE").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. the client id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    json!({
        "action": "error",
        "data": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn escapes_message_text() {
        let text = ws_error_message("INVALID_MESSAGE", r#"expected "to" field"#, Some("abc"));
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["action"], "error");
        assert_eq!(value["data"]["code"], "INVALID_MESSAGE");
        assert_eq!(value["data"]["message"], r#"expected "to" field"#);
        assert_eq!(value["data"]["context"], "abc");
    }
}
