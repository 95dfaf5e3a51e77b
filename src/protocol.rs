use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct UiSize {
    pub width: f32,
    pub height: f32,
}

impl UiSize {
    pub const FALLBACK: UiSize = UiSize {
        width: 400.0,
        height: 600.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for UiSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Body POSTed to the chat endpoint. `userId` is always sent, as `null` before
/// the endpoint has assigned one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub user_id: Option<String>,
    pub ui_size: UiSize,
}

/// Reply from the chat endpoint. Any JSON object parses; a missing or falsy
/// `success` reads as a server-reported failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub success: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

fn deserialize_truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_null_user_id() {
        let request = ChatRequest {
            message: "hi".to_string(),
            user_id: None,
            ui_size: UiSize::new(320.0, 480.0),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"message": "hi", "userId": null, "uiSize": {"width": 320.0, "height": 480.0}})
        );
    }

    #[test]
    fn response_tolerates_missing_optionals() {
        let response: ChatResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.user_id, None);
        assert_eq!(response.response, None);

        let response: ChatResponse = serde_json::from_str(
            r#"{"success": true, "userId": "u-1", "response": "ok", "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(response.user_id.as_deref(), Some("u-1"));
        assert_eq!(response.response.as_deref(), Some("ok"));
    }

    #[test]
    fn missing_success_and_structured_error_still_parse() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"error": "Internal server error"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error, Some(json!("Internal server error")));

        let response: ChatResponse =
            serde_json::from_str(r#"{"success": false, "error": {"message": "boom"}}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error, Some(json!({"message": "boom"})));
    }

    #[test]
    fn success_follows_json_truthiness() {
        let parse = |raw: &str| serde_json::from_str::<ChatResponse>(raw).unwrap().success;
        assert!(parse(r#"{"success": 1}"#));
        assert!(parse(r#"{"success": "yes"}"#));
        assert!(!parse(r#"{"success": 0}"#));
        assert!(!parse(r#"{"success": ""}"#));
        assert!(!parse(r#"{"success": null}"#));
    }
}
