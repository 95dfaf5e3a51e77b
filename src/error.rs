use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChatWidgetError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for ChatWidgetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ChatWidgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub use crate::Result;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_variant_prefix() {
        let err = ChatWidgetError::Config("x".to_string());
        assert!(format!("{err}").contains("configuration error"));

        let err = ChatWidgetError::Http("refused".to_string());
        assert_eq!(err.to_string(), "http error: refused");
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ChatWidgetError = parse.into();
        assert!(matches!(err, ChatWidgetError::Serialization(_)));
    }
}
