use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ChatWidgetError, Result};
use crate::protocol::UiSize;

pub const DEFAULT_ENDPOINT_URL: &str =
    "https://real-estate-server-25im.onrender.com/api/chatbot/message";

pub const DEFAULT_GREETING: &str =
    "Hello! I'm your real estate assistant. How can I help you today?";

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WidgetConfig {
    #[serde(default = "default_endpoint_url", alias = "endpoint")]
    pub endpoint_url: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Size reported to the endpoint until the window has been measured.
    #[serde(default)]
    pub default_ui_size: UiSize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            greeting: default_greeting(),
            default_ui_size: UiSize::default(),
        }
    }
}

impl WidgetConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| ChatWidgetError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: WidgetConfig =
            serde_json::from_str(raw).map_err(|e| ChatWidgetError::Config(e.to_string()))?;
        config.validate()
    }

    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Result<Self> {
        self.endpoint_url = endpoint_url.into();
        self.validate()
    }

    fn validate(mut self) -> Result<Self> {
        let trimmed = self.endpoint_url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ChatWidgetError::Config(format!(
                "endpoint must be an http(s) url, got `{trimmed}`"
            )));
        }
        self.endpoint_url = trimmed.to_string();
        if self.default_ui_size.width <= 0.0 || self.default_ui_size.height <= 0.0 {
            return Err(ChatWidgetError::Config(
                "default_ui_size must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}
