use async_trait::async_trait;

use crate::config::WidgetConfig;
use crate::error::{ChatWidgetError, Result};
use crate::interfaces::backend::ChatBackend;
use crate::protocol::{ChatRequest, ChatResponse};

#[derive(Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint_url: String,
}

impl HttpChatBackend {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_url: endpoint_url.into(),
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.endpoint_url.clone())
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            endpoint = %self.endpoint_url,
            has_user_id = request.user_id.is_some(),
            "posting chat message"
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // Logical failures arrive as `success: false` in the body, whatever the status.
        serde_json::from_str::<ChatResponse>(&body).map_err(|e| {
            ChatWidgetError::Serialization(format!("HTTP {status}: unreadable response body: {e}"))
        })
    }
}
