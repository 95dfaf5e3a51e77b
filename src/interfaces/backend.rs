use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{ChatRequest, ChatResponse};

/// One request/response exchange with the remote chat endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse>;
}
