use crate::error::Result;
use crate::interfaces::backend::ChatBackend;
use crate::message::{ChatMessage, Sender};
use crate::protocol::{ChatRequest, ChatResponse, UiSize};

pub const PROCESSING_ERROR_TEXT: &str =
    "Sorry, I'm having trouble processing your request. Please try again.";

pub const CONNECTION_ERROR_TEXT: &str =
    "Sorry, I'm having trouble connecting to the server. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The endpoint answered with `success: true`.
    Replied,
    /// The endpoint answered but reported a failure.
    ServerError,
    /// Transport or body-parse failure.
    TransportError,
}

/// Chat state for one session: the transcript, the draft being typed, the
/// endpoint-assigned conversation id and the in-flight flag.
///
/// A submission is split into [`Conversation::begin_submit`], which yields the
/// request to send, and [`Conversation::complete`], which folds the result
/// back in. At most one request is outstanding at a time.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    draft: String,
    user_id: Option<String>,
    loading: bool,
}

impl Conversation {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::new(Sender::Bot, greeting)],
            draft: String::new(),
            user_id: None,
            loading: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    /// Moves the draft into the transcript and returns the request to send,
    /// or `None` when the draft is blank or a request is already in flight.
    pub fn begin_submit(&mut self, ui_size: UiSize) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.messages.push(ChatMessage::new(Sender::User, text.clone()));
        self.loading = true;

        Some(ChatRequest {
            message: text,
            user_id: self.user_id.clone(),
            ui_size,
        })
    }

    /// Applies the result of the outstanding request. Returns `None` if no
    /// request was outstanding.
    pub fn complete(&mut self, result: Result<ChatResponse>) -> Option<ExchangeOutcome> {
        if !self.loading {
            tracing::warn!("dropping chat response with no request in flight");
            return None;
        }
        self.loading = false;

        let outcome = match result {
            Ok(ChatResponse {
                success: true,
                user_id,
                response: Some(reply),
                ..
            }) => {
                if self.user_id.is_none() {
                    if let Some(assigned) = user_id.filter(|id| !id.is_empty()) {
                        tracing::info!(user_id = %assigned, "conversation id assigned");
                        self.user_id = Some(assigned);
                    }
                }
                self.push_bot(reply);
                ExchangeOutcome::Replied
            }
            Ok(ChatResponse {
                success: true,
                response: None,
                ..
            }) => {
                tracing::error!("server reported success without a response");
                self.push_bot(PROCESSING_ERROR_TEXT);
                ExchangeOutcome::ServerError
            }
            Ok(ChatResponse { error, .. }) => {
                let detail = error.unwrap_or(serde_json::Value::Null);
                tracing::error!(error = %detail, "error from server");
                self.push_bot(PROCESSING_ERROR_TEXT);
                ExchangeOutcome::ServerError
            }
            Err(err) => {
                tracing::error!(error = %err, "error sending message");
                self.push_bot(CONNECTION_ERROR_TEXT);
                ExchangeOutcome::TransportError
            }
        };
        Some(outcome)
    }

    /// Runs one full exchange against `backend`.
    pub async fn submit_with(
        &mut self,
        backend: &dyn ChatBackend,
        ui_size: UiSize,
    ) -> Option<ExchangeOutcome> {
        let request = self.begin_submit(ui_size)?;
        let result = backend.send(request).await;
        self.complete(result)
    }

    fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(Sender::Bot, text));
    }
}
