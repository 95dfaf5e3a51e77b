use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn icon(self) -> &'static str {
        match self {
            Sender::User => "👤",
            Sender::Bot => "🤖",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    sender: Sender,
    text: String,
    timestamp: OffsetDateTime,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self::at(sender, text, OffsetDateTime::now_utc())
    }

    pub fn at(sender: Sender, text: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// `HH:MM` in the local offset, UTC when the local offset is unknown.
    pub fn local_time(&self) -> String {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        format_clock(self.timestamp.to_offset(offset))
    }
}

fn format_clock(at: OffsetDateTime) -> String {
    at.format(format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| "--:--".to_string())
}
