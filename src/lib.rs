pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod interfaces;
pub mod logging;
pub mod message;
pub mod protocol;
pub mod runtime_paths;
pub mod widget;

pub use error::ChatWidgetError;

pub type Result<T> = std::result::Result<T, ChatWidgetError>;
