pub mod chat;
pub mod config;
pub mod state;

// Re-export main types for convenience
pub use chat::{ChatClient, ChatError, ChatReply, DEFAULT_MODEL_LABEL, ERROR_REPLY};
pub use config::Config;
pub use state::{ChatMessage, ChatRole};
