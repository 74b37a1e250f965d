use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assistant label shown when the backend omits the `model` field.
pub const DEFAULT_MODEL_LABEL: &str = "Chompers";

/// Fixed transcript text shown for any failed submission.
pub const ERROR_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Successful `/chat` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Failure modes for one chat round trip.
///
/// All variants surface to the user as the same fixed error bubble; the
/// distinction only matters for diagnostics.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}. Is the chat server running?")]
    Transport(#[from] reqwest::Error),
    #[error("chat server returned status {0}")]
    Status(u16),
    #[error("malformed chat response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends one message and waits for the reply.
    ///
    /// Exactly one POST per call: no retry, no timeout beyond transport
    /// defaults, no cancellation. A non-2xx status or a body that is not the
    /// expected JSON shape is an error.
    pub async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ChatError::Decode)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_has_message_field_only() {
        let body = serde_json::to_value(ChatRequest { message: "hello" }).unwrap();
        assert_eq!(body, json!({ "message": "hello" }));
    }

    #[test]
    fn reply_parses_model_when_present() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"message": "hi", "model": "deepseek-r1:7b"}"#).unwrap();
        assert_eq!(reply.message, "hi");
        assert_eq!(reply.model.as_deref(), Some("deepseek-r1:7b"));
    }

    #[test]
    fn reply_defaults_model_to_none_when_absent() {
        let reply: ChatReply = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(reply.message, "hi");
        assert!(reply.model.is_none());
    }

    #[test]
    fn reply_without_message_field_is_a_decode_error() {
        let result: Result<ChatReply, _> = serde_json::from_str(r#"{"error": "boom"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = ChatClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
