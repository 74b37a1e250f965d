use chompers_core::{ChatClient, ChatMessage, ERROR_REPLY};

use crate::tui::ReplyOutcome;

/// Widget state for the chat transcript, the input line, and the in-flight
/// request bookkeeping.
///
/// All mutation happens on the event-loop task. Spawned requests only report
/// back through [`ReplyOutcome`] events, so a slow or failed request affects
/// nothing but its own bubble.
pub struct App {
    pub should_quit: bool,

    /// Set on the first successful submission; the welcome screen never
    /// comes back once the transcript is revealed.
    pub started: bool,

    // Transcript state (append-only, in send/arrival order)
    pub messages: Vec<ChatMessage>,

    // Input state
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars

    /// Number of requests awaiting a reply. The typing indicator renders
    /// while this is non-zero, so the transcript holds at most one
    /// indicator no matter how many submissions overlap.
    pub pending_replies: usize,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Transcript scrolling
    pub scroll: u16,
    pub chat_height: u16, // height of chat area for scroll calculations
    pub chat_width: u16,  // width of chat area for wrap calculations

    // Backend
    pub client: ChatClient,
}

impl App {
    pub fn new(client: ChatClient) -> Self {
        Self {
            should_quit: false,
            started: false,
            messages: Vec::new(),
            input: String::new(),
            cursor: 0,
            pending_replies: 0,
            animation_frame: 0,
            scroll: 0,
            chat_height: 0,
            chat_width: 0,
            client,
        }
    }

    /// True when the trimmed input is non-empty; drives the send affordance.
    pub fn has_input(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Commits the current input as a submission.
    ///
    /// Whitespace-only input is silently ignored. Otherwise the trimmed text
    /// is appended as a user bubble, the input is cleared, and the pending
    /// counter goes up; the returned text is what the caller must dispatch
    /// to the backend.
    pub fn take_submission(&mut self) -> Option<String> {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.started = true;
        self.messages.push(ChatMessage::user(message.clone()));
        self.input.clear();
        self.cursor = 0;
        self.pending_replies += 1;
        self.scroll_to_bottom();

        Some(message)
    }

    /// Applies the outcome of one finished request.
    ///
    /// A reply appends an assistant bubble carrying whatever model label the
    /// backend reported; any failure appends the fixed error bubble instead.
    /// Either way the submission is finished and the widget stays usable.
    pub fn apply_reply(&mut self, outcome: ReplyOutcome) {
        self.pending_replies = self.pending_replies.saturating_sub(1);

        match outcome {
            Ok(reply) => {
                self.messages
                    .push(ChatMessage::assistant(reply.message, reply.model));
            }
            Err(error) => {
                tracing::error!("chat request failed: {error}");
                self.messages.push(ChatMessage::assistant(ERROR_REPLY, None));
            }
        }

        self.scroll_to_bottom();
    }

    pub fn typing_indicator_visible(&self) -> bool {
        self.pending_replies > 0
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.typing_indicator_visible() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.max_scroll();
        self.scroll = (self.scroll + lines).min(max);
    }

    /// Scroll the transcript so the latest bubble (and the typing indicator,
    /// when shown) is visible.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        let total_lines = self.total_wrapped_lines();

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        total_lines.saturating_sub(visible_height)
    }

    fn total_wrapped_lines(&self) -> u16 {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.messages {
            total_lines += 1; // Label line ("You:" or the model name)
            // Calculate wrapped lines for each line of content
            for line in msg.content.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.typing_indicator_visible() {
            total_lines += 2; // Label + animated dots
        }

        total_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chompers_core::{ChatError, ChatReply, ChatRole, DEFAULT_MODEL_LABEL};

    fn test_app() -> App {
        // The client is never exercised by state transitions.
        App::new(ChatClient::new("http://localhost:5000"))
    }

    fn ok_reply(message: &str, model: Option<&str>) -> ReplyOutcome {
        Ok(ChatReply {
            message: message.to_string(),
            model: model.map(str::to_string),
        })
    }

    fn failed_reply() -> ReplyOutcome {
        Err(ChatError::Status(500))
    }

    #[test]
    fn empty_input_is_not_submitted() {
        let mut app = test_app();
        assert!(app.take_submission().is_none());

        app.input = "   \t ".to_string();
        assert!(app.take_submission().is_none());

        assert!(app.messages.is_empty());
        assert_eq!(app.pending_replies, 0);
        assert!(!app.started);
    }

    #[test]
    fn submission_appends_trimmed_user_bubble_and_clears_input() {
        let mut app = test_app();
        app.input = "  hello  ".to_string();
        app.cursor = 4;

        let sent = app.take_submission();

        assert_eq!(sent.as_deref(), Some("hello"));
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].role, ChatRole::User);
        assert_eq!(app.messages[0].content, "hello");
        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.pending_replies, 1);
        assert!(app.started);
        assert!(app.typing_indicator_visible());
    }

    #[test]
    fn welcome_reveal_is_idempotent() {
        let mut app = test_app();
        app.input = "one".to_string();
        app.take_submission();
        app.apply_reply(ok_reply("fine", None));
        assert!(app.started);

        app.input = "two".to_string();
        app.take_submission();
        assert!(app.started);
    }

    #[test]
    fn reply_with_model_becomes_labeled_assistant_bubble() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.take_submission();

        app.apply_reply(ok_reply("hi", Some("deepseek-r1:7b")));

        assert_eq!(app.messages.len(), 2);
        let reply = &app.messages[1];
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "hi");
        assert_eq!(reply.model.as_deref(), Some("deepseek-r1:7b"));
        assert_eq!(app.pending_replies, 0);
        assert!(!app.typing_indicator_visible());
    }

    #[test]
    fn reply_without_model_falls_back_to_default_label() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.take_submission();

        app.apply_reply(ok_reply("hi", None));

        let reply = &app.messages[1];
        assert!(reply.model.is_none());
        // The renderer resolves a missing model to the default label.
        assert_eq!(
            reply.model.as_deref().unwrap_or(DEFAULT_MODEL_LABEL),
            DEFAULT_MODEL_LABEL
        );
    }

    #[test]
    fn failed_reply_becomes_fixed_error_bubble() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.take_submission();

        app.apply_reply(failed_reply());

        assert_eq!(app.messages.len(), 2);
        let reply = &app.messages[1];
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, ERROR_REPLY);
        assert!(reply.model.is_none());
        assert!(!app.typing_indicator_visible());
    }

    #[test]
    fn overlapping_submissions_resolve_independently() {
        let mut app = test_app();

        app.input = "first".to_string();
        app.take_submission();
        app.input = "second".to_string();
        app.take_submission();

        assert_eq!(app.pending_replies, 2);
        assert!(app.typing_indicator_visible());
        assert_eq!(app.messages.len(), 2);

        // Replies land in arrival order, not submission order.
        app.apply_reply(ok_reply("answer to second", None));
        assert!(app.typing_indicator_visible());
        app.apply_reply(ok_reply("answer to first", None));

        assert_eq!(app.pending_replies, 0);
        assert!(!app.typing_indicator_visible());
        assert_eq!(app.messages.len(), 4);
        assert_eq!(app.messages[2].content, "answer to second");
        assert_eq!(app.messages[3].content, "answer to first");
    }

    #[test]
    fn one_failure_does_not_touch_the_other_submission() {
        let mut app = test_app();

        app.input = "first".to_string();
        app.take_submission();
        app.input = "second".to_string();
        app.take_submission();

        app.apply_reply(failed_reply());
        app.apply_reply(ok_reply("still fine", Some("deepseek-r1:7b")));

        assert_eq!(app.messages[2].content, ERROR_REPLY);
        assert_eq!(app.messages[3].content, "still fine");
        assert_eq!(app.pending_replies, 0);
    }

    #[test]
    fn animation_only_advances_while_pending() {
        let mut app = test_app();
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);

        app.input = "hello".to_string();
        app.take_submission();
        app.tick_animation();
        app.tick_animation();
        assert_eq!(app.animation_frame, 2);
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);
    }

    #[test]
    fn has_input_tracks_trimmed_content() {
        let mut app = test_app();
        assert!(!app.has_input());
        app.input = "  ".to_string();
        assert!(!app.has_input());
        app.input = " x ".to_string();
        assert!(app.has_input());
    }
}
