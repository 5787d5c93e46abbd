//! Chat panel state and wire types for the remote completion endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown whenever the remote call fails for any reason.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat request could not be sent: {0}")]
    Transport(String),
    #[error("chat service answered with status {0}")]
    Status(u16),
    #[error("chat response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub open: bool,
    pub question: String,
    pub response: Option<String>,
    pub loading: bool,
}

impl ChatState {
    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Whether the send control is enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.loading && !self.question.trim().is_empty()
    }

    /// Enter the in-flight state and hand back the request to send.
    /// Returns `None` (and changes nothing) when sending is not allowed.
    pub fn begin(&mut self) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }
        self.loading = true;
        Some(ChatRequest {
            message: self.question.clone(),
        })
    }

    /// Leave the in-flight state. Success and failure both clear the input.
    ///
    /// Failures are reported by whoever performed the request; this only
    /// swaps in the apology.
    pub fn finish(&mut self, outcome: Result<ChatResponse, ChatError>) {
        self.response = Some(match outcome {
            Ok(reply) => reply.response,
            Err(_) => APOLOGY.to_string(),
        });
        self.loading = false;
        self.question.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn blank_questions_are_not_sent() {
        let mut state = ChatState::default();
        state.set_question("   ");
        assert!(!state.can_send());
        assert_eq!(state.begin(), None);
        assert!(!state.loading);
    }

    #[test]
    fn begin_blocks_a_second_request() {
        let mut state = ChatState::default();
        state.set_question("What does dark mode do?");
        let request = state.begin().expect("request");
        assert_eq!(request.message, "What does dark mode do?");
        assert!(state.loading);
        assert_eq!(state.begin(), None);
    }

    #[test]
    fn success_shows_reply_and_clears_input() {
        let mut state = ChatState::default();
        state.set_question("hi");
        let _ = state.begin();
        state.finish(Ok(ChatResponse {
            response: "Hello!".into(),
        }));
        assert_eq!(state.response.as_deref(), Some("Hello!"));
        assert!(!state.loading);
        assert!(state.question.is_empty());
    }

    #[test]
    fn failure_shows_apology() {
        let mut state = ChatState::default();
        state.set_question("hi");
        let _ = state.begin();
        state.finish(Err(ChatError::Transport("offline".into())));
        assert_eq!(state.response.as_deref(), Some(APOLOGY));
        assert!(!state.loading);
        assert!(state.question.is_empty());
    }

    static CHAT_ERRORS: AtomicUsize = AtomicUsize::new(0);

    struct ErrorCounter;

    impl log::Log for ErrorCounter {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() == log::Level::Error
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) && record.target().ends_with("chat") {
                CHAT_ERRORS.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn flush(&self) {}
    }

    static COUNTER: ErrorCounter = ErrorCounter;

    #[test]
    fn failure_is_left_to_the_caller_to_report() {
        let _ = log::set_logger(&COUNTER);
        log::set_max_level(log::LevelFilter::Error);
        let before = CHAT_ERRORS.load(Ordering::SeqCst);

        let mut state = ChatState::default();
        state.set_question("hi");
        let _ = state.begin();
        state.finish(Err(ChatError::Status(502)));

        assert_eq!(state.response.as_deref(), Some(APOLOGY));
        assert_eq!(CHAT_ERRORS.load(Ordering::SeqCst), before);
    }

    #[test]
    fn request_body_matches_endpoint_shape() {
        let body = serde_json::to_string(&ChatRequest {
            message: "hi".into(),
        })
        .expect("encode");
        assert_eq!(body, r#"{"message":"hi"}"#);
        let reply: ChatResponse =
            serde_json::from_str(r#"{"response":"ok","extra":1}"#).expect("decode");
        assert_eq!(reply.response, "ok");
    }
}
