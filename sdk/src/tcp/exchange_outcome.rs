use bytes::Bytes;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// Result of the single read performed after the payload was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The server replied with at least one byte.
    Received(Bytes),
    /// The server closed the connection without sending anything.
    EmptyResponse,
}

impl ExchangeOutcome {
    /// The response decoded as UTF-8, invalid sequences are replaced.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            ExchangeOutcome::Received(bytes) => Some(String::from_utf8_lossy(bytes)),
            ExchangeOutcome::EmptyResponse => None,
        }
    }
}

impl Display for ExchangeOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "Server response: {text}"),
            None => write!(f, "No response or connection closed"),
        }
    }
}
