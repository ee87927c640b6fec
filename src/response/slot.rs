use serde::de::DeserializeOwned;

use super::extract::parse_response;

/// Holds the last successfully parsed response for a panel.
///
/// A failed parse leaves the previous value in place and raises a notice the
/// user can dismiss. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ResponseSlot<T> {
    current: Option<T>,
    notice: Option<String>,
}

impl<T> Default for ResponseSlot<T> {
    fn default() -> Self {
        Self {
            current: None,
            notice: None,
        }
    }
}

impl<T: DeserializeOwned> ResponseSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw completion. Returns true when the value was replaced.
    pub fn accept(&mut self, text: &str) -> bool {
        match parse_response::<T>(text) {
            Ok(value) => {
                self.current = Some(value);
                self.notice = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparsable response");
                self.notice = Some(e.to_string());
                false
            }
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }
}
