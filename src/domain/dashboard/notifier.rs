//! Notifier contract - fire-and-forget toast requests

use std::sync::mpsc::Sender;

use chrono::{DateTime, Local};

/// Receives display requests from the controller.
///
/// Implementations must return immediately and must not fail the caller.
pub trait Notifier {
    fn notify(&self, title: &str, description: &str);
}

/// A toast as it travels to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub at: DateTime<Local>,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            at: Local::now(),
        }
    }
}

/// Forwards notifications over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, title: &str, description: &str) {
        if self.tx.send(Notification::new(title, description)).is_err() {
            tracing::debug!(title, "notification dropped, receiver closed");
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, title: &str, description: &str) {
        (**self).notify(title, description)
    }
}
