//! Hand-off of input and host events to the UI thread.
//!
//! Gesture recognition and host callbacks may fire on other threads, but only
//! the UI thread mutates widget state. Everything that would mutate it is sent
//! as a [`UiMessage`] and applied in arrival order by
//! [`TabContainer::pump`](crate::container::TabContainer::pump).

use std::sync::mpsc;

use crate::{geometry::LayoutRect, gesture::GestureIntent, host::PageEvent};

/// State change requested from outside the UI thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiMessage {
    /// A recognized tab gesture.
    Gesture(GestureIntent),
    /// A scroll or settle report from the paged content host.
    Page(PageEvent),
    /// A tab was laid out.
    Measured {
        /// Tab index.
        index: usize,
        /// Rectangle in strip-local coordinates.
        rect: LayoutRect,
    },
    /// The strip viewport changed width.
    Viewport(f32),
}

/// Sending half, cloneable and `Send`.
#[derive(Clone, Debug)]
pub struct UiDispatcher {
    sender: mpsc::Sender<UiMessage>,
}

impl UiDispatcher {
    /// Queues a message for the UI thread.
    ///
    /// Returns `false` if the UI side has been dropped.
    pub fn post(&self, message: UiMessage) -> bool {
        self.sender.send(message).is_ok()
    }
}

/// Receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct UiInbox {
    receiver: mpsc::Receiver<UiMessage>,
}

impl UiInbox {
    /// Takes the next queued message without blocking.
    pub fn try_next(&self) -> Option<UiMessage> {
        self.receiver.try_recv().ok()
    }
}

/// Creates a connected dispatcher and inbox.
pub fn ui_channel() -> (UiDispatcher, UiInbox) {
    let (sender, receiver) = mpsc::channel();
    (UiDispatcher { sender }, UiInbox { receiver })
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_messages_arrive_in_order() {
        let (dispatcher, inbox) = ui_channel();
        let remote = dispatcher.clone();
        thread::spawn(move || {
            remote.post(UiMessage::Viewport(1.0));
            remote.post(UiMessage::Viewport(2.0));
        })
        .join()
        .expect("input thread panicked");
        assert_eq!(inbox.try_next(), Some(UiMessage::Viewport(1.0)));
        assert_eq!(inbox.try_next(), Some(UiMessage::Viewport(2.0)));
        assert_eq!(inbox.try_next(), None);
    }

    #[test]
    fn test_post_reports_closed_inbox() {
        let (dispatcher, inbox) = ui_channel();
        drop(inbox);
        assert!(!dispatcher.post(UiMessage::Viewport(0.0)));
    }
}
