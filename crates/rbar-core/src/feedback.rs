//! Feedback channel: one transient message with a severity and a timed
//! dismissal.
//!
//! Showing a message arms a one-shot timer that posts
//! [`Action::AckExpire`] back onto the kiosk's action queue. Showing another
//! message before it fires aborts the pending timer and issues a new ticket,
//! so at most one expiry is ever live and stale ones are recognisable.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::workflow::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            severity: Severity::Success,
        }
    }
}

/// Identifies one armed dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AckTicket(u64);

impl AckTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// AckTimer
// ---------------------------------------------------------------------------

struct AckTimer {
    tx: mpsc::UnboundedSender<Action>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl AckTimer {
    fn arm(&mut self, window: Duration) -> AckTicket {
        self.cancel();
        self.generation += 1;
        let ticket = AckTicket(self.generation);

        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the kiosk was dropped; nothing left to dismiss.
            let _ = tx.send(Action::AckExpire(ticket));
        }));
        ticket
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn is_current(&self, ticket: AckTicket) -> bool {
        ticket.0 == self.generation
    }
}

impl Drop for AckTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ---------------------------------------------------------------------------
// FeedbackChannel
// ---------------------------------------------------------------------------

pub struct FeedbackChannel {
    state: Feedback,
    window: Duration,
    timer: AckTimer,
    /// Ticket of the message on screen; `None` once dismissed.
    live: Option<AckTicket>,
}

impl FeedbackChannel {
    pub fn new(window: Duration, tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            state: Feedback::default(),
            window,
            timer: AckTimer {
                tx,
                pending: None,
                generation: 0,
            },
            live: None,
        }
    }

    pub fn current(&self) -> &Feedback {
        &self.state
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace whatever is on screen and restart the dismissal clock.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> AckTicket {
        self.state = Feedback {
            visible: true,
            message: message.into(),
            severity,
        };
        let ticket = self.timer.arm(self.window);
        self.live = Some(ticket);
        ticket
    }

    /// Hide the message if `ticket` is the one on screen. Returns whether it was.
    pub fn expire(&mut self, ticket: AckTicket) -> bool {
        if self.live != Some(ticket) || !self.timer.is_current(ticket) {
            return false;
        }
        self.live = None;
        self.timer.pending = None;
        self.state = Feedback::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expiry_arrives_after_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ch = FeedbackChannel::new(Duration::from_millis(1000), tx);

        let t = ch.show("Order placed successfully!", Severity::Success);
        assert!(ch.current().visible);

        let started = tokio::time::Instant::now();
        let action = rx.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(action, Action::AckExpire(t));

        assert!(ch.expire(t));
        assert!(!ch.current().visible);
        assert_eq!(ch.current().message, "");
    }

    #[tokio::test(start_paused = true)]
    async fn reshow_cancels_pending_expiry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ch = FeedbackChannel::new(Duration::from_millis(1000), tx);

        let first = ch.show("SVG file selected", Severity::Success);
        tokio::time::sleep(Duration::from_millis(600)).await;
        let second = ch.show("Please upload a valid SVG file.", Severity::Error);
        assert_ne!(first, second);

        let action = rx.recv().await.unwrap();
        assert_eq!(action, Action::AckExpire(second), "first timer must be aborted");

        assert!(!ch.expire(first), "stale ticket is ignored");
        assert!(ch.current().visible);
        assert!(ch.expire(second));
        assert!(!ch.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn double_expire_is_noop() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut ch = FeedbackChannel::new(Duration::from_millis(10), tx);
        let t = ch.show("x", Severity::Error);
        assert!(ch.expire(t));
        assert!(!ch.expire(t));
    }
}
