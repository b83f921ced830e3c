//! Debouncer - a cancellable deadline owned by the save loop.
//!
//! The debouncer only tracks *when* the next save is due. The owner
//! awaits [`Debouncer::wait`] inside its own `select!`, so cancelling is a
//! plain field reset and no timer task is ever left behind.

use std::time::Duration;

use tokio::time::{self, Instant};

/// A single pending deadline that can be scheduled, pushed back or cancelled.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arms the deadline unless one is already pending.
    pub fn schedule(&mut self) {
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.window);
        }
    }

    /// Moves the deadline to one full window from now.
    pub fn reschedule(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Drops the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once a pending deadline has passed.
    pub fn elapsed(&self) -> bool {
        self.deadline.is_some_and(|d| d <= Instant::now())
    }

    /// Completes when the pending deadline passes; never completes when
    /// nothing is scheduled.
    pub async fn wait(&self) {
        match self.deadline {
            Some(deadline) => time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}
