use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Single pending auto-flip deadline. Arming replaces whatever was pending.
#[derive(Debug, Default)]
pub struct FlipTimer {
    deadline: Option<Instant>,
}

impl FlipTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    /// Returns true if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the pending deadline passes, disarming the timer.
    /// Never resolves while disarmed, so it can sit in a `select!` loop.
    /// Dropping the future early keeps the deadline.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
