//! Battery drain timer - a scoped recurring task on the Tokio runtime
//!
//! The task never touches dashboard state. It only emits [`Tick`]s over a
//! channel; the owner of the controller drains that channel on its own thread.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Smallest period accepted by the timer
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Largest period accepted by the timer (one day)
pub const MAX_PERIOD: Duration = Duration::from_secs(86_400);

/// One firing of the drain timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// 1-based sequence number within this timer's lifetime
    pub seq: u64,
}

/// Receiving side of the timer
pub type TickReceiver = UnboundedReceiver<Tick>;

/// Handle to a running drain timer. Dropping it cancels the task.
#[derive(Debug)]
pub struct DrainTimer {
    handle: Option<JoinHandle<()>>,
}

impl DrainTimer {
    /// Spawn the recurring task on `runtime`. The first tick fires one full
    /// period after start. `period` is clamped to [`MIN_PERIOD`, `MAX_PERIOD`].
    pub fn start(runtime: &Handle, period: Duration) -> (Self, TickReceiver) {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let (tx, rx) = mpsc::unbounded_channel();
        // Anchor the schedule now, not when the task is first polled
        let first = {
            let _guard = runtime.enter();
            let now = Instant::now();
            now.checked_add(period).unwrap_or(now)
        };
        let handle = runtime.spawn(run_ticks(first, period, tx));
        tracing::debug!(period_ms = period.as_millis() as u64, "drain timer started");
        (
            Self {
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stop the task. Safe to call any number of times; returns whether a
    /// live task was cancelled by this call.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                tracing::debug!("drain timer cancelled");
                true
            }
            None => false,
        }
    }
}

impl Drop for DrainTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_ticks(first: Instant, period: Duration, tx: UnboundedSender<Tick>) {
    let mut interval = interval_at(first, period);
    // Late ticks are delivered, so elapsed time is never under-counted
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut seq = 0u64;
    loop {
        interval.tick().await;
        seq += 1;
        if tx.send(Tick { seq }).is_err() {
            // Receiver dropped, nobody left to drain
            tracing::debug!(seq, "drain timer receiver closed");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance_by(period: Duration, times: u32) {
        for _ in 0..times {
            tokio::time::advance(period).await;
            settle().await;
        }
    }

    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    fn drain(rx: &mut TickReceiver) -> Vec<Tick> {
        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        ticks
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let period = Duration::from_secs(10);
        let (timer, mut rx) = DrainTimer::start(&Handle::current(), period);
        assert!(timer.is_running());

        settle().await;
        assert!(drain(&mut rx).is_empty());

        advance_by(period, 3).await;
        let ticks = drain(&mut rx);
        assert_eq!(ticks.iter().map(|t| t.seq).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent_and_stops_ticks() {
        let period = Duration::from_secs(1);
        let (mut timer, mut rx) = DrainTimer::start(&Handle::current(), period);

        advance_by(period, 2).await;
        assert_eq!(drain(&mut rx).len(), 2);

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.is_running());

        advance_by(period, 5).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let period = Duration::from_secs(1);
        let (timer, mut rx) = DrainTimer::start(&Handle::current(), period);
        drop(timer);

        advance_by(period, 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_raised_to_minimum() {
        let (_timer, mut rx) = DrainTimer::start(&Handle::current(), Duration::ZERO);
        settle().await;
        assert!(drain(&mut rx).is_empty());

        advance_by(MIN_PERIOD, 2).await;
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_period_is_capped() {
        let (_timer, mut rx) = DrainTimer::start(&Handle::current(), Duration::MAX);
        advance_by(MAX_PERIOD - Duration::from_secs(1), 1).await;
        assert!(drain(&mut rx).is_empty());

        advance_by(Duration::from_secs(1), 1).await;
        assert_eq!(drain(&mut rx).len(), 1);
    }
}
