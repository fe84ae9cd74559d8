//! Dashboard controller - owns the state and decides what is permitted
//!
//! Every user action goes through here. The presentation layer may dim
//! controls using the snapshot's permission checks, but rejection happens
//! in this module.

use std::time::Duration;

use tokio::runtime::Handle;

use super::notifier::Notifier;
use super::state::{DashboardSnapshot, DashboardState, NavigationMode};
use crate::infrastructure::runtime::{DrainTimer, TickReceiver};

pub const ACTIVATED_TITLE: &str = "System Activated";
pub const ACTIVATED_BODY: &str = "The robot is ready for use";
pub const DEACTIVATED_TITLE: &str = "System Deactivated";
pub const DEACTIVATED_BODY: &str = "The robot has been placed in standby";
pub const VOICE_TITLE: &str = "Voice Command Received";
pub const VOICE_BODY: &str = "Processing the command...";
pub const NAVIGATION_TITLE: &str = "Navigation Started";
pub const NAVIGATION_BODY: &str = "Computing the safest route...";

/// Passive energy consumption parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainSettings {
    pub period: Duration,
    pub per_tick: f64,
}

impl Default for DrainSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(10),
            per_tick: 0.1,
        }
    }
}

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The system is powered down
    Standby,
    /// The microphone is switched off
    VoiceDisabled,
}

impl Rejection {
    pub fn describe(&self) -> &'static str {
        match self {
            Rejection::Standby => "System is in standby",
            Rejection::VoiceDisabled => "Microphone is off",
        }
    }
}

/// Result of a controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

pub struct DashboardController<N: Notifier> {
    state: DashboardState,
    notifier: N,
    drain: DrainSettings,
    timer: Option<DrainTimer>,
    ticks: Option<TickReceiver>,
}

impl<N: Notifier> DashboardController<N> {
    /// Controller without a timer. Ticks are applied only via [`Self::tick`].
    pub fn new(state: DashboardState, notifier: N, drain: DrainSettings) -> Self {
        Self {
            state,
            notifier,
            drain,
            timer: None,
            ticks: None,
        }
    }

    /// Controller with its drain timer spawned on `runtime`
    pub fn start(
        state: DashboardState,
        notifier: N,
        drain: DrainSettings,
        runtime: &Handle,
    ) -> Self {
        let mut controller = Self::new(state, notifier, drain);
        let (timer, ticks) = DrainTimer::start(runtime, drain.period);
        controller.timer = Some(timer);
        controller.ticks = Some(ticks);
        tracing::info!(
            battery = controller.state.battery.value(),
            period_secs = drain.period.as_secs_f64(),
            per_tick = drain.per_tick,
            "dashboard controller started"
        );
        controller
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.snapshot()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.as_ref().map(DrainTimer::is_running).unwrap_or(false)
    }

    pub fn toggle_power(&mut self) -> Outcome {
        // Ticks already fired belong to the old power state
        self.pump();
        self.state.active = !self.state.active;
        if self.state.active {
            tracing::info!("system activated");
            self.notifier.notify(ACTIVATED_TITLE, ACTIVATED_BODY);
        } else {
            tracing::info!("system placed in standby");
            self.notifier.notify(DEACTIVATED_TITLE, DEACTIVATED_BODY);
        }
        Outcome::Applied
    }

    pub fn issue_voice_command(&mut self) -> Outcome {
        if let Err(reason) = self.require_active() {
            return self.reject("issue_voice_command", reason);
        }
        if !self.state.voice_enabled {
            return self.reject("issue_voice_command", Rejection::VoiceDisabled);
        }
        self.notifier.notify(VOICE_TITLE, VOICE_BODY);
        Outcome::Applied
    }

    pub fn start_navigation(&mut self) -> Outcome {
        if let Err(reason) = self.require_active() {
            return self.reject("start_navigation", reason);
        }
        tracing::info!(mode = %self.state.navigation_mode, "navigation requested");
        self.notifier.notify(NAVIGATION_TITLE, NAVIGATION_BODY);
        Outcome::Applied
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) -> Outcome {
        if let Err(reason) = self.require_active() {
            return self.reject("set_voice_enabled", reason);
        }
        self.state.voice_enabled = enabled;
        Outcome::Applied
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Outcome {
        if let Err(reason) = self.require_active() {
            return self.reject("set_sound_enabled", reason);
        }
        self.state.sound_enabled = enabled;
        Outcome::Applied
    }

    pub fn set_navigation_mode(&mut self, mode: NavigationMode) -> Outcome {
        if let Err(reason) = self.require_active() {
            return self.reject("set_navigation_mode", reason);
        }
        self.state.navigation_mode = mode;
        Outcome::Applied
    }

    /// Apply one drain step. Returns whether the battery level changed.
    pub fn tick(&mut self) -> bool {
        if !self.state.active {
            return false;
        }
        let before = self.state.battery;
        self.state.battery = before.drained(self.drain.per_tick);
        if self.state.battery.is_empty() && !before.is_empty() {
            tracing::warn!("battery depleted");
        }
        self.state.battery != before
    }

    /// Apply every tick the timer has delivered so far
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(tick) = self.ticks.as_mut().and_then(|rx| rx.try_recv().ok()) {
            tracing::trace!(seq = tick.seq, "battery tick");
            self.tick();
            applied += 1;
        }
        applied
    }

    /// Stop the drain timer. Ticks fired before the call are still applied.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        self.pump();
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
            tracing::info!(
                battery = self.state.battery.value(),
                "dashboard controller stopped"
            );
        }
        self.ticks = None;
    }

    fn require_active(&self) -> Result<(), Rejection> {
        if self.state.active {
            Ok(())
        } else {
            Err(Rejection::Standby)
        }
    }

    fn reject(&self, action: &'static str, reason: Rejection) -> Outcome {
        tracing::debug!(action, ?reason, "action rejected");
        Outcome::Rejected(reason)
    }
}

impl<N: Notifier> Drop for DashboardController<N> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<N: Notifier> std::fmt::Debug for DashboardController<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("state", &self.state)
            .field("drain", &self.drain)
            .field("timer", &self.timer)
            .finish()
    }
}
