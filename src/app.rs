use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::core::{parse_command, Action, Command, Context, Control, Module, NotifyLevel};
use crate::domain::dashboard::{
    ChannelNotifier, DashboardController, DashboardSnapshot, NavigationMode, Notification,
    Outcome, Rejection,
};
use crate::modules::dashboard::Dashboard;

/// Number of notifications kept for the activity panel
pub const MAX_ACTIVITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Latest notification, shown until it expires
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub dashboard: Dashboard,
    pub controller: DashboardController<ChannelNotifier>,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub toast: Option<Toast>,
    pub activity: VecDeque<Notification>,
    pub help_open: bool,
    pub should_quit: bool,
    notifications: Receiver<Notification>,
    toast_duration: Duration,
}

impl App {
    pub fn new(
        controller: DashboardController<ChannelNotifier>,
        notifications: Receiver<Notification>,
        toast_duration: Duration,
    ) -> Self {
        let mut app = Self {
            ctx: Context::new(),
            dashboard: Dashboard::new(),
            controller,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            toast: None,
            activity: VecDeque::new(),
            help_open: false,
            should_quit: false,
            notifications,
            toast_duration,
        };
        app.sync_context();
        app
    }

    /// Sync context with controller state
    pub fn sync_context(&mut self) {
        self.ctx.snapshot = self.controller.snapshot();
        self.ctx.activity = self.activity.iter().cloned().collect();
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.controller.snapshot()
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        self.controller.pump();
        self.drain_notifications();
        self.expire_messages(Instant::now());
    }

    /// Drop the toast and status line once they have been visible long enough
    pub fn expire_messages(&mut self, now: Instant) {
        if let Some(toast) = self.toast.as_ref() {
            if now.saturating_duration_since(toast.since) >= self.toast_duration {
                self.toast = None;
            }
        }
        if let Some(status) = self.status.as_ref() {
            if now.saturating_duration_since(status.since) >= self.toast_duration {
                self.status = None;
            }
        }
    }

    /// Move delivered notifications into the toast slot and activity log
    pub fn drain_notifications(&mut self) -> usize {
        let mut received = 0;
        while let Ok(notification) = self.notifications.try_recv() {
            self.activity.push_front(notification.clone());
            self.activity.truncate(MAX_ACTIVITY);
            self.toast = Some(Toast {
                notification,
                since: Instant::now(),
            });
            received += 1;
        }
        received
    }

    pub fn toast_text(&self) -> Option<(&str, &str)> {
        self.toast.as_ref().map(|toast| {
            (
                toast.notification.title.as_str(),
                toast.notification.description.as_str(),
            )
        })
    }

    /// Forward a control request and reflect the controller's decision
    pub fn apply_control(&mut self, control: Control) -> Outcome {
        let outcome = match control {
            Control::TogglePower => self.controller.toggle_power(),
            Control::VoiceCommand => self.controller.issue_voice_command(),
            Control::StartNavigation => self.controller.start_navigation(),
            Control::SetVoiceEnabled(enabled) => self.controller.set_voice_enabled(enabled),
            Control::SetSoundEnabled(enabled) => self.controller.set_sound_enabled(enabled),
            Control::SetNavigationMode(mode) => self.controller.set_navigation_mode(mode),
        };
        if let Outcome::Rejected(reason) = outcome {
            let hint = match reason {
                Rejection::Standby => "press p to power on",
                Rejection::VoiceDisabled => "press m to enable the microphone",
            };
            self.set_status(
                format!("{}: {} ({hint})", control.label(), reason.describe()),
                StatusLevel::Warn,
            );
        } else if let Some(text) = setting_feedback(control) {
            // Settings changes raise no notification, confirm on the status line
            self.apply_action(Action::Notify(text, NotifyLevel::Info));
        }
        self.drain_notifications();
        self.sync_context();
        outcome
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = std::mem::take(&mut self.command.input);
        self.input_mode = InputMode::Normal;
        if input.trim().is_empty() {
            return;
        }
        let cmd = parse_command(&input);
        tracing::debug!(?cmd, "command");
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    /// Execute a parsed command
    pub fn execute_command(&self, cmd: &Command) -> Action {
        let snap = self.controller.snapshot();
        match cmd {
            Command::Power => Action::Control(Control::TogglePower),
            Command::Voice => Action::Control(Control::VoiceCommand),
            Command::Navigate => Action::Control(Control::StartNavigation),
            Command::Mode(mode) => {
                let mode = mode.unwrap_or(match snap.navigation_mode {
                    NavigationMode::Indoor => NavigationMode::Outdoor,
                    NavigationMode::Outdoor => NavigationMode::Indoor,
                });
                Action::Control(Control::SetNavigationMode(mode))
            }
            Command::Mic(value) => Action::Control(Control::SetVoiceEnabled(
                value.unwrap_or(!snap.voice_enabled),
            )),
            Command::Sound(value) => Action::Control(Control::SetSoundEnabled(
                value.unwrap_or(!snap.sound_enabled),
            )),
            Command::Help => Action::ToggleHelp,
            Command::Quit => Action::Quit,
            Command::Unknown(s) => {
                Action::Notify(format!("Unknown command: {}", s), NotifyLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Control(control) => {
                self.apply_control(control);
            }
            Action::Notify(msg, level) => self.set_status(msg, level.into()),
            Action::OpenCommand => self.enter_command(),
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::CloseOverlay => self.help_open = false,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Route a key to the dashboard module
    pub fn dispatch_key(&mut self, key: crossterm::event::KeyEvent) {
        let action = self.dashboard.handle_key(key, &self.ctx);
        self.apply_action(action);
    }

    /// Stop background work owned by the app
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}

fn setting_feedback(control: Control) -> Option<String> {
    let on_off = |on: bool| if on { "on" } else { "off" };
    match control {
        Control::SetVoiceEnabled(on) => Some(format!("Microphone {}", on_off(on))),
        Control::SetSoundEnabled(on) => Some(format!("Sound {}", on_off(on))),
        Control::SetNavigationMode(mode) => Some(format!("Environment: {}", mode.title())),
        _ => None,
    }
}
