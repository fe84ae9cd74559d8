//! Actions that modules can return to communicate with the app

use crate::domain::dashboard::NavigationMode;

/// Actions returned by modules and commands to communicate intent
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Forward a request to the dashboard controller
    Control(Control),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Open the command bar
    OpenCommand,

    /// Toggle the help overlay
    ToggleHelp,

    /// Close current overlay/popup
    CloseOverlay,

    /// Request quit
    Quit,
}

/// Controller operations the presentation layer can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TogglePower,
    VoiceCommand,
    StartNavigation,
    SetVoiceEnabled(bool),
    SetSoundEnabled(bool),
    SetNavigationMode(NavigationMode),
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::TogglePower => "power",
            Control::VoiceCommand => "voice command",
            Control::StartNavigation => "start navigation",
            Control::SetVoiceEnabled(_) => "microphone",
            Control::SetSoundEnabled(_) => "sound",
            Control::SetNavigationMode(_) => "navigation mode",
        }
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
}
