//! Dashboard domain - state model, controller and notifier contract
//!
//! This module is independent of the terminal UI. The presentation layer
//! only sees [`DashboardSnapshot`]s and forwards user intent as controller
//! calls.

mod controller;
mod notifier;
mod state;

pub use controller::{
    DashboardController, DrainSettings, Outcome, Rejection, ACTIVATED_BODY, ACTIVATED_TITLE,
    DEACTIVATED_BODY, DEACTIVATED_TITLE, NAVIGATION_BODY, NAVIGATION_TITLE, VOICE_BODY,
    VOICE_TITLE,
};
pub use notifier::{ChannelNotifier, Notification, Notifier};
pub use state::{
    default_sensor_labels, BatteryLevel, DashboardSnapshot, DashboardState, NavigationMode,
    PowerState, Sensor, SensorLabels, DEFAULT_BATTERY_LEVEL,
};
