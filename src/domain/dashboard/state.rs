//! Dashboard state - the single owned model behind the control panel

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Battery level used when nothing else is configured
pub const DEFAULT_BATTERY_LEVEL: f64 = 85.0;

/// Battery charge as a percentage, always within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BatteryLevel(f64);

impl BatteryLevel {
    pub const EMPTY: BatteryLevel = BatteryLevel(0.0);
    pub const FULL: BatteryLevel = BatteryLevel(100.0);

    /// Build a level, clamping into range. NaN is treated as empty.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::EMPTY;
        }
        Self(value.clamp(0.0, 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole percent for display
    pub fn percent(self) -> u8 {
        self.0.round() as u8
    }

    pub fn is_empty(self) -> bool {
        self.0 <= 0.0
    }

    /// Level after draining `amount`, floored at zero
    pub fn drained(self, amount: f64) -> Self {
        Self::new(self.0 - amount.max(0.0))
    }
}

impl Default for BatteryLevel {
    fn default() -> Self {
        Self(DEFAULT_BATTERY_LEVEL)
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Environment the robot is guiding in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    #[default]
    Indoor,
    Outdoor,
}

impl NavigationMode {
    pub const ALL: [NavigationMode; 2] = [NavigationMode::Indoor, NavigationMode::Outdoor];

    pub fn title(&self) -> &'static str {
        match self {
            NavigationMode::Indoor => "Indoor",
            NavigationMode::Outdoor => "Outdoor",
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for NavigationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" | "in" => Ok(NavigationMode::Indoor),
            "outdoor" | "out" => Ok(NavigationMode::Outdoor),
            other => Err(format!("unknown navigation mode: {other}")),
        }
    }
}

/// Sensors shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sensor {
    Lidar,
    Ultrasonic,
    Camera,
    Gps,
}

impl Sensor {
    pub const ALL: [Sensor; 4] = [Sensor::Lidar, Sensor::Ultrasonic, Sensor::Camera, Sensor::Gps];

    pub fn title(&self) -> &'static str {
        match self {
            Sensor::Lidar => "LIDAR",
            Sensor::Ultrasonic => "Ultrasonic",
            Sensor::Camera => "Camera",
            Sensor::Gps => "GPS",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Sensor::Lidar => "Clear",
            Sensor::Ultrasonic => "Active",
            Sensor::Camera => "Operational",
            Sensor::Gps => "Connected",
        }
    }
}

/// Static readiness labels, one per sensor
pub type SensorLabels = BTreeMap<Sensor, String>;

pub fn default_sensor_labels() -> SensorLabels {
    Sensor::ALL
        .iter()
        .map(|sensor| (*sensor, sensor.default_label().to_string()))
        .collect()
}

/// Power state of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Standby,
    Running,
}

impl PowerState {
    pub fn title(&self) -> &'static str {
        match self {
            PowerState::Standby => "STANDBY",
            PowerState::Running => "ACTIVE",
        }
    }
}

/// Mutable dashboard state. Only the controller holds one of these.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub active: bool,
    pub voice_enabled: bool,
    pub sound_enabled: bool,
    pub navigation_mode: NavigationMode,
    pub battery: BatteryLevel,
    pub sensors: SensorLabels,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active: false,
            voice_enabled: true,
            sound_enabled: true,
            navigation_mode: NavigationMode::Indoor,
            battery: BatteryLevel::default(),
            sensors: default_sensor_labels(),
        }
    }
}

impl DashboardState {
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            active: self.active,
            voice_enabled: self.voice_enabled,
            sound_enabled: self.sound_enabled,
            navigation_mode: self.navigation_mode,
            battery: self.battery,
            sensors: self.sensors.clone(),
        }
    }
}

/// Read-only copy of the state handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub active: bool,
    pub voice_enabled: bool,
    pub sound_enabled: bool,
    pub navigation_mode: NavigationMode,
    pub battery: BatteryLevel,
    pub sensors: SensorLabels,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        DashboardState::default().snapshot()
    }
}

impl DashboardSnapshot {
    pub fn power(&self) -> PowerState {
        if self.active {
            PowerState::Running
        } else {
            PowerState::Standby
        }
    }

    pub fn battery_percent(&self) -> u8 {
        self.battery.percent()
    }

    pub fn can_issue_voice_command(&self) -> bool {
        self.active && self.voice_enabled
    }

    pub fn can_start_navigation(&self) -> bool {
        self.active
    }

    pub fn can_change_settings(&self) -> bool {
        self.active
    }

    pub fn sensor_label(&self, sensor: Sensor) -> &str {
        self.sensors
            .get(&sensor)
            .map(|s| s.as_str())
            .unwrap_or_else(|| sensor.default_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_level_clamps() {
        assert_eq!(BatteryLevel::new(120.0).value(), 100.0);
        assert_eq!(BatteryLevel::new(-3.0).value(), 0.0);
        assert_eq!(BatteryLevel::new(f64::NAN), BatteryLevel::EMPTY);
        assert_eq!(BatteryLevel::new(0.05).drained(0.1), BatteryLevel::EMPTY);
    }

    #[test]
    fn test_battery_drain_ignores_negative_amounts() {
        let level = BatteryLevel::new(50.0);
        assert_eq!(level.drained(-5.0), level);
    }

    #[test]
    fn test_battery_percent_rounds() {
        assert_eq!(BatteryLevel::new(84.5).percent(), 85);
        assert_eq!(BatteryLevel::new(84.4).percent(), 84);
        assert_eq!(BatteryLevel::new(84.4).to_string(), "84%");
    }

    #[test]
    fn test_default_state() {
        let state = DashboardState::default();
        assert!(!state.active);
        assert!(state.voice_enabled);
        assert!(state.sound_enabled);
        assert_eq!(state.navigation_mode, NavigationMode::Indoor);
        assert_eq!(state.battery.value(), 85.0);
        assert_eq!(state.sensors.len(), 4);
        assert_eq!(state.snapshot().power(), PowerState::Standby);
    }

    #[test]
    fn test_snapshot_permissions() {
        let mut state = DashboardState::default();
        let snap = state.snapshot();
        assert!(!snap.can_issue_voice_command());
        assert!(!snap.can_start_navigation());
        assert!(!snap.can_change_settings());

        state.active = true;
        state.voice_enabled = false;
        let snap = state.snapshot();
        assert!(!snap.can_issue_voice_command());
        assert!(snap.can_start_navigation());
        assert!(snap.can_change_settings());
    }

    #[test]
    fn test_parse_navigation_mode() {
        assert_eq!("indoor".parse::<NavigationMode>(), Ok(NavigationMode::Indoor));
        assert_eq!(" OUT ".parse::<NavigationMode>(), Ok(NavigationMode::Outdoor));
        assert!("sky".parse::<NavigationMode>().is_err());
    }
}
