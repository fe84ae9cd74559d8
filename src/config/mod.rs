use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::dashboard::{
    BatteryLevel, DashboardState, DrainSettings, NavigationMode, Sensor, SensorLabels,
    DEFAULT_BATTERY_LEVEL,
};
use crate::infrastructure::runtime::MAX_PERIOD;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "GUIDEBOT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub initial_level: f64,
    pub drain_per_tick: f64,
    pub tick_secs: u64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            initial_level: DEFAULT_BATTERY_LEVEL,
            drain_per_tick: 0.1,
            tick_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub navigation_mode: NavigationMode,
    pub voice_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            navigation_mode: NavigationMode::Indoor,
            voice_enabled: true,
            sound_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorConfig {
    pub lidar: Option<String>,
    pub ultrasonic: Option<String>,
    pub camera: Option<String>,
    pub gps: Option<String>,
}

impl SensorConfig {
    pub fn labels(&self) -> SensorLabels {
        Sensor::ALL
            .iter()
            .map(|sensor| {
                let configured = match sensor {
                    Sensor::Lidar => self.lidar.as_deref(),
                    Sensor::Ultrasonic => self.ultrasonic.as_deref(),
                    Sensor::Camera => self.camera.as_deref(),
                    Sensor::Gps => self.gps.as_deref(),
                };
                let label = configured
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| sensor.default_label());
                (*sensor, label.to_string())
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub toast_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 200,
            toast_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub battery: BatteryConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub sensors: SensorConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Config>(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battery.tick_secs == 0 || self.battery.tick_secs > MAX_PERIOD.as_secs() {
            return Err(ConfigError::Invalid(format!(
                "battery.tick_secs must be between 1 and {}, got {}",
                MAX_PERIOD.as_secs(),
                self.battery.tick_secs
            )));
        }
        if !self.battery.drain_per_tick.is_finite() || self.battery.drain_per_tick < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "battery.drain_per_tick must be a non-negative number, got {}",
                self.battery.drain_per_tick
            )));
        }
        if !self.battery.initial_level.is_finite() {
            return Err(ConfigError::Invalid(
                "battery.initial_level must be a finite number".to_string(),
            ));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Dashboard state at session start
    pub fn initial_state(&self) -> DashboardState {
        DashboardState {
            active: false,
            voice_enabled: self.defaults.voice_enabled,
            sound_enabled: self.defaults.sound_enabled,
            navigation_mode: self.defaults.navigation_mode,
            battery: BatteryLevel::new(self.battery.initial_level),
            sensors: self.sensors.labels(),
        }
    }

    pub fn drain_settings(&self) -> DrainSettings {
        DrainSettings {
            period: Duration::from_secs(self.battery.tick_secs),
            per_tick: self.battery.drain_per_tick,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.ui.toast_secs)
    }
}

/// Load the config file. A missing file yields defaults; an unreadable or
/// invalid one is reported so the caller can warn and fall back.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(path) => path,
        None => return Ok(Config::default()),
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let config = Config::parse(&content, &path)?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("guidebot").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("guidebot").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "guidebot", "guidebot")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("guidebot"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("guidebot"));
    }
    directories::ProjectDirs::from("io", "guidebot", "guidebot")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("guidebot.log"))
}
