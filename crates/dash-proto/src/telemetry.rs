use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroneState {
    Idle,
    Flying,
    Charging,
    Maintenance,
    Alert,
}

impl DroneState {
    pub fn description(self) -> &'static str {
        match self {
            DroneState::Flying => "executing mission",
            DroneState::Charging => "charging",
            DroneState::Maintenance => "maintenance mode",
            DroneState::Alert => "abnormal state",
            DroneState::Idle => "standing by",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    /// Charge in percent, 0..=100.
    pub level: f64,
    pub temperature: f64,
    pub voltage: f64,
}

/// Coarse battery bands used for the status card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryBand {
    Good,
    Normal,
    Low,
}

impl BatteryBand {
    pub fn from_level(level: f64) -> Self {
        if level > 70.0 {
            BatteryBand::Good
        } else if level > 30.0 {
            BatteryBand::Normal
        } else {
            BatteryBand::Low
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BatteryBand::Good => "charge sufficient",
            BatteryBand::Normal => "charge normal",
            BatteryBand::Low => "charge low, land soon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneTelemetry {
    pub id: String,
    pub name: String,
    pub gps: GpsFix,
    pub battery: Battery,
    pub altitude: f64,
    pub speed: f64,
    /// Degrees clockwise from north.
    pub heading: f64,
    pub status: DroneState,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl DroneTelemetry {
    pub fn battery_band(&self) -> BatteryBand {
        BatteryBand::from_level(self.battery.level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSample {
    pub temperature: f64,
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// One point of the history charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalSample {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub altitude: u32,
    pub speed: u32,
    pub battery_level: u32,
    pub temperature: u32,
    pub humidity: u32,
}
