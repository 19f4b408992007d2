pub mod control;
pub mod dashboard;
pub mod doctor;
pub mod feed;
pub mod geo;
pub mod history;
pub mod routes;
pub mod seed;
pub mod telemetry;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Telemetry/environment tick. The dashboard used 5s.
    pub telemetry_interval_ms: u64,

    /// Notification synthesis tick. The dashboard used 30s.
    pub notification_interval_ms: u64,

    /// Fixed RNG seed for reproducible runs; OS entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: 5_000,
            notification_interval_ms: 30_000,
            rng_seed: None,
        }
    }
}
