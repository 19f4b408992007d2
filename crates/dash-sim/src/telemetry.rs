use dash_proto::telemetry::{DroneTelemetry, EnvironmentSample};
use rand::Rng;
use time::OffsetDateTime;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nudge {
    /// Symmetric: `(random - 0.5) * step`.
    Jitter(f64),
    /// Monotonic decrease: `-random * rate`.
    Drain(f64),
}

impl Nudge {
    fn delta<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let r: f64 = rng.gen();
        match self {
            Nudge::Jitter(step) => (r - 0.5) * step,
            Nudge::Drain(rate) => -r * rate,
        }
    }
}

/// How one telemetry field evolves per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldModel {
    pub nudge: Nudge,
    pub bounds: Bounds,
}

impl FieldModel {
    pub fn step<R: Rng + ?Sized>(&self, prev: f64, rng: &mut R) -> f64 {
        self.bounds.clamp(prev + self.nudge.delta(rng))
    }
}

pub const ALTITUDE: FieldModel = FieldModel { nudge: Nudge::Jitter(5.0), bounds: Bounds::new(10.0, 100.0) };
pub const SPEED: FieldModel = FieldModel { nudge: Nudge::Jitter(2.0), bounds: Bounds::new(0.0, 30.0) };
pub const BATTERY_LEVEL: FieldModel = FieldModel { nudge: Nudge::Drain(0.1), bounds: Bounds::new(0.0, 100.0) };
pub const BATTERY_TEMP: FieldModel = FieldModel { nudge: Nudge::Jitter(0.5), bounds: Bounds::new(25.0, 40.0) };
pub const AMBIENT_TEMP: FieldModel = FieldModel { nudge: Nudge::Jitter(0.3), bounds: Bounds::new(15.0, 35.0) };
pub const HUMIDITY: FieldModel = FieldModel { nudge: Nudge::Jitter(1.0), bounds: Bounds::new(30.0, 80.0) };

pub struct TelemetrySimulator {
    drone: DroneTelemetry,
    env: EnvironmentSample,
    ticks: u64,
}

impl TelemetrySimulator {
    pub fn new(drone: DroneTelemetry, env: EnvironmentSample) -> Self {
        Self { drone, env, ticks: 0 }
    }

    pub fn drone(&self) -> &DroneTelemetry {
        &self.drone
    }

    pub fn environment(&self) -> &EnvironmentSample {
        &self.env
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Replaces the current drone and environment samples with nudged copies.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: OffsetDateTime) {
        let d = &mut self.drone;
        d.altitude = ALTITUDE.step(d.altitude, rng);
        d.speed = SPEED.step(d.speed, rng);
        d.battery.level = BATTERY_LEVEL.step(d.battery.level, rng);
        d.battery.temperature = BATTERY_TEMP.step(d.battery.temperature, rng);
        d.last_updated = now;

        let e = &mut self.env;
        e.temperature = AMBIENT_TEMP.step(e.temperature, rng);
        e.humidity = HUMIDITY.step(e.humidity, rng);
        e.timestamp = now;

        self.ticks += 1;
        debug!(
            "telemetry tick {}: alt={:.1} spd={:.1} bat={:.2}% env={:.1}C/{:.1}%",
            self.ticks, d.altitude, d.speed, d.battery.level, e.temperature, e.humidity
        );
    }
}
