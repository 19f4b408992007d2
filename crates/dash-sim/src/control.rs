use std::time::{Duration, Instant};

use tracing::{info, warn};

pub const TAKEOFF_DELAY: Duration = Duration::from_secs(1);
pub const LANDING_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Idle,
    Flying,
    Landing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheduled {
    Airborne,
    Touchdown,
}

/// Arm/takeoff/land/emergency panel. Delayed transitions are applied by
/// [`FlightControl::poll`].
#[derive(Debug, Clone)]
pub struct FlightControl {
    phase: FlightPhase,
    armed: bool,
    emergency: bool,
    scheduled: Option<(Scheduled, Instant)>,
}

impl Default for FlightControl {
    fn default() -> Self {
        Self { phase: FlightPhase::Idle, armed: false, emergency: false, scheduled: None }
    }
}

impl FlightControl {
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_emergency(&self) -> bool {
        self.emergency
    }

    /// Arms and schedules the climb-out. Ignored while already armed.
    pub fn takeoff(&mut self, now: Instant) -> bool {
        if self.armed {
            return false;
        }
        self.armed = true;
        self.scheduled = Some((Scheduled::Airborne, now + TAKEOFF_DELAY));
        info!("control: armed, takeoff in {:?}", TAKEOFF_DELAY);
        true
    }

    /// Starts landing. Only valid while flying.
    pub fn land(&mut self, now: Instant) -> bool {
        if self.phase != FlightPhase::Flying {
            return false;
        }
        self.phase = FlightPhase::Landing;
        self.scheduled = Some((Scheduled::Touchdown, now + LANDING_DELAY));
        info!("control: landing");
        true
    }

    pub fn emergency(&mut self) {
        warn!("control: EMERGENCY STOP (phase was {:?})", self.phase);
        self.emergency = true;
        self.phase = FlightPhase::Idle;
        self.armed = false;
        self.scheduled = None;
    }

    /// Applies a due scheduled transition; returns the new phase if one fired.
    pub fn poll(&mut self, now: Instant) -> Option<FlightPhase> {
        let (what, due) = self.scheduled?;
        if now < due {
            return None;
        }
        self.scheduled = None;
        match what {
            Scheduled::Airborne => {
                self.phase = FlightPhase::Flying;
                self.emergency = false;
            }
            Scheduled::Touchdown => {
                self.phase = FlightPhase::Idle;
                self.armed = false;
            }
        }
        info!("control: now {:?}", self.phase);
        Some(self.phase)
    }
}
