use std::future::Future;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use time::OffsetDateTime;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use dash_proto::telemetry::BatteryBand;

use crate::control::FlightControl;
use crate::feed::NotificationFeed;
use crate::routes::RouteRegistry;
use crate::telemetry::TelemetrySimulator;
use crate::{seed, SimConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub telemetry_ticks: u64,
    pub notifications: u64,
}

/// All dashboard state, owned by a single task.
pub struct Dashboard {
    cfg: SimConfig,
    rng: StdRng,
    telemetry: TelemetrySimulator,
    feed: NotificationFeed,
    routes: RouteRegistry,
    control: FlightControl,
}

impl Dashboard {
    /// Starts from the static seed data.
    pub fn new(cfg: SimConfig) -> Self {
        let now = OffsetDateTime::now_utc();
        let rng = match cfg.rng_seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            cfg,
            rng,
            telemetry: TelemetrySimulator::new(seed::drone(now), seed::environment(now)),
            feed: NotificationFeed::new(seed::notifications()),
            routes: RouteRegistry::new(seed::routes()),
            control: FlightControl::default(),
        }
    }

    pub fn telemetry(&self) -> &TelemetrySimulator { &self.telemetry }
    pub fn feed(&self) -> &NotificationFeed { &self.feed }
    pub fn routes(&self) -> &RouteRegistry { &self.routes }
    pub fn control(&self) -> &FlightControl { &self.control }
    pub fn control_mut(&mut self) -> &mut FlightControl { &mut self.control }

    pub fn on_telemetry_tick(&mut self, wall: OffsetDateTime, now: std::time::Instant) {
        self.telemetry.tick(&mut self.rng, wall);
        self.control.poll(now);

        let d = self.telemetry.drone();
        let band = d.battery_band();
        if band == BatteryBand::Low {
            warn!("dashboard: {} battery {:.1}% ({})", d.name, d.battery.level, band.description());
        }
        info!(
            "dashboard: {} {} alt={:.1}m spd={:.1}m/s battery={:.1}% env={:.1}C/{:.1}%",
            d.name,
            d.status.description(),
            d.altitude,
            d.speed,
            d.battery.level,
            self.telemetry.environment().temperature,
            self.telemetry.environment().humidity,
        );
    }

    pub fn on_notification_tick(&mut self, wall: OffsetDateTime) {
        self.feed.synthesize(&mut self.rng, wall);
        debug!("dashboard: feed len={} unread={}", self.feed.len(), self.feed.unread_count());
    }

    /// Drives both timers until `shutdown` resolves or `max_telemetry_ticks`
    /// telemetry ticks have fired. Timers are dropped on return.
    pub async fn run<F>(&mut self, shutdown: F, max_telemetry_ticks: Option<u64>) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let mut summary = RunSummary::default();
        if max_telemetry_ticks == Some(0) {
            info!("dashboard: tick limit is 0, nothing to run");
            return summary;
        }

        let tel_period = Duration::from_millis(self.cfg.telemetry_interval_ms.max(1));
        let notif_period = Duration::from_millis(self.cfg.notification_interval_ms.max(1));

        // first firing one period after start, like a browser interval
        let start = Instant::now();
        let mut tel = interval_at(start + tel_period, tel_period);
        let mut notif = interval_at(start + notif_period, notif_period);
        tel.set_missed_tick_behavior(MissedTickBehavior::Delay);
        notif.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("dashboard: running (telemetry every {:?}, notifications every {:?})", tel_period, notif_period);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("dashboard: shutdown requested");
                    break;
                }
                at = tel.tick() => {
                    self.on_telemetry_tick(OffsetDateTime::now_utc(), at.into_std());
                    summary.telemetry_ticks += 1;
                    if max_telemetry_ticks.is_some_and(|max| summary.telemetry_ticks >= max) {
                        break;
                    }
                }
                _ = notif.tick() => {
                    self.on_notification_tick(OffsetDateTime::now_utc());
                    summary.notifications += 1;
                }
            }
        }

        info!(
            "dashboard: stopped after {} telemetry ticks, {} notifications",
            summary.telemetry_ticks, summary.notifications
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use crate::control::FlightPhase;
    use crate::telemetry::{ALTITUDE, HUMIDITY};

    use super::*;

    fn config() -> SimConfig {
        SimConfig { rng_seed: Some(1), ..SimConfig::default() }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_fires_both_timers() {
        let mut dash = Dashboard::new(config());
        let summary = dash.run(tokio::time::sleep(Duration::from_secs(61)), None).await;

        assert_eq!(summary, RunSummary { telemetry_ticks: 12, notifications: 2 });
        assert_eq!(dash.feed().len(), 6);
        assert_eq!(dash.feed().unread_count(), 3);
        assert_eq!(dash.telemetry().ticks(), 12);
        assert!(ALTITUDE.bounds.contains(dash.telemetry().drone().altitude));
        assert!(HUMIDITY.bounds.contains(dash.telemetry().environment().humidity));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_after_max_ticks() {
        let mut dash = Dashboard::new(config());
        let summary = dash.run(std::future::pending(), Some(3)).await;
        assert_eq!(summary, RunSummary { telemetry_ticks: 3, notifications: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_zero_ticks_does_nothing() {
        let mut dash = Dashboard::new(config());
        let before = Instant::now();
        let summary = dash.run(std::future::pending(), Some(0)).await;

        assert_eq!(summary, RunSummary::default());
        assert_eq!(dash.telemetry().ticks(), 0);
        assert_eq!(dash.feed().len(), 4);
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_control_polled_on_telemetry_tick() {
        let mut dash = Dashboard::new(config());
        dash.control_mut().takeoff(Instant::now().into_std());
        dash.run(std::future::pending(), Some(1)).await;
        assert_eq!(dash.control().phase(), FlightPhase::Flying);
    }

    #[test]
    fn test_seeded_dashboard_is_reproducible() {
        let mut a = Dashboard::new(config());
        let mut b = Dashboard::new(config());
        let wall = OffsetDateTime::now_utc();
        let now = std::time::Instant::now();
        for _ in 0..10 {
            a.on_telemetry_tick(wall, now);
            b.on_telemetry_tick(wall, now);
        }
        assert_eq!(a.telemetry().drone().altitude, b.telemetry().drone().altitude);
        assert_eq!(a.telemetry().environment().temperature, b.telemetry().environment().temperature);
    }
}
