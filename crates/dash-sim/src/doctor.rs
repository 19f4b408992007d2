use anyhow::Result;
use dash_proto::route::FlightRoute;
use dash_proto::telemetry::DroneTelemetry;

use crate::geo::valid_coordinate;
use crate::SimConfig;

pub fn check_intervals(cfg: &SimConfig) -> Result<()> {
    anyhow::ensure!(cfg.telemetry_interval_ms >= 100, "sim.telemetry_interval_ms too small; set >= 100");
    anyhow::ensure!(cfg.notification_interval_ms >= 1000, "sim.notification_interval_ms too small; set >= 1000");
    anyhow::ensure!(
        cfg.notification_interval_ms >= cfg.telemetry_interval_ms,
        "sim.notification_interval_ms should not be shorter than the telemetry interval"
    );
    Ok(())
}

pub fn check_drone(drone: &DroneTelemetry) -> Result<()> {
    anyhow::ensure!(valid_coordinate(drone.gps.latitude, drone.gps.longitude), "drone {} gps invalid", drone.id);
    anyhow::ensure!((0.0..=100.0).contains(&drone.battery.level), "drone {} battery level out of range", drone.id);
    anyhow::ensure!((0.0..360.0).contains(&drone.heading), "drone {} heading out of range", drone.id);
    Ok(())
}

pub fn check_routes(routes: &[FlightRoute]) -> Result<()> {
    for r in routes {
        anyhow::ensure!(!r.waypoints.is_empty(), "route {} has no waypoints", r.id);
        for wp in &r.waypoints {
            anyhow::ensure!(
                valid_coordinate(wp.latitude, wp.longitude),
                "route {} waypoint {} coordinates invalid",
                r.id,
                wp.id
            );
            anyhow::ensure!(wp.altitude >= 0.0, "route {} waypoint {} altitude negative", r.id, wp.id);
        }
    }
    Ok(())
}
