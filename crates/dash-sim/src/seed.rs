//! Static mock data the dashboard starts from.

use dash_proto::notify::{Notification, NotificationKind};
use dash_proto::route::{FlightRoute, RouteStatus, Waypoint};
use dash_proto::telemetry::{Battery, DroneState, DroneTelemetry, EnvironmentSample, GpsFix};
use time::macros::datetime;
use time::OffsetDateTime;

pub fn drone(now: OffsetDateTime) -> DroneTelemetry {
    DroneTelemetry {
        id: "drone-001".into(),
        name: "Explorer-1".into(),
        gps: GpsFix { latitude: 39.9087, longitude: 116.3975, accuracy: 0.5 },
        battery: Battery { level: 85.0, temperature: 32.0, voltage: 12.5 },
        altitude: 45.0,
        speed: 15.2,
        heading: 270.0,
        status: DroneState::Flying,
        last_updated: now,
    }
}

pub fn environment(now: OffsetDateTime) -> EnvironmentSample {
    EnvironmentSample {
        temperature: 25.5,
        humidity: 45.2,
        pressure: 1013.25,
        wind_speed: 3.5,
        wind_direction: 180.0,
        timestamp: now,
    }
}

fn wp(id: u32, latitude: f64, longitude: f64, altitude: f64) -> Waypoint {
    Waypoint { id, latitude, longitude, altitude, pause_time: None }
}

pub fn routes() -> Vec<FlightRoute> {
    vec![
        FlightRoute {
            id: "route-001".into(),
            name: "City inspection A".into(),
            distance: 15.8,
            estimated_time: 45,
            waypoints: vec![
                wp(1, 39.9087, 116.3975, 50.0),
                wp(2, 39.9187, 116.4075, 60.0),
                wp(3, 39.9287, 116.4175, 50.0),
                wp(4, 39.9087, 116.3975, 40.0),
            ],
            status: RouteStatus::Active,
            created: datetime!(2025-10-19 08:00 UTC),
        },
        FlightRoute {
            id: "route-002".into(),
            name: "Industrial zone survey".into(),
            distance: 22.3,
            estimated_time: 60,
            waypoints: vec![
                wp(1, 39.9387, 116.4275, 50.0),
                wp(2, 39.9487, 116.4375, 70.0),
                wp(3, 39.9587, 116.4475, 50.0),
                wp(4, 39.9387, 116.4275, 40.0),
            ],
            status: RouteStatus::Planned,
            created: datetime!(2025-10-19 10:30 UTC),
        },
        FlightRoute {
            id: "route-003".into(),
            name: "Campus patrol".into(),
            distance: 8.5,
            estimated_time: 25,
            waypoints: vec![
                wp(1, 39.8987, 116.3875, 40.0),
                wp(2, 39.9087, 116.3975, 30.0),
                wp(3, 39.8987, 116.3875, 40.0),
            ],
            status: RouteStatus::Completed,
            created: datetime!(2025-10-19 09:15 UTC),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    let n = |id: &str, title: &str, message: &str, kind, timestamp, is_read| Notification {
        id: id.into(),
        title: title.into(),
        message: message.into(),
        kind,
        timestamp,
        is_read,
    };

    vec![
        n(
            "notif-001",
            "Mission complete",
            "Explorer-1 finished the city inspection mission",
            NotificationKind::Success,
            datetime!(2025-10-19 14:30 UTC),
            false,
        ),
        n(
            "notif-002",
            "Battery warning",
            "Battery below 30%, prepare to land",
            NotificationKind::Warning,
            datetime!(2025-10-19 13:45 UTC),
            true,
        ),
        n(
            "notif-003",
            "Firmware update",
            "Drone firmware 1.2.3 is available",
            NotificationKind::Info,
            datetime!(2025-10-19 10:00 UTC),
            true,
        ),
        n(
            "notif-004",
            "Link lost",
            "Communication with the drone was interrupted, check the signal",
            NotificationKind::Error,
            datetime!(2025-10-19 09:20 UTC),
            true,
        ),
    ]
}
