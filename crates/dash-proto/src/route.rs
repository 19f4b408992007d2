use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub fn label(self) -> &'static str {
        match self {
            RouteStatus::Planned => "planned",
            RouteStatus::Active => "active",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Hover time at this waypoint, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRoute {
    pub id: String,
    pub name: String,
    /// km
    pub distance: f64,
    /// minutes
    pub estimated_time: u32,
    pub waypoints: Vec<Waypoint>,
    pub status: RouteStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}
