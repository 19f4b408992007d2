use serde::{Deserialize, Serialize};

/// Body of `POST /api/planning`. Coordinates are `[x, y, z]`; length is
/// checked by the planner so a bad request can be answered with a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    pub start: Vec<f64>,
    pub end: Vec<f64>,
    /// Accepted but not yet used by any planner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacles: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Normalized progress along the path, 0..=1.
    pub t: f64,
    pub spd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResponse {
    pub path: Vec<PlanPoint>,
    pub cost: Option<f64>,
}
