use dash_proto::planning::{PlanPoint, PlanningRequest, PlanningResponse};
use thiserror::Error;

pub const DEFAULT_STEPS: u32 = 20;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("{0} must have exactly 3 coordinates, got {1}")]
    BadPoint(&'static str, usize),
    #[error("steps must be at least 1")]
    NoSteps,
}

fn xyz(name: &'static str, v: &[f64]) -> Result<[f64; 3], PlanError> {
    match v {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(PlanError::BadPoint(name, v.len())),
    }
}

/// `steps + 1` evenly spaced points from start to end at unit speed.
/// Obstacles are ignored. Cost is the step count.
pub fn straight_line(req: &PlanningRequest, steps: u32) -> Result<PlanningResponse, PlanError> {
    let a = xyz("start", &req.start)?;
    let b = xyz("end", &req.end)?;
    if steps == 0 {
        return Err(PlanError::NoSteps);
    }

    let path = (0..=steps)
        .map(|i| {
            let u = f64::from(i) / f64::from(steps);
            PlanPoint {
                x: a[0] + (b[0] - a[0]) * u,
                y: a[1] + (b[1] - a[1]) * u,
                z: a[2] + (b[2] - a[2]) * u,
                t: u,
                spd: 1.0,
            }
        })
        .collect();

    Ok(PlanningResponse { path, cost: Some(f64::from(steps)) })
}
