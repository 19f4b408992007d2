pub mod notify;
pub mod planning;
pub mod route;
pub mod telemetry;
pub mod wire;
