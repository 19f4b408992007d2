pub mod client;
pub mod doctor;
pub mod planner;
pub mod render;
pub mod server;

pub use client::{LinkError, LinkStatus, PathLink};
