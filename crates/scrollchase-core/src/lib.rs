pub mod config;
pub mod error;
pub mod geometry;

pub use config::{AppConfig, EasingType, ScrollConfig, SimulationConfig};
pub use error::{Error, Result};
pub use geometry::{Axis, Point};
