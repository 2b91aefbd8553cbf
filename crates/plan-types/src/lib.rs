pub mod config;
pub mod entity;
pub mod geometry;
pub mod vent;

pub use config::*;
pub use entity::*;
pub use geometry::*;
pub use vent::*;
