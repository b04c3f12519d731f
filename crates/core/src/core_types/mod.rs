//! Core types and utilities

pub mod life_table;
pub mod sampling;
pub mod units;
pub mod vec3;

pub use life_table::LifeTable;
pub use units::{camera_distance, Degrees};
pub use vec3::Vec3;
