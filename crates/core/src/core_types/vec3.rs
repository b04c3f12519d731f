//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, and accelerations.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the simulation for particle positions, spawn offsets, and forces.
pub type Vec3 = Vector3<f32>;
