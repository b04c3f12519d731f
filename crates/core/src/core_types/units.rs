//! Angle units and viewport helpers.
//!
//! Provides a newtype for angles expressed in degrees (burst satellite
//! placement, camera field of view) plus the perspective-framing helper
//! hosts use to place their camera so the viewport is exactly filled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f32);

impl Degrees {
    /// Full turn (360°).
    pub const FULL_TURN: Degrees = Degrees(360.0);

    /// Create a new angle in degrees.
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Degrees(value)
    }

    /// Get the raw f32 value.
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert to radians.
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f32 {
        self.0 * std::f32::consts::PI / 180.0
    }
}

impl From<f32> for Degrees {
    fn from(v: f32) -> Self {
        Degrees(v)
    }
}

impl From<Degrees> for f32 {
    fn from(d: Degrees) -> f32 {
        d.0
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Distance at which a perspective camera with vertical field of view
/// `fov` exactly frames a viewport of the given height.
#[must_use]
pub fn camera_distance(viewport_height: f32, fov: Degrees) -> f32 {
    let half_fov = Degrees::new(fov.value() / 2.0).to_radians();
    viewport_height / 2.0 / half_fov.tan()
}
