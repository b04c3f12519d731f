//! Uniform direction sampling for spawn velocities.
//!
//! Every random draw takes the generator as an argument, so hosts and
//! tests can substitute a seeded [`rand::rngs::StdRng`] for the ambient
//! source and get reproducible displays.

use crate::core_types::vec3::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniform direction on the unit circle as `[cos θ, sin θ]`.
pub fn unit_circle<R: Rng + ?Sized>(rng: &mut R) -> [f32; 2] {
    let angle = rng.random_range(0.0..TAU);
    [angle.cos(), angle.sin()]
}

/// Uniform direction on the unit sphere.
///
/// Draws z uniformly in [-1, 1) and a circle direction for the remaining
/// components, scaled onto the semicircle at that height. This yields a
/// uniform distribution over the sphere surface.
pub fn unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let [cx, cy] = unit_circle(rng);
    let z = rng.random_range(-1.0_f32..1.0);
    let semicircle = (1.0 - z * z).sqrt();
    Vec3::new(semicircle * cx, semicircle * cy, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn circle_samples_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let [x, y] = unit_circle(&mut rng);
            assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_samples_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = unit_sphere(&mut rng);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn same_seed_same_directions() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(unit_sphere(&mut a), unit_sphere(&mut b));
        }
    }
}
