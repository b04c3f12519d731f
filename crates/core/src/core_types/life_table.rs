//! Piecewise-linear life tables for burst color and fade timing.

use crate::error::FireworksError;
use serde::{Deserialize, Serialize};

/// Ordered checkpoint/hue pairs defining piecewise-linear interpolation
/// over an elapsed-tick count.
///
/// A table of N checkpoints describes N-1 segments. While a burst
/// particle is inside segment `i`, its hue is the linear blend of
/// `hues[i]` and `hues[i + 1]`; the last segment additionally drives the
/// fade-out. Invariants, enforced at construction:
///
/// - `checkpoints.len() == hues.len() >= 2`
/// - checkpoints strictly increasing
///
/// # Example
/// ```
/// use fireworks_sim_core::LifeTable;
///
/// let table = LifeTable::new(vec![0, 50], vec![10.0, 50.0]).unwrap();
/// let t = table.fraction(0, 25);
/// assert_eq!(table.hue_at(0, t), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeTable {
    checkpoints: Vec<u32>,
    hues: Vec<f32>,
}

impl LifeTable {
    /// Build a table, rejecting malformed input up front so no partially
    /// constructed particle can exist.
    pub fn new(checkpoints: Vec<u32>, hues: Vec<f32>) -> Result<Self, FireworksError> {
        if checkpoints.len() < 2 {
            return Err(FireworksError::InvalidConfiguration(format!(
                "life table needs at least 2 checkpoints, got {}",
                checkpoints.len()
            )));
        }
        if checkpoints.len() != hues.len() {
            return Err(FireworksError::InvalidConfiguration(format!(
                "life table has {} checkpoints but {} hues",
                checkpoints.len(),
                hues.len()
            )));
        }
        if !checkpoints.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(FireworksError::InvalidConfiguration(
                "life table checkpoints must be strictly increasing".into(),
            ));
        }
        Ok(LifeTable { checkpoints, hues })
    }

    /// Number of checkpoints (always at least 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Provided for completeness; a constructed table is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoint value at `index`.
    #[must_use]
    pub fn checkpoint(&self, index: usize) -> u32 {
        self.checkpoints[index]
    }

    /// Hue value at `index`.
    #[must_use]
    pub fn hue(&self, index: usize) -> f32 {
        self.hues[index]
    }

    /// Index of the final segment, the one that drives the fade-out.
    #[must_use]
    pub fn final_segment(&self) -> usize {
        self.checkpoints.len() - 2
    }

    /// Interpolation fraction within `segment` at `elapsed` ticks.
    #[must_use]
    pub fn fraction(&self, segment: usize, elapsed: i64) -> f32 {
        let from = i64::from(self.checkpoints[segment]);
        let to = i64::from(self.checkpoints[segment + 1]);
        (elapsed - from) as f32 / (to - from) as f32
    }

    /// Hue at fraction `t` through `segment`.
    #[must_use]
    pub fn hue_at(&self, segment: usize, t: f32) -> f32 {
        let from = self.hues[segment];
        let to = self.hues[segment + 1];
        from + (to - from) * t
    }
}
