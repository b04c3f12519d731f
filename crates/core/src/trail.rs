//! Short-lived decorative particles shed behind a moving emitter.
//!
//! A trail spawns at its emitter's current position (a value snapshot;
//! it is independent of the emitter afterwards) and drifts on a random
//! unit-sphere velocity for a fixed tick budget. Opacity is derived from
//! the remaining life and the emitter's own opacity each tick, before
//! integration: the crate-internal `drive_trails` pass encodes that
//! ordering so no emitter can get it wrong.

use crate::core_types::sampling;
use crate::core_types::vec3::Vec3;
use crate::scene::{Group, SharedTexture, SpriteState, SpriteVisual};
use rand::Rng;

/// Initial speed applied to the sphere-sampled spawn direction.
const SPAWN_SPEED: f32 = 0.4;

/// Opacity ceiling; trails always render dimmer than their emitter.
const MAX_OPACITY: f32 = 0.3;

/// Sprite radius shared by all trail particles.
const RADIUS: f32 = 10.0;

/// A fading secondary particle attached to a rising shell or burst
/// particle.
#[derive(Debug)]
pub struct Trail {
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    remaining_life: i32,
    group: Group,
    visual: SpriteVisual,
}

impl Trail {
    /// Spawn at `anchor` with a random unit-sphere velocity.
    pub fn spawn<R: Rng + ?Sized>(
        anchor: Vec3,
        life_span: i32,
        texture: SharedTexture,
        hue: f32,
        rng: &mut R,
    ) -> Self {
        let velocity = sampling::unit_sphere(rng) * SPAWN_SPEED;
        let visual = SpriteVisual::new(texture, hue, RADIUS);
        let mut group = Group::new("TrailGroup");
        group.attach(visual.node());
        Trail {
            position: anchor,
            velocity,
            acceleration: Vec3::zeros(),
            remaining_life: life_span,
            group,
            visual,
        }
    }

    /// Accumulate an external force for the next integration step.
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Derive opacity from the remaining life and the emitter's opacity,
    /// capped at 0.3. Runs before [`Trail::update`] within a tick.
    pub fn sync_parent_opacity(&mut self, parent_opacity: f32) {
        self.visual.opacity = (self.remaining_life as f32)
            .min(parent_opacity)
            .min(MAX_OPACITY);
    }

    /// Semi-implicit Euler step; a no-op once dead.
    pub fn update(&mut self) {
        if self.is_dead() {
            return;
        }
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec3::zeros();
        self.remaining_life -= 1;
    }

    /// True once the tick budget has run out.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.remaining_life < 0
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Ticks left before this trail dies.
    #[must_use]
    pub fn remaining_life(&self) -> i32 {
        self.remaining_life
    }

    /// Current blend opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.visual.opacity
    }

    /// This trail's scene group.
    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Render snapshot.
    #[must_use]
    pub fn sprite(&self) -> SpriteState {
        SpriteState {
            position: self.position,
            hue: self.visual.hue,
            opacity: self.visual.opacity,
            scale: self.visual.scale,
        }
    }

    /// Release the sprite's visual resources. Duplicate calls are warned
    /// no-ops.
    pub fn destroy(&mut self) {
        self.group.detach(self.visual.node());
        if let Err(err) = self.visual.release() {
            tracing::warn!(%err, "ignoring duplicate trail destroy");
        }
    }
}

/// Advance, fade, and prune an emitter's trail collection.
///
/// Applies the shared downward pull, syncs opacity from the emitter
/// before integration, then removes dead trails scanning from the end
/// toward the start so in-place removal never skips an element. Dead
/// trails are destroyed and detached from `parent_group`.
pub(crate) fn drive_trails(trails: &mut Vec<Trail>, parent_group: &mut Group, parent_opacity: f32) {
    let gravity = Vec3::new(0.0, -0.01, 0.0);
    for trail in trails.iter_mut() {
        trail.add_force(gravity);
        trail.sync_parent_opacity(parent_opacity);
        trail.update();
    }
    let mut index = trails.len();
    while index > 0 {
        index -= 1;
        if trails[index].is_dead() {
            trails[index].destroy();
            parent_group.detach(trails[index].group().id());
            trails.remove(index);
        }
    }
}
