//! The rising launch particle that triggers a burst at apex.

use crate::core_types::vec3::Vec3;
use crate::scene::{Group, SharedTexture, SpriteState, SpriteVisual};
use crate::trail::{self, Trail};
use rand::Rng;
use std::rc::Rc;

/// Initial vertical launch speed; orchestrator gravity erodes it until
/// the shell reaches apex.
const LAUNCH_SPEED: f32 = 5.0;

/// Sprite radius.
const RADIUS: f32 = 10.0;

/// Horizontal wobble amplitude as a fraction of the radius.
const WOBBLE_INTENSITY: f32 = 0.1;

/// Wobble phase advance per tick.
const WOBBLE_FREQUENCY: f32 = 0.2;

/// Per-tick probability of shedding a trail particle.
const TRAIL_PROBABILITY: f32 = 0.8;

/// Tick budget for shed trails.
const TRAIL_LIFE_SPAN: i32 = 30;

/// A launch shell rising under gravity with a sinusoidal horizontal
/// wobble. The `exploded` flag is a one-way latch: it is set the first
/// tick the vertical velocity drops to zero or below and never resets.
#[derive(Debug)]
pub struct Fire {
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    hue: f32,
    exploded: bool,
    trails: Vec<Trail>,
    group: Group,
    visual: SpriteVisual,
    texture: SharedTexture,
    destroyed: bool,
}

impl Fire {
    /// Create a shell ready for launch. Call [`Fire::resize`] before the
    /// first update to pick its launch column.
    pub fn new(texture: SharedTexture, hue: f32) -> Self {
        let visual = SpriteVisual::new(Rc::clone(&texture), hue, RADIUS);
        let mut group = Group::new("FireGroup");
        group.attach(visual.node());
        Fire {
            position: Vec3::zeros(),
            velocity: Vec3::new(0.0, LAUNCH_SPEED, 0.0),
            acceleration: Vec3::zeros(),
            hue,
            exploded: false,
            trails: Vec::new(),
            group,
            visual,
            texture,
            destroyed: false,
        }
    }

    /// Pick a random launch column for the viewport and park the shell
    /// just below the bottom edge.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.position = Vec3::new(
            width / 2.0 * rng.random_range(-0.5..0.5),
            -(height / 2.0) - RADIUS,
            0.0,
        );
    }

    /// Accumulate an external force for the next integration step.
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// One simulation tick: integrate, wobble, latch the apex, and shed
    /// and drive trails.
    pub fn update<R: Rng + ?Sized>(&mut self, frame: u64, rng: &mut R) {
        // location
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec3::zeros();

        // wave
        self.position.x += (frame as f32 * WOBBLE_FREQUENCY).sin() * RADIUS * WOBBLE_INTENSITY;

        // apex reached
        if !self.exploded && self.velocity.y <= 0.0 {
            self.exploded = true;
        }

        // trail
        if rng.random::<f32>() < TRAIL_PROBABILITY {
            self.spawn_trail(rng);
        }
        trail::drive_trails(&mut self.trails, &mut self.group, self.visual.opacity);
    }

    fn spawn_trail<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let spawned = Trail::spawn(
            self.position,
            TRAIL_LIFE_SPAN,
            Rc::clone(&self.texture),
            self.hue,
            rng,
        );
        self.group.attach(spawned.group().id());
        self.trails.push(spawned);
    }

    /// True once the shell has reached apex; never resets.
    #[must_use]
    pub fn exploded(&self) -> bool {
        self.exploded
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Launch hue in degrees, inherited by the burst.
    #[must_use]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Number of live trails.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    /// This shell's scene group.
    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Append render snapshots for the shell and its trails.
    pub fn collect_sprites(&self, out: &mut Vec<SpriteState>) {
        out.push(SpriteState {
            position: self.position,
            hue: self.visual.hue,
            opacity: self.visual.opacity,
            scale: self.visual.scale,
        });
        for trail in &self.trails {
            out.push(trail.sprite());
        }
    }

    /// Release the shell's visual resources and destroy any remaining
    /// trails. Duplicate calls are warned no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            tracing::warn!("ignoring duplicate fire destroy");
            return;
        }
        self.destroyed = true;
        for spawned in &mut self.trails {
            spawned.destroy();
            self.group.detach(spawned.group().id());
        }
        self.trails.clear();
        self.group.detach(self.visual.node());
        if let Err(err) = self.visual.release() {
            tracing::warn!(%err, "fire visual already released");
        }
    }
}
