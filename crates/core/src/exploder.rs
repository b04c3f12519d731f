//! Radial burst particles driven by a multi-segment life table.

use crate::core_types::life_table::LifeTable;
use crate::core_types::sampling;
use crate::core_types::vec3::Vec3;
use crate::error::FireworksError;
use crate::scene::{Group, SharedTexture, SpriteState, SpriteVisual};
use crate::trail::{self, Trail};
use rand::Rng;
use std::ops::Range;
use std::rc::Rc;

/// Sprite radius.
const RADIUS: f32 = 10.0;

/// Upward bias added to the sampled burst direction.
const UPWARD_BIAS: f32 = 0.3;

/// Per-tick velocity damping.
const DAMPING: f32 = 0.99;

/// Per-tick probability of shedding a trail particle.
const TRAIL_PROBABILITY: f32 = 0.7;

/// Tick budget for shed trails.
const TRAIL_LIFE_SPAN: i32 = 30;

/// One particle in a radial burst.
///
/// The particle starts with a random unit-sphere direction biased
/// upward and scaled into `speed_range`, then follows its life table:
/// an optional start delay, hue interpolation across the table
/// segments, a fade-out with leftward wind drift through the final
/// segment, and death once the table is exhausted. The sprite attaches
/// to the particle's own group on the first tick after the delay.
#[derive(Debug)]
pub struct Exploder {
    start_position: Vec3,
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    life: LifeTable,
    life_index: usize,
    /// Elapsed ticks; starts at `-delay` and counts up through zero.
    life_elapsed: i64,
    hue_current: f32,
    is_dead: bool,
    attached: bool,
    trails: Vec<Trail>,
    group: Group,
    visual: SpriteVisual,
    texture: SharedTexture,
    viewport: (f32, f32),
    destroyed: bool,
}

impl Exploder {
    /// Create a burst particle at `position`.
    ///
    /// The life table is validated by [`LifeTable::new`]; the speed
    /// range is validated here so no partially constructed particle can
    /// exist.
    pub fn new<R: Rng + ?Sized>(
        texture: SharedTexture,
        position: Vec3,
        delay: u32,
        life: LifeTable,
        speed_range: Range<f32>,
        rng: &mut R,
    ) -> Result<Self, FireworksError> {
        if !(speed_range.start < speed_range.end) {
            return Err(FireworksError::InvalidConfiguration(format!(
                "speed range {}..{} is empty",
                speed_range.start, speed_range.end
            )));
        }
        let mut velocity = sampling::unit_sphere(rng);
        velocity.y += UPWARD_BIAS;
        velocity *= rng.random_range(speed_range);

        let hue_current = life.hue(0);
        let visual = SpriteVisual::new(Rc::clone(&texture), hue_current, RADIUS);
        Ok(Exploder {
            start_position: position,
            position,
            velocity,
            acceleration: Vec3::zeros(),
            life,
            life_index: 0,
            life_elapsed: -i64::from(delay),
            hue_current,
            is_dead: false,
            attached: false,
            trails: Vec::new(),
            group: Group::new("ExploderGroup"),
            visual,
            texture,
            viewport: (0.0, 0.0),
            destroyed: false,
        })
    }

    /// True once the start delay has elapsed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life_elapsed >= 0
    }

    /// True once the life table is exhausted.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Accumulate an external force for the next integration step.
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// One simulation tick.
    ///
    /// The delay countdown always advances, even before gravity matters.
    /// Once dead the particle stops updating entirely.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_dead {
            return;
        }
        self.life_elapsed += 1;

        // still counting down the start delay
        if !self.is_alive() {
            return;
        }

        // once, after the delay
        if !self.attached {
            self.group.attach(self.visual.node());
            self.attached = true;
        }

        // advance to the segment containing the elapsed count
        while self.life_index + 1 < self.life.len()
            && i64::from(self.life.checkpoint(self.life_index + 1)) <= self.life_elapsed
        {
            self.life_index += 1;
        }

        // table exhausted
        if self.life_index + 1 == self.life.len() {
            self.is_dead = true;
            return;
        }

        let t = self.life.fraction(self.life_index, self.life_elapsed);

        // fade out and drift on the wind through the last segment
        if self.life_index == self.life.final_segment() {
            self.visual.opacity = 1.0 - t;
            self.acceleration += Vec3::new(-0.01, 0.0, 0.0);
        }

        // change hue
        self.hue_current = self.life.hue_at(self.life_index, t);
        self.visual.hue = self.hue_current.rem_euclid(360.0);

        // location
        self.velocity *= DAMPING;
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec3::zeros();

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
            self.hue_current.rem_euclid(360.0),
            rng,
        );
        self.group.attach(spawned.group().id());
        self.trails.push(spawned);
    }

    /// Record the viewport dimensions. Burst particles position from
    /// their parent shell, so nothing moves.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Last viewport dimensions forwarded by the orchestrator.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Burst origin.
    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current hue in degrees, folded into [0, 360).
    #[must_use]
    pub fn hue(&self) -> f32 {
        self.hue_current.rem_euclid(360.0)
    }

    /// Current blend opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.visual.opacity
    }

    /// Current life-table segment.
    #[must_use]
    pub fn life_index(&self) -> usize {
        self.life_index
    }

    /// Elapsed ticks since the delay ran out (negative while waiting).
    #[must_use]
    pub fn life_elapsed(&self) -> i64 {
        self.life_elapsed
    }

    /// Number of live trails.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    /// This particle's scene group.
    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Append render snapshots for the particle and its trails. Nothing
    /// is emitted while the particle waits out its delay or after death.
    pub fn collect_sprites(&self, out: &mut Vec<SpriteState>) {
        if self.attached && !self.is_dead {
            out.push(SpriteState {
                position: self.position,
                hue: self.visual.hue,
                opacity: self.visual.opacity,
                scale: self.visual.scale,
            });
        }
        for trail in &self.trails {
            out.push(trail.sprite());
        }
    }

    /// Release the particle's visual resources and destroy any remaining
    /// trails. Duplicate calls are warned no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            tracing::warn!("ignoring duplicate exploder destroy");
            return;
        }
        self.destroyed = true;
        for spawned in &mut self.trails {
            spawned.destroy();
            self.group.detach(spawned.group().id());
        }
        self.trails.clear();
        if self.attached {
            self.group.detach(self.visual.node());
        }
        if let Err(err) = self.visual.release() {
            tracing::warn!(%err, "exploder visual already released");
        }
    }
}
