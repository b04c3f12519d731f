//! Display orchestrator: owns the live particle collections, the burst
//! recipe, and the injected random generator.

use crate::core_types::life_table::LifeTable;
use crate::core_types::units::Degrees;
use crate::core_types::vec3::Vec3;
use crate::error::FireworksError;
use crate::exploder::Exploder;
use crate::fire::Fire;
use crate::scene::{Group, SharedTexture, SpriteState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::rc::Rc;

/// Large burst: hold the launch hue, shift it twice, then fade.
const LG_CHECKPOINTS: [u32; 6] = [0, 50, 90, 150, 170, 300];
const LG_HUE_OFFSETS: [f32; 6] = [0.0, 0.0, 40.0, 40.0, 300.0, 300.0];
const LG_SPEED: Range<f32> = 3.0..6.0;

/// Medium burst: starts on the shifted hue, pops 20 ticks late.
const MD_CHECKPOINTS: [u32; 4] = [0, 50, 190, 290];
const MD_HUE_OFFSETS: [f32; 4] = [40.0, 40.0, 300.0, 300.0];
const MD_SPEED: Range<f32> = 3.0..5.0;
const MD_DELAY: u32 = 20;

/// Satellite bursts: short golden sparks ringed around the main burst.
const SM_CHECKPOINTS: [u32; 2] = [0, 100];
const SM_HUES: [f32; 2] = [30.0, 40.0];
const SM_SPEED: Range<f32> = 2.0..3.0;
const SATELLITE_RADIUS: f32 = 150.0;
const SATELLITE_BASE_DELAY: u32 = 160;

/// Burst composition parameters.
///
/// Fields are public so hosts can bind UI controls to them between
/// ticks; changes apply to the next burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstRecipe {
    /// Large exploders per burst. Each large exploder is paired with a
    /// medium one, so this also sets the medium count.
    pub lg_explosion_amount: u32,
    /// Exploders per satellite group.
    pub sm_explosion_amount: u32,
    /// Satellite groups ringed evenly around the burst.
    pub sm_fireworks_num: u32,
}

impl Default for BurstRecipe {
    fn default() -> Self {
        BurstRecipe {
            lg_explosion_amount: 64,
            sm_explosion_amount: 18,
            sm_fireworks_num: 3,
        }
    }
}

/// Top-level display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Gravity applied to every airborne particle, per tick.
    pub gravity: Vec3,
    /// Ticks between shell launches.
    pub launch_interval: u64,
    /// Launch hue range in degrees, `(min, max)`.
    pub hue_range: (f32, f32),
    /// Burst composition.
    pub recipe: BurstRecipe,
    /// Seed for the injected generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            gravity: Vec3::new(0.0, -0.03, 0.0),
            launch_interval: 360,
            hue_range: (50.0, 240.0),
            recipe: BurstRecipe::default(),
            seed: None,
        }
    }
}

/// Cumulative session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStats {
    /// Shells launched since the session started.
    pub fires_launched: u64,
    /// Bursts triggered by shells reaching apex.
    pub bursts_spawned: u64,
    /// Total burst particles created.
    pub exploders_spawned: u64,
}

/// The fireworks display.
///
/// Owns the live shell and burst-particle collections and drives them
/// one tick at a time. The host calls [`FireworksDisplay::update`] once
/// per frame with a monotonically increasing frame counter and
/// [`FireworksDisplay::resize`] on viewport changes; everything else is
/// internal.
///
/// # Example
/// ```
/// use fireworks_sim_core::{DisplayConfig, FireworksDisplay, Texture};
///
/// let config = DisplayConfig {
///     seed: Some(7),
///     ..DisplayConfig::default()
/// };
/// let mut display = FireworksDisplay::new(config, Texture::load("particle")).unwrap();
/// display.resize(1280.0, 720.0);
/// for frame in 0..120 {
///     display.update(frame).unwrap();
/// }
/// assert_eq!(display.stats().fires_launched, 1);
/// ```
#[derive(Debug)]
pub struct FireworksDisplay {
    config: DisplayConfig,
    fires: Vec<Fire>,
    exploders: Vec<Exploder>,
    rng: StdRng,
    texture: SharedTexture,
    group: Group,
    viewport: (f32, f32),
    stats: DisplayStats,
}

impl FireworksDisplay {
    /// Create a display from a validated configuration and the host's
    /// pre-loaded particle texture.
    pub fn new(config: DisplayConfig, texture: SharedTexture) -> Result<Self, FireworksError> {
        if config.launch_interval == 0 {
            return Err(FireworksError::InvalidConfiguration(
                "launch interval must be at least 1 tick".into(),
            ));
        }
        if !(config.hue_range.0 < config.hue_range.1) {
            return Err(FireworksError::InvalidConfiguration(format!(
                "hue range {}..{} is empty",
                config.hue_range.0, config.hue_range.1
            )));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(FireworksDisplay {
            config,
            fires: Vec::new(),
            exploders: Vec::new(),
            rng,
            texture,
            group: Group::new("FireworksGroup"),
            viewport: (0.0, 0.0),
            stats: DisplayStats::default(),
        })
    }

    /// Launch a new shell with a random hue on a random column.
    pub fn launch_fire(&mut self) {
        let (hue_min, hue_max) = self.config.hue_range;
        let hue = self.rng.random_range(hue_min..hue_max);
        let mut fire = Fire::new(Rc::clone(&self.texture), hue);
        fire.resize(self.viewport.0, self.viewport.1, &mut self.rng);
        self.group.attach(fire.group().id());
        self.stats.fires_launched += 1;
        self.fires.push(fire);
    }

    /// Spawn the full burst recipe at `position`.
    ///
    /// Per burst: `lg_explosion_amount` large/medium pairs on the launch
    /// hue, plus `sm_fireworks_num` satellite groups spaced evenly on a
    /// circle of radius 150, each igniting after a shared random delay
    /// subtracted from a 160-tick base.
    pub fn spawn_burst(&mut self, position: Vec3, hue: f32) -> Result<(), FireworksError> {
        let recipe = self.config.recipe;

        for _ in 0..recipe.lg_explosion_amount {
            let lg_table = LifeTable::new(
                LG_CHECKPOINTS.to_vec(),
                LG_HUE_OFFSETS.iter().map(|offset| hue + offset).collect(),
            )?;
            let lg = Exploder::new(
                Rc::clone(&self.texture),
                position,
                0,
                lg_table,
                LG_SPEED,
                &mut self.rng,
            )?;
            self.register_exploder(lg);

            let md_table = LifeTable::new(
                MD_CHECKPOINTS.to_vec(),
                MD_HUE_OFFSETS.iter().map(|offset| hue + offset).collect(),
            )?;
            let md = Exploder::new(
                Rc::clone(&self.texture),
                position,
                MD_DELAY,
                md_table,
                MD_SPEED,
                &mut self.rng,
            )?;
            self.register_exploder(md);
        }

        for group_index in 0..recipe.sm_fireworks_num {
            let radian = Degrees::new(
                360.0 * group_index as f32 / recipe.sm_fireworks_num as f32,
            )
            .to_radians();
            let ring = Vec3::new(
                radian.cos() * SATELLITE_RADIUS,
                radian.sin() * SATELLITE_RADIUS,
                0.0,
            ) + Vec3::new(0.0, -30.0, 0.0);
            // One draw per group so its sparks ignite together, near but
            // not exactly at burst time.
            let delay = SATELLITE_BASE_DELAY - self.rng.random_range(40..80);
            for _ in 0..recipe.sm_explosion_amount {
                let sm_table = LifeTable::new(SM_CHECKPOINTS.to_vec(), SM_HUES.to_vec())?;
                let sm = Exploder::new(
                    Rc::clone(&self.texture),
                    position + ring,
                    delay,
                    sm_table,
                    SM_SPEED,
                    &mut self.rng,
                )?;
                self.register_exploder(sm);
            }
        }

        self.stats.bursts_spawned += 1;
        tracing::debug!(
            exploders = self.exploders.len(),
            hue,
            "burst spawned"
        );
        Ok(())
    }

    fn register_exploder(&mut self, mut exploder: Exploder) {
        exploder.resize(self.viewport.0, self.viewport.1);
        self.group.attach(exploder.group().id());
        self.stats.exploders_spawned += 1;
        self.exploders.push(exploder);
    }

    /// One simulation tick.
    ///
    /// Launches a shell on the configured cadence, then drives shells
    /// (gravity, update, burst on apex, prune) and burst particles
    /// (gravity while alive, update unconditionally so delay countdowns
    /// advance, prune the dead). Prune passes scan from the end toward
    /// the start so in-place removal never skips an element.
    pub fn update(&mut self, frame: u64) -> Result<(), FireworksError> {
        if frame % self.config.launch_interval == 0 {
            self.launch_fire();
        }

        // launch
        let gravity = self.config.gravity;
        let mut bursts = Vec::new();
        for fire in &mut self.fires {
            fire.add_force(gravity);
            fire.update(frame, &mut self.rng);
            if fire.exploded() {
                bursts.push((fire.position(), fire.hue()));
            }
        }
        // Shells pop and are discarded on the same tick, so every entry
        // here is newly exploded.
        for (position, hue) in bursts {
            self.spawn_burst(position, hue)?;
        }
        let mut index = self.fires.len();
        while index > 0 {
            index -= 1;
            if self.fires[index].exploded() {
                self.fires[index].destroy();
                self.group.detach(self.fires[index].group().id());
                self.fires.remove(index);
            }
        }

        // explosion
        for exploder in &mut self.exploders {
            if exploder.is_alive() {
                exploder.add_force(gravity);
            }
            exploder.update(&mut self.rng);
        }
        let mut index = self.exploders.len();
        while index > 0 {
            index -= 1;
            if self.exploders[index].is_dead() {
                self.exploders[index].destroy();
                self.group.detach(self.exploders[index].group().id());
                self.exploders.remove(index);
            }
        }

        Ok(())
    }

    /// Store the viewport and forward it to every live particle. Shells
    /// use it to re-pick their launch column; burst particles only
    /// record it.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        for fire in self.fires.iter_mut() {
            fire.resize(width, height, &mut self.rng);
        }
        for exploder in self.exploders.iter_mut() {
            exploder.resize(width, height);
        }
    }

    /// Current viewport dimensions.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport.0, self.viewport.1)
    }

    /// Display configuration.
    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Mutable burst recipe, for host UI bindings.
    pub fn recipe_mut(&mut self) -> &mut BurstRecipe {
        &mut self.config.recipe
    }

    /// Root scene group the host mounts into its render tree.
    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Number of live shells.
    #[must_use]
    pub fn fire_count(&self) -> usize {
        self.fires.len()
    }

    /// Number of live burst particles (including delayed ones).
    #[must_use]
    pub fn exploder_count(&self) -> usize {
        self.exploders.len()
    }

    /// Number of live trails across all emitters.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.fires.iter().map(Fire::trail_count).sum::<usize>()
            + self.exploders.iter().map(Exploder::trail_count).sum::<usize>()
    }

    /// Cumulative session counters.
    #[must_use]
    pub fn stats(&self) -> DisplayStats {
        self.stats
    }

    /// Snapshot every visible sprite for the host renderer.
    #[must_use]
    pub fn sprites(&self) -> Vec<SpriteState> {
        let mut out = Vec::new();
        for fire in &self.fires {
            fire.collect_sprites(&mut out);
        }
        for exploder in &self.exploders {
            exploder.collect_sprites(&mut out);
        }
        out
    }
}

impl Drop for FireworksDisplay {
    /// The display owns the session's shared texture reference; the
    /// underlying resource is released exactly once, here.
    fn drop(&mut self) {
        if let Err(err) = self.texture.dispose() {
            tracing::warn!(%err, "texture already disposed at teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Texture;

    fn seeded(recipe: BurstRecipe, launch_interval: u64) -> FireworksDisplay {
        let config = DisplayConfig {
            launch_interval,
            recipe,
            seed: Some(1234),
            ..DisplayConfig::default()
        };
        let mut display = FireworksDisplay::new(config, Texture::load("tex")).unwrap();
        display.resize(1280.0, 720.0);
        display
    }

    #[test]
    fn rejects_zero_launch_interval() {
        let config = DisplayConfig {
            launch_interval: 0,
            ..DisplayConfig::default()
        };
        let err = FireworksDisplay::new(config, Texture::load("tex")).unwrap_err();
        assert!(matches!(err, FireworksError::InvalidConfiguration(_)));
    }

    #[test]
    fn minimal_recipe_spawns_one_pair() {
        let recipe = BurstRecipe {
            lg_explosion_amount: 1,
            sm_explosion_amount: 18,
            sm_fireworks_num: 0,
        };
        let mut display = seeded(recipe, 360);
        display
            .spawn_burst(Vec3::new(0.0, 200.0, 0.0), 120.0)
            .unwrap();
        assert_eq!(display.exploder_count(), 2);
        assert_eq!(display.stats().exploders_spawned, 2);
        assert_eq!(display.stats().bursts_spawned, 1);
    }

    #[test]
    fn full_recipe_spawns_pairs_plus_satellites() {
        let recipe = BurstRecipe::default();
        let mut display = seeded(recipe, 360);
        display
            .spawn_burst(Vec3::new(0.0, 200.0, 0.0), 120.0)
            .unwrap();
        // 64 large + 64 medium + 3 groups × 18 sparks.
        assert_eq!(display.exploder_count(), 64 * 2 + 3 * 18);
    }

    #[test]
    fn satellite_groups_share_a_delay_and_ring_position() {
        let recipe = BurstRecipe {
            lg_explosion_amount: 0,
            sm_explosion_amount: 4,
            sm_fireworks_num: 2,
        };
        let mut display = seeded(recipe, 360);
        display.spawn_burst(Vec3::zeros(), 120.0).unwrap();
        assert_eq!(display.exploder_count(), 8);

        // Two groups of four, each sharing one start position on the
        // ring (offset (0, -30, 0)) and one delay drawn per group.
        let positions: Vec<Vec3> = display
            .exploders
            .iter()
            .map(Exploder::start_position)
            .collect();
        assert_eq!(positions[0], Vec3::new(150.0, -30.0, 0.0));
        for p in &positions[..4] {
            assert_eq!(*p, positions[0]);
        }
        for p in &positions[4..] {
            assert_eq!(*p, positions[4]);
        }
        assert_ne!(positions[0], positions[4]);

        let delays: Vec<i64> = display
            .exploders
            .iter()
            .map(Exploder::life_elapsed)
            .collect();
        for d in &delays[..4] {
            assert_eq!(*d, delays[0]);
        }
        // 160 minus a draw from [40, 80).
        assert!((-120..=-80).contains(&delays[0]));
    }

    #[test]
    fn launch_cadence_follows_the_interval() {
        let mut display = seeded(BurstRecipe::default(), 10);
        display.update(0).unwrap();
        assert_eq!(display.fire_count(), 1);
        for frame in 1..10 {
            display.update(frame).unwrap();
        }
        assert_eq!(display.fire_count(), 1);
        display.update(10).unwrap();
        assert_eq!(display.fire_count(), 2);
        assert_eq!(display.stats().fires_launched, 2);
    }

    #[test]
    fn apex_triggers_a_burst_and_removes_the_shell() {
        let recipe = BurstRecipe {
            lg_explosion_amount: 2,
            sm_explosion_amount: 1,
            sm_fireworks_num: 1,
        };
        // Long interval: exactly one shell in flight.
        let mut display = seeded(recipe, 100_000);
        let mut burst_frame = None;
        for frame in 0..400 {
            display.update(frame).unwrap();
            if display.stats().bursts_spawned > 0 {
                burst_frame = Some(frame);
                break;
            }
        }
        // v0 = 5, g = 0.03: apex on the 167th shell tick (frame 166).
        assert_eq!(burst_frame, Some(166));
        assert_eq!(display.fire_count(), 0);
        assert_eq!(display.exploder_count(), 2 * 2 + 1);
    }

    #[test]
    fn gravity_waits_for_the_delay() {
        let recipe = BurstRecipe {
            lg_explosion_amount: 0,
            sm_explosion_amount: 1,
            sm_fireworks_num: 1,
        };
        let mut display = seeded(recipe, 100_000);
        display.spawn_burst(Vec3::zeros(), 120.0).unwrap();
        let start = display.exploders[0].start_position();
        // Delayed satellites must not move while counting down. Frames
        // start at 1 so the cadence check does not launch a shell.
        for frame in 1..=10 {
            display.update(frame).unwrap();
        }
        assert_eq!(display.exploders[0].position(), start);
        assert!(!display.exploders[0].is_alive());
    }

    #[test]
    fn same_seed_reproduces_the_display() {
        let mut a = seeded(BurstRecipe::default(), 360);
        let mut b = seeded(BurstRecipe::default(), 360);
        for frame in 0..200 {
            a.update(frame).unwrap();
            b.update(frame).unwrap();
        }
        let sa = a.sprites();
        let sb = b.sprites();
        assert_eq!(sa.len(), sb.len());
        for (x, y) in sa.iter().zip(&sb) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.hue, y.hue);
            assert_eq!(x.opacity, y.opacity);
        }
    }

    #[test]
    fn texture_is_disposed_with_the_display() {
        let texture = Texture::load("tex");
        {
            let config = DisplayConfig {
                seed: Some(1),
                ..DisplayConfig::default()
            };
            let _display =
                FireworksDisplay::new(config, Rc::clone(&texture)).unwrap();
            assert!(!texture.is_disposed());
        }
        assert!(texture.is_disposed());
    }
}
