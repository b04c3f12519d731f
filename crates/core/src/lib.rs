//! Fireworks Display Simulation Core
//!
//! A frame-driven particle simulation of a fireworks show: launch
//! shells ("fires") rise under gravity with a sinusoidal wobble, pop
//! into radial bursts ("exploders") at apex, and every moving particle
//! sheds short-lived fading sparks ("trails"). Burst color and fade
//! timing follow piecewise-linear life tables.
//!
//! The crate is headless. A host render loop drives it through two
//! entry points — `update(frame)` once per tick and `resize(w, h)` on
//! viewport changes — and reads back per-sprite render snapshots plus a
//! retained group tree to mount into its own scene graph. All
//! randomness flows through an injected generator, so a seeded display
//! replays exactly.

// Core types and utilities
pub mod core_types;

pub mod error;
pub mod exploder;
pub mod fire;
pub mod fireworks;
pub mod scene;
pub mod trail;

// Re-export core types
pub use core_types::{camera_distance, Degrees, LifeTable, Vec3};

// Re-export simulation types
pub use error::FireworksError;
pub use exploder::Exploder;
pub use fire::Fire;
pub use fireworks::{BurstRecipe, DisplayConfig, DisplayStats, FireworksDisplay};
pub use scene::{Group, NodeId, SharedTexture, SpriteState, SpriteVisual, Texture};
pub use trail::Trail;
