//! End-to-end tests for a full display session.
//!
//! These drive the orchestrator the way a host loop would — one update
//! per frame against a fixed viewport — and validate the combined
//! launch/burst/prune behavior over hundreds of ticks.

use fireworks_sim_core::{BurstRecipe, DisplayConfig, FireworksDisplay, Texture};

fn session(seed: u64) -> FireworksDisplay {
    let config = DisplayConfig {
        seed: Some(seed),
        ..DisplayConfig::default()
    };
    let mut display = FireworksDisplay::new(config, Texture::load("linear-particle")).unwrap();
    display.resize(1280.0, 720.0);
    display
}

/// Timeline with the default config (launch every 360, gravity 0.03):
///
/// - frame 0: shell 1 launches, explodes on its 167th tick (frame 166)
///   into 64 + 64 + 3 × 18 = 182 burst particles.
/// - burst 1 dies out completely by frame ~477 (medium particles live
///   290 ticks after a 20-tick delay).
/// - frame 360: shell 2 launches, explodes at frame 526; its particles
///   are all still airborne at frame 599.
#[test]
fn six_hundred_frames_of_display() {
    let mut display = session(99);
    for frame in 0..600 {
        display.update(frame).unwrap();
    }

    let stats = display.stats();
    assert_eq!(stats.fires_launched, 2);
    assert_eq!(stats.bursts_spawned, 2);
    assert_eq!(stats.exploders_spawned, 2 * 182);

    // Both shells have popped and been pruned; every particle of the
    // first burst has aged out, the whole second burst is still live.
    assert_eq!(display.fire_count(), 0);
    assert_eq!(display.exploder_count(), 182);

    // Live particles shed trails, and each visible sprite appears in
    // the render snapshot.
    assert!(display.trail_count() > 0);
    assert!(display.sprites().len() >= display.trail_count());
}

#[test]
fn burst_particles_all_die_out() {
    let recipe = BurstRecipe {
        lg_explosion_amount: 4,
        sm_explosion_amount: 2,
        sm_fireworks_num: 2,
    };
    let config = DisplayConfig {
        // One launch only; nothing new enters the display afterwards.
        launch_interval: 100_000,
        recipe,
        seed: Some(5),
        ..DisplayConfig::default()
    };
    let mut display = FireworksDisplay::new(config, Texture::load("tex")).unwrap();
    display.resize(800.0, 600.0);

    for frame in 0..900 {
        display.update(frame).unwrap();
    }
    assert_eq!(display.stats().bursts_spawned, 1);
    assert_eq!(display.stats().exploders_spawned, 4 * 2 + 2 * 2);
    assert_eq!(display.fire_count(), 0);
    assert_eq!(display.exploder_count(), 0);
    assert_eq!(display.trail_count(), 0);
    assert!(display.sprites().is_empty());
    assert!(display.group().is_empty());
}

#[test]
fn seeded_sessions_replay_exactly() {
    let mut a = session(2026);
    let mut b = session(2026);
    for frame in 0..550 {
        a.update(frame).unwrap();
        b.update(frame).unwrap();
    }
    assert_eq!(a.stats(), b.stats());
    let sa = a.sprites();
    let sb = b.sprites();
    assert_eq!(sa.len(), sb.len());
    for (x, y) in sa.iter().zip(&sb) {
        assert_eq!(x.position, y.position);
        assert_eq!(x.hue, y.hue);
        assert_eq!(x.opacity, y.opacity);
        assert_eq!(x.scale, y.scale);
    }
}

#[test]
fn resize_moves_pending_shells_only() {
    let mut display = session(7);
    display.update(0).unwrap();
    let before = display.sprites()[0].position;
    display.resize(400.0, 300.0);
    let after = display.sprites()[0].position;
    // The shell re-picks its launch column for the new viewport.
    assert_eq!(after.y, -(300.0 / 2.0) - 10.0);
    assert!(after.x.abs() <= 100.0);
    assert_ne!(before, after);
}
