use clap::Parser;
use fireworks_sim_core::{
    camera_distance, BurstRecipe, Degrees, DisplayConfig, FireworksDisplay, FireworksError,
    Texture,
};
use tracing_subscriber::EnvFilter;

/// Fireworks display demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "fireworks-demo")]
#[command(about = "Headless particle fireworks display simulation", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 1800)]
    frames: u64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// RNG seed for a reproducible display (omit for OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks between shell launches
    #[arg(short, long, default_value_t = 360)]
    launch_interval: u64,

    /// Large exploders per burst (mediums are paired 1:1)
    #[arg(long, default_value_t = 64)]
    lg_explosion_amount: u32,

    /// Exploders per satellite group
    #[arg(long, default_value_t = 18)]
    sm_explosion_amount: u32,

    /// Satellite groups per burst
    #[arg(long, default_value_t = 3)]
    sm_fireworks_num: u32,

    /// Camera vertical field of view in degrees (reporting only)
    #[arg(long, default_value_t = 50.0)]
    fov: f32,

    /// Report interval in frames (0 disables periodic reports)
    #[arg(short, long, default_value_t = 120)]
    report_interval: u64,
}

fn main() -> Result<(), FireworksError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = DisplayConfig {
        launch_interval: args.launch_interval,
        recipe: BurstRecipe {
            lg_explosion_amount: args.lg_explosion_amount,
            sm_explosion_amount: args.sm_explosion_amount,
            sm_fireworks_num: args.sm_fireworks_num,
        },
        seed: args.seed,
        ..DisplayConfig::default()
    };

    println!("=== Fireworks Display ===");
    println!(
        "Viewport: {:.0}x{:.0}, camera distance {:.0} at {} fov",
        args.width,
        args.height,
        camera_distance(args.height, Degrees::new(args.fov)),
        Degrees::new(args.fov),
    );
    println!(
        "Launch every {} ticks, burst recipe {}+{} large/medium, {} x {} satellites",
        config.launch_interval,
        config.recipe.lg_explosion_amount,
        config.recipe.lg_explosion_amount,
        config.recipe.sm_fireworks_num,
        config.recipe.sm_explosion_amount,
    );
    match args.seed {
        Some(seed) => println!("Seed: {seed}\n"),
        None => println!("Seed: OS entropy\n"),
    }

    let texture = Texture::load("linear-particle");
    let mut display = FireworksDisplay::new(config, texture)?;
    display.resize(args.width, args.height);

    for frame in 0..args.frames {
        display.update(frame)?;

        if args.report_interval > 0 && frame % args.report_interval == 0 {
            let stats = display.stats();
            println!(
                "frame {:>6}: {} shells, {} exploders, {} trails | launched {}, bursts {}",
                frame,
                display.fire_count(),
                display.exploder_count(),
                display.trail_count(),
                stats.fires_launched,
                stats.bursts_spawned,
            );
        }
    }

    let stats = display.stats();
    println!("\n=== Session Summary ===");
    println!("Frames simulated:  {}", args.frames);
    println!("Shells launched:   {}", stats.fires_launched);
    println!("Bursts spawned:    {}", stats.bursts_spawned);
    println!("Burst particles:   {}", stats.exploders_spawned);
    println!(
        "Still airborne:    {} exploders, {} trails",
        display.exploder_count(),
        display.trail_count(),
    );

    Ok(())
}
