use clap::{Parser, Subcommand};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use voxshot_input::Intent;
use voxshot_kernel::Session;
use voxshot_naming::NameClient;
use voxshot_world::worldgen;

#[derive(Parser)]
#[command(name = "voxshot-cli", about = "Headless driver for the voxshot simulation core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate version and generated-world stats
    Info,
    /// Run a scripted headless session: walk forward, jump, shoot the terrain
    Run {
        /// Number of simulation ticks
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Tick rate in Hz
        #[arg(short, long, default_value = "60")]
        rate: u32,
        /// Print the full end-of-run snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Call the name-generation service once and print the result
    Name {
        /// Base URL of the text-generation service
        #[arg(long, default_value = "http://localhost:8080")]
        base_url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("voxshot-cli v{}", env!("CARGO_PKG_VERSION"));
            let blocks = worldgen::generate(worldgen::WORLD_SIZE);
            println!(
                "world: size={}, blocks={} (3*{0}^2 + 7)",
                worldgen::WORLD_SIZE,
                blocks.len()
            );
        }
        Commands::Run { ticks, rate, json } => run_scripted(ticks, rate, json)?,
        Commands::Name { base_url } => {
            // The naming call is the only async edge of the system; drive it
            // on a throwaway current-thread runtime, outside any tick.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let client = NameClient::from_env(base_url)?;
            let name = runtime.block_on(client.generate_or_fallback());
            println!("world name: {name}");
        }
    }

    Ok(())
}

/// Scripted stand-in for the input and presentation layers: holds forward,
/// aims slightly downward, jumps periodically, and keeps the trigger held
/// so the fire cooldown is observable.
fn run_scripted(ticks: u64, rate: u32, json: bool) -> anyhow::Result<()> {
    anyhow::ensure!(rate > 0, "tick rate must be positive");
    let dt = 1.0 / rate as f32;

    let mut session = Session::new();
    session.camera.turn(0.0, -0.5);
    session.controls.set(Intent::Forward, true);

    // Synthetic monotonic timeline so the run is reproducible regardless of
    // wall-clock speed.
    let start = Instant::now();

    let mut destroyed = 0usize;
    let mut placed = 0usize;
    for i in 0..ticks {
        session.controls.set(Intent::Jump, i % 120 < 10);
        session.controls.set(Intent::Fire, true);

        session.tick(dt, start + Duration::from_secs_f64(i as f64 * f64::from(dt)));

        for event in session.drain_events() {
            match event {
                voxshot_world::WorldEvent::Removed { id, .. } => {
                    tracing::debug!(%id, tick = i, "destroyed");
                    destroyed += 1;
                }
                voxshot_world::WorldEvent::Placed { .. } => placed += 1,
            }
        }
    }

    let snap = session.snapshot();
    println!(
        "ran {ticks} ticks @ {rate} Hz: player at ({:.2}, {:.2}, {:.2}), {} blocks left, {destroyed} destroyed, {placed} placed",
        snap.player.position.x,
        snap.player.position.y,
        snap.player.position.z,
        snap.blocks.len(),
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    }
    Ok(())
}
