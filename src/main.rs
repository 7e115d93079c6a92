use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use nasch_lights::simulation::{
    self, vehicles_for_density, SimConfig, SimWorld, SweepSpec, DEFAULT_DENSITY,
    DEFAULT_DETECTION_RADIUS, DEFAULT_HOLD_TICKS, DEFAULT_LIGHT_SPACING, DEFAULT_MAX_SPEED,
    DEFAULT_RANDOMISATION_P, DEFAULT_TRACK_LENGTH, DEFAULT_WARMUP_FRACTION,
};

#[derive(Parser)]
#[command(name = "nasch_lights")]
#[command(about = "Ring-road traffic simulation with reactive street lights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single simulation in the terminal
    Run(RunArgs),
    /// Run a batch over densities and max speeds
    Sweep(SweepArgs),
}

/// Parameters shared by every run
#[derive(Args)]
struct SimArgs {
    /// Number of cells in the circular track
    #[arg(long, default_value_t = DEFAULT_TRACK_LENGTH)]
    track_length: usize,

    /// Cells between street lights
    #[arg(long, default_value_t = DEFAULT_LIGHT_SPACING)]
    light_spacing: usize,

    /// Distance within which a light detects a vehicle
    #[arg(long, default_value_t = DEFAULT_DETECTION_RADIUS)]
    detection_radius: usize,

    /// Ticks a light stays on after losing detection
    #[arg(long, default_value_t = DEFAULT_HOLD_TICKS)]
    hold_ticks: u32,

    /// Probability of random slow-down per vehicle per tick
    #[arg(long, default_value_t = DEFAULT_RANDOMISATION_P)]
    randomisation_p: f64,

    /// Velocity every vehicle starts with
    #[arg(long, default_value = "0")]
    initial_velocity: u32,

    /// Seed for the random source
    #[arg(long, default_value = "0")]
    seed: u64,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Number of vehicles
    #[arg(long, default_value_t = vehicles_for_density(DEFAULT_TRACK_LENGTH, DEFAULT_DENSITY))]
    vehicles: usize,

    /// Vehicle density per cell; overrides --vehicles
    #[arg(long)]
    density: Option<f64>,

    /// Maximum speed in cells per tick
    #[arg(long, default_value_t = DEFAULT_MAX_SPEED)]
    max_speed: u32,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "100")]
    ticks: u64,

    /// Print a summary every this many ticks
    #[arg(long, default_value = "10")]
    report_every: u64,

    /// Draw the track with every summary
    #[arg(long)]
    draw: bool,
}

#[derive(Args)]
struct SweepArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Densities to try
    #[arg(long, value_delimiter = ',', default_value = "0.05,0.1,0.2,0.3,0.4")]
    densities: Vec<f64>,

    /// Max speeds to try
    #[arg(long, value_delimiter = ',', default_value = "1,3,5")]
    max_speeds: Vec<u32>,

    /// Runs per grid point
    #[arg(long, default_value = "5")]
    iterations: u32,

    /// Ticks per run
    #[arg(long, default_value = "1000")]
    steps: u64,

    /// Fraction of each run discarded before averaging
    #[arg(long, default_value_t = DEFAULT_WARMUP_FRACTION)]
    warmup: f64,
}

impl SimArgs {
    fn to_config(&self, num_vehicles: usize, vmax: u32) -> SimConfig {
        SimConfig {
            num_vehicles,
            vmax,
            track_length: self.track_length,
            light_spacing: self.light_spacing,
            detection_radius: self.detection_radius,
            hold_ticks: self.hold_ticks,
            randomisation_p: self.randomisation_p,
            initial_velocity: self.initial_velocity,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_headless(&args),
        Command::Sweep(args) => run_sweep(&args),
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(args: &RunArgs) -> Result<()> {
    let num_vehicles = match args.density {
        Some(density) => vehicles_for_density(args.sim.track_length, density),
        None => args.vehicles,
    };
    let config = args.sim.to_config(num_vehicles, args.max_speed);
    let mut world = SimWorld::initialize(config).context("Failed to build simulation world")?;

    println!("Initial state:");
    world.print_summary();
    if args.draw {
        world.draw_track();
    }
    println!();

    let report_every = args.report_every.max(1);
    while world.tick() < args.ticks {
        let ticks_to_run = report_every.min(args.ticks - world.tick());
        world.run(ticks_to_run);

        println!("--- After tick {} ---", world.tick());
        world.print_summary();
        if args.draw {
            world.draw_track();
        }
        println!();
    }

    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", world.tick());
    info!("Vehicles: {}", world.vehicles().len());
    info!("Active lights: {}", world.active_light_count());
    Ok(())
}

fn run_sweep(args: &SweepArgs) -> Result<()> {
    let spec = SweepSpec {
        base: args.sim.to_config(0, DEFAULT_MAX_SPEED),
        densities: args.densities.clone(),
        max_speeds: args.max_speeds.clone(),
        iterations: args.iterations,
        max_steps: args.steps,
        warmup_fraction: args.warmup,
    };
    let rows = simulation::run_sweep(&spec).context("Sweep failed")?;

    println!(
        "{:>8} {:>5} {:>5} {:>10} {:>8} {:>10}",
        "density", "vmax", "iter", "avg_speed", "power", "perceived"
    );
    for row in &rows {
        println!(
            "{:>8.3} {:>5} {:>5} {:>10.3} {:>8.3} {:>10.3}",
            row.density,
            row.vmax,
            row.iteration,
            row.average_speed,
            row.average_power,
            row.average_perceived_lighting
        );
    }
    info!("Sweep complete: {} runs", rows.len());
    Ok(())
}
