mod simulation;

use anyhow::{ensure, Result};
use clap::Parser;

use simulation::{
    CautionSpeed, LaneConfig, SimLane, DEFAULT_AWARENESS_GAP, DEFAULT_CAUTION_FACTOR,
    DEFAULT_LOOP_LENGTH, DEFAULT_SAFE_GAP, DEFAULT_WRAP_MARGIN,
};

#[derive(Parser)]
#[command(name = "lane_sim")]
#[command(about = "Single-lane car-following simulation")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Spawn this many random vehicles instead of the demo fleet
    #[arg(long)]
    vehicles: Option<usize>,

    /// RNG seed for reproducible random fleets
    #[arg(long)]
    seed: Option<u64>,

    /// Gap below which a follower drops to caution speed
    #[arg(long, default_value_t = DEFAULT_SAFE_GAP)]
    safe_gap: f32,

    /// Gap below which a follower raises its alert flag
    #[arg(long, default_value_t = DEFAULT_AWARENESS_GAP)]
    awareness_gap: f32,

    /// Caution speed as a fraction of each vehicle's base speed
    #[arg(long, default_value_t = DEFAULT_CAUTION_FACTOR)]
    caution_factor: f32,

    /// Loop length in lane units; 0 runs an open-ended lane
    #[arg(long, default_value_t = DEFAULT_LOOP_LENGTH)]
    loop_length: f32,

    /// Pause between per-second summaries, in milliseconds
    #[arg(long, default_value = "0")]
    throttle_ms: u64,

    /// Suppress per-second summaries, print the final state only
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    ensure!(
        cli.delta.is_finite() && cli.delta > 0.0,
        "delta must be a positive number of seconds, got {}",
        cli.delta
    );

    let config = LaneConfig {
        safe_gap: cli.safe_gap,
        awareness_gap: cli.awareness_gap,
        caution: CautionSpeed::FractionOfBase(cli.caution_factor),
        loop_length: (cli.loop_length > 0.0).then_some(cli.loop_length),
        wrap_margin: DEFAULT_WRAP_MARGIN,
    };

    let mut lane = match cli.seed {
        Some(seed) => SimLane::with_config_seeded(config, seed)?,
        None => SimLane::with_config(config)?,
    };
    match cli.vehicles {
        Some(count) => lane.populate_random(count)?,
        None => lane.populate_demo()?,
    }

    run_headless(&mut lane, &cli);
    lane.report_stats();
    Ok(())
}

/// Run the simulation loop, printing a summary once per simulated second
fn run_headless(lane: &mut SimLane, cli: &Cli) {
    println!("Running lane simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s", cli.ticks, cli.delta);

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / cli.delta).ceil() as u32;
    println!(
        "Running {} ticks per second (simulated time)",
        ticks_per_second
    );
    println!();

    if !cli.quiet {
        println!("Initial state:");
        lane.print_summary();
        lane.draw_lane();
        println!();
    }

    let mut tick = 0;
    while tick < cli.ticks {
        // Run ticks_per_second ticks (or remaining ticks if fewer)
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            lane.tick(cli.delta);
        }

        if !cli.quiet {
            // Print summary after running 1 second worth of ticks
            println!(
                "--- After tick {} ({:.1}s simulated time) ---",
                tick,
                tick as f32 * cli.delta
            );
            lane.print_summary();
            lane.draw_lane();
            println!();
        }

        if tick < cli.ticks && cli.throttle_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(cli.throttle_ms));
        }
    }

    println!("=== Final State ===");
    lane.print_summary();
    lane.draw_lane();
}
