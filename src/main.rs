use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use parking_sim::simulation::{
    SimConfig, SimWorld, DEFAULT_CAPACITY, DEFAULT_DURATION_RANGE, DEFAULT_START_TIME,
};
use parking_sim::telemetry::{JsonLinesSink, LogSink, TelemetrySink};

#[derive(Parser)]
#[command(name = "parking_sim")]
#[command(about = "Parking lot occupancy simulation with periodic telemetry")]
struct Cli {
    /// Number of simulated minutes to run
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of parking spots
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Entrance spot indices, comma separated
    #[arg(long, value_delimiter = ',', default_value = "0,100,200")]
    entrances: Vec<usize>,

    /// Simulated time of day to start at
    #[arg(long, default_value = DEFAULT_START_TIME)]
    start_time: String,

    /// Shortest stay in minutes
    #[arg(long, default_value_t = DEFAULT_DURATION_RANGE.0)]
    min_stay: i32,

    /// Longest stay in minutes
    #[arg(long, default_value_t = DEFAULT_DURATION_RANGE.1)]
    max_stay: i32,

    /// Publish a report every N ticks
    #[arg(long, default_value = "5")]
    publish_every: u64,

    /// Simulated minutes per real second (0 runs as fast as possible)
    #[arg(long, default_value = "0")]
    speed: u32,

    /// Write reports as JSON lines to this file instead of stdout
    #[arg(long, conflicts_with = "log_only")]
    output: Option<PathBuf>,

    /// Log a one-line summary per report instead of writing JSON
    #[arg(long)]
    log_only: bool,

    /// Don't print the occupancy map
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    /// Stdout carries the JSON stream unless reports go elsewhere
    fn streams_to_stdout(&self) -> bool {
        self.output.is_none() && !self.log_only
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,parking_sim=info"),
    )
    .init();

    let cli = Cli::parse();

    let config = SimConfig {
        capacity: cli.capacity,
        entrances: cli.entrances.clone(),
        start_time: cli.start_time.clone(),
        duration: (cli.min_stay, cli.max_stay),
        publish_every: cli.publish_every,
        seed: cli.seed,
    };
    let mut world = SimWorld::from_config(&config)?;

    let mut sink: Box<dyn TelemetrySink> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None if cli.log_only => Box::new(LogSink),
        None => Box::new(JsonLinesSink::new(BufWriter::new(io::stdout()))),
    };

    run_headless(&mut world, sink.as_mut(), &cli)
}

/// Run the simulation without any UI
fn run_headless(world: &mut SimWorld, sink: &mut dyn TelemetrySink, cli: &Cli) -> Result<()> {
    info!(
        "Running parking simulation: {} ticks, {} spots, entrances {:?}",
        cli.ticks, cli.capacity, cli.entrances
    );
    sink.start(&world.session_start())?;

    let pause = match cli.speed {
        0 => None,
        speed => Some(Duration::from_secs_f64(1.0 / f64::from(speed))),
    };

    let show_map = !cli.quiet && !cli.streams_to_stdout();
    let mut published = 0u64;
    for _ in 0..cli.ticks {
        let step = world.step();

        if step.should_publish {
            sink.publish(&step.report)?;
            published += 1;
            if show_map {
                println!("\n{} {}", step.report.time, "-".repeat(48));
                world.draw_map();
                world.print_summary();
            }
        }

        if let Some(pause) = pause {
            std::thread::sleep(pause);
        }
    }

    info!("=== SIMULATION COMPLETE ===");
    info!("Final time: {}", world.clock);
    info!("Total arrivals: {}", world.total_arrivals);
    info!("Total rejected: {}", world.total_rejected);
    info!("Total departures: {}", world.total_departures);
    info!(
        "Occupied spots: {}/{}",
        world.lot.occupied_count(),
        world.lot.capacity()
    );
    info!("Reports published: {}", published);
    Ok(())
}
