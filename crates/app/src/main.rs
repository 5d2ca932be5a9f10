use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use showcase_core::{AnimatedCounter, CounterSpec, FrameComposer, ShowcaseConfig, StageSequencer};
use tracing_subscriber::EnvFilter;

fn main() -> showcase_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seconds } => run_demo(seconds),
        Commands::Export { output, cycles } => run_export(&output, cycles),
    }
}

fn run_demo(seconds: f32) -> showcase_core::Result<()> {
    tracing::info!(seconds, "starting demo loop");

    let config = ShowcaseConfig::default();
    let mut sequencer = StageSequencer::new(config.diagram.sequence()?);
    let composer = FrameComposer::standard();

    let counter_duration = config.counter.duration()?;
    let mut counters = vec![
        AnimatedCounter::new(
            CounterSpec::new(670.0, counter_duration).with_suffix("K pairs/sec"),
        )?,
        AnimatedCounter::new(CounterSpec::new(97.7, counter_duration).with_suffix("% F1"))?,
    ];
    let mut reveals = config.reveal.group(4)?;

    let started = Instant::now();
    sequencer.set_visible(true, started);
    for counter in &mut counters {
        counter.set_visible(true, started);
    }
    reveals.set_visible(true, started);

    let deadline = started + Duration::from_secs_f32(seconds.max(0.0));
    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }

        for change in sequencer.poll(now) {
            tracing::info!(
                index = change.index,
                stage = %change.key,
                elapsed = ?now.saturating_duration_since(started),
                "stage advanced"
            );
        }

        let snapshot = composer.compose(&sequencer, now.saturating_duration_since(started));
        composer.draw(&snapshot)?;

        std::thread::sleep(Duration::from_millis(50));
    }

    let now = Instant::now();
    sequencer.set_visible(false, now);
    for counter in &counters {
        tracing::info!(value = %counter.display(now), "counter settled");
    }
    tracing::info!(
        stage = %sequencer.current_stage().key,
        reveals_settled = reveals.is_settled(now),
        "demo finished"
    );
    Ok(())
}

fn run_export(output: &PathBuf, cycles: u32) -> showcase_core::Result<()> {
    tracing::info!(?output, cycles, "exporting stage schedule");

    let config = ShowcaseConfig::default();
    let json = config.diagram.sequence()?.schedule_json(cycles)?;
    std::fs::write(output, json)?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Showcase animation demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the pipeline diagram animation in a timed console loop.
    Demo {
        /// How long to run before stopping the sequencer.
        #[arg(short, long, default_value_t = 10.0)]
        seconds: f32,
    },
    /// Precompute the stage schedule and write it out as JSON.
    Export {
        /// Output path for the generated schedule.
        output: PathBuf,
        /// Number of full stage cycles to cover.
        #[arg(short, long, default_value_t = 1)]
        cycles: u32,
    },
}
