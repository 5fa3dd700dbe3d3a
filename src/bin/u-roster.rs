use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use u_roster::{RosterConfig, RosterScheduler, ScheduleJob, ScheduleRequest};

/// Assigns a day of timed routes to drivers.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file with `drivers`, `locations`, `travel_times` and `routes`
    input: PathBuf,
    /// JSON run configuration; defaults apply to missing fields
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,
    /// Wall-clock limit in milliseconds
    #[arg(short, long)]
    timeout: Option<u64>,
    /// Pretty-print the schedule
    #[arg(short, long)]
    pretty: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => RosterConfig::from_path(path)?,
        None => RosterConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(millis) = cli.timeout {
        config = config.with_timeout(Duration::from_millis(millis));
    }
    config.validate()?;

    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;
    let request: ScheduleRequest = serde_json::from_str(&input)
        .with_context(|| format!("malformed input in {}", cli.input.display()))?;

    // KPIs are logged by the scheduler once the roster is built.
    let schedule = ScheduleJob::spawn(RosterScheduler::new(config), request)
        .join()
        .await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&schedule)?
    } else {
        serde_json::to_string(&schedule)?
    };
    println!("{json}");
    Ok(())
}
