//! dotpath CLI
//!
//! Drive the waypoint marker from a click scenario, from stdin in real
//! time, or along the autoplay tour.

mod config;
mod report;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::DotpathConfig;
use dotpath_animation::{run_tour, FrameSource, Headless, Realtime, Sequencer, SessionState};
use dotpath_core::Stage;
use report::RunReport;
use scenario::Scenario;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotpath")]
#[command(author, version, about = "Glide a marker along clicked waypoints", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a click scenario on a virtual clock and print the report
    Run {
        /// Config file (defaults to ./dotpath.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scenario JSON; without one every waypoint after the first is clicked
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Write the report to this relative path instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Click waypoints in real time by typing their names on stdin
    Live {
        /// Config file (defaults to ./dotpath.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play the autoplay tour on a virtual clock
    Tour {
        /// Config file (defaults to ./dotpath.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the report to this relative path instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Write a default dotpath.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            scenario,
            report,
        } => cmd_run(config.as_deref(), scenario.as_deref(), report.as_deref()),
        Commands::Live { config } => cmd_live(config.as_deref()),
        Commands::Tour { config, report } => cmd_tour(config.as_deref(), report.as_deref()),
        Commands::Init { path } => cmd_init(&path),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")
}

fn load_config(path: Option<&Path>) -> Result<DotpathConfig> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    DotpathConfig::load(path, &cwd)
}

fn emit(report: &RunReport, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            report.write_to_path(path)?;
            info!("Report written to {}", path.display());
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }
    Ok(())
}

fn cmd_run(config: Option<&Path>, scenario: Option<&Path>, report: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let checkpoints = &config.stage.checkpoints;
    let mut stage = Stage::with_waypoints(checkpoints).without_trace();

    let scenario = match scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::visit_all(&stage),
    };

    let mut host = Headless::new(config.animation.frame_interval_ms)?;
    let clicks = scenario.schedule(&stage, &mut host)?;
    info!(clicks, waypoints = checkpoints.len(), "Running scenario");

    let mut sequencer = Sequencer::new(config.leg(), SessionState::from_checkpoints(checkpoints))?;
    let result = runtime()?.block_on(sequencer.run(&mut host, &mut stage))?;

    let out = RunReport::from_sequencer(&result, host.now(), stage.marker_offset());
    emit(&out, report)
}

fn cmd_live(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let checkpoints = config.stage.checkpoints.clone();
    let mut stage = Stage::with_waypoints(&checkpoints).without_trace();
    let names = stage.names();
    let background = stage.background();

    info!(
        "Type a waypoint name (dot1..dot{}) per line, `bg` for the background; EOF to quit",
        checkpoints.len()
    );

    let result = runtime()?.block_on(async {
        let (mut host, clicks) = Realtime::new(config.animation.frame_interval_ms)?;

        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let name = line.trim();
                if name.is_empty() {
                    continue;
                }
                let target = match name {
                    "bg" => background,
                    _ => names.get(name).copied().unwrap_or_else(|| {
                        warn!(name, "unknown element, clicking background");
                        background
                    }),
                };
                if !clicks.click(target) {
                    break;
                }
            }
        });

        let mut sequencer =
            Sequencer::new(config.leg(), SessionState::from_checkpoints(&checkpoints))?;
        let result = sequencer.run(&mut host, &mut stage).await?;
        anyhow::Ok((result, host.now()))
    })?;

    let (result, elapsed) = result;
    let out = RunReport::from_sequencer(&result, elapsed, stage.marker_offset());
    emit(&out, None)
}

fn cmd_tour(config: Option<&Path>, report: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let checkpoints = &config.stage.checkpoints;
    let mut stage = Stage::new().without_trace();
    let mut host = Headless::new(config.animation.frame_interval_ms)?;

    info!(legs = checkpoints.len().saturating_sub(1), "Starting tour");
    let legs = runtime()?.block_on(run_tour(&mut host, &mut stage, checkpoints, config.tour()))?;

    let out = RunReport::from_legs(&legs, 0, host.now(), stage.marker_offset());
    emit(&out, report)
}

fn cmd_init(path: &Path) -> Result<()> {
    let written = DotpathConfig::init(path)?;
    info!("Created {}", written.display());
    Ok(())
}
