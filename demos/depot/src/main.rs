//! depot — run a box delivery simulation headless.
//!
//! Drives the controller with fixed-length frames the way a renderer would,
//! then prints a per-traveller summary, or the full timelines as JSON with
//! `--json`.
//!
//! ```text
//! depot --boxes 12 --travellers 3 --bays 1
//! depot --config depot.json --json > timelines.json
//! RUST_LOG=ds_sim=debug depot --boxes 2
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ds_agent::{Activity, TravellerStore};
use ds_core::{Layout, SimConfig, SimTime, TravellerId};
use ds_sim::{Fault, SimBuilder, SimObserver};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "depot", version, about = "Box delivery simulation")]
struct Cli {
    /// JSON file with `sim` (SimConfig) and `layout` sections; both optional
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting boxes
    #[arg(long)]
    boxes: Option<u32>,

    /// Starting travellers
    #[arg(long)]
    travellers: Option<u32>,

    /// Seconds per leg
    #[arg(long)]
    leg: Option<f64>,

    /// Seconds of handling at pickup and delivery
    #[arg(long)]
    dwell: Option<f64>,

    /// Seconds between a delivery and the next pickup leg
    #[arg(long)]
    return_delay: Option<f64>,

    /// Concurrent pickups allowed at the pickup point
    #[arg(long)]
    bays: Option<u32>,

    /// Simulated seconds per wall second
    #[arg(long)]
    scale: Option<f64>,

    /// Wall seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame: f64,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 3_600.0)]
    max_time: f64,

    /// Print every timeline as JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

/// Shape of the `--config` file.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
struct DepotFile {
    sim:    SimConfig,
    layout: Layout,
}

impl Cli {
    /// Reject pacing values that would leave the frame loop unable to finish.
    fn check(&self) -> Result<()> {
        ensure!(
            self.frame.is_finite() && self.frame > 0.0,
            "--frame must be a positive number of seconds, got {}",
            self.frame
        );
        ensure!(
            self.max_time.is_finite() && self.max_time >= 0.0,
            "--max-time must be a finite number of seconds, got {}",
            self.max_time
        );
        Ok(())
    }

    fn load(&self) -> Result<DepotFile> {
        let mut file = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => DepotFile::default(),
        };

        let sim = &mut file.sim;
        if let Some(v) = self.boxes        { sim.starting_boxes = v; }
        if let Some(v) = self.travellers   { sim.starting_travellers = v; }
        if let Some(v) = self.leg          { sim.leg_duration = v; }
        if let Some(v) = self.dwell        { sim.dwell_delay = v; }
        if let Some(v) = self.return_delay { sim.return_delay = v; }
        if let Some(v) = self.scale        { sim.time_scale = v; }
        if self.bays.is_some()             { sim.pickup_bays = self.bays; }
        Ok(file)
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    journeys:  usize,
    faults:    usize,
    completed: Option<SimTime>,
}

impl SimObserver for Progress {
    fn on_journey_complete(&mut self, id: TravellerId, deliveries: u32, now: SimTime) {
        self.journeys += 1;
        info!(traveller = %id, deliveries, %now, "journey complete");
    }

    fn on_fault(&mut self, fault: &Fault) {
        self.faults += 1;
        tracing::warn!(time = %fault.time, error = %fault.error, "fault");
    }

    fn on_complete(&mut self, now: SimTime) {
        self.completed = Some(now);
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_summary(store: &TravellerStore, now: SimTime) {
    let columns: Vec<Activity> = Activity::ALL
        .into_iter()
        .filter(|a| !matches!(a, Activity::Starting | Activity::Finished))
        .collect();

    print!("{:<14} {:>6} {:>9}", "Traveller", "Boxes", "Finished");
    for activity in &columns {
        print!(" {:>18}", activity.to_string());
    }
    println!();
    println!("{}", "-".repeat(31 + 19 * columns.len()));

    for traveller in store.iter() {
        let finished = match traveller.activity() {
            Activity::Finished => traveller
                .timeline()
                .segments()
                .last()
                .map(|s| format!("{:.2}", s.display_end(now).secs()))
                .unwrap_or_default(),
            _ => "-".to_string(),
        };
        print!("{:<14} {:>6} {:>9}", traveller.name, traveller.deliveries(), finished);
        for &activity in &columns {
            print!(" {:>18.2}", traveller.timeline().time_in(activity, now));
        }
        println!();
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.check()?;
    let DepotFile { sim: config, layout } = cli.load()?;

    let mut sim = SimBuilder::new(config).layout(layout).build()?;
    let mut progress = Progress::default();

    let mut frames = 0u64;
    while progress.completed.is_none() && sim.current_time().secs() < cli.max_time {
        sim.tick(cli.frame, &mut progress)?;
        frames += 1;
        if !sim.is_running() || sim.time_scale() == 0.0 {
            anyhow::bail!("simulation cannot advance with time scale {}", sim.time_scale());
        }
    }

    let now = sim.current_time();
    match progress.completed {
        Some(at) => info!(%at, frames, journeys = progress.journeys, "run complete"),
        None     => info!(%now, frames, delivered = sim.delivered().len(), "time limit reached"),
    }
    if progress.faults > 0 {
        info!(faults = progress.faults, "run reported faults");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sim.travellers())?);
    } else {
        print_summary(sim.store(), now);
        println!();
        println!(
            "Delivered {}/{} boxes by {}",
            sim.delivered().len(),
            sim.total_boxes(),
            progress.completed.unwrap_or(now)
        );
    }
    Ok(())
}
