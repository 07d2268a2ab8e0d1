//! CLI tool to score recorded team logs against the active mission.
//!
//! Reads a snapshot JSON file, runs the batch evaluation, and writes the
//! per-team report as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use judge_core::{evaluate_teams, MissionSnapshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Evaluate a mission snapshot and emit the per-team scoring report
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Snapshot JSON: mission, zones, obstacles, and per-team logs
    #[arg(long)]
    input: PathBuf,

    /// Report output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the report JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("judge_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading snapshot {}", args.input.display()))?;
    let mut snapshot: MissionSnapshot =
        serde_json::from_str(&raw).context("parsing snapshot JSON")?;
    snapshot.normalize();

    if let Some(mission) = &snapshot.mission {
        for problem in mission.validate() {
            tracing::warn!("Mission validation: {}", problem);
        }
    }
    for zone in &snapshot.fly_zones {
        for problem in zone.validate() {
            tracing::warn!("Fly zone validation: {}", problem);
        }
    }

    let users = snapshot.users.clone();
    let report = evaluate_teams(&snapshot, &users)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("writing report {}", path.display()))?;
            println!("Wrote report for {} teams to {}", report.len(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
