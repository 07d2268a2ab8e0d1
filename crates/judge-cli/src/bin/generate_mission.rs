//! CLI tool to synthesize a mission snapshot fixture.
//!
//! Generates a mission, fly zone, obstacles, and one simulated flight per
//! team, then writes the snapshot JSON for evaluate_mission to consume.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use judge_cli::sim::{generate_snapshot, SimOptions};

/// Generate a synthetic mission snapshot with simulated team flights
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output JSON path
    #[arg(long, default_value = "mission_snapshot.json")]
    output: PathBuf,

    /// Home position latitude (default: Webster Field)
    #[arg(long, default_value_t = 38.1478)]
    lat: f64,

    /// Home position longitude (default: Webster Field)
    #[arg(long, default_value_t = -76.4275)]
    lon: f64,

    /// Comma-separated team usernames
    #[arg(long, value_delimiter = ',', default_value = "team_alpha,team_bravo")]
    teams: Vec<String>,

    /// Number of mission waypoints
    #[arg(long, default_value_t = 6)]
    waypoints: u32,

    /// Telemetry sample rate in Hz
    #[arg(long, default_value_t = 1.0)]
    rate: f64,

    /// RNG seed, so fixtures can be reproduced
    #[arg(long, default_value_t = 427)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = SimOptions {
        home_lat: args.lat,
        home_lon: args.lon,
        teams: args.teams.clone(),
        waypoint_count: args.waypoints,
        telemetry_rate_hz: args.rate,
        seed: args.seed,
    };

    println!("Generating mission snapshot");
    println!("  Home: ({}, {})", options.home_lat, options.home_lon);
    println!("  Teams: {}", options.teams.join(", "));
    println!(
        "  Waypoints: {}, Telemetry rate: {}Hz, Seed: {}",
        options.waypoint_count, options.telemetry_rate_hz, options.seed
    );

    let snapshot = generate_snapshot(&options);

    let total_samples: usize = snapshot.logs.values().map(|logs| logs.telemetry.len()).sum();
    let rendered = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&args.output, rendered)
        .with_context(|| format!("writing snapshot {}", args.output.display()))?;

    println!();
    println!(
        "Wrote {} users ({} telemetry samples) to {}",
        snapshot.users.len(),
        total_samples,
        args.output.display()
    );

    Ok(())
}
