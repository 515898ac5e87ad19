//! partner-replay: drive the virtual partner engine from recorded telemetry.
//!
//! Usage:
//!   partner-replay plan --config partner.json --ride-length 20000 --seed 7
//!   partner-replay run --config partner.json --telemetry ride.json --ride-length 20000

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use partner_core::config::EngineConfig;
use partner_core::enums::EngineKind;
use partner_core::types::Telemetry;
use partner_engine::loader::{load_route, read_json};
use partner_engine::VirtualPartnerEngine;
use partner_pacing::AttackPlan;

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "plan" => cmd_plan(&args[2..]),
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout carries only JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    eprintln!(
        "partner-replay: virtual partner replay tool\n\
         \n\
         Commands:\n\
         \n\
         plan      Print the attack plan generated for a configuration\n\
         \n\
           --config <path>       Engine configuration (JSON)\n\
           --ride-length <m>     Ride length in meters\n\
           --seed <N>            Override the configured seed (optional)\n\
         \n\
         run       Step the engine once per telemetry record\n\
         \n\
           --config <path>       Engine configuration (JSON)\n\
           --telemetry <path>    Array of telemetry records (JSON)\n\
           --ride-length <m>     Ride length in meters\n\
           --route <path>        Route points for partner coordinates (optional)\n\
         \n\
         Examples:\n\
         \n\
           partner-replay plan --config partner.json --ride-length 20000 --seed 7\n\
           partner-replay run --config partner.json --telemetry ride.json --ride-length 20000\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    parse_value(args, flag).map(PathBuf::from)
}

fn require_path(args: &[String], flag: &str) -> PathBuf {
    match parse_path(args, flag) {
        Some(p) => p,
        None => {
            eprintln!("Error: {flag} <path> is required");
            process::exit(1);
        }
    }
}

fn require_ride_length(args: &[String]) -> f64 {
    match parse_value(args, "--ride-length").map(str::parse::<f64>) {
        Some(Ok(m)) => m,
        Some(Err(e)) => {
            eprintln!("Error: invalid --ride-length: {e}");
            process::exit(1);
        }
        None => {
            eprintln!("Error: --ride-length <m> is required");
            process::exit(1);
        }
    }
}

fn load_config(path: &Path) -> EngineConfig {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: cannot read {}: {e}", path.display());
            process::exit(1);
        }
    };
    match EngineConfig::from_json(&text) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: cannot parse {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Plan command ---

fn cmd_plan(args: &[String]) {
    let mut config = load_config(&require_path(args, "--config"));
    let ride_length_m = require_ride_length(args);

    if let Some(seed) = parse_value(args, "--seed") {
        match seed.parse::<u64>() {
            Ok(s) => config.seed = Some(s),
            Err(e) => {
                eprintln!("Error: invalid --seed: {e}");
                process::exit(1);
            }
        }
    }
    config.kind = EngineKind::AlgorithmicAi;
    config.enabled = true;

    let mut engine = VirtualPartnerEngine::new();
    if let Err(e) = engine.initialize(config, ride_length_m) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    match engine.attack_plan() {
        Some(plan) => print_plan(plan),
        None => {
            eprintln!("Error: no attack plan was generated");
            process::exit(1);
        }
    }
}

fn print_plan(plan: &AttackPlan) {
    info!(
        attacks = plan.len(),
        warmup_end_m = plan.warmup_end_m(),
        cooldown_start_m = plan.cooldown_start_m(),
        "attack plan"
    );
    match serde_json::to_string_pretty(plan) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: cannot encode plan: {e}");
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let config = load_config(&require_path(args, "--config"));
    let telemetry_path = require_path(args, "--telemetry");
    let ride_length_m = require_ride_length(args);

    let ticks: Vec<Telemetry> = match read_json(&telemetry_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut engine = VirtualPartnerEngine::new();
    if let Some(route_path) = parse_path(args, "--route") {
        match load_route(&route_path) {
            Ok(route) => engine = engine.with_route(route),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }

    // A failed initialization still replays: every snapshot is a passthrough.
    if let Err(e) = engine.initialize(config, ride_length_m) {
        warn!(error = %e, "replaying with the partner disabled");
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for tick in &ticks {
        let snapshot = engine.step(tick);
        let written = serde_json::to_string(&snapshot)
            .map_err(io::Error::from)
            .and_then(|line| writeln!(out, "{line}"));
        if let Err(e) = written {
            eprintln!("Error: cannot write snapshot: {e}");
            process::exit(1);
        }
    }
    if let Err(e) = out.flush() {
        eprintln!("Error: cannot write snapshot: {e}");
        process::exit(1);
    }

    engine.stop();
    info!(ticks = ticks.len(), "replay complete");
}
