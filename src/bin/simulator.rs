//! RPG Adventure Headless Balance Simulator
//!
//! Runs the real engine and scheduler without any presenter, with the
//! greedy autoplay policy spending currency between ticks.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --ticks N       Ticks to simulate (default: 3600 = 1 hour game time)
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --idle          Disable autoplay
//!   --verbose       Per-event logging
//!   --quiet         Only final summary

use rpg_adventure::simulator::{run_simulation, SimConfig};

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                config.ticks_per_run = parse_number(args.get(i), "--ticks");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number(args.get(i), "--seed"));
            }
            "--runs" => {
                i += 1;
                config.num_runs = parse_number(args.get(i), "--runs") as u32;
            }
            "--idle" => config.autoplay = false,
            "--verbose" => config.verbosity = 3,
            "--quiet" => config.verbosity = 0,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn parse_number(value: Option<&String>, flag: &str) -> u64 {
    match value.and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("{flag} requires a number");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "RPG Adventure Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --ticks N       Ticks to simulate (default: 3600 = 1 hour)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --idle          Disable autoplay\n\
         \x20 --verbose       Per-event logging\n\
         \x20 --quiet         Only final summary\n\
         \x20 --help, -h      Show this help"
    );
}

fn ticks_to_time(ticks: u64) -> String {
    let hours = ticks / 3600;
    let minutes = (ticks % 3600) / 60;
    if hours > 0 {
        format!("{hours}h{minutes:02}m")
    } else {
        format!("{minutes}m{:02}s", ticks % 60)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let mut config = parse_args();
    if config.verbosity >= 1 && config.num_runs > 1 {
        config.verbosity = config.verbosity.max(2);
    }

    if config.verbosity > 0 {
        eprintln!(
            "RPG Adventure Simulator: {} ticks ({}) x {} run(s), seed={:?}, autoplay={}",
            config.ticks_per_run,
            ticks_to_time(config.ticks_per_run),
            config.num_runs,
            config.seed,
            config.autoplay,
        );
    }

    let report = run_simulation(&config);
    if report.num_runs == 1 {
        if let Some(run) = report.run_stats.first() {
            println!("{run}");
        }
    }
    println!("{report}");
}
