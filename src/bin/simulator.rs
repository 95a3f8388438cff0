//! Estate Headless Market Simulator
//!
//! Runs the market engine month by month without any UI and prints aggregate
//! statistics per property category. Uses the same `MarketEngine::advance`
//! as the game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --months N      Months to simulate per run (default: 24)
//!   --seed N        RNG seed (default: 42)
//!   --random        Seed from entropy instead of --seed
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --monte-carlo N N runs of 120 months each, quiet
//!   --frozen        Hold macro conditions fixed
//!   --csv FILE      Write the first run's history as CSV
//!   --quiet         Only errors and the final report
//!   --verbose       Per-month logging

use env_logger::Env;
use estate::market::{latest_readings, MarketConfig};
use estate::property::format_currency;
use estate::simulator::{run_simulation, write_history_csv, SimConfig};
use estate::EstateError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

// ── CLI Configuration ────────────────────────────────────────────────

struct CliConfig {
    sim: SimConfig,
    csv_path: Option<String>,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    value
        .ok_or_else(|| format!("{flag} requires a value"))?
        .parse()
        .map_err(|_| format!("{flag} requires a number"))
}

fn parse_args() -> Result<CliConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = CliConfig {
        sim: SimConfig::default(),
        csv_path: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--months" => {
                i += 1;
                config.sim.months = parse_number("--months", args.get(i))?;
            }
            "--seed" => {
                i += 1;
                config.sim.seed = Some(parse_number("--seed", args.get(i))?);
            }
            "--random" => config.sim.seed = None,
            "--runs" => {
                i += 1;
                config.sim.runs = parse_number("--runs", args.get(i))?;
            }
            "--monte-carlo" => {
                i += 1;
                let runs = parse_number("--monte-carlo", args.get(i))?;
                config.sim = SimConfig {
                    seed: config.sim.seed,
                    market: config.sim.market.clone(),
                    ..SimConfig::monte_carlo(runs)
                };
            }
            "--frozen" => config.sim.market = MarketConfig::frozen(),
            "--csv" => {
                i += 1;
                let path = args.get(i).ok_or("--csv requires a file path")?;
                config.csv_path = Some(path.clone());
            }
            "--quiet" => config.sim.verbosity = 0,
            "--verbose" => config.sim.verbosity = 2,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(config)
}

fn print_usage() {
    eprintln!(
        "Estate Headless Market Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --months N      Months to simulate per run (default: 24)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --random        Seed from entropy instead of --seed\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --monte-carlo N N runs of 120 months each, quiet\n\
         \x20 --frozen        Hold macro conditions fixed\n\
         \x20 --csv FILE      Write the first run's history as CSV\n\
         \x20 --quiet         Only errors and the final report\n\
         \x20 --verbose       Per-month logging\n\
         \x20 --help, -h      Show this help"
    );
}

fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn,estate::simulator=info",
        _ => "info",
    }
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let config = match parse_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let env = Env::default().default_filter_or(log_filter(config.sim.verbosity));
    env_logger::Builder::from_env(env).init();

    log::info!(
        "simulating {} month(s) x {} run(s), seed={}",
        config.sim.months,
        config.sim.runs,
        config
            .sim
            .seed
            .map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );

    let report = run_simulation(&config.sim);
    println!("{report}");

    if let Some(first) = report.runs.first() {
        println!("── LATEST MONTH (run 1) ─────────────────────────────────────────");
        for reading in latest_readings(&first.history) {
            println!(
                "  {:<17} {:>14}/unit  cap {:>5.2}%  {}",
                reading.snapshot.category.name(),
                format_currency(reading.snapshot.avg_price_per_unit),
                reading.snapshot.avg_cap_rate,
                reading.temperature
            );
        }
        if let Some(conditions) = first.final_conditions {
            println!(
                "  Economy: {} trend, rates {:.2}%, unemployment {:.2}%",
                conditions.trend.name(),
                conditions.interest_rate,
                conditions.unemployment
            );
        }

        if let Some(path) = &config.csv_path {
            let written = File::create(path)
                .map_err(EstateError::from)
                .and_then(|file| {
                    let mut out = BufWriter::new(file);
                    write_history_csv(&first.history, &mut out)?;
                    out.flush()?;
                    Ok(())
                });
            if let Err(e) = written {
                eprintln!("Failed to write {path}: {e}");
                return ExitCode::FAILURE;
            }
            log::info!("wrote history CSV to {path}");
        }
    }

    ExitCode::SUCCESS
}
