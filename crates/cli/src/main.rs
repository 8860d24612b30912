//! System Version register verification CLI.
//!
//! This binary runs the reset/readback harness against the behavioral model. It performs:
//! 1. **Run:** Build configuration (JSON file, then `PARAM_*` environment, then flags), run N seeded scenarios.
//! 2. **Map:** Print the register map table.

use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sysver_core::common::HarnessError;
use sysver_core::config::{ConfigError, HardwareParams, HarnessConfig};
use sysver_core::regmap::REGISTER_MAP;
use sysver_core::verify::scenario::resolve_seed;
use sysver_core::verify::{Harness, Scenario};
use sysver_core::Testbench;

/// Exit code for a run in which a field mismatched.
const EXIT_MISMATCH: i32 = 1;
/// Exit code for configuration and bus errors.
const EXIT_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "sysver",
    author,
    version,
    about = "System Version register decode verification",
    long_about = "Drive the System Version block through reset with random board straps and check every\nregister field reads back as configured.\n\nBuild-time parameters come from PARAM_C_VER_MAJ, PARAM_C_VER_MIN, PARAM_C_VER_BUILD,\nPARAM_C_BOARD_TYPE_WIDTH and PARAM_C_BOARD_REV_WIDTH; RANDOM_SEED fixes the seed.\n\nExamples:\n  sysver run\n  sysver run --runs 100 --seed 7\n  PARAM_C_VER_MAJ=2 PARAM_C_VER_MIN=7 sysver run\n  sysver map"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one or more verification scenarios against the behavioral model.
    Run {
        /// Number of scenarios; run i uses seed + i.
        #[arg(short, long, default_value_t = 1)]
        runs: u64,

        /// Seed of the first scenario (overrides RANDOM_SEED).
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON configuration file applied before the environment.
        #[arg(short, long)]
        config: Option<String>,

        /// Draw FPGA version parameters per run instead of reading them from the environment.
        #[arg(long)]
        random_params: bool,

        /// Print each report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the register map.
    Map,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run {
            runs,
            seed,
            config,
            random_params,
            json,
        } => cmd_run(runs, seed, config.as_deref(), random_params, json),
        Commands::Map => {
            cmd_map();
            0
        }
    };
    process::exit(code);
}

/// Loads configuration from file (or defaults) with environment overrides on top.
fn load_config(path: Option<&str>) -> Result<HarnessConfig, ConfigError> {
    let base = match path {
        Some(p) => HarnessConfig::from_json_file(p)?,
        None => HarnessConfig::default(),
    };
    base.with_overrides(|key| std::env::var(key).ok())
}

/// Runs `runs` scenarios and returns the process exit code.
fn cmd_run(runs: u64, seed: Option<u64>, path: Option<&str>, random_params: bool, json: bool) -> i32 {
    let mut config = match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return EXIT_ERROR;
        }
    };
    if seed.is_some() {
        config.seed = seed;
    }
    let first_seed = resolve_seed(&config);
    info!(first_seed, runs, "starting verification");

    let mut failures = 0u64;
    for i in 0..runs {
        let run_seed = first_seed.wrapping_add(i);
        let mut run_config = config.clone();
        run_config.seed = Some(run_seed);
        if random_params {
            run_config.params = HardwareParams::randomized(!run_seed);
        }

        let scenario = Scenario::generate(&run_config, run_seed);
        let mut testbench = Testbench::new(&run_config);
        let outcome = Harness::new(&run_config).run(&mut testbench, &scenario);

        match outcome {
            Ok(report) => {
                if json {
                    print_json(&report);
                } else {
                    println!(
                        "PASS seed={run_seed} board_type={:#x} board_rev={:#x} ({} ns)",
                        scenario.board_type,
                        scenario.board_rev,
                        testbench.elapsed_ns()
                    );
                }
            }
            Err(HarnessError::Verification(failure)) => {
                failures += 1;
                if json {
                    print_json(&failure.report);
                } else {
                    println!("FAIL seed={run_seed}");
                    print!("{}", failure.report);
                    print_reproduction(&run_config);
                }
            }
            Err(err) => {
                error!(seed = run_seed, %err, "run aborted");
                print_reproduction(&run_config);
                return EXIT_ERROR;
            }
        }
    }

    if failures > 0 {
        error!(failures, runs, "verification failed");
        EXIT_MISMATCH
    } else {
        info!(runs, "verification passed");
        0
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(err) => error!(%err, "cannot serialize report"),
    }
}

fn print_reproduction(config: &HarnessConfig) {
    let env: Vec<String> = config
        .to_env_pairs()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    println!("  reproduce: {} sysver run", env.join(" "));
}

fn cmd_map() {
    println!(
        "{:<20} {:<14} {:>6} {:>12} {:>6}",
        "field", "register", "offset", "mask", "shift"
    );
    for spec in &REGISTER_MAP {
        println!(
            "{:<20} {:<14} {:>#6x} {:>#12x} {:>6}",
            spec.field.name(),
            spec.register.name,
            spec.register.offset,
            spec.mask,
            spec.shift
        );
    }
}
