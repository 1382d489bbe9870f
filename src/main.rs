//! Kirchhoff - DC Circuit Analyzer
//!
//! Solves the DC operating point of a JSON netlist and audits it against
//! Kirchhoff's laws.
//!
//! # Usage
//!
//! ```bash
//! kirchhoff divider.json
//! kirchhoff divider.json --format json --augmented
//! RUST_LOG=kirchhoff_core=debug kirchhoff divider.json
//! ```

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use kirchhoff_core::{
    document::load_netlist, error::Result, solver::DEFAULT_PENALTY_CONDUCTANCE,
    FloatingSourcePolicy, Simulator, SimulatorConfig, Solution,
};
use tracing_subscriber::EnvFilter;

/// Output format for the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// DC circuit analyzer with Kirchhoff law checks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist document (.json)
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Solve voltage sources exactly with branch-current unknowns
    #[arg(long)]
    augmented: bool,

    /// Penalty conductance used to pin ground-referenced sources (siemens)
    #[arg(long, default_value_t = DEFAULT_PENALTY_CONDUCTANCE, conflicts_with = "augmented")]
    penalty: f64,

    /// Fail validation on voltage sources with no ground terminal
    #[arg(long)]
    reject_floating: bool,

    /// Exit with failure when any Kirchhoff check fails
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Human-readable rendering of a solution.
struct TextReport<'a>(&'a Solution);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.0;
        writeln!(f, "Node voltages:")?;
        for (id, v) in &solution.node_voltages {
            writeln!(f, "  {}: {:.6} V", id, v)?;
        }
        writeln!(f, "Branch currents:")?;
        for (id, i) in &solution.branch_currents {
            writeln!(f, "  {}: {:.9} A", id, i)?;
        }
        writeln!(f, "Checks:")?;
        for (id, r) in &solution.checks.kcl {
            writeln!(f, "  KCL {}: {:+.3e} A [{}]", id, r.sum_a, status(r.ok))?;
        }
        for (id, r) in &solution.checks.kvl {
            writeln!(f, "  KVL {}: {:+.3e} V [{}]", id, r.sum_v, status(r.ok))?;
        }
        Ok(())
    }
}

fn status(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "FAIL"
    }
}

fn run(args: &Args) -> Result<bool> {
    let netlist = load_netlist(&args.netlist_file)?;

    let mut config = SimulatorConfig::new();
    config = if args.augmented {
        config.augmented()
    } else {
        config.with_penalty(args.penalty)
    };
    if args.reject_floating {
        config = config.with_floating_sources(FloatingSourcePolicy::Reject);
    }

    let solution = Simulator::with_config(config).simulate(&netlist)?;

    match args.format {
        Format::Text => print!("{}", TextReport(&solution)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&solution)?),
    }

    Ok(solution.checks.all_ok())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(all_ok) if all_ok || !args.strict => ExitCode::SUCCESS,
        Ok(_) => {
            eprintln!("error: one or more Kirchhoff checks failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
