mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{RequiredPaymentArgs, ScheduleArgs, SolveArgs};
use commands::plan::PlanArgs;
use commands::scenarios::{ScenarioArgs, SensitivityArgs};

/// Debt payoff projections with decimal precision
#[derive(Parser)]
#[command(
    name = "credipal",
    version,
    about = "Debt payoff, scenario and plan projections",
    long_about = "A CLI for projecting personal debt payoff with decimal precision. \
                  Supports months-to-payoff, extra-payment and missed-payment scenarios, \
                  amortization tables and consolidated payoff plans."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON/YAML file overriding the default heuristics (late fee, caps)
    #[arg(long, global = true)]
    assumptions: Option<String>,

    /// Log solver decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Months, interest and total paid until a debt is cleared
    Solve(SolveArgs),
    /// Compare current, extra-payment and missed-payment scenarios
    Scenarios(ScenarioArgs),
    /// Sweep extra monthly payments and report the savings
    Sensitivity(SensitivityArgs),
    /// Month-by-month amortization table
    Schedule(ScheduleArgs),
    /// Payment needed to clear a debt in a given number of months
    RequiredPayment(RequiredPaymentArgs),
    /// Consolidated payoff plan across several debts
    Plan(PlanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn run(cli: Cli) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let assumptions = cli
        .assumptions
        .as_deref()
        .map(input::load_assumptions)
        .transpose()?;
    if assumptions.is_some() {
        tracing::info!("using assumptions from --assumptions");
    }
    let assumptions = assumptions.as_ref();

    match cli.command {
        Commands::Solve(args) => commands::amortization::run_solve(args, assumptions),
        Commands::Scenarios(args) => commands::scenarios::run_scenarios(args, assumptions),
        Commands::Sensitivity(args) => commands::scenarios::run_sensitivity(args, assumptions),
        Commands::Schedule(args) => commands::amortization::run_schedule(args, assumptions),
        Commands::RequiredPayment(args) => commands::amortization::run_required_payment(args),
        Commands::Plan(args) => commands::plan::run_plan(args, assumptions),
        Commands::Version => Ok(serde_json::json!({
            "name": "credipal",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let format = cli.output.clone();
    match run(cli) {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
