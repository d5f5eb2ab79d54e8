mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::amortization::{PaymentArgs, ScheduleArgs};
use commands::metrics::{BreakEvenArgs, LoanCostArgs, PropertyArgs};

/// Fixed-rate loan amortization and financing metrics
#[derive(Parser)]
#[command(
    name = "amortize",
    version,
    about = "Fixed-rate loan amortization and financing metrics",
    long_about = "A CLI for fixed-rate loan calculations with decimal precision. \
                  Supports monthly payments, amortization schedules with extra \
                  principal payments, total cost, loan-to-value, equity and \
                  break-even analysis."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine activity to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed monthly payment for a loan
    Payment(PaymentArgs),
    /// Generate a full amortization schedule with optional extra payments
    Schedule(ScheduleArgs),
    /// Total cost and interest of a loan at its flat monthly payment
    LoanCost(LoanCostArgs),
    /// Loan-to-value ratio and equity for a financed property
    Property(PropertyArgs),
    /// Years for annual cash flow to recover the down payment
    BreakEven(BreakEvenArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "amortize_core=debug,amortize=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::LoanCost(args) => commands::metrics::run_loan_cost(args),
        Commands::Property(args) => commands::metrics::run_property(args),
        Commands::BreakEven(args) => commands::metrics::run_break_even(args),
        Commands::Version => {
            println!("amortize {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            tracing::debug!(format = ?cli.output, "writing output");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
