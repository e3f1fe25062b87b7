use anyhow::Result;
use clap::{Parser, Subcommand};
use stepline::cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Plan(args) => args.run(),
        Command::Limits(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "stepline", about = "Straight-line step planning for stepper axes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plan a line on one or two axes and print the scheduled steps.
    Plan(cli::plan::PlanArgs),
    /// Print the maximum speed of every configured axis.
    Limits(cli::limits::LimitsArgs),
}
