use std::process::ExitCode;

use clap::Parser;
use wayfinder_cli::route::{run_route, run_table, RouteArgs, TableArgs};
use wayfinder_cli::settings::EngineArgs;
use wayfinder_cli::status::{run_status, StatusArgs};

/// Shortest routes between named locations in a building.
#[derive(Parser, Debug)]
#[command(name = "wayfinder", version, about)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Shortest route between two locations. Exits with status 2 when no
    /// route exists; errors exit with status 1.
    Route(RouteArgs),
    /// Shortest route between every ordered pair of locations.
    Table(TableArgs),
    /// Size and load statistics of a graph store.
    Status(StatusArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.engine.resolve()?;

    match &cli.command {
        Commands::Route(args) => {
            let (report, found) = run_route(args, &cfg)?;
            println!("{}", report);
            if !found {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Table(args) => print!("{}", run_table(args, &cfg)?),
        Commands::Status(args) => println!("{}", run_status(args, &cfg)?),
    }

    Ok(ExitCode::SUCCESS)
}
