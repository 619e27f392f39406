use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod error;
mod output;
mod parser;
mod planner;
mod provider;
mod runner;
mod server;
mod store;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may come from a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Only show logs with --verbose, unless RUST_LOG says otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("navi=debug")
        } else {
            EnvFilter::new("navi=warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init(args) => cli::init::execute(args),
        Commands::Generate(args) => cli::generate::execute(args).await,
        Commands::List(args) => cli::list::execute(args).await,
        Commands::Show(args) => cli::show::execute(args).await,
        Commands::Next(args) => cli::next::execute(args).await,
        Commands::Done(args) => cli::done::execute(args).await,
        Commands::Enrich(args) => cli::enrich::execute(args).await,
        Commands::Serve(args) => cli::serve::execute(args).await,
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
