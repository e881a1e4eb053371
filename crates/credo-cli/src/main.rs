use anyhow::Context;
use clap::Parser;
use credo_config::CredoConfig;

mod cli;
mod commands;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("credo error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    match &cli.command {
        cli::Commands::Schema => commands::schema::handle(&flags).map(|()| 0),
        cli::Commands::Analyze(args) => {
            let config = load_config(&flags)?;
            commands::analyze::handle(args, &config, &flags).await
        }
        cli::Commands::Sources => {
            commands::sources::handle(&load_config(&flags)?, &flags).map(|()| 0)
        }
        cli::Commands::Config => {
            commands::config::handle(&load_config(&flags)?, &flags).map(|()| 0)
        }
    }
}

fn load_config(flags: &cli::GlobalFlags) -> anyhow::Result<CredoConfig> {
    match &flags.config {
        Some(path) => CredoConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => CredoConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CREDO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
