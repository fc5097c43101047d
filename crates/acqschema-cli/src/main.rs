//! acqschema CLI - build reference acquisition schemas.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use acqschema::BuilderConfig;

fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => BuilderConfig::load(path)?,
        None => BuilderConfig::default(),
    };

    match cli.command {
        Commands::Inspect { samples, json } => commands::inspect::run(samples, json, config),

        Commands::Template {
            samples,
            acquisition,
            fields,
            output,
            form,
        } => commands::template::run(samples, acquisition, fields, output, form, config),

        Commands::Compile {
            form,
            output,
            strict,
        } => commands::compile::run(form, output, strict, config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
