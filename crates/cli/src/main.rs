//! metricvar CLI
//!
//! Resolves metrics variable queries against a catalog described in a TOML
//! configuration file.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use metricvar_provider::StaticMetricsProvider;
use metricvar_resolver::VariableQueryResolver;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::MetricvarConfig;

/// metricvar: resolve dashboard variable queries into option lists.
#[derive(Parser, Debug)]
#[command(name = "metricvar", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        env = "METRICVAR_CONFIG",
        default_value = "metricvar.toml",
        global = true
    )]
    config: String,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one variable query against the configured catalog.
    Resolve(commands::resolve::ResolveArgs),
    /// Upgrade a legacy variable query and print the descriptor.
    Migrate(commands::migrate::MigrateArgs),
    /// List the statistics offered by the provider.
    Statistics,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::Migrate(args) = &cli.command {
        return commands::migrate::run(args, &cli.format);
    }

    let (config, found) = MetricvarConfig::load(&cli.config)?;
    if !found {
        info!(path = %cli.config, "config file not found, using an empty catalog");
    }

    let provider = StaticMetricsProvider::new(config.provider.name, config.catalog);
    let resolver = VariableQueryResolver::from_provider(provider);

    match cli.command {
        Command::Resolve(args) => commands::resolve::run(&resolver, &args, &cli.format).await,
        Command::Statistics => commands::statistics::run(&resolver, &cli.format).await,
        Command::Migrate(_) => Ok(()),
    }
}
