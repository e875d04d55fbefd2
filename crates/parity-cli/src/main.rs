//! Parity CLI - bond yield analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Analyze the built-in demo book
//! parity analyze --demo
//!
//! # Analyze a book file with market overrides
//! parity analyze --file bonds.toml --inflation 0.06 --base-rate 0.15
//!
//! # Solve one bond's yield and show its cash flows
//! parity yield --price 950 --coupon 25 --years 4 --cashflows
//!
//! # Write the default configuration
//! parity config init parity.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so piped output stays clean
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config, format)?,
        Commands::Yield(args) => commands::yield_cmd::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}
