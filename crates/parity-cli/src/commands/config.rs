//! Config command implementation.
//!
//! Prints the effective analysis configuration or writes it to a file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use parity_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_success, print_table, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write the effective configuration to a file
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file; the extension picks TOML or JSON
    #[arg(default_value = "parity.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(config, format),
        ConfigCommand::Init(init) => {
            if init.path.exists() && !init.force {
                return Err(CliError::FileExists(init.path).into());
            }
            config.save(&init.path).map_err(CliError::from)?;
            print_success(&format!("Wrote configuration to {}", init.path.display()));
            Ok(())
        }
    }
}

fn show(config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Analysis Configuration");
            print_table(&key_values(config))?;
        }
        OutputFormat::Json => println!("{}", config.to_json_string().map_err(CliError::from)?),
        OutputFormat::Csv => print_csv(&key_values(config))?,
        OutputFormat::Minimal => print!("{}", config.to_toml_string().map_err(CliError::from)?),
    }
    Ok(())
}

fn key_values(config: &AnalysisConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("default_face_value", config.default_face_value.to_string()),
        KeyValue::new(
            "default_payments_per_year",
            config.default_payments_per_year.to_string(),
        ),
        KeyValue::new("annualization", config.annualization.to_string()),
        KeyValue::new("parallel", config.parallel.to_string()),
        KeyValue::new("parallel_threshold", config.parallel_threshold.to_string()),
        KeyValue::new("solver.method", config.solver.method.to_string()),
        KeyValue::new("solver.tolerance", format!("{:e}", config.solver.tolerance)),
        KeyValue::new("solver.max_iterations", config.solver.max_iterations.to_string()),
        KeyValue::new("solver.low_rate", config.solver.low_rate.to_string()),
        KeyValue::new("solver.high_rate", config.solver.high_rate.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_values_cover_solver() {
        let rows = key_values(&AnalysisConfig::default());
        assert!(rows.iter().any(|kv| kv.key == "solver.max_iterations" && kv.value == "100"));
        assert!(rows.iter().any(|kv| kv.key == "default_face_value" && kv.value == "1000"));
    }
}
