//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod yield_cmd;

pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use yield_cmd::YieldArgs;

use std::path::Path;

use parity_config::AnalysisConfig;

use crate::error::CliResult;

/// Loads the analysis configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::load(path)?;
            tracing::debug!("loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}
