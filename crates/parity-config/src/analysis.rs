//! Analysis configuration.
//!
//! Controls the defaults applied to bonds that leave fields unspecified,
//! the yield solver, and batch evaluation.

use std::fmt;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parity_bonds::pricing::{
    Annualization, SolverMethod, YieldBracket, YieldSolver, DEFAULT_HIGH_RATE, DEFAULT_LOW_RATE,
};
use parity_bonds::types::{DEFAULT_FACE_VALUE, DEFAULT_PAYMENTS_PER_YEAR};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// SOLVER SETTINGS
// =============================================================================

/// Yield solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Root-finding method.
    #[serde(default)]
    pub method: SolverMethod,

    /// Convergence tolerance on the relative price residual and the rate
    /// bracket half-width.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap; exceeding it is a `DidNotConverge` failure.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lowest per-period rate searched.
    #[serde(default = "default_low_rate")]
    pub low_rate: f64,

    /// Highest per-period rate searched.
    #[serde(default = "default_high_rate")]
    pub high_rate: f64,
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_low_rate() -> f64 {
    DEFAULT_LOW_RATE
}

fn default_high_rate() -> f64 {
    DEFAULT_HIGH_RATE
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            low_rate: default_low_rate(),
            high_rate: default_high_rate(),
        }
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            errors.push(ValidationError::new(
                "solver.tolerance",
                format!("must be positive, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            errors.push(ValidationError::new(
                "solver.max_iterations",
                "must be at least 1",
            ));
        }
        if let Err(e) = YieldBracket::new(self.low_rate, self.high_rate).validate() {
            errors.push(ValidationError::new("solver.low_rate", e.to_string()));
        }

        errors
    }
}

// =============================================================================
// ANALYSIS CONFIGURATION
// =============================================================================

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Face value for bonds that do not state one.
    #[serde(default = "default_face_value")]
    pub default_face_value: Decimal,

    /// Payment frequency for market contexts built from this configuration.
    #[serde(default = "default_payments_per_year")]
    pub default_payments_per_year: u32,

    /// How per-period rates are annualized.
    #[serde(default)]
    pub annualization: Annualization,

    /// Whether large batches may be evaluated in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum batch size before parallel evaluation is used.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Yield solver settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

fn default_face_value() -> Decimal {
    DEFAULT_FACE_VALUE
}

fn default_payments_per_year() -> u32 {
    DEFAULT_PAYMENTS_PER_YEAR
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_face_value: default_face_value(),
            default_payments_per_year: default_payments_per_year(),
            annualization: Annualization::default(),
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
            solver: SolverSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Configuration that never evaluates in parallel.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the default face value.
    #[must_use]
    pub fn with_default_face_value(mut self, face_value: Decimal) -> Self {
        self.default_face_value = face_value;
        self
    }

    /// Sets the annualization convention.
    #[must_use]
    pub fn with_annualization(mut self, annualization: Annualization) -> Self {
        self.annualization = annualization;
        self
    }

    /// Sets the solver settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    /// Builds the yield solver described by this configuration.
    #[must_use]
    pub fn yield_solver(&self) -> YieldSolver {
        YieldSolver::new()
            .with_method(self.solver.method)
            .with_tolerance(self.solver.tolerance)
            .with_max_iterations(self.solver.max_iterations)
            .with_bracket(YieldBracket::new(self.solver.low_rate, self.solver.high_rate))
            .with_annualization(self.annualization)
    }

    /// Returns true if a batch of `len` bonds should be evaluated in parallel.
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel && len >= self.parallel_threshold
    }

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document and validates it.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Renders the configuration as pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a configuration file; the format follows the extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("loading {format} configuration from {}", path.display());

        match format {
            ConfigFormat::Toml => Self::from_toml_str(&contents),
            ConfigFormat::Json => Self::from_json_str(&contents),
        }
    }

    /// Writes the configuration to a file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => self.to_toml_string()?,
            ConfigFormat::Json => self.to_json_string()?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.default_face_value <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "default_face_value",
                format!("must be positive, got {}", self.default_face_value),
            ));
        }
        if self.default_payments_per_year == 0 {
            errors.push(ValidationError::new(
                "default_payments_per_year",
                "must be at least 1",
            ));
        }
        errors.extend(self.solver.validate());

        errors
    }
}

// =============================================================================
// FILE FORMATS
// =============================================================================

/// Serialization format of a configuration or bond book file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`)
    Toml,
    /// JSON (`.json`)
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Json => write!(f, "JSON"),
        }
    }
}
