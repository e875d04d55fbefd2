//! Report records produced by the analyzer.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parity_bonds::{BondError, BondKind, BondSpec};

/// A reportable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Annual coupon over price.
    CurrentYield,
    /// Yield to maturity.
    Ytm,
    /// YTM less inflation.
    RealYield,
    /// Current floater coupon rate.
    Coupon,
}

impl Metric {
    /// All metrics, in column order.
    pub const ALL: [Metric; 4] = [
        Metric::CurrentYield,
        Metric::Ytm,
        Metric::RealYield,
        Metric::Coupon,
    ];

    /// Returns true if bonds of `kind` report this metric.
    #[must_use]
    pub fn applies_to(&self, kind: BondKind) -> bool {
        match self {
            Metric::CurrentYield => kind == BondKind::Fixed,
            Metric::Ytm => kind.has_yield(),
            Metric::RealYield => kind == BondKind::Linker,
            Metric::Coupon => kind == BondKind::Floater,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::CurrentYield => "Current Yield",
            Metric::Ytm => "YTM",
            Metric::RealYield => "Real Yield",
            Metric::Coupon => "Coupon Now",
        };
        write!(f, "{name}")
    }
}

/// Category of a per-bond failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed bond or market parameters.
    InvalidInput,
    /// Price not attainable inside the solver bracket.
    NoBracket,
    /// Solver ran out of iterations.
    DidNotConverge,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidInput => "invalid input",
            FailureKind::NoBracket => "no bracket",
            FailureKind::DidNotConverge => "did not converge",
        };
        write!(f, "{name}")
    }
}

/// Why applicable fields of a record are missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable detail.
    pub message: String,
}

impl From<&BondError> for AnalysisFailure {
    fn from(err: &BondError) -> Self {
        let kind = match err {
            BondError::InvalidInput { .. } => FailureKind::InvalidInput,
            BondError::NoBracket { .. } => FailureKind::NoBracket,
            BondError::DidNotConverge { .. } => FailureKind::DidNotConverge,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Status of one metric on one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    /// The value is present.
    Computed,
    /// The bond's kind never reports this metric.
    NotApplicable,
    /// The metric applies but could not be computed.
    Failed(FailureKind),
}

/// Analysis output for one bond.
///
/// Yields are annualized decimals (0.1482 for 14.82%). Absent fields mean
/// "not reported"; use [`ReportRecord::status`] to tell a field that does
/// not apply from one that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Bond identifier.
    pub name: String,

    /// Bond type.
    #[serde(rename = "type")]
    pub kind: BondKind,

    /// Current yield (fixed bonds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_yield: Option<f64>,

    /// Yield to maturity (fixed and linker bonds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ytm: Option<f64>,

    /// Real yield (linker bonds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_yield: Option<f64>,

    /// Current coupon rate (floaters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Decimal>,

    /// Failure that left applicable fields empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<AnalysisFailure>,
}

impl ReportRecord {
    /// Creates an empty record for `bond`.
    #[must_use]
    pub fn empty(bond: &BondSpec) -> Self {
        Self {
            name: bond.name.clone(),
            kind: bond.kind,
            current_yield: None,
            ytm: None,
            real_yield: None,
            coupon: None,
            failure: None,
        }
    }

    /// Records a failure.
    #[must_use]
    pub fn with_failure(mut self, err: &BondError) -> Self {
        self.failure = Some(AnalysisFailure::from(err));
        self
    }

    /// Numeric value of `metric`, if present.
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CurrentYield => self.current_yield,
            Metric::Ytm => self.ytm,
            Metric::RealYield => self.real_yield,
            Metric::Coupon => self.coupon.and_then(|c| c.to_f64()),
        }
    }

    /// Distinguishes computed, not-applicable and failed metrics.
    #[must_use]
    pub fn status(&self, metric: Metric) -> MetricStatus {
        if !metric.applies_to(self.kind) {
            return MetricStatus::NotApplicable;
        }
        let present = match metric {
            Metric::Coupon => self.coupon.is_some(),
            _ => self.value(metric).is_some(),
        };
        if present {
            MetricStatus::Computed
        } else {
            MetricStatus::Failed(
                self.failure
                    .as_ref()
                    .map_or(FailureKind::InvalidInput, |f| f.kind),
            )
        }
    }

    /// Returns true if any applicable metric is missing.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Counts over a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of records.
    pub total: usize,
    /// Records with every applicable metric.
    pub complete: usize,
    /// Records that failed validation.
    pub invalid_input: usize,
    /// Records whose price was outside the solver bracket.
    pub no_bracket: usize,
    /// Records whose solver hit the iteration cap.
    pub did_not_converge: usize,
}

impl ReportSummary {
    /// Tallies `records`.
    #[must_use]
    pub fn from_records(records: &[ReportRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.total += 1;
            match record.failure.as_ref().map(|f| f.kind) {
                None => acc.complete += 1,
                Some(FailureKind::InvalidInput) => acc.invalid_input += 1,
                Some(FailureKind::NoBracket) => acc.no_bracket += 1,
                Some(FailureKind::DidNotConverge) => acc.did_not_converge += 1,
            }
            acc
        })
    }

    /// Number of records with a failure.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total - self.complete
    }
}
