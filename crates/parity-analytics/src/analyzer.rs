//! Per-bond analysis and batch evaluation.

use rust_decimal::prelude::ToPrimitive;

use parity_bonds::cashflows::compute_cash_flows;
use parity_bonds::pricing::{current_yield, YieldSolver};
use parity_bonds::types::{BondKind, BondSpec, MarketContext};
use parity_bonds::{BondError, BondResult};
use parity_config::{AnalysisConfig, Validate};

use crate::error::AnalyticsResult;
use crate::parallel::maybe_parallel_map;
use crate::report::{ReportRecord, ReportSummary};

/// Analyzes bonds against a market context.
///
/// Holds the validated configuration and the yield solver built from it.
/// Analysis never fails as a whole; each bond's problems are recorded on its
/// own [`ReportRecord`].
#[derive(Debug, Clone)]
pub struct BondAnalyzer {
    config: AnalysisConfig,
    solver: YieldSolver,
}

impl Default for BondAnalyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        let solver = config.yield_solver();
        Self { config, solver }
    }
}

impl BondAnalyzer {
    /// Creates an analyzer from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`](crate::AnalyticsError::Config) if the
    /// configuration fails validation.
    pub fn new(config: AnalysisConfig) -> AnalyticsResult<Self> {
        config.validate_or_error()?;
        let solver = config.yield_solver();
        Ok(Self { config, solver })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Returns the yield solver.
    #[must_use]
    pub fn solver(&self) -> &YieldSolver {
        &self.solver
    }

    /// Checks the shared market inputs up front.
    ///
    /// Bonds are still validated individually during analysis; this lets a
    /// caller reject a bad market before running a batch.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Market`](crate::AnalyticsError::Market) for an
    /// invalid context.
    pub fn check_market(&self, market: &MarketContext) -> AnalyticsResult<()> {
        market.validate()?;
        Ok(())
    }

    /// Analyzes a single bond.
    #[must_use]
    pub fn analyze_bond(&self, bond: &BondSpec, market: &MarketContext) -> ReportRecord {
        let mut record = ReportRecord::empty(bond);

        if let Err(err) = bond.validate() {
            log::warn!("bond '{}' rejected: {err}", bond.name);
            return record.with_failure(&err);
        }

        let outcome = match bond.kind {
            BondKind::Fixed => self.analyze_fixed(bond, market, &mut record),
            BondKind::Linker => self.analyze_linker(bond, market, &mut record),
            BondKind::Floater => {
                record.coupon = Some(market.base_rate + bond.spread);
                Ok(())
            }
        };

        match outcome {
            Ok(()) => record,
            Err(err) => {
                if err.is_invalid_input() {
                    log::warn!("bond '{}' rejected: {err}", bond.name);
                }
                record.with_failure(&err)
            }
        }
    }

    /// Analyzes a batch, one record per input bond in input order.
    #[must_use]
    pub fn analyze_bonds(&self, bonds: &[BondSpec], market: &MarketContext) -> Vec<ReportRecord> {
        let records = maybe_parallel_map(bonds, &self.config, |bond| {
            self.analyze_bond(bond, market)
        });

        let summary = ReportSummary::from_records(&records);
        log::info!(
            "analyzed {} bonds: {} complete, {} failed",
            summary.total,
            summary.complete,
            summary.failed()
        );

        records
    }

    fn analyze_fixed(
        &self,
        bond: &BondSpec,
        market: &MarketContext,
        record: &mut ReportRecord,
    ) -> BondResult<()> {
        market.validate()?;
        let m = bond.payments_per_year_or(market.payments_per_year);
        let annual_coupon = bond.coupon * rust_decimal::Decimal::from(m);

        record.current_yield = Some(current_yield(annual_coupon, bond.price)?);
        record.ytm = Some(self.ytm(bond, market)?);
        Ok(())
    }

    fn analyze_linker(
        &self,
        bond: &BondSpec,
        market: &MarketContext,
        record: &mut ReportRecord,
    ) -> BondResult<()> {
        market.validate()?;
        let inflation = market.inflation.to_f64().ok_or_else(|| {
            BondError::invalid_input(format!("inflation {} is not representable", market.inflation))
        })?;

        let ytm = self.ytm(bond, market)?;
        record.ytm = Some(ytm);
        record.real_yield = Some(ytm - inflation);
        Ok(())
    }

    /// Annualized yield to maturity on the bond's nominal cash flows.
    fn ytm(&self, bond: &BondSpec, market: &MarketContext) -> BondResult<f64> {
        let m = bond.payments_per_year_or(market.payments_per_year);
        let face = bond.face_value_or(self.config.default_face_value);
        let schedule = compute_cash_flows(
            bond.coupon * rust_decimal::Decimal::from(m),
            face,
            bond.years,
            m,
        )?;

        let result = self.solver.solve(&schedule, bond.price)?;
        log::debug!(
            "bond '{}': ytm {:.6} after {} iterations",
            bond.name,
            result.yield_value,
            result.iterations
        );
        Ok(result.yield_value)
    }
}

/// Analyzes `bonds` with the default configuration.
///
/// Returns one record per bond, in input order. Never fails as a whole.
///
/// # Example
///
/// ```rust
/// use parity_analytics::analyze_bonds;
/// use parity_bonds::types::{BondSpec, MarketContext};
/// use rust_decimal_macros::dec;
///
/// let bonds = [BondSpec::fixed("A", dec!(900), dec!(35), 3)];
/// let report = analyze_bonds(&bonds, &MarketContext::default());
///
/// let cy = report[0].current_yield.unwrap();
/// assert!((cy - 35.0 / 900.0).abs() < 1e-12);
/// assert!(report[0].ytm.unwrap() > cy);
/// ```
#[must_use]
pub fn analyze_bonds(bonds: &[BondSpec], market: &MarketContext) -> Vec<ReportRecord> {
    BondAnalyzer::default().analyze_bonds(bonds, market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FailureKind, Metric, MetricStatus};
    use approx::assert_relative_eq;
    use parity_config::SolverSettings;
    use rust_decimal_macros::dec;

    fn market() -> MarketContext {
        MarketContext::new(dec!(0.06), dec!(0.15))
    }

    #[test]
    fn test_fixed_bond() {
        let bond = BondSpec::fixed("A", dec!(900), dec!(35), 3);
        let record = BondAnalyzer::default().analyze_bond(&bond, &market());

        assert_relative_eq!(record.current_yield.unwrap(), 0.038_888_9, epsilon = 1e-6);
        assert!(record.ytm.unwrap() > record.current_yield.unwrap());
        assert!(record.real_yield.is_none());
        assert!(record.coupon.is_none());
        assert!(record.failure.is_none());
    }

    #[test]
    fn test_linker_real_yield() {
        let bond = BondSpec::linker("B", dec!(950), dec!(25), 4);
        let record = BondAnalyzer::default().analyze_bond(&bond, &market());

        let ytm = record.ytm.unwrap();
        assert_relative_eq!(record.real_yield.unwrap(), ytm - 0.06, epsilon = 1e-15);
        assert!(record.current_yield.is_none());
    }

    #[test]
    fn test_floater_coupon_is_exact() {
        let bond = BondSpec::floater("C", dec!(0.005));
        let record = BondAnalyzer::default().analyze_bond(&bond, &market());

        assert_eq!(record.coupon, Some(dec!(0.155)));
        assert!(record.ytm.is_none());
        assert!(record.current_yield.is_none());
    }

    #[test]
    fn test_floater_ignores_price_and_years() {
        let bond = BondSpec::floater("C", dec!(0.01)).with_price(dec!(-1));
        let record = BondAnalyzer::default().analyze_bond(&bond, &market());

        assert_eq!(record.coupon, Some(dec!(0.16)));
        assert!(record.failure.is_none());
    }

    #[test]
    fn test_semiannual_override() {
        let annual = BondSpec::fixed("A", dec!(1000), dec!(50), 5);
        let semi = BondSpec::fixed("S", dec!(1000), dec!(25), 5).with_payments_per_year(2);
        let analyzer = BondAnalyzer::default();

        let a = analyzer.analyze_bond(&annual, &market());
        let s = analyzer.analyze_bond(&semi, &market());

        // 2.5% per half year at par, effective annual
        assert_relative_eq!(a.current_yield.unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(s.current_yield.unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(s.ytm.unwrap(), 1.025_f64.powi(2) - 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_face_value_override() {
        let bond = BondSpec::fixed("F", dec!(100), dec!(5), 4).with_face_value(dec!(100));
        let record = BondAnalyzer::default().analyze_bond(&bond, &market());

        assert_relative_eq!(record.ytm.unwrap(), 0.05, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_years() {
        let bond = BondSpec::fixed("Z", dec!(900), dec!(35), 0);
        let record = BondAnalyzer::default().analyze_bond(&bond, &market());

        assert!(record.ytm.is_none());
        assert!(record.current_yield.is_none());
        assert_eq!(
            record.status(Metric::Ytm),
            MetricStatus::Failed(FailureKind::InvalidInput)
        );
    }

    #[test]
    fn test_fixed_keeps_current_yield_when_ytm_fails() {
        let config = AnalysisConfig::sequential().with_solver(SolverSettings {
            low_rate: 0.0,
            ..SolverSettings::default()
        });
        let analyzer = BondAnalyzer::new(config).unwrap();
        // Price above the undiscounted total needs a negative yield
        let bond = BondSpec::fixed("P", dec!(1200), dec!(10), 2);

        let record = analyzer.analyze_bond(&bond, &market());

        assert!(record.current_yield.is_some());
        assert!(record.ytm.is_none());
        assert_eq!(
            record.status(Metric::Ytm),
            MetricStatus::Failed(FailureKind::NoBracket)
        );
        assert_eq!(record.status(Metric::CurrentYield), MetricStatus::Computed);
    }

    #[test]
    fn test_did_not_converge_is_recorded() {
        let config = AnalysisConfig::sequential().with_solver(SolverSettings {
            max_iterations: 1,
            ..SolverSettings::default()
        });
        let analyzer = BondAnalyzer::new(config).unwrap();
        let bond = BondSpec::linker("B", dec!(950), dec!(25), 4);

        let record = analyzer.analyze_bond(&bond, &market());

        assert!(record.ytm.is_none());
        assert!(record.real_yield.is_none());
        assert_eq!(
            record.failure.as_ref().map(|f| f.kind),
            Some(FailureKind::DidNotConverge)
        );
    }

    #[test]
    fn test_invalid_market_frequency() {
        let market = MarketContext::default().with_payments_per_year(0);
        let analyzer = BondAnalyzer::default();

        assert!(analyzer.check_market(&market).is_err());

        let fixed = analyzer.analyze_bond(&BondSpec::fixed("A", dec!(900), dec!(35), 3), &market);
        let floater = analyzer.analyze_bond(&BondSpec::floater("C", dec!(0.005)), &market);

        assert!(fixed.is_failed());
        assert!(!floater.is_failed());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig::default().with_default_face_value(dec!(0));
        assert!(BondAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let bonds = vec![
            BondSpec::fixed("A", dec!(900), dec!(35), 3),
            BondSpec::fixed("Z", dec!(900), dec!(35), 0),
            BondSpec::floater("C", dec!(0.005)),
        ];

        let report = analyze_bonds(&bonds, &market());

        assert_eq!(report.len(), 3);
        assert!(report[0].ytm.is_some());
        assert!(report[1].is_failed());
        assert_eq!(report[2].coupon, Some(dec!(0.155)));
    }
}
