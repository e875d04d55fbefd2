//! Cash-flow model.
//!
//! Coupon periods are uniform integer steps: a bond with `years` remaining
//! and `m` payments per year pays `coupon / m` at periods `1..m*years`, with
//! the face value added to the last payment.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A single payment at a whole-period offset from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Period index, starting at 1.
    pub period: u32,
    /// Amount paid.
    pub amount: Decimal,
    /// Type of cash flow.
    pub flow_type: CashFlowType,
}

/// Ordered cash flows of one bond together with the payment frequency they
/// were generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    payments_per_year: u32,
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Payments per year.
    #[must_use]
    pub fn payments_per_year(&self) -> u32 {
        self.payments_per_year
    }

    /// The flows, in period order.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Number of periods (`m * years`).
    #[must_use]
    pub fn periods(&self) -> u32 {
        self.flows.last().map_or(0, |cf| cf.period)
    }

    /// Sum of all payments, i.e. the present value at a zero rate.
    #[must_use]
    pub fn undiscounted_total(&self) -> Decimal {
        self.flows.iter().map(|cf| cf.amount).sum()
    }

    /// Returns true if there are no flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Iterates over the flows.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

/// Builds the cash-flow schedule of a bullet bond.
///
/// `coupon` is the annual coupon amount; each of the `m * years` periods
/// pays `coupon / m` and the last one also returns `face_value`.
///
/// # Example
///
/// ```rust
/// use parity_bonds::cashflows::compute_cash_flows;
/// use rust_decimal_macros::dec;
///
/// let schedule = compute_cash_flows(dec!(70), dec!(1000), 2, 2).unwrap();
/// let amounts: Vec<_> = schedule.iter().map(|cf| cf.amount).collect();
/// assert_eq!(amounts, vec![dec!(35), dec!(35), dec!(35), dec!(1035)]);
/// ```
pub fn compute_cash_flows(
    coupon: Decimal,
    face_value: Decimal,
    years: u32,
    payments_per_year: u32,
) -> BondResult<CashFlowSchedule> {
    if years == 0 {
        return Err(BondError::invalid_input(
            "years to maturity must be positive",
        ));
    }
    if payments_per_year == 0 {
        return Err(BondError::invalid_input("payments per year must be positive"));
    }
    if coupon < Decimal::ZERO {
        return Err(BondError::invalid_input(format!(
            "coupon must not be negative, got {coupon}"
        )));
    }
    if face_value <= Decimal::ZERO {
        return Err(BondError::invalid_input(format!(
            "face value must be positive, got {face_value}"
        )));
    }

    let periods = years.checked_mul(payments_per_year).ok_or_else(|| {
        BondError::invalid_input(format!(
            "{years} years at {payments_per_year} payments per year overflows the period count"
        ))
    })?;
    let periodic_coupon = coupon / Decimal::from(payments_per_year);

    let mut flows: Vec<CashFlow> = (1..periods)
        .map(|period| CashFlow {
            period,
            amount: periodic_coupon,
            flow_type: CashFlowType::Coupon,
        })
        .collect();
    flows.push(CashFlow {
        period: periods,
        amount: periodic_coupon + face_value,
        flow_type: CashFlowType::CouponAndPrincipal,
    });

    Ok(CashFlowSchedule {
        payments_per_year,
        flows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annual_schedule() {
        let schedule = compute_cash_flows(dec!(35), dec!(1000), 3, 1).unwrap();

        assert_eq!(schedule.periods(), 3);
        assert_eq!(schedule.payments_per_year(), 1);
        let flows = schedule.flows();
        assert_eq!(flows[0].amount, dec!(35));
        assert_eq!(flows[1].amount, dec!(35));
        assert_eq!(flows[2].amount, dec!(1035));
        assert_eq!(flows[2].flow_type, CashFlowType::CouponAndPrincipal);
        assert_eq!(schedule.undiscounted_total(), dec!(1105));
    }

    #[test]
    fn test_periods_are_consecutive() {
        let schedule = compute_cash_flows(dec!(50), dec!(100), 5, 4).unwrap();

        assert_eq!(schedule.flows().len(), 20);
        for (i, cf) in schedule.iter().enumerate() {
            assert_eq!(cf.period as usize, i + 1);
        }
        assert_eq!(schedule.flows()[0].amount, dec!(12.5));
        assert_eq!(schedule.flows()[19].amount, dec!(112.5));
    }

    #[test]
    fn test_single_period() {
        let schedule = compute_cash_flows(dec!(0), dec!(1000), 1, 1).unwrap();

        assert_eq!(schedule.flows().len(), 1);
        assert_eq!(schedule.flows()[0].amount, dec!(1000));
    }

    #[test]
    fn test_zero_years_rejected() {
        let err = compute_cash_flows(dec!(35), dec!(1000), 0, 1).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let err = compute_cash_flows(dec!(35), dec!(1000), 3, 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_bad_amounts_rejected() {
        assert!(compute_cash_flows(dec!(-1), dec!(1000), 3, 1).is_err());
        assert!(compute_cash_flows(dec!(35), dec!(0), 3, 1).is_err());
    }

    #[test]
    fn test_period_overflow_rejected() {
        assert!(compute_cash_flows(dec!(1), dec!(100), u32::MAX, 2).is_err());
    }
}
