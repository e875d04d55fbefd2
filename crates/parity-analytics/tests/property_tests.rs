//! Property-based tests for solver and analyzer invariants.
//!
//! - Re-discounting at the solved rate reproduces the price
//! - Higher price means strictly lower yield
//! - Zero coupon at par solves to zero
//! - Batch analysis preserves order and count

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use parity_analytics::prelude::*;
use parity_bonds::cashflows::compute_cash_flows;
use parity_bonds::pricing::{present_value, solve_yield};

fn frequency_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1_u32), Just(2), Just(4), Just(12)]
}

fn kind_strategy() -> impl Strategy<Value = BondKind> {
    prop_oneof![
        Just(BondKind::Fixed),
        Just(BondKind::Linker),
        Just(BondKind::Floater)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn solved_rate_reprices(
        price in 500_u32..1500,
        coupon in 0_u32..120,
        years in 1_u32..30,
        m in frequency_strategy(),
    ) {
        let schedule = compute_cash_flows(Decimal::from(coupon), dec!(1000), years, m).unwrap();
        let result = solve_yield(&schedule, Decimal::from(price)).unwrap();

        let pv = present_value(&schedule, result.periodic_rate).unwrap();
        let target = f64::from(price);
        prop_assert!(((pv - target) / target).abs() < 1e-7, "pv {} vs price {}", pv, target);
    }

    #[test]
    fn yield_decreases_with_price(
        price in 500_u32..1400,
        bump in 1_u32..100,
        coupon in 0_u32..120,
        years in 1_u32..30,
    ) {
        let schedule = compute_cash_flows(Decimal::from(coupon), dec!(1000), years, 1).unwrap();
        let low = solve_yield(&schedule, Decimal::from(price)).unwrap();
        let high = solve_yield(&schedule, Decimal::from(price + bump)).unwrap();

        prop_assert!(high.yield_value < low.yield_value);
    }

    #[test]
    fn zero_coupon_at_par(face in 1_u32..100_000, years in 1_u32..40, m in frequency_strategy()) {
        let face = Decimal::from(face);
        let schedule = compute_cash_flows(Decimal::ZERO, face, years, m).unwrap();
        let result = solve_yield(&schedule, face).unwrap();

        prop_assert!(result.periodic_rate.abs() < 1e-8);
    }

    #[test]
    fn analysis_preserves_order_and_count(kinds in prop::collection::vec(kind_strategy(), 0..40)) {
        let bonds: Vec<BondSpec> = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let name = format!("B{i}");
                match kind {
                    BondKind::Fixed => BondSpec::fixed(name, dec!(950), dec!(40), 5),
                    BondKind::Linker => BondSpec::linker(name, dec!(980), dec!(20), 3),
                    BondKind::Floater => BondSpec::floater(name, dec!(0.01)),
                }
            })
            .collect();
        let market = MarketContext::new(dec!(0.04), dec!(0.10));

        let report = analyze_bonds(&bonds, &market);

        prop_assert_eq!(report.len(), bonds.len());
        for (bond, record) in bonds.iter().zip(&report) {
            prop_assert_eq!(&bond.name, &record.name);
            prop_assert_eq!(bond.kind, record.kind);
            prop_assert!(record.failure.is_none());
        }
    }
}
