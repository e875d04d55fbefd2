//! Yield command implementation.
//!
//! Solves the yield to maturity of a single bond from its price.

use anyhow::Result;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use parity_bonds::cashflows::{compute_cash_flows, CashFlowSchedule};
use parity_bonds::pricing::{current_yield, Annualization, SolverMethod, YieldResult};
use parity_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_json, print_table, KeyValue};

/// Arguments for the yield command.
#[derive(Args, Debug)]
pub struct YieldArgs {
    /// Market price
    #[arg(long)]
    pub price: Decimal,

    /// Coupon cash amount paid each period
    #[arg(long, default_value = "0")]
    pub coupon: Decimal,

    /// Whole years to maturity
    #[arg(long)]
    pub years: u32,

    /// Face value (default from configuration)
    #[arg(long)]
    pub face: Option<Decimal>,

    /// Coupon payments per year (default from configuration)
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Root-finding method
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Annualization convention
    #[arg(long, value_enum)]
    pub annualization: Option<AnnualizationArg>,

    /// Show the cash-flow schedule
    #[arg(long)]
    pub cashflows: bool,
}

/// Root-finding method choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Plain bisection
    Bisection,
    /// Newton steps safeguarded by bisection
    Newton,
}

impl From<MethodArg> for SolverMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Bisection => SolverMethod::Bisection,
            MethodArg::Newton => SolverMethod::NewtonBisection,
        }
    }
}

/// Annualization choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnnualizationArg {
    /// (1 + r)^m - 1
    Effective,
    /// r * m
    Nominal,
}

impl From<AnnualizationArg> for Annualization {
    fn from(arg: AnnualizationArg) -> Self {
        match arg {
            AnnualizationArg::Effective => Annualization::EffectiveAnnual,
            AnnualizationArg::Nominal => Annualization::Nominal,
        }
    }
}

/// Solved yield for one bond.
#[derive(Debug, Serialize)]
struct YieldReport {
    price: Decimal,
    coupon: Decimal,
    years: u32,
    payments_per_year: u32,
    face_value: Decimal,
    current_yield: f64,
    ytm: f64,
    periodic_rate: f64,
    annualization: Annualization,
    method: SolverMethod,
    iterations: u32,
    residual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cash_flows: Option<Vec<CashFlowRow>>,
}

impl YieldReport {
    fn key_values(&self) -> Vec<KeyValue> {
        vec![
            KeyValue::new("Price", self.price.to_string()),
            KeyValue::new("Coupon per Period", self.coupon.to_string()),
            KeyValue::new("Face Value", self.face_value.to_string()),
            KeyValue::new("Years", self.years.to_string()),
            KeyValue::new("Payments per Year", self.payments_per_year.to_string()),
            KeyValue::from_percent("Current Yield", self.current_yield),
            KeyValue::from_percent(format!("YTM ({})", self.annualization), self.ytm),
            KeyValue::from_percent("Periodic Rate", self.periodic_rate),
            KeyValue::new("Method", self.method.to_string()),
            KeyValue::new("Iterations", self.iterations.to_string()),
            KeyValue::new("Residual", format!("{:.2e}", self.residual)),
        ]
    }
}

#[derive(Debug, Serialize, Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Period")]
    period: u32,
    #[tabled(rename = "Amount")]
    amount: Decimal,
    #[tabled(rename = "Type")]
    flow_type: String,
}

fn cash_flow_rows(schedule: &CashFlowSchedule) -> Vec<CashFlowRow> {
    schedule
        .iter()
        .map(|cf| CashFlowRow {
            period: cf.period,
            amount: cf.amount,
            flow_type: cf.flow_type.to_string(),
        })
        .collect()
}

/// Execute the yield command.
pub fn execute(args: YieldArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let m = args.frequency.unwrap_or(config.default_payments_per_year);
    let face = args.face.unwrap_or(config.default_face_value);
    let annual_coupon = args.coupon * Decimal::from(m);

    let mut solver = config.yield_solver();
    if let Some(method) = args.method {
        solver = solver.with_method(method.into());
    }
    if let Some(annualization) = args.annualization {
        solver = solver.with_annualization(annualization.into());
    }

    let schedule =
        compute_cash_flows(annual_coupon, face, args.years, m).map_err(CliError::from)?;
    let result: YieldResult = solver
        .solve(&schedule, args.price)
        .map_err(CliError::from)?;
    let cy = current_yield(annual_coupon, args.price).map_err(CliError::from)?;

    let report = YieldReport {
        price: args.price,
        coupon: args.coupon,
        years: args.years,
        payments_per_year: m,
        face_value: face,
        current_yield: cy,
        ytm: result.yield_value,
        periodic_rate: result.periodic_rate,
        annualization: solver.annualization(),
        method: solver.method(),
        iterations: result.iterations,
        residual: result.residual,
        cash_flows: args.cashflows.then(|| cash_flow_rows(&schedule)),
    };

    match format {
        OutputFormat::Table => {
            print_header("Yield to Maturity");
            print_table(&report.key_values())?;
            if let Some(rows) = &report.cash_flows {
                print_header("Cash-Flow Schedule");
                print_table(rows)?;
            }
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(&report.key_values())?,
        OutputFormat::Minimal => println!("{:.10}", report.ytm),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cash_flow_rows_use_display_names() {
        let schedule = compute_cash_flows(dec!(35), dec!(1000), 3, 1).unwrap();
        let rows = cash_flow_rows(&schedule);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].flow_type, "Coupon");
        assert_eq!(rows[2].flow_type, "Coupon+Principal");
        assert_eq!(rows[2].amount, dec!(1035));
    }
}
