//! Analyze command implementation.
//!
//! Runs a book of bonds through the analyzer and reports current yield,
//! YTM, real yield and floater coupons.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use parity_analytics::{BondAnalyzer, Metric, MetricStatus, ReportRecord, ReportSummary};
use parity_bonds::types::{BondKind, MarketContext};
use parity_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::input::{BondBook, BookMarket};
use crate::output::{
    format_decimal_percent, format_percent, print_csv, print_header, print_json, print_table,
    print_warning,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Bond book file (TOML or JSON)
    #[arg(long, conflicts_with = "demo")]
    pub file: Option<PathBuf>,

    /// Analyze the built-in demo book
    #[arg(long)]
    pub demo: bool,

    /// Expected inflation (decimal, e.g. 0.06)
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Base rate for floaters (decimal, e.g. 0.15)
    #[arg(long)]
    pub base_rate: Option<Decimal>,

    /// Coupon payments per year for bonds without their own override
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Exit with an error if any bond fails
    #[arg(long)]
    pub strict: bool,
}

/// Table row for one report record.
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Bond")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Current Yield")]
    current_yield: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Real Yield")]
    real_yield: String,
    #[tabled(rename = "Coupon Now")]
    coupon: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ReportRecord> for ReportRow {
    fn from(record: &ReportRecord) -> Self {
        Self {
            name: record.name.clone(),
            kind: record.kind.to_string(),
            current_yield: cell(record, Metric::CurrentYield),
            ytm: cell(record, Metric::Ytm),
            real_yield: cell(record, Metric::RealYield),
            coupon: cell(record, Metric::Coupon),
            status: record
                .failure
                .as_ref()
                .map_or_else(|| "ok".to_string(), |f| f.kind.to_string()),
        }
    }
}

/// Flat CSV row; empty fields are not reported.
#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: BondKind,
    current_yield: Option<f64>,
    ytm: Option<f64>,
    real_yield: Option<f64>,
    coupon: Option<Decimal>,
    error: Option<String>,
}

impl<'a> From<&'a ReportRecord> for CsvRow<'a> {
    fn from(record: &'a ReportRecord) -> Self {
        Self {
            name: &record.name,
            kind: record.kind,
            current_yield: record.current_yield,
            ytm: record.ytm,
            real_yield: record.real_yield,
            coupon: record.coupon,
            error: record.failure.as_ref().map(ToString::to_string),
        }
    }
}

fn cell(record: &ReportRecord, metric: Metric) -> String {
    match record.status(metric) {
        MetricStatus::Computed => match (metric, record.coupon) {
            (Metric::Coupon, Some(coupon)) => format_decimal_percent(coupon),
            _ => record.value(metric).map(format_percent).unwrap_or_default(),
        },
        MetricStatus::NotApplicable => "-".to_string(),
        MetricStatus::Failed(_) => "n/a".to_string(),
    }
}

fn metric_key(metric: Metric) -> &'static str {
    match metric {
        Metric::CurrentYield => "current_yield",
        Metric::Ytm => "ytm",
        Metric::RealYield => "real_yield",
        Metric::Coupon => "coupon",
    }
}

fn minimal_line(record: &ReportRecord) -> String {
    let mut parts = vec![record.name.clone()];
    for metric in Metric::ALL {
        if record.status(metric) == MetricStatus::Computed {
            parts.push(format!("{}={}", metric_key(metric), cell(record, metric)));
        }
    }
    if let Some(failure) = &record.failure {
        parts.push(format!("error={}", failure.kind));
    }
    parts.join(" ")
}

/// Builds the market from the book, configuration defaults and overrides.
fn resolve_market(
    book_market: Option<&BookMarket>,
    args: &AnalyzeArgs,
    config: &AnalysisConfig,
) -> MarketContext {
    let mut market = book_market
        .cloned()
        .unwrap_or_default()
        .to_context(config.default_payments_per_year);
    if let Some(inflation) = args.inflation {
        market.inflation = inflation;
    }
    if let Some(base_rate) = args.base_rate {
        market.base_rate = base_rate;
    }
    if let Some(frequency) = args.frequency {
        market.payments_per_year = frequency;
    }
    market
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let book = match (&args.file, args.demo) {
        (Some(path), _) => BondBook::load(path)?,
        (None, true) => BondBook::demo(),
        (None, false) => {
            return Err(CliError::MissingArgument("--file <PATH> or --demo".to_string()).into())
        }
    };

    let market = resolve_market(book.market.as_ref(), &args, config);
    let analyzer = BondAnalyzer::new(config.clone()).map_err(CliError::from)?;
    analyzer.check_market(&market).map_err(CliError::from)?;

    let records = analyzer.analyze_bonds(&book.bonds, &market);
    let summary = ReportSummary::from_records(&records);

    match format {
        OutputFormat::Table => {
            print_header("Bond Yield Report");
            let rows: Vec<ReportRow> = records.iter().map(ReportRow::from).collect();
            print_table(&rows)?;
            println!(
                "Inflation: {}  Base rate: {}  Payments/year: {}",
                format_decimal_percent(market.inflation),
                format_decimal_percent(market.base_rate),
                market.payments_per_year
            );
            for record in &records {
                if let Some(failure) = &record.failure {
                    print_warning(&format!("{}: {}", record.name, failure.message));
                }
            }
        }
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Csv => {
            let rows: Vec<CsvRow<'_>> = records.iter().map(CsvRow::from).collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => {
            for record in &records {
                println!("{}", minimal_line(record));
            }
        }
    }

    if args.strict && summary.failed() > 0 {
        anyhow::bail!(
            "{} of {} bonds failed analysis",
            summary.failed(),
            summary.total
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_analytics::analyze_bonds;
    use parity_bonds::types::BondSpec;
    use rust_decimal_macros::dec;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            file: None,
            demo: true,
            inflation: None,
            base_rate: Some(dec!(0.2)),
            frequency: None,
            strict: false,
        }
    }

    #[test]
    fn test_market_overrides() {
        let book = BondBook::demo();
        let market = resolve_market(book.market.as_ref(), &args(), &AnalysisConfig::default());
        assert_eq!(market.inflation, dec!(0.06));
        assert_eq!(market.base_rate, dec!(0.2));
    }

    #[test]
    fn test_market_defaults_from_config() {
        let mut config = AnalysisConfig::default();
        config.default_payments_per_year = 2;
        let market = resolve_market(None, &args(), &config);
        assert_eq!(market.payments_per_year, 2);
    }

    #[test]
    fn test_book_market_without_frequency_uses_config_default() {
        let mut config = AnalysisConfig::default();
        config.default_payments_per_year = 2;
        let book_market = BookMarket {
            inflation: dec!(0.05),
            base_rate: dec!(0.1),
            payments_per_year: None,
        };

        let market = resolve_market(Some(&book_market), &args(), &config);

        assert_eq!(market.payments_per_year, 2);
        assert_eq!(market.inflation, dec!(0.05));
        assert_eq!(market.base_rate, dec!(0.2));
    }

    #[test]
    fn test_frequency_override_beats_book() {
        let book_market = BookMarket {
            payments_per_year: Some(4),
            ..BookMarket::default()
        };
        let mut overrides = args();
        overrides.frequency = Some(12);

        let market = resolve_market(Some(&book_market), &overrides, &AnalysisConfig::default());

        assert_eq!(market.payments_per_year, 12);
    }

    #[test]
    fn test_row_cells() {
        let market = MarketContext::new(dec!(0.06), dec!(0.15));
        let records = analyze_bonds(
            &[
                BondSpec::floater("C", dec!(0.005)),
                BondSpec::fixed("Z", dec!(900), dec!(35), 0),
            ],
            &market,
        );

        let floater = ReportRow::from(&records[0]);
        assert_eq!(floater.coupon, "15.50%");
        assert_eq!(floater.ytm, "-");
        assert_eq!(floater.status, "ok");

        let broken = ReportRow::from(&records[1]);
        assert_eq!(broken.ytm, "n/a");
        assert_eq!(broken.real_yield, "-");
        assert_eq!(broken.status, "invalid input");
    }
}
