//! Shared "comparison pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> comparator (PPP conversion, interpolants) -> normalized income
//! -> comparison -> key-percentile table
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::Utc;

use crate::compare::{IncomeComparator, NormalizedIncome, normalize_income};
use crate::domain::{CalculatorConfig, ComparisonResult, PercentileSummary, PercentileTable};
use crate::error::AppError;
use crate::io::ingest::{IngestedTable, load_percentile_table};
use crate::report::{ComparisonReport, Interpretation};

/// All computed outputs of a single comparison run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedTable,
    pub comparator: IncomeComparator,
    pub query: QueryOutput,
}

/// The answer to one income query against a built comparator.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    pub income: NormalizedIncome,
    pub result: ComparisonResult,
    pub summary: PercentileSummary,
    /// Standardization was requested but the table has no standardized columns.
    pub standardization_fallback: bool,
}

/// Execute the full pipeline: load the table, build the comparator, answer the query.
pub fn run_compare(config: &CalculatorConfig) -> Result<RunOutput, AppError> {
    let ingest = load_percentile_table(&config.data_path)?;
    let comparator = build_comparator(&ingest.table, config.ppp_rate)?;
    let query = run_query(&comparator, config);

    Ok(RunOutput {
        ingest,
        comparator,
        query,
    })
}

/// Build a comparator for a loaded table.
///
/// This is useful for the TUI where a PPP change rebuilds the comparator
/// without re-reading the CSV.
pub fn build_comparator(table: &PercentileTable, ppp_rate: f64) -> Result<IncomeComparator, AppError> {
    Ok(IncomeComparator::new(table, ppp_rate)?)
}

/// Answer the configured income query.
pub fn run_query(comparator: &IncomeComparator, config: &CalculatorConfig) -> QueryOutput {
    let income = normalize_income(&config.input, comparator.ppp_rate());
    let standardize = config.input.standardize;
    let standardization_fallback = standardize && !comparator.has_standardized_data();
    if standardization_fallback {
        log::warn!("standardized columns missing; comparing a standardized income against raw distributions");
    }

    let result = comparator.compare_income(income.calculation_income_usd, standardize);
    let summary = comparator.create_percentile_table(&config.key_percentiles, config.input.period, standardize);

    log::debug!(
        "income {:.2} USD -> US {:.1} / Israel {:.1} ({:?})",
        result.income_usd,
        result.us_percentile,
        result.israel_percentile,
        result.series
    );

    QueryOutput {
        income,
        result,
        summary,
        standardization_fallback,
    }
}

/// Assemble the report record for rendering or export.
pub fn build_report(comparator: &IncomeComparator, query: &QueryOutput, config: &CalculatorConfig) -> ComparisonReport {
    ComparisonReport {
        tool: env!("CARGO_PKG_NAME").to_string(),
        generated_at: Utc::now(),
        language: config.language,
        ppp_rate: comparator.ppp_rate(),
        has_standardized_data: comparator.has_standardized_data(),
        standardization_fallback: query.standardization_fallback,
        input: config.input,
        income: query.income,
        result: query.result,
        interpretation: Interpretation::classify(query.result.percentile_difference),
        key_percentiles: query.summary.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        COL_US_STD_INCOME_USD, Currency, DEFAULT_KEY_PERCENTILES, IncomeInput, Language, PercentileRow, Period, Series,
    };

    fn config(standardize: bool, household_size: i64) -> CalculatorConfig {
        CalculatorConfig {
            data_path: "unused.csv".into(),
            ppp_rate: 3.7,
            language: Language::En,
            input: IncomeInput {
                amount: 14_000.0,
                period: Period::Monthly,
                currency: Currency::Ils,
                household_size,
                standardize,
            },
            key_percentiles: DEFAULT_KEY_PERCENTILES.to_vec(),
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_json: None,
            export_table: None,
        }
    }

    fn table() -> PercentileTable {
        PercentileTable::from_rows(&[
            PercentileRow::raw(10.0, 20_000.0, 74_000.0).with_standardized(12_000.0, 37_000.0),
            PercentileRow::raw(50.0, 50_000.0, 185_000.0).with_standardized(30_000.0, 92_500.0),
            PercentileRow::raw(90.0, 120_000.0, 444_000.0).with_standardized(70_000.0, 222_000.0),
        ])
        .unwrap()
    }

    #[test]
    fn monthly_ils_query_compares_annual_usd() {
        let cmp = build_comparator(&table(), 3.7).unwrap();
        let q = run_query(&cmp, &config(false, 1));
        let annual_usd = 14_000.0 * 12.0 / 3.7;
        assert!((q.result.income_usd - annual_usd).abs() < 1e-9);
        assert_eq!(q.summary.period, Period::Monthly);
        assert_eq!(q.summary.rows.len(), DEFAULT_KEY_PERCENTILES.len());
        assert!(!q.standardization_fallback);
    }

    #[test]
    fn standardized_query_reports_fallback_only_without_data() {
        let cmp = build_comparator(&table(), 3.7).unwrap();
        let q = run_query(&cmp, &config(true, 4));
        assert_eq!(q.result.series, Series::Standardized);
        assert!(!q.standardization_fallback);

        let cmp = build_comparator(&table().without_column(COL_US_STD_INCOME_USD), 3.7).unwrap();
        let q = run_query(&cmp, &config(true, 4));
        assert_eq!(q.result.series, Series::Raw);
        assert!(q.standardization_fallback);

        let report = build_report(&cmp, &q, &config(true, 4));
        assert!(report.standardization_fallback);
        assert!(!report.has_standardized_data);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let mut cfg = config(false, 1);
        cfg.data_path = "definitely/not/here.csv".into();
        let err = run_compare(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
