//! Export results to CSV and JSON.
//!
//! - the key-percentile table as CSV, easy to consume in spreadsheets
//! - the whole comparison as a JSON report (input, figures, ranks, table)

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{PercentileSummary, Period, Series};
use crate::error::AppError;
use crate::report::ComparisonReport;

#[derive(Debug, Serialize)]
struct SummaryCsvRow {
    period: Period,
    series: Series,
    percentile: f64,
    us_income_usd: f64,
    israel_income_ils: f64,
    israel_income_usd: f64,
    ratio: f64,
}

/// Write the key-percentile table to a CSV file.
pub fn write_summary_csv(path: &Path, summary: &PercentileSummary) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for row in &summary.rows {
        writer
            .serialize(SummaryCsvRow {
                period: summary.period,
                series: summary.series,
                percentile: row.percentile,
                us_income_usd: row.us_income_usd,
                israel_income_ils: row.israel_income_ils,
                israel_income_usd: row.israel_income_usd,
                ratio: row.ratio,
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;

    log::info!("wrote {} key-percentile rows to {}", summary.rows.len(), path.display());
    Ok(())
}

/// Write a comparison report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &ComparisonReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    log::info!("wrote comparison report to {}", path.display());
    Ok(())
}

/// Read a comparison report back.
pub fn read_report_json(path: &Path) -> Result<ComparisonReport, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::compare::{IncomeComparator, normalize_income};
    use crate::domain::{Currency, IncomeInput, Language, PercentileRow, PercentileTable};
    use crate::report::Interpretation;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ipos-{}-{name}", std::process::id()))
    }

    fn comparator() -> IncomeComparator {
        let table = PercentileTable::from_rows(&[
            PercentileRow::raw(10.0, 20_000.0, 74_000.0),
            PercentileRow::raw(50.0, 50_000.0, 185_000.0),
            PercentileRow::raw(90.0, 120_000.0, 444_000.0),
        ])
        .unwrap();
        IncomeComparator::new(&table, 3.7).unwrap()
    }

    #[test]
    fn summary_csv_has_header_and_one_line_per_row() {
        let summary = comparator().create_percentile_table(&[10.0, 50.0, 90.0], Period::Monthly, false);
        let path = scratch_path("summary.csv");
        write_summary_csv(&path, &summary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "period,series,percentile,us_income_usd,israel_income_ils,israel_income_usd,ratio"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("monthly,raw,50.0,"));
    }

    #[test]
    fn report_json_reads_back() {
        let cmp = comparator();
        let input = IncomeInput {
            amount: 50_000.0,
            period: Period::Annual,
            currency: Currency::Usd,
            household_size: 1,
            standardize: false,
        };
        let income = normalize_income(&input, cmp.ppp_rate());
        let result = cmp.compare_income(income.calculation_income_usd, false);
        let report = ComparisonReport {
            tool: "ipos".to_string(),
            generated_at: Utc::now(),
            language: Language::En,
            ppp_rate: cmp.ppp_rate(),
            has_standardized_data: cmp.has_standardized_data(),
            standardization_fallback: false,
            input,
            income,
            result,
            interpretation: Interpretation::classify(result.percentile_difference),
            key_percentiles: cmp.create_percentile_table(&[50.0], Period::Annual, false),
        };

        let path = scratch_path("report.json");
        write_report_json(&path, &report).unwrap();
        let back = read_report_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.generated_at, report.generated_at);
        assert_eq!(back.input, report.input);
        assert_eq!(back.interpretation, Interpretation::Similar);
        assert!((back.result.us_percentile - 50.0).abs() < 1e-9);
        assert_eq!(back.key_percentiles.rows.len(), 1);
    }
}
