//! The income/percentile comparator.
//!
//! Construction validates the table schema, converts the Israeli columns to
//! USD at the PPP rate and builds one income → percentile interpolant per
//! series. After that the comparator is read-only: a different PPP rate means
//! building a new one.

use crate::domain::{
    COL_ISRAEL_INCOME_ILS, COL_ISRAEL_STD_INCOME_ILS, COL_PERCENTILE, COL_US_INCOME_USD, COL_US_STD_INCOME_USD,
    ComparisonResult, PERCENTILE_CEIL, PERCENTILE_FLOOR, PercentileSummary, PercentileTable, Period,
    REQUIRED_RAW_COLUMNS, REQUIRED_STD_COLUMNS, Series, SummaryRow,
};
use crate::error::{ComparatorError, series_label};
use crate::math::{InterpError, LinearInterpolant, is_non_decreasing};

/// A reference row with the derived PPP columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRow {
    pub percentile: f64,
    pub us_income_usd: f64,
    pub israel_income_ils: f64,
    /// `israel_income_ils / ppp_rate`.
    pub israel_income_usd: f64,
    pub us_std_income_usd: Option<f64>,
    pub israel_std_income_ils: Option<f64>,
    pub israel_std_income_usd: Option<f64>,
}

impl DerivedRow {
    /// `(us_usd, israel_ils, israel_usd)` for the requested series.
    ///
    /// Falls back to the raw figures when the row has no standardized data.
    fn incomes(&self, series: Series) -> (f64, f64, f64) {
        match (series, self.us_std_income_usd, self.israel_std_income_ils, self.israel_std_income_usd) {
            (Series::Standardized, Some(us), Some(il_ils), Some(il_usd)) => (us, il_ils, il_usd),
            _ => (self.us_income_usd, self.israel_income_ils, self.israel_income_usd),
        }
    }
}

/// A point of one plotted distribution: percentile on x, incomes (USD) on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionPoint {
    pub percentile: f64,
    pub us_income_usd: f64,
    pub israel_income_usd: f64,
}

#[derive(Debug, Clone)]
struct SeriesPair {
    us: LinearInterpolant,
    israel: LinearInterpolant,
}

#[derive(Debug, Clone)]
pub struct IncomeComparator {
    ppp_rate: f64,
    rows: Vec<DerivedRow>,
    raw: SeriesPair,
    standardized: Option<SeriesPair>,
}

impl IncomeComparator {
    /// Build a comparator from a percentile table and a PPP rate (ILS per USD).
    ///
    /// A zero or negative `ppp_rate` is not rejected here; it produces infinite
    /// or sign-inverted Israeli USD figures.
    pub fn new(table: &PercentileTable, ppp_rate: f64) -> Result<Self, ComparatorError> {
        for column in REQUIRED_RAW_COLUMNS {
            if !table.has_column(column) {
                return Err(ComparatorError::Schema {
                    column: column.to_string(),
                });
            }
        }

        let has_standardized_data = REQUIRED_STD_COLUMNS.iter().all(|c| table.has_column(c));

        let percentiles = required(table, COL_PERCENTILE)?;
        let us_usd = required(table, COL_US_INCOME_USD)?;
        let israel_ils = required(table, COL_ISRAEL_INCOME_ILS)?;
        let (us_std_usd, israel_std_ils) = if has_standardized_data {
            (table.column(COL_US_STD_INCOME_USD), table.column(COL_ISRAEL_STD_INCOME_ILS))
        } else {
            (None, None)
        };

        let rows: Vec<DerivedRow> = (0..table.len())
            .map(|i| {
                let israel_std_income_ils = israel_std_ils.map(|c| c[i]);
                DerivedRow {
                    percentile: percentiles[i],
                    us_income_usd: us_usd[i],
                    israel_income_ils: israel_ils[i],
                    israel_income_usd: israel_ils[i] / ppp_rate,
                    us_std_income_usd: us_std_usd.map(|c| c[i]),
                    israel_std_income_ils,
                    israel_std_income_usd: israel_std_income_ils.map(|v| v / ppp_rate),
                }
            })
            .collect();

        let raw = build_pair(&rows, Series::Raw)?;
        let standardized = if has_standardized_data {
            Some(build_pair(&rows, Series::Standardized)?)
        } else {
            None
        };

        log::debug!(
            "built comparator: rows={} ppp_rate={ppp_rate} standardized={has_standardized_data}",
            rows.len()
        );

        Ok(Self {
            ppp_rate,
            rows,
            raw,
            standardized,
        })
    }

    /// Whether the table carried the standardized (per-capita) distributions.
    ///
    /// When this is false, standardized queries are answered with the raw
    /// distributions; callers decide whether to warn about it.
    pub fn has_standardized_data(&self) -> bool {
        self.standardized.is_some()
    }

    pub fn ppp_rate(&self) -> f64 {
        self.ppp_rate
    }

    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    /// The series that answers a query with the given `standardized` flag.
    pub fn effective_series(&self, standardized: bool) -> Series {
        if standardized && self.has_standardized_data() {
            Series::Standardized
        } else {
            Series::Raw
        }
    }

    /// Where `income_usd` ranks in the US and Israeli distributions.
    ///
    /// Incomes outside the table range are clamped to the 1st / 99th percentile.
    pub fn compare_income(&self, income_usd: f64, standardized: bool) -> ComparisonResult {
        let series = self.effective_series(standardized);
        let pair = match (&self.standardized, series) {
            (Some(pair), Series::Standardized) => pair,
            _ => &self.raw,
        };

        let us_percentile = pair.us.eval(income_usd);
        let israel_percentile = pair.israel.eval(income_usd);

        ComparisonResult {
            income_usd,
            income_ils: income_usd * self.ppp_rate,
            us_percentile,
            israel_percentile,
            percentile_difference: israel_percentile - us_percentile,
            series,
        }
    }

    /// Key-percentile table.
    ///
    /// Each target snaps to the row with the numerically closest percentile
    /// (ties go to the earlier row). Targets that snap to the same row each
    /// produce a row. Incomes are divided by the period divisor; the ratio is
    /// computed on annual figures and does not depend on the period.
    pub fn create_percentile_table(&self, targets: &[f64], period: Period, standardized: bool) -> PercentileSummary {
        let series = self.effective_series(standardized);
        let divider = period.divisor();

        let rows = targets
            .iter()
            .filter_map(|&target| self.nearest_row(target))
            .map(|row| {
                let (us_usd, israel_ils, israel_usd) = row.incomes(series);
                SummaryRow {
                    percentile: row.percentile,
                    us_income_usd: us_usd / divider,
                    israel_income_ils: israel_ils / divider,
                    israel_income_usd: israel_usd / divider,
                    ratio: us_usd / israel_usd,
                }
            })
            .collect();

        PercentileSummary { period, series, rows }
    }

    /// Full distributions for plotting (percentile vs income in USD).
    pub fn distribution(&self, standardized: bool) -> (Series, Vec<DistributionPoint>) {
        let series = self.effective_series(standardized);
        let points = self
            .rows
            .iter()
            .map(|row| {
                let (us_usd, _, israel_usd) = row.incomes(series);
                DistributionPoint {
                    percentile: row.percentile,
                    us_income_usd: us_usd,
                    israel_income_usd: israel_usd,
                }
            })
            .collect();
        (series, points)
    }

    fn nearest_row(&self, target: f64) -> Option<&DerivedRow> {
        let mut best: Option<(&DerivedRow, f64)> = None;
        for row in &self.rows {
            let dist = (row.percentile - target).abs();
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((row, dist)),
            }
        }
        best.map(|(row, _)| row)
    }
}

fn required<'a>(table: &'a PercentileTable, column: &str) -> Result<&'a [f64], ComparatorError> {
    table.column(column).ok_or_else(|| ComparatorError::Schema {
        column: column.to_string(),
    })
}

fn build_pair(rows: &[DerivedRow], series: Series) -> Result<SeriesPair, ComparatorError> {
    let percentiles: Vec<f64> = rows.iter().map(|r| r.percentile).collect();
    let us: Vec<f64> = rows.iter().map(|r| r.incomes(series).0).collect();
    let israel: Vec<f64> = rows.iter().map(|r| r.incomes(series).2).collect();

    Ok(SeriesPair {
        us: build_interpolant(&us, &percentiles, series, "US")?,
        israel: build_interpolant(&israel, &percentiles, series, "Israel")?,
    })
}

fn build_interpolant(
    incomes: &[f64],
    percentiles: &[f64],
    series: Series,
    country: &str,
) -> Result<LinearInterpolant, ComparatorError> {
    if !is_non_decreasing(incomes) {
        log::warn!(
            "{} income column is not non-decreasing in percentile order; ranks may be inconsistent",
            series_label(series, country)
        );
    }

    LinearInterpolant::new(incomes, percentiles, PERCENTILE_FLOOR, PERCENTILE_CEIL).map_err(|e| {
        let distinct = match e {
            InterpError::TooFewKnots { distinct } => distinct,
            InterpError::LengthMismatch { .. } => 0,
        };
        ComparatorError::Interpolation {
            series: series_label(series, country),
            distinct,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, PercentileRow};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario_table() -> PercentileTable {
        PercentileTable::from_rows(&[
            PercentileRow::raw(10.0, 20_000.0, 74_000.0),
            PercentileRow::raw(50.0, 50_000.0, 185_000.0),
            PercentileRow::raw(90.0, 120_000.0, 444_000.0),
        ])
        .unwrap()
    }

    fn standardized_table() -> PercentileTable {
        PercentileTable::from_rows(&[
            PercentileRow::raw(10.0, 20_000.0, 74_000.0).with_standardized(12_000.0, 37_000.0),
            PercentileRow::raw(50.0, 50_000.0, 185_000.0).with_standardized(30_000.0, 92_500.0),
            PercentileRow::raw(90.0, 120_000.0, 444_000.0).with_standardized(70_000.0, 222_000.0),
        ])
        .unwrap()
    }

    #[test]
    fn scenario_median_income_ranks_equally() {
        let cmp = IncomeComparator::new(&scenario_table(), 3.7).unwrap();
        let israel_usd: Vec<f64> = cmp.rows().iter().map(|r| r.israel_income_usd).collect();
        for (got, want) in israel_usd.iter().zip([20_000.0, 50_000.0, 120_000.0]) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }

        let r = cmp.compare_income(50_000.0, false);
        assert!((r.us_percentile - 50.0).abs() < 1e-9);
        assert!((r.israel_percentile - 50.0).abs() < 1e-9);
        assert!(r.percentile_difference.abs() < 1e-9);
        assert_eq!(r.series, Series::Raw);
    }

    #[test]
    fn scenario_lower_knot_and_clamp() {
        let cmp = IncomeComparator::new(&scenario_table(), 3.7).unwrap();
        assert!((cmp.compare_income(20_000.0, false).us_percentile - 10.0).abs() < 1e-9);
        assert_eq!(cmp.compare_income(500.0, false).us_percentile, 1.0);
        assert_eq!(cmp.compare_income(500.0, false).israel_percentile, 1.0);
    }

    #[test]
    fn clamps_both_series_at_tails() {
        let cmp = IncomeComparator::new(&standardized_table(), 3.7).unwrap();
        for standardized in [false, true] {
            let low = cmp.compare_income(1.0, standardized);
            let high = cmp.compare_income(10_000_000.0, standardized);
            assert_eq!(low.us_percentile, 1.0);
            assert_eq!(low.israel_percentile, 1.0);
            assert_eq!(high.us_percentile, 99.0);
            assert_eq!(high.israel_percentile, 99.0);
        }
    }

    #[test]
    fn standardized_query_uses_standardized_series_when_present() {
        let cmp = IncomeComparator::new(&standardized_table(), 3.7).unwrap();
        assert!(cmp.has_standardized_data());

        let r = cmp.compare_income(30_000.0, true);
        assert_eq!(r.series, Series::Standardized);
        assert!((r.us_percentile - 50.0).abs() < 1e-9);
        // Israel std USD column = {10_000, 25_000, 60_000}; 30_000 sits 5/35 of the way to the top knot.
        let expected = 50.0 + 40.0 * (5_000.0 / 35_000.0);
        assert!((r.israel_percentile - expected).abs() < 1e-9);
    }

    #[test]
    fn missing_standardized_data_falls_back_silently() {
        let table = standardized_table().without_column(COL_ISRAEL_STD_INCOME_ILS);
        let cmp = IncomeComparator::new(&table, 3.7).unwrap();
        assert!(!cmp.has_standardized_data());

        for income in [500.0, 20_000.0, 33_333.0, 50_000.0, 99_000.0, 1e7] {
            let raw = cmp.compare_income(income, false);
            let std = cmp.compare_income(income, true);
            assert_eq!(raw, std);
        }
    }

    #[test]
    fn income_ils_is_exact_product() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let ppp: f64 = rng.gen_range(0.5..10.0);
            let income: f64 = rng.gen_range(0.0..1e7);
            let cmp = IncomeComparator::new(&scenario_table(), ppp).unwrap();
            assert_eq!(cmp.compare_income(income, false).income_ils, income * ppp);
        }
    }

    #[test]
    fn percentile_is_monotone_in_income() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut rows = Vec::new();
            let (mut us, mut il) = (1_000.0, 4_000.0);
            for p in (5..=95).step_by(5) {
                us += rng.gen_range(1.0..20_000.0);
                il += rng.gen_range(1.0..80_000.0);
                rows.push(PercentileRow::raw(p as f64, us, il));
            }
            let cmp = IncomeComparator::new(&PercentileTable::from_rows(&rows).unwrap(), 3.7).unwrap();

            let mut incomes: Vec<f64> = (0..300).map(|_| rng.gen_range(0.0..500_000.0)).collect();
            incomes.sort_by(f64::total_cmp);

            let results: Vec<ComparisonResult> = incomes.iter().map(|&x| cmp.compare_income(x, false)).collect();
            for w in results.windows(2) {
                assert!(w[1].us_percentile >= w[0].us_percentile);
                assert!(w[1].israel_percentile >= w[0].israel_percentile);
            }
        }
    }

    #[test]
    fn ratio_is_independent_of_period() {
        let cmp = IncomeComparator::new(&scenario_table(), 3.7).unwrap();
        let annual = cmp.create_percentile_table(&[50.0], Period::Annual, false);
        let monthly = cmp.create_percentile_table(&[50.0], Period::Monthly, false);

        assert!((annual.rows[0].ratio - 1.0).abs() < 1e-9);
        assert!((monthly.rows[0].ratio - 1.0).abs() < 1e-9);
        assert!((monthly.rows[0].us_income_usd - 50_000.0 / 12.0).abs() < 1e-9);
        assert!((monthly.rows[0].israel_income_ils - 185_000.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_snap_keeps_duplicates_and_prefers_earlier_rows() {
        let cmp = IncomeComparator::new(&scenario_table(), 3.7).unwrap();
        // 30 is equidistant from 10 and 50 -> 10; 45 and 55 both snap to 50.
        let summary = cmp.create_percentile_table(&[30.0, 45.0, 55.0, 99.0], Period::Annual, false);
        let got: Vec<f64> = summary.rows.iter().map(|r| r.percentile).collect();
        assert_eq!(got, vec![10.0, 50.0, 50.0, 90.0]);
    }

    #[test]
    fn standardized_summary_uses_standardized_columns() {
        let cmp = IncomeComparator::new(&standardized_table(), 3.7).unwrap();
        let summary = cmp.create_percentile_table(&[90.0], Period::Annual, true);
        assert_eq!(summary.series, Series::Standardized);
        assert_eq!(summary.rows[0].us_income_usd, 70_000.0);
        assert_eq!(summary.rows[0].israel_income_ils, 222_000.0);
        assert!((summary.rows[0].ratio - 70_000.0 / 60_000.0).abs() < 1e-9);
    }

    #[test]
    fn distribution_follows_effective_series() {
        let cmp = IncomeComparator::new(&scenario_table(), 3.7).unwrap();
        let (series, points) = cmp.distribution(true);
        assert_eq!(series, Series::Raw);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].us_income_usd, 120_000.0);
    }

    #[test]
    fn missing_raw_column_is_a_schema_error() {
        let table = scenario_table().without_column(COL_US_INCOME_USD);
        let err = IncomeComparator::new(&table, 3.7).unwrap_err();
        assert_eq!(
            err,
            ComparatorError::Schema {
                column: COL_US_INCOME_USD.to_string()
            }
        );
    }

    #[test]
    fn flat_income_series_is_an_interpolation_error() {
        let table = PercentileTable::from_columns(vec![
            Column::new(COL_PERCENTILE, vec![10.0, 50.0, 90.0]),
            Column::new(COL_US_INCOME_USD, vec![20_000.0, 20_000.0, 20_000.0]),
            Column::new(COL_ISRAEL_INCOME_ILS, vec![74_000.0, 185_000.0, 444_000.0]),
        ])
        .unwrap();
        let err = IncomeComparator::new(&table, 3.7).unwrap_err();
        assert_eq!(
            err,
            ComparatorError::Interpolation {
                series: "US".to_string(),
                distinct: 1
            }
        );
    }
}
