//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the comparator
//! - rendered by the text report and the charts
//! - exported to JSON/CSV

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

pub const COL_PERCENTILE: &str = "Percentile";
pub const COL_US_INCOME_USD: &str = "US_Income_USD";
pub const COL_ISRAEL_INCOME_ILS: &str = "Israel_Income_ILS";
pub const COL_US_STD_INCOME_USD: &str = "US_Std_Income_USD";
pub const COL_ISRAEL_STD_INCOME_ILS: &str = "Israel_Std_Income_ILS";

/// Columns every table must carry.
pub const REQUIRED_RAW_COLUMNS: [&str; 3] = [COL_PERCENTILE, COL_US_INCOME_USD, COL_ISRAEL_INCOME_ILS];

/// Columns that together make up the standardized (per-capita) distribution.
pub const REQUIRED_STD_COLUMNS: [&str; 3] = [COL_PERCENTILE, COL_US_STD_INCOME_USD, COL_ISRAEL_STD_INCOME_ILS];

/// Percentiles shown in the key-threshold table unless the user asks for others.
pub const DEFAULT_KEY_PERCENTILES: [f64; 6] = [10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

/// Percentile reported for incomes below the lowest table income.
pub const PERCENTILE_FLOOR: f64 = 1.0;
/// Percentile reported for incomes above the highest table income.
pub const PERCENTILE_CEIL: f64 = 99.0;

/// Which distribution pair answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    /// Household income as reported.
    Raw,
    /// Per-capita income, already equivalence-scaled upstream.
    Standardized,
}

/// Income period of the user's input and of the key-percentile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Annual,
    Monthly,
}

impl Period {
    /// Divisor applied to annual figures.
    pub fn divisor(self) -> f64 {
        match self {
            Period::Annual => 1.0,
            Period::Monthly => 12.0,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Period::Annual => Period::Monthly,
            Period::Monthly => Period::Annual,
        }
    }
}

/// Currency of the user's input amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Ils,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Ils => "₪",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ils => "ILS",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Currency::Usd => Currency::Ils,
            Currency::Ils => Currency::Usd,
        }
    }
}

/// Display language. Hebrew is laid out right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    He,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::He,
            Language::He => Language::En,
        }
    }
}

/// Which chart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// The user's income against both distributions.
    Income,
    /// Both distributions, no income overlay.
    Distribution,
}

impl ChartKind {
    pub fn toggle(self) -> Self {
        match self {
            ChartKind::Income => ChartKind::Distribution,
            ChartKind::Distribution => ChartKind::Income,
        }
    }
}

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRow {
    pub percentile: f64,
    pub us_income_usd: f64,
    pub israel_income_ils: f64,
    pub us_std_income_usd: Option<f64>,
    pub israel_std_income_ils: Option<f64>,
}

impl PercentileRow {
    pub fn raw(percentile: f64, us_income_usd: f64, israel_income_ils: f64) -> Self {
        Self {
            percentile,
            us_income_usd,
            israel_income_ils,
            us_std_income_usd: None,
            israel_std_income_ils: None,
        }
    }

    pub fn with_standardized(mut self, us_std_income_usd: f64, israel_std_income_ils: f64) -> Self {
        self.us_std_income_usd = Some(us_std_income_usd);
        self.israel_std_income_ils = Some(israel_std_income_ils);
        self
    }
}

/// A named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// The percentile breakpoint table as named columns of equal length.
///
/// Columns are kept by name (not as a fixed struct) so that a table lacking a
/// required column can be represented and rejected by the comparator with a
/// precise error. Name lookup is ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileTable {
    columns: Vec<Column>,
    len: usize,
}

impl PercentileTable {
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let len = columns.first().map(|c| c.values.len()).unwrap_or(0);
        if len == 0 {
            return Err(TableError::Empty);
        }

        for (idx, col) in columns.iter().enumerate() {
            if col.values.len() != len {
                return Err(TableError::ColumnLength {
                    column: col.name.clone(),
                    expected: len,
                    found: col.values.len(),
                });
            }
            if columns[..idx].iter().any(|c| c.name.eq_ignore_ascii_case(&col.name)) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
        }

        Ok(Self { columns, len })
    }

    /// Build a table from typed rows.
    ///
    /// The standardized columns are included only when every row carries both
    /// standardized values.
    pub fn from_rows(rows: &[PercentileRow]) -> Result<Self, TableError> {
        let mut columns = vec![
            Column::new(COL_PERCENTILE, rows.iter().map(|r| r.percentile).collect()),
            Column::new(COL_US_INCOME_USD, rows.iter().map(|r| r.us_income_usd).collect()),
            Column::new(COL_ISRAEL_INCOME_ILS, rows.iter().map(|r| r.israel_income_ils).collect()),
        ];

        let us_std: Option<Vec<f64>> = rows.iter().map(|r| r.us_std_income_usd).collect();
        let il_std: Option<Vec<f64>> = rows.iter().map(|r| r.israel_std_income_ils).collect();
        if let (Some(us_std), Some(il_std)) = (us_std, il_std) {
            columns.push(Column::new(COL_US_STD_INCOME_USD, us_std));
            columns.push(Column::new(COL_ISRAEL_STD_INCOME_ILS, il_std));
        }

        Self::from_columns(columns)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.values.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Drop a column by name (useful for trimming optional data).
    pub fn without_column(mut self, name: &str) -> Self {
        self.columns.retain(|c| !c.name.eq_ignore_ascii_case(name));
        self
    }
}

/// Where an income ranks in both distributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub income_usd: f64,
    pub income_ils: f64,
    pub us_percentile: f64,
    pub israel_percentile: f64,
    /// `israel_percentile - us_percentile`.
    pub percentile_difference: f64,
    /// The distribution pair that actually answered the query.
    pub series: Series,
}

/// One row of the key-percentile summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub percentile: f64,
    pub us_income_usd: f64,
    pub israel_income_ils: f64,
    pub israel_income_usd: f64,
    /// US income over Israel income (USD at PPP); independent of the period.
    pub ratio: f64,
}

/// Key-percentile table derived from the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileSummary {
    pub period: Period,
    pub series: Series,
    pub rows: Vec<SummaryRow>,
}

/// The user's income as entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeInput {
    pub amount: f64,
    pub period: Period,
    pub currency: Currency,
    pub household_size: i64,
    pub standardize: bool,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    pub data_path: PathBuf,
    pub ppp_rate: f64,
    pub language: Language,
    pub input: IncomeInput,
    pub key_percentiles: Vec<f64>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
    pub export_table: Option<PathBuf>,
}
