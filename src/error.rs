//! Error types.
//!
//! - `ComparatorError` / `TableError`: typed failures of the core (what went wrong)
//! - `AppError`: the application boundary (message + process exit code)

use crate::domain::Series;

/// Construction failures of [`crate::compare::IncomeComparator`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ComparatorError {
    #[error("Required column {column} missing from the data")]
    Schema { column: String },
    #[error("Cannot interpolate the {series} series: need at least 2 distinct income values, found {distinct}")]
    Interpolation { series: String, distinct: usize },
}

/// Failures while assembling a [`crate::domain::PercentileTable`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Column {column} has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("Table has no rows")]
    Empty,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ComparatorError> for AppError {
    fn from(err: ComparatorError) -> Self {
        let code = match err {
            ComparatorError::Schema { .. } => 2,
            ComparatorError::Interpolation { .. } => 3,
        };
        AppError::new(code, format!("Error processing data: {err}"))
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        let code = match err {
            TableError::Empty => 3,
            _ => 2,
        };
        AppError::new(code, format!("Error loading data: {err}"))
    }
}

/// Label used in interpolation errors.
pub(crate) fn series_label(series: Series, country: &str) -> String {
    match series {
        Series::Raw => country.to_string(),
        Series::Standardized => format!("{country} standardized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_the_column_and_maps_to_input_exit_code() {
        let err = ComparatorError::Schema {
            column: "US_Income_USD".to_string(),
        };
        assert_eq!(err.to_string(), "Required column US_Income_USD missing from the data");

        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().contains("US_Income_USD"));
    }

    #[test]
    fn interpolation_error_maps_to_no_data_exit_code() {
        let app: AppError = ComparatorError::Interpolation {
            series: series_label(Series::Standardized, "Israel"),
            distinct: 1,
        }
        .into();
        assert_eq!(app.exit_code(), 3);
        assert!(app.to_string().contains("Israel standardized"));
    }
}
