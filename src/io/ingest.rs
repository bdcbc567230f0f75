//! CSV ingest for the percentile breakpoint table.
//!
//! This module turns the `data.csv` resource into a [`PercentileTable`].
//!
//! Design goals:
//! - **Recognized columns only**: the five known columns are parsed, anything
//!   else in the file is ignored
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No schema policy here**: required-column checks belong to the comparator,
//!   which reports the missing column by name

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{
    COL_ISRAEL_INCOME_ILS, COL_ISRAEL_STD_INCOME_ILS, COL_PERCENTILE, COL_US_INCOME_USD, COL_US_STD_INCOME_USD,
    Column, PercentileTable,
};
use crate::error::AppError;
use crate::math::is_non_decreasing;

/// Columns the calculator understands, in canonical spelling.
pub const KNOWN_COLUMNS: [&str; 5] = [
    COL_PERCENTILE,
    COL_US_INCOME_USD,
    COL_ISRAEL_INCOME_ILS,
    COL_US_STD_INCOME_USD,
    COL_ISRAEL_STD_INCOME_ILS,
];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the table + row errors + counters.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: PercentileTable,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
    /// Header names present in the file but not used.
    pub ignored_columns: Vec<String>,
}

/// Load the percentile table from a CSV file.
pub fn load_percentile_table(path: &Path) -> Result<IngestedTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Error loading {}: {e}", path.display())))?;
    let ingested = read_percentile_table(file)?;
    log::info!(
        "loaded {}: {} of {} rows used",
        path.display(),
        ingested.rows_used,
        ingested.rows_read
    );
    Ok(ingested)
}

/// Read the percentile table from any CSV source.
pub fn read_percentile_table<R: Read>(source: R) -> Result<IngestedTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let (header_map, ignored_columns) = build_header_map(&headers);
    if header_map.is_empty() {
        return Err(AppError::new(
            2,
            format!("CSV has none of the expected columns: {}", KNOWN_COLUMNS.join(", ")),
        ));
    }
    for name in &ignored_columns {
        log::debug!("ignoring CSV column `{name}`");
    }

    // Canonical column order, restricted to what the file has.
    let present: Vec<(&'static str, usize)> = KNOWN_COLUMNS
        .iter()
        .filter_map(|&name| header_map.get(name).map(|&idx| (name, idx)))
        .collect();

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); present.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &present) {
            Ok(row) => {
                for (col, v) in values.iter_mut().zip(row) {
                    col.push(v);
                }
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        log::warn!("skipping CSV line {}: {}", err.line, err.message);
    }

    let rows_used = values.first().map(Vec::len).unwrap_or(0);
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows in the percentile table."));
    }

    let columns: Vec<Column> = present
        .iter()
        .zip(values)
        .map(|(&(name, _), values)| Column::new(name, values))
        .collect();

    if let Some(col) = columns.iter().find(|c| c.name == COL_PERCENTILE) {
        if !is_strictly_increasing(&col.values) {
            log::warn!("`{COL_PERCENTILE}` is not strictly increasing; the table is expected in ascending order");
        }
    }
    for col in columns.iter().filter(|c| c.name != COL_PERCENTILE) {
        if !is_non_decreasing(&col.values) {
            log::warn!("`{}` decreases between rows", col.name);
        }
    }

    let table = PercentileTable::from_columns(columns)?;

    Ok(IngestedTable {
        table,
        row_errors,
        rows_read,
        rows_used,
        ignored_columns,
    })
}

/// Map canonical column names to their index; collect the headers we don't use.
fn build_header_map(headers: &StringRecord) -> (HashMap<&'static str, usize>, Vec<String>) {
    let mut map = HashMap::new();
    let mut ignored = Vec::new();
    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_header_name(raw);
        match KNOWN_COLUMNS.iter().find(|known| known.eq_ignore_ascii_case(name)) {
            Some(&known) if !map.contains_key(known) => {
                map.insert(known, idx);
            }
            _ => ignored.push(name.to_string()),
        }
    }
    (map, ignored)
}

fn normalize_header_name(name: &str) -> &str {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, the `Percentile` column goes missing.
    name.trim().trim_start_matches('\u{feff}').trim()
}

fn parse_row(record: &StringRecord, present: &[(&'static str, usize)]) -> Result<Vec<f64>, String> {
    present
        .iter()
        .map(|&(name, idx)| {
            let cell = record
                .get(idx)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| format!("Missing value: `{name}`"))?;
            parse_f64(cell).ok_or_else(|| format!("Invalid number '{cell}' in `{name}`"))
        })
        .collect()
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
