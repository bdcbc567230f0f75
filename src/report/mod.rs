//! Reporting: interpretation of a comparison, the report record, and
//! formatted terminal output (`format`).

pub mod format;

pub use format::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::NormalizedIncome;
use crate::domain::{ComparisonResult, IncomeInput, Language, PercentileSummary};
use crate::i18n::{Strings, fill};

/// Percentile differences smaller than this (in absolute value) read as
/// "similar position".
pub const SIMILARITY_THRESHOLD: f64 = 3.0;

/// Plain-language reading of a percentile difference (Israel minus US).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interpretation {
    Similar,
    HigherInIsrael { points: f64 },
    HigherInUs { points: f64 },
}

impl Interpretation {
    pub fn classify(percentile_difference: f64) -> Self {
        if percentile_difference.abs() < SIMILARITY_THRESHOLD {
            Interpretation::Similar
        } else if percentile_difference > 0.0 {
            Interpretation::HigherInIsrael {
                points: percentile_difference,
            }
        } else {
            Interpretation::HigherInUs {
                points: -percentile_difference,
            }
        }
    }

    pub fn sentence(&self, s: &Strings) -> String {
        match *self {
            Interpretation::Similar => s.similar_position.to_string(),
            Interpretation::HigherInIsrael { points } => fill(s.higher_in_il, &[&format!("{points:.1}")]),
            Interpretation::HigherInUs { points } => fill(s.higher_in_us, &[&format!("{points:.1}")]),
        }
    }
}

/// Everything a rendered or exported comparison needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub language: Language,
    pub ppp_rate: f64,
    pub has_standardized_data: bool,
    /// Standardization was requested but the data has no standardized columns.
    pub standardization_fallback: bool,
    pub input: IncomeInput,
    pub income: NormalizedIncome,
    pub result: ComparisonResult,
    pub interpretation: Interpretation,
    pub key_percentiles: PercentileSummary,
}
