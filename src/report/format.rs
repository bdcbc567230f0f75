//! Formatted terminal output for a comparison.
//!
//! We keep formatting code in one place so:
//! - the comparison code stays clean and testable
//! - output changes are localized (the CLI and the TUI read the same text)

use crate::compare::IncomeFigures;
use crate::domain::{Currency, Language, PercentileSummary, Period, Series};
use crate::i18n::{Strings, TextDirection, fill};
use crate::report::ComparisonReport;

/// Format the full text report.
pub fn format_report(report: &ComparisonReport) -> String {
    let s = report.language.strings();
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", s.page_title));
    out.push_str(s.intro);
    out.push_str("\n\n");

    out.push_str(&format!("{}:\n", s.config));
    out.push_str(&kv_lines(&[
        (s.ppp_rate, format!("{:.2}", report.ppp_rate)),
        (s.household_size, report.input.household_size.to_string()),
        (s.income_period, period_label(s, report.input.period).to_string()),
        (s.currency, report.input.currency.code().to_string()),
        (s.standardize, yes_no(s, report.input.standardize).to_string()),
    ]));
    out.push('\n');

    if report.standardization_fallback {
        out.push_str(&format!("! {}\n\n", s.standardize_warning));
    }

    out.push_str(&format!("== {} ==\n\n", s.results));

    out.push_str(&format!("-- {} --\n", s.raw_income));
    out.push_str(&figure_lines(s, &report.income.raw));
    out.push('\n');

    if report.input.standardize {
        out.push_str(&format!("-- {} --\n", s.std_income));
        out.push_str(&figure_lines(s, &report.income.standardized));
        out.push_str(&fill(
            s.divided_by,
            &[&report.income.household_size.to_string(), &format!("{:.3}", report.income.scale)],
        ));
        out.push_str("\n\n");
    }

    out.push_str(&format_position(s, report));
    out.push('\n');
    out.push_str(&format_interpretation(s, report));
    out.push('\n');

    out.push_str(&format!("-- {} --\n", s.key_thresholds));
    out.push_str(&format_key_table(&report.key_percentiles, report.language));
    out.push('\n');

    out.push_str(&format_methodology(report.language));

    align_for(report.language.direction(), &out)
}

fn format_position(s: &Strings, report: &ComparisonReport) -> String {
    let r = &report.result;
    let mut out = format!("-- {} --\n", s.percentile_position);
    out.push_str(&kv_lines(&[
        (s.us_dist, format!("{:.1}%", r.us_percentile)),
        (s.il_dist, format!("{:.1}%", r.israel_percentile)),
        (s.difference, format!("{:.1} {}", r.percentile_difference, s.points)),
    ]));
    if report.input.standardize && report.has_standardized_data {
        out.push_str(s.using_precalc);
        out.push('\n');
    }
    out
}

fn format_interpretation(s: &Strings, report: &ComparisonReport) -> String {
    let r = &report.result;
    let mut out = format!("-- {} --\n", s.interpretation);
    out.push_str(&report.interpretation.sentence(s));
    out.push_str("\n\n");

    let article = if report.input.standardize { s.standardized_a } else { s.an };
    out.push_str(&fill(
        s.this_means,
        &[article, &group_thousands(report.income.calculation_income_usd, 2)],
    ));
    out.push('\n');

    let us = format!("{:.1}", r.us_percentile);
    let il = format!("{:.1}", r.israel_percentile);
    out.push_str(&format!("- {}\n", fill(s.us_percentile, &[&us, &us])));
    out.push_str(&format!("- {}\n", fill(s.il_percentile, &[&il, &il])));

    if report.input.standardize {
        let source = if report.has_standardized_data {
            s.precalculated
        } else {
            s.manually_calculated
        };
        out.push('\n');
        out.push_str(&fill(s.note_analysis, &[source]));
        out.push('\n');
    }
    out
}

/// Format the key-percentile table, with its title line.
///
/// Money columns are rounded to whole units; the ratio keeps 2 decimals.
pub fn format_key_table(summary: &PercentileSummary, language: Language) -> String {
    let s = language.strings();
    let prefix = match summary.series {
        Series::Standardized => s.tbl_standardized,
        Series::Raw => "",
    };

    let headers = [
        s.tbl_percentile.to_string(),
        fill(s.tbl_us_income, &[prefix]),
        fill(s.tbl_il_income_ils, &[prefix]),
        fill(s.tbl_il_income_usd, &[prefix]),
        s.tbl_ratio.to_string(),
    ];

    let rows: Vec<[String; 5]> = summary
        .rows
        .iter()
        .map(|r| {
            [
                fmt_percentile(r.percentile),
                fmt_money(Currency::Usd, r.us_income_usd, 0),
                fmt_money(Currency::Ils, r.israel_income_ils, 0),
                fmt_money(Currency::Usd, r.israel_income_usd, 0),
                format!("{:.2}", r.ratio),
            ]
        })
        .collect();

    let mut widths = headers.clone().map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = fill(s.income_at_key, &[period_label(s, summary.period), prefix]);
    out.push('\n');
    out.push_str(&table_line(&headers, &widths));
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&table_line(&rule, &widths));
    for row in &rows {
        out.push_str(&table_line(row, &widths));
    }
    out
}

/// Methodology notes and the footer.
pub fn format_methodology(language: Language) -> String {
    let s = language.strings();
    let mut out = format!("== {} ==\n\n", s.methodology);
    for (title, body) in [
        (s.data_sources, s.data_sources_text),
        (s.square_root, s.square_root_text),
        (s.data_file, s.data_file_text),
        (s.limitations, s.limitations_text),
        (s.interpretation_header, s.interpretation_text),
    ] {
        out.push_str(&format!("-- {title} --\n{body}\n\n"));
    }
    out.push_str(&format!("---\n{}\n", s.footer));
    out
}

/// Right-align every non-empty line of `text` for right-to-left languages.
pub fn align_for(direction: TextDirection, text: &str) -> String {
    match direction {
        TextDirection::Ltr => text.to_string(),
        TextDirection::Rtl => {
            let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            let mut out = String::with_capacity(text.len() + width);
            for line in text.lines() {
                if !line.is_empty() {
                    out.push_str(&format!("{line:>width$}"));
                }
                out.push('\n');
            }
            out
        }
    }
}

/// `1234567.891` with 2 decimals -> `1,234,567.89`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    let n = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Currency symbol followed by the grouped amount, e.g. `₪185,000`.
pub fn fmt_money(currency: Currency, value: f64, decimals: usize) -> String {
    format!("{}{}", currency.symbol(), group_thousands(value, decimals))
}

fn fmt_percentile(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{p:.0}")
    } else {
        format!("{p:.1}")
    }
}

fn figure_lines(s: &Strings, f: &IncomeFigures) -> String {
    kv_lines(&[
        (s.annual_usd_short, fmt_money(Currency::Usd, f.annual_usd, 2)),
        (s.annual_ils_short, fmt_money(Currency::Ils, f.annual_ils, 2)),
        (s.monthly_usd_short, fmt_money(Currency::Usd, f.monthly_usd, 2)),
        (s.monthly_ils_short, fmt_money(Currency::Ils, f.monthly_ils, 2)),
    ])
}

fn kv_lines(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(&format!("{key:<width$}  {value}\n"));
    }
    out
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:>w$}"))
        .collect();
    let mut line = parts.join("  ").trim_end().to_string();
    line.push('\n');
    line
}

pub(crate) fn period_label(s: &Strings, period: Period) -> &'static str {
    match period {
        Period::Annual => s.annual,
        Period::Monthly => s.monthly,
    }
}

fn yes_no(s: &Strings, v: bool) -> &'static str {
    if v { s.yes } else { s.no }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::compare::{IncomeComparator, normalize_income};
    use crate::domain::{IncomeInput, PercentileRow, PercentileTable};
    use crate::report::Interpretation;

    fn report(language: Language, standardize: bool, household_size: i64) -> ComparisonReport {
        let table = PercentileTable::from_rows(&[
            PercentileRow::raw(10.0, 20_000.0, 74_000.0),
            PercentileRow::raw(50.0, 50_000.0, 185_000.0),
            PercentileRow::raw(90.0, 120_000.0, 444_000.0),
        ])
        .unwrap();
        let cmp = IncomeComparator::new(&table, 3.7).unwrap();
        let input = IncomeInput {
            amount: 50_000.0,
            period: Period::Annual,
            currency: Currency::Usd,
            household_size,
            standardize,
        };
        let income = normalize_income(&input, 3.7);
        let result = cmp.compare_income(income.calculation_income_usd, standardize);
        ComparisonReport {
            tool: "ipos".to_string(),
            generated_at: Utc::now(),
            language,
            ppp_rate: 3.7,
            has_standardized_data: cmp.has_standardized_data(),
            standardization_fallback: standardize && !cmp.has_standardized_data(),
            input,
            income,
            result,
            interpretation: Interpretation::classify(result.percentile_difference),
            key_percentiles: cmp.create_percentile_table(&[10.0, 50.0, 90.0], Period::Annual, standardize),
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1_000.0, 0), "1,000");
        assert_eq!(group_thousands(999.999, 2), "1,000.00");
        assert_eq!(group_thousands(-1_234.5, 1), "-1,234.5");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
        assert_eq!(fmt_money(Currency::Ils, 185_000.0, 0), "₪185,000");
    }

    #[test]
    fn scenario_report_reads_similar_position() {
        let text = format_report(&report(Language::En, false, 1));
        assert!(text.contains("Annual USD:   $50,000.00"), "{text}");
        assert!(text.contains("Annual ILS:   ₪185,000.00"));
        assert!(text.contains("US Distribution:      50.0%"));
        assert!(text.contains(EN_SIMILAR));
        assert!(text.contains("This means an annual income of $50,000.00 would place you:"));
        assert!(!text.contains("Divided by"));
        assert!(!text.contains("Note: This analysis"));
    }

    const EN_SIMILAR: &str = "Your income has a similar relative position in both countries.";

    #[test]
    fn standardized_request_without_data_warns_and_notes_manual_calculation() {
        let text = format_report(&report(Language::En, true, 4));
        assert!(text.contains("Divided by √4 = 2.000"));
        assert!(text.contains("! Standardized income data is not available"));
        assert!(text.contains("manually calculated"));
        assert!(text.contains("a standardized annual income of $25,000.00"));
        assert!(!text.contains("Using pre-calculated"));
    }

    #[test]
    fn key_table_rounds_money_and_keeps_ratio_decimals() {
        let r = report(Language::En, false, 1);
        let table = format_key_table(&r.key_percentiles, Language::En);
        let expected = "\
Annual Income at Key Percentiles:
Percentile  US Income (USD)  Israel Income (ILS)  Israel Income (USD PPP)  Ratio (US/Israel)
----------  ---------------  -------------------  -----------------------  -----------------
        10          $20,000              ₪74,000                  $20,000               1.00
        50          $50,000             ₪185,000                  $50,000               1.00
        90         $120,000             ₪444,000                 $120,000               1.00
";
        assert_eq!(table, expected);
    }

    #[test]
    fn hebrew_report_is_right_aligned() {
        let text = format_report(&report(Language::He, false, 1));
        let widths: Vec<usize> = text
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.len() > 10);
        assert!(widths.iter().all(|&w| w == widths[0]));
        assert!(text.contains(HE_TITLE));
    }

    const HE_TITLE: &str = "מחשבון מיקום הכנסה";

    #[test]
    fn ltr_alignment_is_identity() {
        assert_eq!(align_for(TextDirection::Ltr, "a\n\nbb\n"), "a\n\nbb\n");
        assert_eq!(align_for(TextDirection::Rtl, "a\n\nbb\n"), " a\n\nbb\n");
    }
}
