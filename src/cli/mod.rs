//! Command-line parsing for the income position calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the comparison code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ChartKind, Currency, Language, Period};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ipos", version, about = "Israel-US income position calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare an income against both distributions and print the full report.
    Compare(CompareArgs),
    /// Print the key-percentile table only (useful for scripting).
    Table(TableArgs),
    /// Draw an ASCII chart of the distributions.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same comparison pipeline as `ipos compare`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(CalcArgs),
}

/// Common options describing the data and the income to compare.
#[derive(Debug, Parser, Clone)]
pub struct CalcArgs {
    /// Percentile table CSV [env: INCOME_DATA_CSV] [default: data.csv].
    #[arg(long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// PPP rate, ILS per USD [env: PPP_RATE] [default: 3.7].
    #[arg(long)]
    pub ppp: Option<f64>,

    /// Display language.
    #[arg(long, value_enum, default_value_t = Language::En)]
    pub lang: Language,

    /// Number of people in the household.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=20))]
    pub household_size: i64,

    /// Period of the entered income.
    #[arg(long, value_enum, default_value_t = Period::Annual)]
    pub period: Period,

    /// Currency of the entered income.
    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    pub currency: Currency,

    /// Income amount (default: 50,000 USD a year, or its equivalent).
    #[arg(long)]
    pub income: Option<f64>,

    /// Compare per-capita income (divided by the square root of household size).
    #[arg(long)]
    pub standardize: bool,

    /// Percentiles shown in the key-percentile table.
    #[arg(long, value_delimiter = ',', default_values_t = [10.0, 25.0, 50.0, 75.0, 90.0, 95.0])]
    pub percentiles: Vec<f64>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for the full comparison report.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub calc: CalcArgs,

    /// Append an ASCII chart of the income against both distributions.
    #[arg(long)]
    pub plot: bool,

    /// Export the comparison report to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export the key-percentile table to CSV.
    #[arg(long = "export-table", value_name = "CSV")]
    pub export_table: Option<PathBuf>,
}

/// Options for the key-percentile table.
#[derive(Debug, Parser, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub calc: CalcArgs,

    /// Export the key-percentile table to CSV.
    #[arg(long = "export-table", value_name = "CSV")]
    pub export_table: Option<PathBuf>,
}

/// Options for charts.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub calc: CalcArgs,

    /// Which chart to draw.
    #[arg(long, value_enum, default_value_t = ChartKind::Income)]
    pub chart: ChartKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_flags() {
        let cli = Cli::parse_from([
            "ipos",
            "compare",
            "--ppp",
            "3.5",
            "--lang",
            "he",
            "--household-size",
            "4",
            "--period",
            "monthly",
            "--currency",
            "ils",
            "--income",
            "14000",
            "--standardize",
            "--percentiles",
            "50,90",
            "--plot",
        ]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.calc.ppp, Some(3.5));
        assert_eq!(args.calc.lang, Language::He);
        assert_eq!(args.calc.household_size, 4);
        assert_eq!(args.calc.period, Period::Monthly);
        assert_eq!(args.calc.currency, Currency::Ils);
        assert_eq!(args.calc.income, Some(14_000.0));
        assert!(args.calc.standardize);
        assert_eq!(args.calc.percentiles, vec![50.0, 90.0]);
        assert!(args.plot);
    }

    #[test]
    fn defaults_and_household_range() {
        let cli = Cli::parse_from(["ipos", "table"]);
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.calc.household_size, 1);
        assert_eq!(args.calc.percentiles, vec![10.0, 25.0, 50.0, 75.0, 90.0, 95.0]);
        assert!(args.calc.data.is_none());

        assert!(Cli::try_parse_from(["ipos", "table", "--household-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["ipos", "table", "--household-size", "21"]).is_err());
    }
}
