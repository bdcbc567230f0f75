//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (with `.env` / environment defaults)
//! - loads the percentile table and builds the comparator
//! - prints reports/plots
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{CalcArgs, Command, CompareArgs, PlotArgs, TableArgs};
use crate::compare::default_amount;
use crate::domain::{CalculatorConfig, ChartKind, IncomeInput};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the percentile table CSV.
pub const DATA_PATH_ENV: &str = "INCOME_DATA_CSV";
/// Environment variable holding the default PPP rate.
pub const PPP_RATE_ENV: &str = "PPP_RATE";

pub const DEFAULT_DATA_PATH: &str = "data.csv";
pub const DEFAULT_PPP_RATE: f64 = 3.7;

/// Entry point for the `ipos` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // We want `ipos` and `ipos --lang he` to behave like `ipos tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compare(args) => handle_compare(args),
        Command::Table(args) => handle_table(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let mut config = calculator_config_from_args(&args.calc)?;
    config.plot = args.plot;
    config.export_json = args.export_json.clone();
    config.export_table = args.export_table.clone();

    let run = pipeline::run_compare(&config)?;
    let report = pipeline::build_report(&run.comparator, &run.query, &config);

    println!("{}", crate::report::format_report(&report));

    if config.plot {
        let (series, points) = run.comparator.distribution(config.input.standardize);
        let plot = crate::plot::render_income_plot(
            &points,
            series,
            &run.query.result,
            config.language,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_json {
        crate::io::export::write_report_json(path, &report)?;
    }
    if let Some(path) = &config.export_table {
        crate::io::export::write_summary_csv(path, &run.query.summary)?;
    }

    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let config = calculator_config_from_args(&args.calc)?;
    let run = pipeline::run_compare(&config)?;

    if run.query.standardization_fallback {
        eprintln!("{}", config.language.strings().standardize_warning);
    }
    let table = crate::report::format_key_table(&run.query.summary, config.language);
    println!("{}", crate::report::align_for(config.language.direction(), &table));

    if let Some(path) = &args.export_table {
        crate::io::export::write_summary_csv(path, &run.query.summary)?;
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = calculator_config_from_args(&args.calc)?;
    let run = pipeline::run_compare(&config)?;
    let (series, points) = run.comparator.distribution(config.input.standardize);

    let plot = match args.chart {
        ChartKind::Distribution => crate::plot::render_distribution_plot(
            &points,
            series,
            config.language,
            config.plot_width,
            config.plot_height,
        ),
        ChartKind::Income => crate::plot::render_income_plot(
            &points,
            series,
            &run.query.result,
            config.language,
            config.plot_width,
            config.plot_height,
        ),
    };

    println!("{plot}");
    Ok(())
}

fn handle_tui(args: CalcArgs) -> Result<(), AppError> {
    let config = calculator_config_from_args(&args)?;
    crate::tui::run(config)
}

/// Build the run configuration from CLI flags, falling back to the
/// environment for the data path and PPP rate.
pub fn calculator_config_from_args(args: &CalcArgs) -> Result<CalculatorConfig, AppError> {
    let data_path = match &args.data {
        Some(path) => path.clone(),
        None => std::env::var(DATA_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
    };

    let ppp_rate = match args.ppp {
        Some(v) => v,
        None => match std::env::var(PPP_RATE_ENV) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| AppError::new(2, format!("Invalid {PPP_RATE_ENV} '{raw}': {e}")))?,
            Err(_) => DEFAULT_PPP_RATE,
        },
    };
    config_from_parts(args, data_path, ppp_rate)
}

fn config_from_parts(args: &CalcArgs, data_path: PathBuf, ppp_rate: f64) -> Result<CalculatorConfig, AppError> {
    if !(ppp_rate.is_finite() && ppp_rate > 0.0) {
        return Err(AppError::new(2, format!("PPP rate must be positive, got {ppp_rate}")));
    }

    let amount = args
        .income
        .unwrap_or_else(|| default_amount(args.period, args.currency, ppp_rate));
    if !(amount.is_finite() && amount >= 0.0) {
        return Err(AppError::new(2, format!("Income must be a non-negative number, got {amount}")));
    }

    Ok(CalculatorConfig {
        data_path,
        ppp_rate,
        language: args.lang,
        input: IncomeInput {
            amount,
            period: args.period,
            currency: args.currency,
            household_size: args.household_size,
            standardize: args.standardize,
        },
        key_percentiles: args.percentiles.clone(),
        plot: false,
        plot_width: args.width,
        plot_height: args.height,
        export_json: None,
        export_table: None,
    })
}

/// Rewrite argv so `ipos` defaults to `ipos tui`.
///
/// Rules:
/// - `ipos`                      -> `ipos tui`
/// - `ipos --lang he ...`        -> `ipos tui --lang he ...`
/// - `ipos --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "compare" | "table" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
