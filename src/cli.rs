//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::error::SmacrossError;
use crate::domain::price::PriceSeries;
use crate::domain::simulation::{run_simulation, SimulationConfig, SimulationReport};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "smacross", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a crossover simulation and write a JSON report
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a simulation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show available data range for symbol(s)
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with price data
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            symbol,
            output,
            dry_run,
        } => run_simulate(&config, symbol.as_deref(), output.as_ref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SmacrossError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the simulation parameters from a validated config, with an optional
/// symbol override from the command line.
pub fn build_simulation_config(
    adapter: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<SimulationConfig, SmacrossError> {
    let symbol = match symbol_override {
        Some(s) => s.to_uppercase(),
        None => adapter
            .get_string("simulation", "symbol")
            .map(|s| s.trim().to_uppercase())
            .ok_or_else(|| SmacrossError::ConfigMissing {
                section: "simulation".into(),
                key: "symbol".into(),
            })?,
    };

    let start_date = parse_config_date(adapter, "start_date")?;
    let end_date = parse_config_date(adapter, "end_date")?;

    let short_window = parse_config_window(adapter, "short_window")?;
    let long_window = parse_config_window(adapter, "long_window")?;

    Ok(SimulationConfig {
        symbol,
        start_date,
        end_date,
        short_window,
        long_window,
    })
}

fn parse_config_date(adapter: &dyn ConfigPort, key: &str) -> Result<NaiveDate, SmacrossError> {
    let value = adapter
        .get_string("simulation", key)
        .ok_or_else(|| SmacrossError::ConfigMissing {
            section: "simulation".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| SmacrossError::ConfigInvalid {
        section: "simulation".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn parse_config_window(adapter: &dyn ConfigPort, key: &str) -> Result<usize, SmacrossError> {
    let value = adapter.get_int("simulation", key, 0);
    usize::try_from(value)
        .ok()
        .filter(|&w| w > 0)
        .ok_or_else(|| SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: key.into(),
            reason: "window must be a positive integer".into(),
        })
}

fn build_data_port(adapter: &dyn ConfigPort) -> Result<CsvAdapter, SmacrossError> {
    let prices_dir =
        adapter
            .get_string("data", "prices_dir")
            .ok_or_else(|| SmacrossError::ConfigMissing {
                section: "data".into(),
                key: "prices_dir".into(),
            })?;
    Ok(CsvAdapter::new(PathBuf::from(prices_dir)))
}

fn run_simulate(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let sim_config = match build_simulation_config(&adapter, symbol_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dry_run {
        eprintln!(
            "Dry run: {} from {} to {}, SMA({}) / SMA({})",
            sim_config.symbol,
            sim_config.start_date,
            sim_config.end_date,
            sim_config.short_window,
            sim_config.long_window,
        );
        eprintln!("Configuration is valid");
        return ExitCode::SUCCESS;
    }

    // Stage 2: fetch prices
    let data_port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Fetching prices for {} ({} to {})",
        sim_config.symbol, sim_config.start_date, sim_config.end_date,
    );
    let points = match data_port.fetch_prices(
        &sim_config.symbol,
        sim_config.start_date,
        sim_config.end_date,
    ) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if points.len() < 2 {
        let err = SmacrossError::InsufficientData {
            symbol: sim_config.symbol.clone(),
            points: points.len(),
            minimum: 2,
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let series = match PriceSeries::new(points) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  {} trading days", series.len());

    // Stage 3: run the pipeline
    let result = match run_simulation(&series, sim_config.short_window, sim_config.long_window) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: console summary
    eprintln!("\n=== Results ===");
    eprintln!("Signals:       {}", result.signals.len());
    eprintln!("Trades:        {}", result.metrics.num_trades);
    eprintln!("Total Return:  {:.2}%", result.metrics.total_return_pct);
    eprintln!("Sharpe Ratio:  {:.2}", result.metrics.sharpe_ratio);
    eprintln!("Max Drawdown:  -{:.1}%", result.metrics.max_drawdown_pct);
    eprintln!("Win Rate:      {:.1}%", result.metrics.win_rate_pct);

    // Stage 5: write report
    let output = match output_path {
        Some(p) => p.clone(),
        None => PathBuf::from(
            adapter
                .get_string("report", "output")
                .unwrap_or_else(|| "report.json".to_string()),
        ),
    };
    let pretty = adapter.get_bool("report", "pretty", true);

    let report = SimulationReport {
        symbol: sim_config.symbol.clone(),
        start_date: sim_config.start_date,
        end_date: sim_config.end_date,
        short_window: sim_config.short_window,
        long_window: sim_config.long_window,
        prices: series.points().to_vec(),
        result,
    };

    match JsonReportAdapter::new(pretty).write(&report, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_simulation_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(symbol: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match data_port.list_symbols() {
            Ok(symbols) => symbols,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for s in &symbols {
        match data_port.get_data_range(s) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{s}: {count} days, {min_date} to {max_date}");
            }
            Ok(None) => {
                eprintln!("{s}: no data found");
            }
            Err(e) => {
                eprintln!("error querying {s}: {e}");
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match data_port.list_symbols() {
        Ok(symbols) => {
            if symbols.is_empty() {
                eprintln!("No price files found");
            } else {
                for symbol in &symbols {
                    println!("{symbol}");
                }
                eprintln!("{} symbols found", symbols.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
