//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::BacktestSettings;
use crate::domain::engine::{BacktestEngine, BacktestResult, EngineConfig};
use crate::domain::error::QuantsimError;
use crate::domain::strategy::factory::{
    known_strategies, make_buy_strategy, make_sell_strategy, StrategyParams,
};
use crate::domain::strategy::{BuyStrategy, SellStrategy};
use crate::ports::data_port::DataPort;
use crate::ports::ledger_port::LedgerPort;

#[derive(Parser, Debug)]
#[command(name = "quantsim", about = "Daily-bar strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Run a single symbol instead of the configured list
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Validate a configuration without running it
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest { config, symbol } => run_backtest(&config, symbol.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn load_settings(config_path: &PathBuf) -> Result<BacktestSettings, ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;
    BacktestSettings::from_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn build_evaluators(
    settings: &BacktestSettings,
) -> Result<(Vec<Box<dyn BuyStrategy>>, Vec<Box<dyn SellStrategy>>), QuantsimError> {
    let params: &StrategyParams = &settings.params;
    let buys = settings
        .buy_strategies
        .iter()
        .map(|name| make_buy_strategy(name, params))
        .collect::<Result<Vec<_>, _>>()?;
    let sells = settings
        .sell_strategies
        .iter()
        .map(|name| make_sell_strategy(name, params))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((buys, sells))
}

fn run_backtest(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let data_port = CsvDataAdapter::new(PathBuf::from(&settings.data_dir));
    let ledger = CsvLedgerAdapter::new(PathBuf::from(&settings.results_dir));

    let symbols: Vec<String> = match symbol_override {
        Some(s) => vec![s.to_uppercase()],
        None if !settings.symbols.is_empty() => settings.symbols.clone(),
        None => match data_port.list_symbols() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };
    if symbols.is_empty() {
        eprintln!("error: no symbols to run");
        return ExitCode::from(4);
    }

    eprintln!(
        "Running {} on {} symbol(s), {} to {}",
        settings.strategy_name,
        symbols.len(),
        settings
            .start_date
            .map_or("open".to_string(), |d| d.to_string()),
        settings
            .end_date
            .map_or("open".to_string(), |d| d.to_string()),
    );

    let mut failures = 0usize;
    for symbol in &symbols {
        match run_symbol(symbol, &settings, &data_port, &ledger) {
            Ok(result) => print_summary(&result),
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                failures += 1;
            }
        }
    }

    if failures == symbols.len() {
        eprintln!("error: all symbols failed");
        return ExitCode::from(4);
    }
    ExitCode::SUCCESS
}

fn run_symbol(
    symbol: &str,
    settings: &BacktestSettings,
    data_port: &dyn DataPort,
    ledger: &dyn LedgerPort,
) -> Result<BacktestResult, QuantsimError> {
    let bars = data_port.fetch_bars(symbol, settings.start_date, settings.end_date)?;
    if bars.is_empty() {
        return Err(QuantsimError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let (buys, sells) = build_evaluators(settings)?;
    let mut config = EngineConfig::new(symbol, settings.strategy_name.clone());
    config.initial_capital = settings.initial_capital;
    config.slippage_pct = settings.slippage_pct;
    config.commission_per_share = settings.commission_per_share;

    let engine = BacktestEngine::new(config, buys, sells)?;
    let result = engine.run(&bars);

    let location = ledger.write_result(&result)?;
    eprintln!("Results written to {}", location);
    Ok(result)
}

fn print_summary(result: &BacktestResult) {
    let s = &result.summary;
    eprintln!("\n=== {} / {} ===", result.symbol, result.strategy_name);
    eprintln!("Initial Capital:  {:.2}", result.initial_capital);
    eprintln!("Final Capital:    {:.2}", result.final_capital);
    eprintln!("Total Return:     {:.2}%", s.total_return_pct);
    match s.annualized_return_pct {
        Some(a) => eprintln!("Annualized:       {:.2}% (over {} held days)", a, s.holding_days),
        None => eprintln!("Annualized:       n/a (never in position)"),
    }
    eprintln!("Max Drawdown:     -{:.2}%", s.max_drawdown_pct);
    eprintln!("Sharpe Ratio:     {:.2}", s.sharpe_ratio);
    eprintln!("Trades:           {}", s.total_trades);
    eprintln!("Win Rate:         {:.1}%", s.win_rate_pct);
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    // Names must resolve even though nothing runs.
    if let Err(e) = build_evaluators(&settings) {
        eprintln!("error: {e}");
        let (buys, sells) = known_strategies();
        eprintln!("known buy strategies:  {}", buys.join(", "));
        eprintln!("known sell strategies: {}", sells.join(", "));
        return (&e).into();
    }

    eprintln!("Config validated successfully");
    eprintln!("  strategy: {}", settings.strategy_name);
    eprintln!("  buy (all must fire):  {}", settings.buy_strategies.join(", "));
    eprintln!("  sell (any may fire):  {}", settings.sell_strategies.join(", "));
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let data_port = CsvDataAdapter::new(PathBuf::from(&settings.data_dir));
    match data_port.list_symbols() {
        Ok(symbols) if symbols.is_empty() => {
            eprintln!("No symbols found in {}", settings.data_dir);
            ExitCode::SUCCESS
        }
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
