//! CSV result ledger adapter.
//!
//! Writes one trade file per run, `bt_{strategy}_{symbol}.csv`, plus an
//! `_equity.csv` companion with the full equity curve. Filenames are
//! deterministic so repeated runs overwrite rather than accumulate.

use crate::domain::engine::BacktestResult;
use crate::domain::error::QuantsimError;
use crate::ports::ledger_port::LedgerPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvLedgerAdapter {
    results_dir: PathBuf,
}

impl CsvLedgerAdapter {
    pub fn new(results_dir: PathBuf) -> Self {
        Self { results_dir }
    }

    fn base_name(result: &BacktestResult) -> String {
        format!("bt_{}_{}", result.strategy_name, result.symbol)
    }
}

impl LedgerPort for CsvLedgerAdapter {
    fn write_result(&self, result: &BacktestResult) -> Result<String, QuantsimError> {
        fs::create_dir_all(&self.results_dir)?;
        let base = Self::base_name(result);

        let trades_path = self.results_dir.join(format!("{}.csv", base));
        let mut wtr = csv::Writer::from_path(&trades_path).map_err(csv_io)?;
        wtr.write_record([
            "trade_id",
            "timestamp",
            "symbol",
            "side",
            "price",
            "quantity",
            "commission",
            "strategy",
            "entry_reason",
            "exit_reason",
            "pnl",
            "roi",
            "holdings_after",
        ])
        .map_err(csv_io)?;
        for t in &result.trades {
            wtr.write_record([
                t.trade_id.clone(),
                t.timestamp.to_string(),
                t.symbol.clone(),
                t.side.to_string(),
                format!("{:.4}", t.price),
                t.quantity.to_string(),
                format!("{:.4}", t.commission),
                t.strategy_name.clone(),
                t.entry_reason.clone(),
                t.exit_reason.clone(),
                format!("{:.2}", t.pnl),
                format!("{:.4}", t.roi),
                t.holdings_after.to_string(),
            ])
            .map_err(csv_io)?;
        }
        wtr.flush()?;

        let equity_path = self.results_dir.join(format!("{}_equity.csv", base));
        let mut wtr = csv::Writer::from_path(&equity_path).map_err(csv_io)?;
        wtr.write_record(["date", "equity", "in_position"])
            .map_err(csv_io)?;
        for p in &result.equity_curve {
            wtr.write_record([
                p.date.to_string(),
                format!("{:.2}", p.equity),
                (p.in_position as u8).to_string(),
            ])
            .map_err(csv_io)?;
        }
        wtr.flush()?;

        Ok(trades_path.display().to_string())
    }
}

fn csv_io(e: csv::Error) -> QuantsimError {
    QuantsimError::Io(std::io::Error::other(e))
}
