//! Raw engine output and tabular accessors over it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque instrument description as returned by the engine.
pub type InstrumentFields = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// RAW ENGINE OUTPUT
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBacktestResult {
    /// Measure name → time series.
    #[serde(default)]
    pub risks: BTreeMap<String, Vec<MeasurePoint>>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioSnapshot>,
    #[serde(default)]
    pub transactions: Vec<TransactionBatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub positions: Vec<Holding>,
}

/// A quantity of one instrument, used for both positions and trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub quantity: f64,
    pub instrument: InstrumentFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBatch {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub trades: Vec<Holding>,
}

// =============================================================================
// MEASURES
// =============================================================================

/// Well-known measure names reported by the flow-vol engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacktestMeasure {
    Pnl,
    PnlSpot,
    PnlVol,
    PnlCarry,
    PnlUnexplained,
    Delta,
    Gamma,
    Vega,
}

impl BacktestMeasure {
    pub fn as_str(self) -> &'static str {
        match self {
            BacktestMeasure::Pnl => "PNL",
            BacktestMeasure::PnlSpot => "PNL_spot",
            BacktestMeasure::PnlVol => "PNL_vol",
            BacktestMeasure::PnlCarry => "PNL_carry",
            BacktestMeasure::PnlUnexplained => "PNL_unexplained",
            BacktestMeasure::Delta => "delta",
            BacktestMeasure::Gamma => "gamma",
            BacktestMeasure::Vega => "vega",
        }
    }
}

// =============================================================================
// FLATTENED ROWS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRow {
    pub date: NaiveDate,
    pub quantity: f64,
    pub instrument: InstrumentFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub date: NaiveDate,
    pub quantity: f64,
    pub transaction_type: String,
    pub instrument: InstrumentFields,
}

/// Read-only views over one engine run.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    raw: RawBacktestResult,
}

impl BacktestResult {
    pub fn new(raw: RawBacktestResult) -> Self {
        BacktestResult { raw }
    }

    pub fn raw(&self) -> &RawBacktestResult {
        &self.raw
    }

    pub fn measure_series(&self, measure: BacktestMeasure) -> Option<BTreeMap<NaiveDate, f64>> {
        self.series(measure.as_str())
    }

    /// A named time series indexed by date. `None` if the engine did not report it.
    pub fn series(&self, name: &str) -> Option<BTreeMap<NaiveDate, f64>> {
        self.raw
            .risks
            .get(name)
            .map(|points| points.iter().map(|p| (p.date, p.value)).collect())
    }

    /// One row per instrument per date.
    pub fn portfolio_history(&self) -> Vec<PositionRow> {
        self.raw
            .portfolio
            .iter()
            .flat_map(|snapshot| {
                snapshot.positions.iter().map(move |position| PositionRow {
                    date: snapshot.date,
                    quantity: position.quantity,
                    instrument: position.instrument.clone(),
                })
            })
            .collect()
    }

    /// One row per instrument per transaction per date.
    pub fn trade_history(&self) -> Vec<TradeRow> {
        let mut rows = Vec::new();
        for batch in &self.raw.transactions {
            for transaction in &batch.transactions {
                for trade in &transaction.trades {
                    rows.push(TradeRow {
                        date: batch.date,
                        quantity: trade.quantity,
                        transaction_type: transaction.kind.clone(),
                        instrument: trade.instrument.clone(),
                    });
                }
            }
        }
        rows
    }
}
