//! Submission of compiled strategies to an external execution engine.
//!
//! The engine itself (pricing, stepping through time) lives outside this
//! crate. It is reached through [`ExecutionEngine`]; this module only builds
//! the request and wraps the raw response.

pub mod result;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BacktestError;
use crate::ir::types::CompiledConfig;
use crate::lower::compile;
use crate::parse::types::Strategy;

pub use result::*;

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeInMethod {
    #[default]
    #[serde(rename = "fixedRoll")]
    FixedRoll,
}

/// Request-level settings that do not come from the strategy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub name: String,
    pub trade_in_method: TradeInMethod,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        BacktestSettings {
            name: "Flow Vol Backtest".into(),
            trade_in_method: TradeInMethod::FixedRoll,
        }
    }
}

impl BacktestSettings {
    /// Load settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Everything the engine needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub name: String,
    pub trade_in_method: TradeInMethod,
    #[serde(flatten)]
    pub config: CompiledConfig,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BacktestRequest {
    pub fn new(
        config: CompiledConfig,
        settings: &BacktestSettings,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        BacktestRequest {
            name: settings.name.clone(),
            trade_in_method: settings.trade_in_method,
            config,
            start,
            end,
        }
    }
}

/// An engine that prices and steps a compiled backtest. Implementations own
/// any transport, timeout or cancellation concerns.
pub trait ExecutionEngine {
    fn run(
        &self,
        request: &BacktestRequest,
    ) -> Result<RawBacktestResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// Compile `strategy` and run it between `start` and `end` with default settings.
pub fn run_backtest<E: ExecutionEngine + ?Sized>(
    engine: &E,
    strategy: &Strategy,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BacktestResult, BacktestError> {
    run_backtest_with(engine, strategy, &BacktestSettings::default(), start, end)
}

pub fn run_backtest_with<E: ExecutionEngine + ?Sized>(
    engine: &E,
    strategy: &Strategy,
    settings: &BacktestSettings,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BacktestResult, BacktestError> {
    let config = compile(strategy)?;
    let request = BacktestRequest::new(config, settings, start, end);

    log::info!("submitting '{}' for {} to {}", request.name, start, end);
    let raw = engine.run(&request).map_err(BacktestError::Engine)?;
    Ok(BacktestResult::new(raw))
}
