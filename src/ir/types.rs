//! Types of the compiled configuration.
//!
//! The configuration flattens a validated trigger/action graph into the single
//! parameter record the execution engine consumes. Fields never set by any
//! trigger keep their defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parse::types::{BUSINESS_DAY_FREQUENCY, Priceable, TradeQuantityType};

// =============================================================================
// TOP-LEVEL CONFIG
// =============================================================================

/// Engine-ready parameters produced by the lowering pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledConfig {
    /// Instruments rolled by the enter action.
    pub underlier_list: Option<Vec<Priceable>>,
    /// The enter action's `trade_duration`.
    pub roll_frequency: Option<String>,
    pub trade_quantity: Option<f64>,
    pub trade_quantity_type: Option<TradeQuantityType>,
    /// Dates on which positions open while the portfolio is empty.
    pub trade_in_signals: Vec<SignalItem>,
    /// Dates on which open positions are closed.
    pub trade_out_signals: Vec<SignalItem>,
    pub hedge: Option<DeltaHedgeParameters>,
    /// Equals `trade_quantity` when sizing by NAV, otherwise 0.
    pub index_initial_value: f64,
}

// =============================================================================
// SIGNALS
// =============================================================================

/// One date of a signal series. `value` marks that the signal fires on `date`;
/// the direction is carried by which series the item sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalItem {
    pub date: NaiveDate,
    pub value: bool,
}

impl SignalItem {
    pub fn fires_on(date: NaiveDate) -> Self {
        SignalItem { date, value: true }
    }
}

// =============================================================================
// HEDGING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaHedgeParameters {
    pub frequency: HedgeFrequency,
}

/// Hedge frequencies the engine recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HedgeFrequency {
    Daily,
}

impl HedgeFrequency {
    /// Map a trigger frequency code to an engine label. `None` for unmapped codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            BUSINESS_DAY_FREQUENCY => Some(HedgeFrequency::Daily),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HedgeFrequency::Daily => "Daily",
        }
    }
}

impl std::fmt::Display for HedgeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_business_day_maps() {
        assert_eq!(HedgeFrequency::from_code("B"), Some(HedgeFrequency::Daily));
        assert_eq!(HedgeFrequency::from_code("1m"), None);
        assert_eq!(HedgeFrequency::from_code("b"), None);
    }

    #[test]
    fn default_config_is_empty() {
        let config = CompiledConfig::default();
        assert!(config.underlier_list.is_none());
        assert!(config.trade_in_signals.is_empty());
        assert!(config.hedge.is_none());
        assert_eq!(config.index_initial_value, 0.0);
    }
}
