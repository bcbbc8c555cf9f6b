//! Rust types for the strategy graph.
//!
//! These types are the serde target for the strategy JSON built by callers.
//! Trigger and action families are closed tagged unions: adding a variant
//! forces the validate and lower modules to handle it at compile time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Business-day frequency code. The only frequency a hedge may run at.
pub const BUSINESS_DAY_FREQUENCY: &str = "B";

/// Portfolio data source measuring the number of open positions.
pub const PORTFOLIO_LENGTH_SOURCE: &str = "len";

// =============================================================================
// TOP-LEVEL STRATEGY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Positions held before the first trigger fires.
    #[serde(default)]
    pub initial_portfolio: Vec<Priceable>,
    pub triggers: Vec<Trigger>,
}

// =============================================================================
// INSTRUMENTS
// =============================================================================

/// A tradable instrument. Only the kind is inspected; the remaining fields are
/// carried through to the engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priceable {
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Priceable {
    pub fn new(kind: InstrumentKind) -> Self {
        Priceable {
            kind,
            fields: serde_json::Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// Instrument tag. Unknown tags are kept verbatim so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstrumentKind {
    EqOption,
    EqVarianceSwap,
    EqForward,
    IRSwap,
    FXOption,
    Other(String),
}

impl InstrumentKind {
    pub fn is_equity_vol(&self) -> bool {
        matches!(self, InstrumentKind::EqOption | InstrumentKind::EqVarianceSwap)
    }

    pub fn as_str(&self) -> &str {
        match self {
            InstrumentKind::EqOption => "EqOption",
            InstrumentKind::EqVarianceSwap => "EqVarianceSwap",
            InstrumentKind::EqForward => "EqForward",
            InstrumentKind::IRSwap => "IRSwap",
            InstrumentKind::FXOption => "FXOption",
            InstrumentKind::Other(tag) => tag,
        }
    }
}

impl From<String> for InstrumentKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "EqOption" => InstrumentKind::EqOption,
            "EqVarianceSwap" => InstrumentKind::EqVarianceSwap,
            "EqForward" => InstrumentKind::EqForward,
            "IRSwap" => InstrumentKind::IRSwap,
            "FXOption" => InstrumentKind::FXOption,
            _ => InstrumentKind::Other(tag),
        }
    }
}

impl From<InstrumentKind> for String {
    fn from(kind: InstrumentKind) -> Self {
        match kind {
            InstrumentKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ENUMS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerDirection {
    Above,
    Below,
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeQuantityType {
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "notional")]
    Notional,
    #[serde(rename = "NAV")]
    Nav,
    #[serde(rename = "vega")]
    Vega,
    #[serde(rename = "gamma")]
    Gamma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskMeasure {
    EqDelta,
    EqGamma,
    EqVega,
    #[serde(other)]
    Other,
}

// =============================================================================
// TRIGGERS — tagged union over 6 trigger types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Trigger {
    DateTrigger(TriggerBase<DateTriggerRequirements>),
    PortfolioTrigger(TriggerBase<PortfolioTriggerRequirements>),
    PeriodicTrigger(TriggerBase<PeriodicTriggerRequirements>),
    AggregateTrigger(TriggerBase<AggregateTriggerRequirements>),
    MktTrigger(TriggerBase<MktTriggerRequirements>),
    RiskTrigger(TriggerBase<RiskTriggerRequirements>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerBase<R> {
    pub trigger_requirements: R,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTriggerRequirements {
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTriggerRequirements {
    pub data_source: String,
    pub trigger_level: f64,
    pub direction: TriggerDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTriggerRequirements {
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTriggerRequirements {
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MktTriggerRequirements {
    pub data_source: String,
    pub trigger_level: f64,
    pub direction: TriggerDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTriggerRequirements {
    pub risk: RiskMeasure,
    pub trigger_level: f64,
    pub direction: TriggerDirection,
}

/// Discriminant of [`Trigger`], used in messages and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Date,
    Portfolio,
    Periodic,
    Aggregate,
    Mkt,
    Risk,
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerKind::Date => "DateTrigger",
            TriggerKind::Portfolio => "PortfolioTrigger",
            TriggerKind::Periodic => "PeriodicTrigger",
            TriggerKind::Aggregate => "AggregateTrigger",
            TriggerKind::Mkt => "MktTrigger",
            TriggerKind::Risk => "RiskTrigger",
        };
        f.write_str(name)
    }
}

impl Trigger {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Trigger::DateTrigger(_) => TriggerKind::Date,
            Trigger::PortfolioTrigger(_) => TriggerKind::Portfolio,
            Trigger::PeriodicTrigger(_) => TriggerKind::Periodic,
            Trigger::AggregateTrigger(_) => TriggerKind::Aggregate,
            Trigger::MktTrigger(_) => TriggerKind::Mkt,
            Trigger::RiskTrigger(_) => TriggerKind::Risk,
        }
    }

    pub fn actions(&self) -> &[Action] {
        match self {
            Trigger::DateTrigger(t) => &t.actions,
            Trigger::PortfolioTrigger(t) => &t.actions,
            Trigger::PeriodicTrigger(t) => &t.actions,
            Trigger::AggregateTrigger(t) => &t.actions,
            Trigger::MktTrigger(t) => &t.actions,
            Trigger::RiskTrigger(t) => &t.actions,
        }
    }

    /// The periodic frequency code, if this trigger has one.
    pub fn frequency(&self) -> Option<&str> {
        match self {
            Trigger::PeriodicTrigger(t) => Some(t.trigger_requirements.frequency.as_str()),
            _ => None,
        }
    }

    /// Child triggers of an aggregate; empty for every other variant.
    pub fn children(&self) -> &[Trigger] {
        match self {
            Trigger::AggregateTrigger(t) => &t.trigger_requirements.triggers,
            _ => &[],
        }
    }
}

// =============================================================================
// ACTIONS — tagged union over 5 action types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    EnterPositionQuantityScaledAction(EnterPositionQuantityScaledAction),
    HedgeAction(HedgeAction),
    ExitPositionAction(ExitPositionAction),
    AddTradeAction(AddTradeAction),
    RebalanceAction(RebalanceAction),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterPositionQuantityScaledAction {
    pub priceables: Vec<Priceable>,
    #[serde(default)]
    pub trade_duration: Option<String>,
    #[serde(default)]
    pub trade_quantity: Option<f64>,
    #[serde(default)]
    pub trade_quantity_type: Option<TradeQuantityType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeAction {
    pub risk: RiskMeasure,
    #[serde(default)]
    pub trade_duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitPositionAction {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTradeAction {
    pub priceables: Vec<Priceable>,
    #[serde(default)]
    pub trade_duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceAction {
    pub priceable: Priceable,
    pub size_parameter: String,
}

/// Discriminant of [`Action`], used for the one-of-each-kind rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    EnterPositionQuantityScaled,
    Hedge,
    ExitPosition,
    AddTrade,
    Rebalance,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::EnterPositionQuantityScaled => "EnterPositionQuantityScaledAction",
            ActionKind::Hedge => "HedgeAction",
            ActionKind::ExitPosition => "ExitPositionAction",
            ActionKind::AddTrade => "AddTradeAction",
            ActionKind::Rebalance => "RebalanceAction",
        };
        f.write_str(name)
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::EnterPositionQuantityScaledAction(_) => ActionKind::EnterPositionQuantityScaled,
            Action::HedgeAction(_) => ActionKind::Hedge,
            Action::ExitPositionAction(_) => ActionKind::ExitPosition,
            Action::AddTradeAction(_) => ActionKind::AddTrade,
            Action::RebalanceAction(_) => ActionKind::Rebalance,
        }
    }

    /// Whether the equity-vol engine can execute this action at all.
    pub fn is_supported(&self) -> bool {
        match self.kind() {
            ActionKind::EnterPositionQuantityScaled | ActionKind::Hedge | ActionKind::ExitPosition => {
                true
            }
            ActionKind::AddTrade | ActionKind::Rebalance => false,
        }
    }
}
