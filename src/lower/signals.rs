//! Map an aggregate trigger → trade-in or trade-out signal series.

use crate::ir::types::SignalItem;
use crate::parse::flatten::split_aggregate;
use crate::parse::types::{PortfolioTriggerRequirements, Trigger, TriggerDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSide {
    /// Fires while the portfolio is empty: open positions.
    TradeIn,
    /// Fires while the portfolio holds positions: close them.
    TradeOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSignal {
    pub side: SignalSide,
    pub items: Vec<SignalItem>,
}

/// The portfolio gate is the only thing telling the two series apart:
/// "length == 0" means enter, anything else means exit.
pub fn classify(requirements: &PortfolioTriggerRequirements) -> SignalSide {
    match requirements.direction {
        TriggerDirection::Equal if requirements.trigger_level == 0.0 => SignalSide::TradeIn,
        TriggerDirection::Equal | TriggerDirection::Above | TriggerDirection::Below => {
            SignalSide::TradeOut
        }
    }
}

/// Build the signal series of an aggregate. `None` when either child is missing.
pub fn lower_aggregate(children: &[Trigger]) -> Option<AggregateSignal> {
    let parts = split_aggregate(children);
    let date = parts.date()?;
    let portfolio = parts.portfolio()?;

    let items = date
        .trigger_requirements
        .dates
        .iter()
        .copied()
        .map(SignalItem::fires_on)
        .collect();

    Some(AggregateSignal {
        side: classify(&portfolio.trigger_requirements),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirements(direction: TriggerDirection, level: f64) -> PortfolioTriggerRequirements {
        PortfolioTriggerRequirements {
            data_source: "len".into(),
            trigger_level: level,
            direction,
        }
    }

    #[test]
    fn equal_zero_is_trade_in() {
        assert_eq!(
            classify(&requirements(TriggerDirection::Equal, 0.0)),
            SignalSide::TradeIn
        );
    }

    #[test]
    fn above_and_below_are_trade_out() {
        assert_eq!(
            classify(&requirements(TriggerDirection::Above, 0.0)),
            SignalSide::TradeOut
        );
        assert_eq!(
            classify(&requirements(TriggerDirection::Below, 0.0)),
            SignalSide::TradeOut
        );
    }

    #[test]
    fn equal_non_zero_is_trade_out() {
        assert_eq!(
            classify(&requirements(TriggerDirection::Equal, 2.0)),
            SignalSide::TradeOut
        );
    }

    #[test]
    fn missing_portfolio_child_yields_nothing() {
        assert!(lower_aggregate(&[]).is_none());
    }
}
