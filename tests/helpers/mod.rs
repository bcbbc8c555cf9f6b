use chrono::NaiveDate;
use eqvol_compiler::CompilerError;
use eqvol_compiler::parse::types::*;

// =============================================================================
// Instruments
// =============================================================================

pub fn eq_option() -> Priceable {
    Priceable::new(InstrumentKind::EqOption)
        .with_field("underlier", ".STOXX50E")
        .with_field("expiration_date", "3m")
        .with_field("strike_price", "ATM")
        .with_field("option_type", "Call")
}

pub fn eq_variance_swap() -> Priceable {
    Priceable::new(InstrumentKind::EqVarianceSwap)
        .with_field("underlier", ".SPX")
        .with_field("expiration_date", "1m")
}

pub fn ir_swap() -> Priceable {
    Priceable::new(InstrumentKind::IRSwap).with_field("notional_currency", "USD")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Actions
// =============================================================================

pub fn enter(duration: &str, quantity: f64, quantity_type: TradeQuantityType) -> Action {
    Action::EnterPositionQuantityScaledAction(EnterPositionQuantityScaledAction {
        priceables: vec![eq_option()],
        trade_duration: Some(duration.into()),
        trade_quantity: Some(quantity),
        trade_quantity_type: Some(quantity_type),
    })
}

pub fn hedge(duration: &str) -> Action {
    Action::HedgeAction(HedgeAction {
        risk: RiskMeasure::EqDelta,
        trade_duration: Some(duration.into()),
    })
}

pub fn exit() -> Action {
    Action::ExitPositionAction(ExitPositionAction::default())
}

pub fn add_trade() -> Action {
    Action::AddTradeAction(AddTradeAction {
        priceables: vec![eq_option()],
        trade_duration: None,
    })
}

// =============================================================================
// Triggers
// =============================================================================

pub fn periodic(frequency: &str, actions: Vec<Action>) -> Trigger {
    Trigger::PeriodicTrigger(TriggerBase {
        trigger_requirements: PeriodicTriggerRequirements {
            frequency: frequency.into(),
        },
        actions,
    })
}

pub fn date_trigger(dates: Vec<NaiveDate>, actions: Vec<Action>) -> Trigger {
    Trigger::DateTrigger(TriggerBase {
        trigger_requirements: DateTriggerRequirements { dates },
        actions,
    })
}

pub fn portfolio_trigger(data_source: &str, level: f64, direction: TriggerDirection) -> Trigger {
    Trigger::PortfolioTrigger(TriggerBase {
        trigger_requirements: PortfolioTriggerRequirements {
            data_source: data_source.into(),
            trigger_level: level,
            direction,
        },
        actions: vec![],
    })
}

pub fn aggregate(children: Vec<Trigger>, actions: Vec<Action>) -> Trigger {
    Trigger::AggregateTrigger(TriggerBase {
        trigger_requirements: AggregateTriggerRequirements { triggers: children },
        actions,
    })
}

/// A date signal gated on the portfolio being empty (EQUAL) or not (ABOVE).
/// The action sits on both the aggregate and its date child.
pub fn signal(dates: Vec<NaiveDate>, direction: TriggerDirection, action: Action) -> Trigger {
    aggregate(
        vec![
            date_trigger(dates, vec![action.clone()]),
            portfolio_trigger("len", 0.0, direction),
        ],
        vec![action],
    )
}

pub fn strategy(triggers: Vec<Trigger>) -> Strategy {
    Strategy {
        initial_portfolio: vec![],
        triggers,
    }
}

/// Monthly roll of 100 units plus a trade-in signal on 2020-01-01.
pub fn monthly_roll_strategy() -> Strategy {
    strategy(vec![
        periodic("1m", vec![enter("1m", 100.0, TradeQuantityType::Quantity)]),
        signal(vec![date(2020, 1, 1)], TriggerDirection::Equal, exit()),
    ])
}

// =============================================================================
// Assertions
// =============================================================================

pub fn codes(errors: &[CompilerError]) -> Vec<&str> {
    errors.iter().map(|e| e.code.as_str()).collect()
}

pub fn assert_has_error(errors: &[CompilerError], code: &str) {
    assert!(
        errors.iter().any(|e| e.code == code),
        "Expected error {}, got: {:?}",
        code,
        errors
    );
}

pub fn assert_no_error(errors: &[CompilerError], code: &str) {
    assert!(
        !errors.iter().any(|e| e.code == code),
        "Did not expect error {}, but got: {:?}",
        code,
        errors
    );
}
