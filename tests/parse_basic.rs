//! Integration tests for the Parse phase: strategy JSON parsing and round-trips.

#[allow(dead_code)]
mod helpers;

use eqvol_compiler::parse;
use eqvol_compiler::parse::types::*;
use eqvol_compiler::validate_strategy;
use helpers::*;

#[test]
fn parse_monthly_roll_fixture() {
    let json = include_str!("fixtures/monthly_roll.json");
    let strategy = parse::parse(json).expect("Should parse successfully");
    assert!(strategy.initial_portfolio.is_empty());
    assert_eq!(strategy.triggers.len(), 2);
    assert_eq!(strategy.triggers[0].kind(), TriggerKind::Periodic);
    assert_eq!(strategy.triggers[0].frequency(), Some("1m"));
    assert_eq!(strategy.triggers[1].kind(), TriggerKind::Aggregate);
    assert_eq!(strategy.triggers[1].children().len(), 2);
}

#[test]
fn fixture_matches_builder() {
    let json = include_str!("fixtures/monthly_roll.json");
    let strategy = parse::parse(json).unwrap();
    assert_eq!(strategy, monthly_roll_strategy());
}

#[test]
fn parse_round_trip() {
    let json = include_str!("fixtures/hedged_nav.json");
    let strategy = parse::parse(json).expect("Should parse");
    let serialized = serde_json::to_string(&strategy).expect("Should serialize");
    let strategy2 = parse::parse(&serialized).expect("Should parse again");
    assert_eq!(strategy, strategy2);
}

#[test]
fn instrument_fields_are_preserved() {
    let json = include_str!("fixtures/hedged_nav.json");
    let strategy = parse::parse(json).unwrap();
    let Action::EnterPositionQuantityScaledAction(enter) = &strategy.triggers[0].actions()[0] else {
        panic!("Expected an enter action");
    };
    let swap = &enter.priceables[0];
    assert_eq!(swap.kind, InstrumentKind::EqVarianceSwap);
    assert_eq!(swap.fields["underlier"], ".SPX");
    assert_eq!(enter.trade_quantity_type, Some(TradeQuantityType::Nav));
}

#[test]
fn unknown_instrument_and_risk_fall_back_to_other() {
    let json = include_str!("fixtures/unsupported.json");
    let strategy = parse::parse(json).unwrap();
    let Action::HedgeAction(hedge) = &strategy.triggers[1].actions()[0] else {
        panic!("Expected a hedge action");
    };
    assert_eq!(hedge.risk, RiskMeasure::Other);
    assert_eq!(strategy.triggers[0].kind(), TriggerKind::Mkt);
}

#[test]
fn unknown_instrument_tag_survives_round_trip() {
    let json = r#"{"initial_portfolio": [{"type": "CommodSwap", "x": 1}], "triggers": []}"#;
    let strategy = parse::parse(json).unwrap();
    let swap = &strategy.initial_portfolio[0];
    assert_eq!(swap.kind, InstrumentKind::Other("CommodSwap".into()));
    assert!(!swap.kind.is_equity_vol());

    let value = serde_json::to_value(&strategy).unwrap();
    assert_eq!(
        value["initial_portfolio"],
        serde_json::json!([{"type": "CommodSwap", "x": 1}])
    );
    assert_eq!(parse::parse(&value.to_string()).unwrap(), strategy);
}

#[test]
fn unknown_instrument_tag_is_named_in_violation() {
    let json = r#"{"triggers": [{
        "type": "PeriodicTrigger",
        "trigger_requirements": {"frequency": "1m"},
        "actions": [{
            "type": "EnterPositionQuantityScaledAction",
            "priceables": [{"type": "CommodSwap"}],
            "trade_duration": "1m",
            "trade_quantity": 10,
            "trade_quantity_type": "quantity"
        }]
    }]}"#;
    let errors = validate_strategy(&parse::parse(json).unwrap());
    assert_eq!(codes(&errors), vec!["T003"]);
    assert!(errors[0].message.ends_with("found CommodSwap"), "{}", errors[0].message);
}

#[test]
fn hedge_and_exit_ignore_extra_fields() {
    let json = r#"{"triggers": [{
        "type": "PeriodicTrigger",
        "trigger_requirements": {"frequency": "B"},
        "actions": [
            {"type": "HedgeAction", "risk": "EqDelta", "trade_duration": "B",
             "priceables": [{"type": "EqForward"}]},
            {"type": "ExitPositionAction", "name": "close"}
        ]
    }]}"#;
    let strategy = parse::parse(json).unwrap();
    assert_eq!(
        strategy.triggers[0].actions()[1],
        Action::ExitPositionAction(ExitPositionAction::default())
    );
}

#[test]
fn unsupported_fixture_reports_every_violation() {
    let json = include_str!("fixtures/unsupported.json");
    let strategy = parse::parse(json).unwrap();
    let errors = validate_strategy(&strategy);
    assert_eq!(
        codes(&errors),
        vec!["V001", "V003", "V003", "V008", "T008", "T005", "T006", "T007"]
    );
}

#[test]
fn parse_invalid_json_returns_error() {
    let result = parse::parse("not valid json");
    assert!(result.is_err());
    let errors = result.unwrap_err();
    assert!(errors[0].code == "P001");
}

#[test]
fn parse_unknown_trigger_type_returns_error() {
    let json = r#"{"triggers": [{"type": "NotTrigger", "trigger_requirements": {}}]}"#;
    let errors = parse::parse(json).unwrap_err();
    assert_eq!(errors[0].code, "P001");
    assert!(errors[0].message.contains("NotTrigger"), "{}", errors[0].message);
}

#[test]
fn parse_unknown_direction_returns_error() {
    let json = r#"{"triggers": [{
        "type": "AggregateTrigger",
        "trigger_requirements": {"triggers": [{
            "type": "PortfolioTrigger",
            "trigger_requirements": {"data_source": "len", "trigger_level": 0, "direction": "SIDEWAYS"}
        }]}
    }]}"#;
    assert!(parse::parse(json).is_err());
}
