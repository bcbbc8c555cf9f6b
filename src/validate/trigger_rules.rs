//! Per-trigger action validation (T001–T008).
//! Match arms here must track `Action` in `parse/types.rs`.

use crate::error::CompilerError;
use crate::parse::types::*;

/// Validate a single leaf trigger and the actions it owns. Returns all errors found.
pub fn validate_leaf_trigger(trigger: &Trigger, path: &str) -> Vec<CompilerError> {
    let mut errors = Vec::new();
    let at = || Some(path.to_string());

    if trigger.actions().len() != 1 {
        errors.push(CompilerError::validate(
            "T001",
            format!(
                "All triggers must contain only 1 action, {} has {}",
                trigger.kind(),
                trigger.actions().len()
            ),
            at(),
        ));
    }

    for action in trigger.actions() {
        match action {
            Action::EnterPositionQuantityScaledAction(enter) => {
                validate_enter(trigger, enter, path, &mut errors);
            }
            Action::HedgeAction(hedge) => {
                validate_hedge(trigger, hedge, path, &mut errors);
            }
            Action::ExitPositionAction(_) => {}
            Action::AddTradeAction(_) | Action::RebalanceAction(_) => {
                errors.push(CompilerError::validate(
                    "T008",
                    format!("Unsupported action type '{}'", action.kind()),
                    at(),
                ));
            }
        }
    }

    errors
}

fn validate_enter(
    trigger: &Trigger,
    action: &EnterPositionQuantityScaledAction,
    path: &str,
    errors: &mut Vec<CompilerError>,
) {
    if let Trigger::PeriodicTrigger(periodic) = trigger {
        let frequency = periodic.trigger_requirements.frequency.as_str();
        if action.trade_duration.as_deref() != Some(frequency) {
            errors.push(CompilerError::validate(
                "T002",
                format!(
                    "EnterPositionQuantityScaledAction: PeriodicTrigger frequency must be the same \
                     as trade_duration ('{}' vs {:?})",
                    frequency, action.trade_duration
                ),
                Some(path.to_string()),
            ));
        }
    }

    if let Some(bad) = action.priceables.iter().find(|p| !p.kind.is_equity_vol()) {
        errors.push(CompilerError::validate(
            "T003",
            format!(
                "EnterPositionQuantityScaledAction: Only EqOption or EqVarianceSwap supported, found {}",
                bad.kind
            ),
            Some(path.to_string()),
        ));
    }

    if action.trade_quantity.is_none() || action.trade_quantity_type.is_none() {
        errors.push(CompilerError::validate(
            "T004",
            "EnterPositionQuantityScaledAction trade_quantity or trade_quantity_type is None",
            Some(path.to_string()),
        ));
    }
}

fn validate_hedge(
    trigger: &Trigger,
    action: &HedgeAction,
    path: &str,
    errors: &mut Vec<CompilerError>,
) {
    let frequency = trigger.frequency();

    if frequency.is_none() || frequency != action.trade_duration.as_deref() {
        errors.push(CompilerError::validate(
            "T005",
            format!(
                "HedgeAction: trigger frequency must be the same as trade_duration ({:?} vs {:?})",
                frequency, action.trade_duration
            ),
            Some(path.to_string()),
        ));
    }

    if action.risk != RiskMeasure::EqDelta {
        errors.push(CompilerError::validate(
            "T006",
            format!("HedgeAction: risk type must be EqDelta, found {:?}", action.risk),
            Some(path.to_string()),
        ));
    }

    if frequency != Some(BUSINESS_DAY_FREQUENCY) {
        errors.push(CompilerError::validate(
            "T007",
            format!(
                "HedgeAction: frequency must be '{}', found {:?}",
                BUSINESS_DAY_FREQUENCY, frequency
            ),
            Some(path.to_string()),
        ));
    }
}
