//! Strategy-level structural validation rules (V001–V009).

use std::collections::HashMap;

use crate::error::CompilerError;
use crate::parse::flatten::{child_path, split_aggregate, trigger_path};
use crate::parse::types::*;

const MAX_TRIGGERS: usize = 3;

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(strategy: &Strategy) -> Vec<CompilerError> {
    let mut errors = Vec::new();

    v001_initial_portfolio_empty(strategy, &mut errors);
    v002_max_triggers(strategy, &mut errors);
    v003_top_level_trigger_kinds(strategy, &mut errors);
    v004_v007_aggregate_composition(strategy, &mut errors);
    v008_supported_actions(strategy, &mut errors);
    v009_no_duplicate_action_kinds(strategy, &mut errors);

    errors
}

fn v001_initial_portfolio_empty(strategy: &Strategy, errors: &mut Vec<CompilerError>) {
    if !strategy.initial_portfolio.is_empty() {
        errors.push(CompilerError::validate(
            "V001",
            format!(
                "initial_portfolio must be empty, found {} position(s)",
                strategy.initial_portfolio.len()
            ),
            Some("initial_portfolio".into()),
        ));
    }
}

fn v002_max_triggers(strategy: &Strategy, errors: &mut Vec<CompilerError>) {
    if strategy.triggers.len() > MAX_TRIGGERS {
        errors.push(CompilerError::validate(
            "V002",
            format!(
                "Maximum of {} triggers, found {}",
                MAX_TRIGGERS,
                strategy.triggers.len()
            ),
            Some("triggers".into()),
        ));
    }
}

fn v003_top_level_trigger_kinds(strategy: &Strategy, errors: &mut Vec<CompilerError>) {
    for (i, trigger) in strategy.triggers.iter().enumerate() {
        match trigger {
            Trigger::PeriodicTrigger(_) | Trigger::AggregateTrigger(_) => {}
            Trigger::DateTrigger(_)
            | Trigger::PortfolioTrigger(_)
            | Trigger::MktTrigger(_)
            | Trigger::RiskTrigger(_) => {
                errors.push(CompilerError::validate(
                    "V003",
                    format!(
                        "Only AggregateTrigger and PeriodicTrigger supported at top level, found {}",
                        trigger.kind()
                    ),
                    Some(trigger_path(i)),
                ));
            }
        }
    }
}

/// An aggregate defines a trade signal: one date trigger gated by one
/// "portfolio length vs zero" trigger.
fn v004_v007_aggregate_composition(strategy: &Strategy, errors: &mut Vec<CompilerError>) {
    for (i, trigger) in strategy.triggers.iter().enumerate() {
        let Trigger::AggregateTrigger(agg) = trigger else {
            continue;
        };
        let children = &agg.trigger_requirements.triggers;
        let path = Some(trigger_path(i));

        if children.len() != 2 {
            errors.push(CompilerError::validate(
                "V004",
                format!(
                    "AggregateTrigger must be composed of 2 triggers, found {}",
                    children.len()
                ),
                path.clone(),
            ));
        }

        let parts = split_aggregate(children);
        if parts.dates.len() != 1 {
            errors.push(CompilerError::validate(
                "V005",
                format!(
                    "AggregateTrigger must contain 1 DateTrigger, found {}",
                    parts.dates.len()
                ),
                path.clone(),
            ));
        }
        if parts.portfolios.len() != 1 {
            errors.push(CompilerError::validate(
                "V006",
                format!(
                    "AggregateTrigger must contain 1 PortfolioTrigger, found {}",
                    parts.portfolios.len()
                ),
                path.clone(),
            ));
        }

        for (j, child) in children.iter().enumerate() {
            let Trigger::PortfolioTrigger(portfolio) = child else {
                continue;
            };
            let req = &portfolio.trigger_requirements;
            if req.data_source != PORTFOLIO_LENGTH_SOURCE || req.trigger_level != 0.0 {
                errors.push(CompilerError::validate(
                    "V007",
                    format!(
                        "PortfolioTrigger.trigger_requirements must have data_source = '{}' and \
                         trigger_level = 0, found data_source = '{}' and trigger_level = {}",
                        PORTFOLIO_LENGTH_SOURCE, req.data_source, req.trigger_level
                    ),
                    Some(child_path(i, j)),
                ));
            }
        }
    }
}

/// Iterate the actions attached directly to top-level triggers, with paths.
/// Aggregates contribute their own actions, not their children's.
fn top_level_actions(strategy: &Strategy) -> impl Iterator<Item = (String, &Action)> {
    strategy
        .triggers
        .iter()
        .enumerate()
        .flat_map(|(i, trigger)| {
            trigger
                .actions()
                .iter()
                .enumerate()
                .map(move |(k, action)| (format!("{}.actions[{}]", trigger_path(i), k), action))
        })
}

fn v008_supported_actions(strategy: &Strategy, errors: &mut Vec<CompilerError>) {
    for (path, action) in top_level_actions(strategy) {
        if !action.is_supported() {
            errors.push(CompilerError::validate(
                "V008",
                format!(
                    "actions must be one of EnterPositionQuantityScaledAction, HedgeAction, \
                     ExitPositionAction, found {}",
                    action.kind()
                ),
                Some(path),
            ));
        }
    }
}

fn v009_no_duplicate_action_kinds(strategy: &Strategy, errors: &mut Vec<CompilerError>) {
    let mut counts: HashMap<ActionKind, usize> = HashMap::new();
    let mut order = Vec::new();
    for (_, action) in top_level_actions(strategy) {
        let count = counts.entry(action.kind()).or_insert(0);
        if *count == 0 {
            order.push(action.kind());
        }
        *count += 1;
    }

    for kind in order {
        let count = counts[&kind];
        if count > 1 {
            errors.push(CompilerError::validate(
                "V009",
                format!("There are multiple actions of the same type: {} x{}", kind, count),
                None,
            ));
        }
    }
}
