//! Lowering phase: Strategy → CompiledConfig.
//!
//! Pulls signal series from the top-level aggregates and action parameters
//! from the leaf triggers into the flat configuration record the execution
//! engine consumes.
//! Match arms in the submodules must track `Trigger`/`Action` in `parse/types.rs`.

pub mod actions;
pub mod signals;

use crate::error::CompileError;
use crate::ir::types::*;
use crate::parse::flatten::{leaf_triggers, trigger_path};
use crate::parse::types::{Strategy, Trigger};
use crate::validate::validate_strategy;

/// Validate, then lower. Refuses to produce any configuration for an invalid strategy.
pub fn compile(strategy: &Strategy) -> Result<CompiledConfig, CompileError> {
    let violations = validate_strategy(strategy);
    if !violations.is_empty() {
        log::warn!(
            "refusing to compile strategy: {} violation(s)",
            violations.len()
        );
        return Err(CompileError::Rejected(violations));
    }

    let config = lower(strategy)?;
    log::info!(
        "compiled strategy: {} trade-in / {} trade-out signal(s), hedge: {}",
        config.trade_in_signals.len(),
        config.trade_out_signals.len(),
        config.hedge.is_some()
    );
    Ok(config)
}

/// Lower an already-validated strategy into a CompiledConfig.
///
/// Actions are read from the same leaf list the per-trigger rules check, so an aggregate's
/// own actions never reach the configuration.
pub fn lower(strategy: &Strategy) -> Result<CompiledConfig, CompileError> {
    let mut config = CompiledConfig::default();

    // 1. Aggregates define one signal series each
    for (i, trigger) in strategy.triggers.iter().enumerate() {
        let Trigger::AggregateTrigger(agg) = trigger else {
            continue;
        };
        if let Some(signal) = signals::lower_aggregate(&agg.trigger_requirements.triggers) {
            log::debug!(
                "{}: {} date(s) as {:?}",
                trigger_path(i),
                signal.items.len(),
                signal.side
            );
            match signal.side {
                signals::SignalSide::TradeIn => config.trade_in_signals = signal.items,
                signals::SignalSide::TradeOut => config.trade_out_signals = signal.items,
            }
        }
    }

    // 2. Every leaf trigger contributes its single action
    for leaf in leaf_triggers(strategy) {
        let Some(action) = leaf.trigger.actions().first() else {
            continue;
        };
        actions::apply_action(leaf.trigger, action, &leaf.path, &mut config)?;
    }

    Ok(config)
}
