//! Strategy validation phase (pre-lowering).
//!
//! Checks the trigger/action graph against the rule set the equity-vol engine
//! accepts. Every rule runs; failures accumulate instead of short-circuiting.

pub mod structural;
pub mod trigger_rules;

use crate::error::CompilerError;
use crate::parse::flatten::leaf_triggers;
use crate::parse::types::Strategy;

/// Validate the entire strategy (structural + per-trigger rules).
pub fn validate_strategy(strategy: &Strategy) -> Vec<CompilerError> {
    let mut errors = structural::validate_structural(strategy);

    for leaf in leaf_triggers(strategy) {
        errors.extend(trigger_rules::validate_leaf_trigger(leaf.trigger, &leaf.path));
    }

    log::debug!(
        "validated strategy with {} trigger(s): {} violation(s)",
        strategy.triggers.len(),
        errors.len()
    );
    errors
}

/// Whether the engine accepts this strategy as-is.
pub fn supports_strategy(strategy: &Strategy) -> bool {
    validate_strategy(strategy).is_empty()
}
