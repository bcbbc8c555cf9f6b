//! Flattening of nested aggregate triggers.
//!
//! Shared by validation and lowering so both phases agree on which triggers
//! own actions and which children make up an aggregate.

use super::types::*;

/// The date and portfolio children of one aggregate trigger.
#[derive(Debug, Default)]
pub struct AggregateParts<'a> {
    pub dates: Vec<&'a TriggerBase<DateTriggerRequirements>>,
    pub portfolios: Vec<&'a TriggerBase<PortfolioTriggerRequirements>>,
}

impl<'a> AggregateParts<'a> {
    pub fn date(&self) -> Option<&'a TriggerBase<DateTriggerRequirements>> {
        self.dates.first().copied()
    }

    pub fn portfolio(&self) -> Option<&'a TriggerBase<PortfolioTriggerRequirements>> {
        self.portfolios.first().copied()
    }
}

/// Sort the children of an aggregate by role.
pub fn split_aggregate(children: &[Trigger]) -> AggregateParts<'_> {
    let mut parts = AggregateParts::default();
    for child in children {
        match child {
            Trigger::DateTrigger(t) => parts.dates.push(t),
            Trigger::PortfolioTrigger(t) => parts.portfolios.push(t),
            Trigger::PeriodicTrigger(_)
            | Trigger::AggregateTrigger(_)
            | Trigger::MktTrigger(_)
            | Trigger::RiskTrigger(_) => {}
        }
    }
    parts
}

/// A trigger that owns its actions directly, plus its location in the strategy.
#[derive(Debug, Clone)]
pub struct LeafTrigger<'a> {
    pub trigger: &'a Trigger,
    pub path: String,
}

/// Replace every aggregate with its children, then drop portfolio triggers.
/// Portfolio children only gate their sibling and carry no actions of their own.
pub fn leaf_triggers(strategy: &Strategy) -> Vec<LeafTrigger<'_>> {
    let mut leaves = Vec::new();
    for (i, trigger) in strategy.triggers.iter().enumerate() {
        match trigger {
            Trigger::AggregateTrigger(agg) => {
                for (j, child) in agg.trigger_requirements.triggers.iter().enumerate() {
                    if child.kind() == TriggerKind::Portfolio {
                        continue;
                    }
                    leaves.push(LeafTrigger {
                        trigger: child,
                        path: child_path(i, j),
                    });
                }
            }
            _ => leaves.push(LeafTrigger {
                trigger,
                path: trigger_path(i),
            }),
        }
    }
    leaves
}

pub fn trigger_path(index: usize) -> String {
    format!("triggers[{}]", index)
}

pub fn child_path(index: usize, child: usize) -> String {
    format!("triggers[{}].triggers[{}]", index, child)
}
