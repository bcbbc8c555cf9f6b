//! Capture action parameters into the compiled configuration.

use crate::error::CompileError;
use crate::ir::types::*;
use crate::parse::types::{Action, EnterPositionQuantityScaledAction, TradeQuantityType, Trigger};

pub fn apply_action(
    trigger: &Trigger,
    action: &Action,
    path: &str,
    config: &mut CompiledConfig,
) -> Result<(), CompileError> {
    match action {
        Action::EnterPositionQuantityScaledAction(enter) => {
            apply_enter(enter, config);
            Ok(())
        }
        Action::HedgeAction(_) => {
            let code = trigger.frequency();
            let frequency = code.and_then(HedgeFrequency::from_code).ok_or_else(|| {
                CompileError::UnmappedHedgeFrequency {
                    frequency: code.map(str::to_string),
                    path: path.to_string(),
                }
            })?;
            log::debug!("{}: delta hedge {}", path, frequency);
            config.hedge = Some(DeltaHedgeParameters { frequency });
            Ok(())
        }
        Action::ExitPositionAction(_) => Ok(()),
        Action::AddTradeAction(_) | Action::RebalanceAction(_) => {
            Err(CompileError::UnsupportedAction {
                kind: action.kind().to_string(),
                path: path.to_string(),
            })
        }
    }
}

fn apply_enter(action: &EnterPositionQuantityScaledAction, config: &mut CompiledConfig) {
    config.underlier_list = Some(action.priceables.clone());
    config.roll_frequency = action.trade_duration.clone();
    config.trade_quantity = action.trade_quantity;
    config.trade_quantity_type = action.trade_quantity_type;
    if action.trade_quantity_type == Some(TradeQuantityType::Nav) {
        config.index_initial_value = action.trade_quantity.unwrap_or_default();
    }
}
