//! Parse phase: JSON → strategy types + shared flattening helpers.

pub mod flatten;
pub mod types;

pub use flatten::{AggregateParts, LeafTrigger, leaf_triggers, split_aggregate};
pub use types::*;

use crate::error::CompilerError;

/// Deserialize a strategy JSON string into a `Strategy` struct.
pub fn parse(json: &str) -> Result<Strategy, Vec<CompilerError>> {
    serde_json::from_str::<Strategy>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse strategy JSON: {}", e),
        )]
    })
}
