//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::CompilerError;
use crate::ir::types::CompiledConfig;

/// Validate a strategy JSON: parse + rule checks.
/// Returns a JSON array of CompilerError objects.
#[wasm_bindgen]
pub fn validate_strategy_json(json: &str) -> JsValue {
    let result = validate_strategy_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_strategy_inner(json: &str) -> Vec<ErrorDto> {
    let strategy = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(errors) => return errors.into_iter().map(ErrorDto::from).collect(),
    };

    crate::validate::validate_strategy(&strategy)
        .into_iter()
        .map(ErrorDto::from)
        .collect()
}

/// Whether the engine accepts the strategy JSON. Unparseable input is not accepted.
#[wasm_bindgen]
pub fn supports_strategy_json(json: &str) -> bool {
    validate_strategy_inner(json).is_empty()
}

/// Full pipeline: parse → validate → lower.
/// Returns a JSON object with either `config` (success) or `errors` (failure).
#[wasm_bindgen]
pub fn compile_strategy_json(json: &str) -> JsValue {
    let result = compile_strategy_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_strategy_inner(json: &str) -> CompileResult {
    // 1. Parse
    let strategy = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(errors) => {
            return CompileResult::Errors {
                errors: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    // 2. Validate + lower
    match crate::lower::compile(&strategy) {
        Ok(config) => CompileResult::Success { config },
        Err(e) => CompileResult::Errors {
            errors: e.into_errors().into_iter().map(ErrorDto::from).collect(),
        },
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    path: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            path: e.path,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success { config: CompiledConfig },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
