//! Unified error types used across all phases.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Phase {
    Parse,
    Validate,
    Compile,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Compile => write!(f, "Compile"),
        }
    }
}

/// A single reported problem. `path` locates the offending trigger or action,
/// e.g. `triggers[1].triggers[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("[{phase}:{code}] {message}{}", fmt_path(.path))]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub path: Option<String>,
}

fn fmt_path(path: &Option<String>) -> String {
    match path {
        Some(p) => format!(" (at '{}')", p),
        None => String::new(),
    }
}

impl CompilerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            path: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, path: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            path,
        }
    }

    pub fn compile(code: &str, message: impl Into<String>, path: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Compile,
            message: message.into(),
            path,
        }
    }
}

/// Failure of the compile step. Compilation is all-or-nothing: no partial
/// configuration accompanies either variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The strategy failed validation. Carries every violation found.
    #[error("strategy rejected with {} violation(s): {}", .0.len(), join_messages(.0))]
    Rejected(Vec<CompilerError>),

    /// A hedge frequency passed validation but has no engine mapping.
    /// Means the validator and compiler rule sets have drifted apart.
    #[error("unrecognised hedge frequency {frequency:?} (at '{path}')")]
    UnmappedHedgeFrequency {
        frequency: Option<String>,
        path: String,
    },

    /// An action kind the engine cannot execute reached the lowering pass.
    #[error("unsupported action type '{kind}' (at '{path}')")]
    UnsupportedAction { kind: String, path: String },
}

impl CompileError {
    /// Flatten into the pipeline-wide error list, e.g. for DTO conversion.
    pub fn into_errors(self) -> Vec<CompilerError> {
        match self {
            CompileError::Rejected(errors) => errors,
            CompileError::UnmappedHedgeFrequency { frequency, path } => {
                vec![CompilerError::compile(
                    "C001",
                    format!("Unrecognised hedge frequency {:?}", frequency),
                    Some(path),
                )]
            }
            CompileError::UnsupportedAction { kind, path } => {
                vec![CompilerError::compile(
                    "C002",
                    format!("Unsupported action type '{}'", kind),
                    Some(path),
                )]
            }
        }
    }
}

fn join_messages(errors: &[CompilerError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure of a full backtest submission.
#[derive(Debug, thiserror::Error)]
pub enum BacktestError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("execution engine failed: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),
}
