pub mod engine;
pub mod error;
pub mod ir;
pub mod lower;
pub mod parse;
pub mod validate;
pub mod wasm;

pub use error::{BacktestError, CompileError, CompilerError};
pub use lower::compile;
pub use validate::{supports_strategy, validate_strategy};
