#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for GC frame table generation.
//!
//! Two layers:
//! - **Deserialization layer** (`json`): 1:1 mapping to the JSON module description
//! - **Analysis layer**: `GcModuleInfo` and friends, the ordered per-function
//!   records the emitter walks at the end of code generation

mod colors;
mod function;
pub mod json;
mod module;


pub use colors::Colors;
pub use function::{
    CalleeSave, ConstantRef, GcFunctionInfo, GcPoint, GcRoot, PointKind, RootLocation,
};
pub use json::parse_module;
pub use module::{GcModuleInfo, GlobalVariable, Initializer};

/// Errors produced while building a module description.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid module description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("function `{0}` is described more than once")]
    DuplicateFunction(String),
}
