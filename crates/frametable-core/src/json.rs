//! JSON module descriptions.
//!
//! The raw types mirror the file; `parse_module` converts them into a
//! `GcModuleInfo`, rejecting duplicate function names instead of silently
//! merging them.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::module::{GcModuleInfo, GlobalVariable};
use crate::{GcFunctionInfo, ModuleError};

/// Top-level object of a module description.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawModule {
    #[serde(default)]
    pub globals: IndexMap<String, GlobalVariable>,
    #[serde(default)]
    pub functions: Vec<GcFunctionInfo>,
}

impl RawModule {
    pub fn into_module(self) -> Result<GcModuleInfo, ModuleError> {
        let mut module = GcModuleInfo::new();
        for (name, global) in self.globals {
            module.add_global(name, global);
        }
        for function in self.functions {
            let name = function.name().to_string();
            if module.insert_function(function).is_some() {
                return Err(ModuleError::DuplicateFunction(name));
            }
        }
        Ok(module)
    }
}

/// Parse a JSON module description.
pub fn parse_module(json: &str) -> Result<GcModuleInfo, ModuleError> {
    let raw: RawModule = serde_json::from_str(json)?;
    raw.into_module()
}
