//! Module-wide collection of function records.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::function::GcFunctionInfo;

/// Initial value of a global variable.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    Int(i64),
    Bytes(Vec<u8>),
    Zero,
}

/// A global the front end can point root metadata at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalVariable {
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub initializer: Option<Initializer>,
}

impl GlobalVariable {
    /// A constant global initialized with `value`.
    pub fn int_constant(value: i64) -> Self {
        Self {
            constant: true,
            initializer: Some(Initializer::Int(value)),
        }
    }

    pub fn int_initializer(&self) -> Option<i64> {
        match self.initializer {
            Some(Initializer::Int(value)) => Some(value),
            _ => None,
        }
    }
}

/// GC metadata for a whole module.
///
/// Function records accumulate as functions are compiled; iteration follows
/// registration order so the emitted tables are reproducible.
#[derive(Clone, Debug, Default)]
pub struct GcModuleInfo {
    functions: IndexMap<String, GcFunctionInfo>,
    globals: IndexMap<String, GlobalVariable>,
}

impl GcModuleInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a function record, registering an empty one on first use.
    pub fn function_info_mut(&mut self, name: &str) -> &mut GcFunctionInfo {
        self.functions
            .entry(name.to_string())
            .or_insert_with(|| GcFunctionInfo::new(name))
    }

    pub fn function_info(&self, name: &str) -> Option<&GcFunctionInfo> {
        self.functions.get(name)
    }

    /// Insert a complete record. Returns the record it replaced, if any;
    /// a replaced record keeps its original registration slot.
    pub fn insert_function(&mut self, info: GcFunctionInfo) -> Option<GcFunctionInfo> {
        self.functions.insert(info.name().to_string(), info)
    }

    pub fn functions(&self) -> impl ExactSizeIterator<Item = &GcFunctionInfo> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn add_global(&mut self, name: impl Into<String>, global: GlobalVariable) {
        self.globals.insert(name.into(), global);
    }

    pub fn global(&self, name: &str) -> Option<&GlobalVariable> {
        self.globals.get(name)
    }

    /// Forget every record, ready for the next module.
    pub fn clear(&mut self) {
        self.functions.clear();
        self.globals.clear();
    }
}
