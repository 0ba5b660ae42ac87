//! Named registry of GC metadata formats.

use indexmap::IndexMap;

use crate::error::EmitError;
use crate::printer::{GcMetadataPrinter, GenericPrinter};

/// Builds a fresh printer for one module.
pub type PrinterFactory = fn() -> Box<dyn GcMetadataPrinter>;

#[derive(Clone, Copy, Debug)]
pub struct FormatEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub factory: PrinterFactory,
}

/// Formats a compilation can choose from, in registration order.
#[derive(Clone, Debug, Default)]
pub struct FormatRegistry {
    formats: IndexMap<&'static str, FormatEntry>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every format this crate implements.
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::new();
        register_generic(&mut registry);
        registry
    }

    pub fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        factory: PrinterFactory,
    ) -> Result<(), EmitError> {
        if self.formats.contains_key(name) {
            return Err(EmitError::DuplicateFormat(name.to_string()));
        }
        self.formats.insert(
            name,
            FormatEntry {
                name,
                description,
                factory,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FormatEntry> {
        self.formats.get(name)
    }

    pub fn instantiate(&self, name: &str) -> Result<Box<dyn GcMetadataPrinter>, EmitError> {
        let entry = self
            .get(name)
            .ok_or_else(|| EmitError::UnknownFormat(name.to_string()))?;
        Ok((entry.factory)())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatEntry> {
        self.formats.values()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

fn generic_printer() -> Box<dyn GcMetadataPrinter> {
    Box::new(GenericPrinter::new())
}

/// Make the generic frame table selectable by name.
///
/// Registering twice into the same registry is a no-op.
pub fn register_generic(registry: &mut FormatRegistry) {
    let name = frametable_format::FORMAT_NAME;
    registry.formats.entry(name).or_insert(FormatEntry {
        name,
        description: "generic collector",
        factory: generic_printer,
    });
}
