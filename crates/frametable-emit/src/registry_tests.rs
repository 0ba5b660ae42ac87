use frametable_core::GcModuleInfo;

use crate::streamer::Streamer;
use crate::{EmitError, FormatRegistry, GcMetadataPrinter, TargetInfo, register_generic};

struct Marker;

impl GcMetadataPrinter for Marker {
    fn format_name(&self) -> &'static str {
        "marker"
    }

    fn finish_module(
        &mut self,
        _module: &GcModuleInfo,
        _target: &TargetInfo,
        out: &mut dyn Streamer,
    ) -> Result<(), EmitError> {
        out.emit_int8(0x2a);
        Ok(())
    }
}

fn marker() -> Box<dyn GcMetadataPrinter> {
    Box::new(Marker)
}

#[test]
fn builtin_formats() {
    let registry = FormatRegistry::with_builtin_formats();

    let names: Vec<_> = registry.iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["generic"]);
    assert_eq!(registry.get("generic").unwrap().description, "generic collector");
    assert_eq!(
        registry.instantiate("generic").unwrap().format_name(),
        "generic"
    );
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = FormatRegistry::new();

    assert!(registry.is_empty());
    let err = registry.instantiate("generic").err().unwrap();
    assert_eq!(err, EmitError::UnknownFormat("generic".into()));
    assert_eq!(err.to_string(), "unknown GC metadata format `generic`");
}

#[test]
fn register_generic_is_idempotent() {
    let mut registry = FormatRegistry::new();
    register_generic(&mut registry);
    register_generic(&mut registry);

    assert_eq!(registry.len(), 1);
}

#[test]
fn custom_formats_keep_registration_order() {
    let mut registry = FormatRegistry::with_builtin_formats();
    registry.register("marker", "test marker", marker).unwrap();

    let names: Vec<_> = registry.iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["generic", "marker"]);
    assert_eq!(registry.instantiate("marker").unwrap().format_name(), "marker");
}

#[test]
fn duplicate_names_are_rejected() {
    let mut registry = FormatRegistry::with_builtin_formats();

    let err = registry.register("generic", "again", marker).unwrap_err();

    assert_eq!(err, EmitError::DuplicateFormat("generic".into()));
    assert_eq!(registry.get("generic").unwrap().description, "generic collector");
}
