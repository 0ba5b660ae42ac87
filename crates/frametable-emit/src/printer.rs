//! Module-level drivers for GC metadata formats.

use frametable_core::GcModuleInfo;
use frametable_format::FORMAT_NAME;

use crate::encoder::emit_function;
use crate::error::EmitError;
use crate::streamer::{Fragment, Recording, SectionKind, Streamer};
use crate::target::TargetInfo;

/// A GC metadata format, driven once per module.
pub trait GcMetadataPrinter {
    /// Registry name of the format.
    fn format_name(&self) -> &'static str;

    /// Called before any function of the module is emitted.
    fn begin_module(
        &mut self,
        _module: &GcModuleInfo,
        _target: &TargetInfo,
        _out: &mut dyn Streamer,
    ) -> Result<(), EmitError> {
        Ok(())
    }

    /// Called once code generation for the module is done.
    fn finish_module(
        &mut self,
        module: &GcModuleInfo,
        target: &TargetInfo,
        out: &mut dyn Streamer,
    ) -> Result<(), EmitError>;
}

/// The generic frame table: one table per function, in the data section.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericPrinter;

impl GenericPrinter {
    pub fn new() -> Self {
        Self
    }
}

impl GcMetadataPrinter for GenericPrinter {
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn finish_module(
        &mut self,
        module: &GcModuleInfo,
        target: &TargetInfo,
        out: &mut dyn Streamer,
    ) -> Result<(), EmitError> {
        tracing::debug!(
            format = FORMAT_NAME,
            functions = module.len(),
            pointer_size = target.pointer_width.bytes(),
            "writing frame tables"
        );

        // Nothing reaches `out` until every function encoded cleanly.
        let mut recordings: Vec<Recording> = Vec::with_capacity(module.len());
        for info in module.functions() {
            let mut fragment = Fragment::new(out.context());
            emit_function(module, info, target, &mut fragment)?;
            recordings.push(fragment.finish());
        }

        out.switch_section(SectionKind::Data);
        for recording in &recordings {
            recording.replay(out);
        }
        Ok(())
    }
}
