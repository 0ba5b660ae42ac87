#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Emitter for generic GC frame tables.
//!
//! The pipeline, leaves first:
//! - `streamer`: output sinks (in-memory image, assembly text, recording)
//! - `encoder`: callee-saved block, safe-point bodies, whole function tables
//! - `printer`: the module driver behind the `GcMetadataPrinter` trait
//! - `registry`: format lookup by name
//! - `session`: module in, image / assembly / ELF object out

pub mod elf;
pub mod encoder;
mod error;
pub mod printer;
pub mod registry;
mod session;
pub mod streamer;
mod target;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod registry_tests;

pub use error::EmitError;
pub use printer::{GcMetadataPrinter, GenericPrinter};
pub use registry::{FormatEntry, FormatRegistry, PrinterFactory, register_generic};
pub use session::{EmitConfig, emit_assembly, emit_image, emit_object};
pub use target::{TargetArch, TargetInfo};
