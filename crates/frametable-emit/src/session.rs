//! One-call emission of a whole module.

use frametable_core::GcModuleInfo;
use frametable_format::{FORMAT_NAME, Image};

use crate::elf::write_elf;
use crate::error::EmitError;
use crate::registry::FormatRegistry;
use crate::streamer::{AsmStreamer, BufferedStreamer, Context, Streamer};
use crate::target::TargetInfo;

/// What to emit and for which target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitConfig {
    /// Registry name of the GC metadata format.
    pub format: String,
    pub target: TargetInfo,
    /// Keep diagnostic comments in assembly output.
    pub comments: bool,
}

impl EmitConfig {
    pub fn new(target: TargetInfo) -> Self {
        Self {
            format: FORMAT_NAME.to_string(),
            target,
            comments: true,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    fn context(&self) -> Context {
        Context::new(self.target.private_prefix.clone())
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self::new(TargetInfo::default())
    }
}

fn run(
    module: &GcModuleInfo,
    config: &EmitConfig,
    registry: &FormatRegistry,
    out: &mut dyn Streamer,
) -> Result<(), EmitError> {
    let mut printer = registry.instantiate(&config.format)?;
    tracing::debug!(
        format = printer.format_name(),
        target = config.target.arch.name(),
        functions = module.len(),
        "emitting GC metadata"
    );
    printer.begin_module(module, &config.target, out)?;
    printer.finish_module(module, &config.target, out)
}

/// Assemble the module's GC metadata in memory.
pub fn emit_image(
    module: &GcModuleInfo,
    config: &EmitConfig,
    registry: &FormatRegistry,
) -> Result<Image, EmitError> {
    let mut out = BufferedStreamer::new(config.context(), config.target.pointer_width);
    run(module, config, registry, &mut out)?;
    out.finish()
}

/// Print the module's GC metadata as GNU assembly.
pub fn emit_assembly(
    module: &GcModuleInfo,
    config: &EmitConfig,
    registry: &FormatRegistry,
) -> Result<String, EmitError> {
    let mut out = AsmStreamer::new(config.context(), config.comments);
    run(module, config, registry, &mut out)?;
    Ok(out.finish())
}

/// Build a relocatable ELF object holding the module's GC metadata.
pub fn emit_object(
    module: &GcModuleInfo,
    config: &EmitConfig,
    registry: &FormatRegistry,
) -> Result<Vec<u8>, EmitError> {
    let image = emit_image(module, config, registry)?;
    write_elf(&image, &config.target)
}
