pub mod dump;
pub mod emit;
pub mod formats;

#[cfg(test)]
mod emit_tests;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use frametable_core::{GcModuleInfo, ModuleError, parse_module};
use frametable_emit::{EmitConfig, EmitError, TargetArch, TargetInfo};
use frametable_format::DecodeError;

/// Failure of a subcommand, printed as `error: <message>`.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    Write { path: String, source: io::Error },

    #[error("unknown target `{0}`")]
    UnknownTarget(String),

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Target flags shared by `emit` and `dump`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetArgs {
    pub arch: String,
    pub pointer_size: Option<u32>,
    pub symbol_prefix: String,
    pub format: String,
}

impl TargetArgs {
    pub fn config(&self, comments: bool) -> Result<EmitConfig, CommandError> {
        let arch = TargetArch::from_name(&self.arch)
            .ok_or_else(|| CommandError::UnknownTarget(self.arch.clone()))?;
        let mut target = TargetInfo::new(arch).with_global_prefix(self.symbol_prefix.as_str());
        if let Some(bytes) = self.pointer_size {
            target = target.with_pointer_size(bytes)?;
        }
        Ok(EmitConfig::new(target)
            .with_format(self.format.as_str())
            .with_comments(comments))
    }
}

/// Load a JSON module description from a file, or stdin for `-`.
pub fn load_module(path: &Path) -> Result<GcModuleInfo, CommandError> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CommandError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| CommandError::Read {
            path: path.display().to_string(),
            source,
        })?
    };
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded module description");
    Ok(parse_module(&text)?)
}
