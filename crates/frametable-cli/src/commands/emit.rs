use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use frametable_emit::{FormatRegistry, emit_assembly, emit_object};

use super::{CommandError, TargetArgs, load_module};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputKind {
    #[default]
    Object,
    Assembly,
}

pub struct EmitArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub kind: OutputKind,
    pub comments: bool,
    pub target: TargetArgs,
}

pub fn run(args: EmitArgs) -> Result<(), CommandError> {
    let module = load_module(&args.input)?;
    let config = args.target.config(args.comments)?;
    let registry = FormatRegistry::with_builtin_formats();

    let bytes = match args.kind {
        OutputKind::Object => emit_object(&module, &config, &registry)?,
        OutputKind::Assembly => emit_assembly(&module, &config, &registry)?.into_bytes(),
    };

    match &args.output {
        Some(path) => write_file(path, &bytes),
        None => io::stdout()
            .write_all(&bytes)
            .map_err(|source| CommandError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CommandError> {
    fs::write(path, bytes).map_err(|source| CommandError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}
