use std::path::PathBuf;

use frametable_core::Colors;
use frametable_emit::{FormatRegistry, emit_image};
use frametable_format::{dump, read_tables};

use super::{CommandError, TargetArgs, load_module};

pub struct DumpArgs {
    pub input: PathBuf,
    pub target: TargetArgs,
    pub color: bool,
}

/// Render the tables `args.input` produces, as decoded from the emitted image.
pub fn render(args: &DumpArgs) -> Result<String, CommandError> {
    let module = load_module(&args.input)?;
    let config = args.target.config(false)?;
    let image = emit_image(&module, &config, &FormatRegistry::with_builtin_formats())?;
    let tables = read_tables(&image)?;
    Ok(dump(&tables, Colors::new(args.color)))
}

pub fn run(args: DumpArgs) -> Result<(), CommandError> {
    print!("{}", render(&args)?);
    Ok(())
}
