//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Target flags shared by every command that emits.
fn with_target_args(cmd: Command) -> Command {
    cmd.arg(target_arg())
        .arg(pointer_size_arg())
        .arg(symbol_prefix_arg())
        .arg(format_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("frametable")
        .about("Emit and inspect generic GC frame tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(emit_command())
        .subcommand(dump_command())
        .subcommand(formats_command())
}

/// Emit frame tables as an ELF object or assembly.
pub fn emit_command() -> Command {
    let cmd = Command::new("emit")
        .about("Emit frame tables for a module")
        .override_usage(
            "\
  frametable emit <INPUT> [-o <PATH>]
  frametable emit <INPUT> --emit asm",
        )
        .after_help(
            r#"EXAMPLES:
  frametable emit module.json -o gc.o              # ELF object
  frametable emit module.json --emit asm           # assembly on stdout
  frametable emit - --target x86 --emit asm        # 32-bit, read stdin
  frametable emit module.json --symbol-prefix _    # Mach-O style names"#,
        )
        .arg(input_arg())
        .arg(output_arg())
        .arg(emit_kind_arg())
        .arg(no_comments_arg());

    with_target_args(cmd)
}

/// Emit in memory and print the decoded tables.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the frame tables a module produces")
        .after_help(
            r#"EXAMPLES:
  frametable dump module.json                  # 64-bit layout
  frametable dump module.json --pointer-size 4 # 32-bit layout"#,
        )
        .arg(input_arg())
        .arg(color_arg());

    with_target_args(cmd)
}

/// List registered GC metadata formats.
pub fn formats_command() -> Command {
    Command::new("formats").about("List GC metadata formats")
}
