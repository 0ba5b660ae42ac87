//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so `emit` and `dump` can share the
//! target configuration flags.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Module description (positional, `-` for stdin).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("JSON module description ('-' reads stdin)")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Write to PATH instead of stdout")
}

/// Target architecture (--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .long("target")
        .value_name("ARCH")
        .default_value("x86_64")
        .value_parser(["x86_64", "aarch64", "x86", "arm"])
        .help("Target architecture (pointer size and register names)")
}

/// Pointer size override (--pointer-size).
pub fn pointer_size_arg() -> Arg {
    Arg::new("pointer_size")
        .long("pointer-size")
        .value_name("BYTES")
        .value_parser(value_parser!(u32))
        .help("Override the target's pointer size (4 or 8)")
}

/// Global symbol prefix (--symbol-prefix).
pub fn symbol_prefix_arg() -> Arg {
    Arg::new("symbol_prefix")
        .long("symbol-prefix")
        .value_name("PREFIX")
        .help("Prefix prepended to global symbols")
}

/// GC metadata format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("NAME")
        .default_value("generic")
        .help("GC metadata format (see `frametable formats`)")
}

/// Output kind (--emit).
pub fn emit_kind_arg() -> Arg {
    Arg::new("emit")
        .long("emit")
        .value_name("KIND")
        .default_value("obj")
        .value_parser(["obj", "asm"])
        .help("Emit an ELF object or assembly text")
}

/// Drop assembly comments (--no-comments).
pub fn no_comments_arg() -> Arg {
    Arg::new("no_comments")
        .long("no-comments")
        .action(ArgAction::SetTrue)
        .help("Omit diagnostic comments from assembly output")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug, -vv for trace)")
}
