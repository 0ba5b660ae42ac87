//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::emit::{EmitArgs, OutputKind};
use crate::commands::TargetArgs;

fn parse_target(m: &ArgMatches) -> TargetArgs {
    TargetArgs {
        arch: m
            .get_one::<String>("target")
            .cloned()
            .unwrap_or_else(|| "x86_64".to_string()),
        pointer_size: m.get_one::<u32>("pointer_size").copied(),
        symbol_prefix: m.get_one::<String>("symbol_prefix").cloned().unwrap_or_default(),
        format: m
            .get_one::<String>("format")
            .cloned()
            .unwrap_or_else(|| "generic".to_string()),
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

pub struct EmitParams {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub kind: OutputKind,
    pub comments: bool,
    pub target: TargetArgs,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let kind = match m.get_one::<String>("emit").map(|s| s.as_str()) {
            Some("asm") => OutputKind::Assembly,
            _ => OutputKind::Object,
        };
        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            kind,
            comments: !m.get_flag("no_comments"),
            target: parse_target(m),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            kind: p.kind,
            comments: p.comments,
            target: p.target,
        }
    }
}

pub struct DumpParams {
    pub input: PathBuf,
    pub color: ColorChoice,
    pub target: TargetArgs,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            color: parse_color(m),
            target: parse_target(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            color: p.color.should_colorize(),
            target: p.target,
        }
    }
}

/// Tracing verbosity from the global `-v` count.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}
