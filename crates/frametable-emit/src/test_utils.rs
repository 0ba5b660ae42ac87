//! Test fixtures shared by the emitter tests.

use frametable_core::{GcModuleInfo, parse_module};
use frametable_format::{CodeAddress, Image, PointerWidth, SectionKind, read_tables};

use crate::streamer::{BufferedStreamer, Context, Streamer};
use crate::target::{TargetArch, TargetInfo};

pub fn module(json: &str) -> GcModuleInfo {
    parse_module(json).expect("fixture module must parse")
}

pub fn x86_64() -> TargetInfo {
    TargetInfo::new(TargetArch::X86_64)
}

pub fn x86() -> TargetInfo {
    TargetInfo::new(TargetArch::X86)
}

/// Run `f` against an in-memory streamer positioned in `.data`.
pub fn assemble(width: PointerWidth, f: impl FnOnce(&mut dyn Streamer)) -> Image {
    let mut out = BufferedStreamer::new(Context::default(), width);
    out.switch_section(SectionKind::Data);
    f(&mut out);
    out.finish().expect("all labels bound")
}

pub fn data(image: &Image) -> &[u8] {
    &image
        .section(SectionKind::Data)
        .expect("image has a data section")
        .bytes
}

pub fn u32s(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Callee saves `(5, 8)` and `(9, 16)`, one safe point with a stack root at 24.
pub const SCENARIO_B: &str = r#"{
    "functions": [
        {
            "name": "main",
            "callee_saves": [ { "reg": 5, "offset": 8 }, { "reg": 9, "offset": 16 } ],
            "safe_points": [ { "label": "main_sp0", "roots": [ { "stack": 24 } ] } ]
        }
    ]
}"#;

/// A single register root (3) tagged through a global initialized to 7.
pub const SCENARIO_C: &str = r#"{
    "globals": { "space.old": { "constant": true, "initializer": { "int": 7 } } },
    "functions": [
        {
            "name": "f",
            "safe_points": [
                { "label": "f_sp0", "roots": [ { "register": 3, "metadata": { "global": "space.old" } } ] }
            ]
        }
    ]
}"#;

/// Safe-point code labels from the assembler-local `.Ltmp` namespace, as
/// code generators name them. `g` reuses names `f`'s bodies would take.
pub const PRIVATE_LABELS: &str = r#"{
    "functions": [
        {
            "name": "f",
            "safe_points": [
                { "label": ".Ltmp5", "roots": [ { "stack": 8 } ] },
                { "label": ".Ltmp0", "roots": [ { "stack": 16 } ] }
            ]
        },
        {
            "name": "g",
            "safe_points": [
                { "label": ".Ltmp1", "roots": [ { "register": 3 } ] },
                { "label": ".Ltmp2" },
                { "label": ".Ltmp0" }
            ]
        }
    ]
}"#;

/// Decoded code address names, per function.
pub fn code_labels(image: &Image) -> Vec<Vec<String>> {
    read_tables(image)
        .expect("image decodes")
        .into_iter()
        .map(|table| {
            table
                .safe_points
                .into_iter()
                .map(|point| match point.address {
                    CodeAddress::Symbol { name, addend: 0 } => name,
                    other => panic!("code address is not an external symbol: {other:?}"),
                })
                .collect()
        })
        .collect()
}
