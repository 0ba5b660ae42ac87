use std::fs;
use std::path::PathBuf;

use object::{Object, ObjectSymbol};
use tempfile::TempDir;

use super::dump::{DumpArgs, render};
use super::emit::{EmitArgs, OutputKind, run};
use super::formats::listing;
use super::{CommandError, TargetArgs};
use frametable_emit::{EmitError, FormatRegistry};

const MODULE: &str = r#"{
  "globals": { "young": { "constant": true, "initializer": { "int": 1 } } },
  "functions": [
    {
      "name": "main",
      "callee_saves": [ { "reg": 3, "offset": -8 } ],
      "safe_points": [
        { "label": "main_sp0", "roots": [ { "stack": 16 }, { "register": 0, "metadata": { "global": "young" } } ] }
      ]
    }
  ]
}"#;

fn target(arch: &str) -> TargetArgs {
    TargetArgs {
        arch: arch.to_string(),
        pointer_size: None,
        symbol_prefix: String::new(),
        format: "generic".to_string(),
    }
}

fn write_module(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("module.json");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn emit_object_file() {
    let dir = TempDir::new().unwrap();
    let input = write_module(&dir, MODULE);
    let output = dir.path().join("gc.o");

    run(EmitArgs {
        input,
        output: Some(output.clone()),
        kind: OutputKind::Object,
        comments: true,
        target: target("x86_64"),
    })
    .unwrap();

    let bytes = fs::read(&output).unwrap();
    let file = object::File::parse(&*bytes).unwrap();
    let symbol = file
        .symbols()
        .find(|s| s.name() == Ok("_gc_metadata_main"))
        .unwrap();
    assert!(symbol.is_global());
}

#[test]
fn emit_assembly_file() {
    let dir = TempDir::new().unwrap();
    let input = write_module(&dir, MODULE);
    let output = dir.path().join("gc.s");

    run(EmitArgs {
        input,
        output: Some(output.clone()),
        kind: OutputKind::Assembly,
        comments: false,
        target: TargetArgs {
            symbol_prefix: "_".to_string(),
            ..target("x86")
        },
    })
    .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("    .data\n    .globl __gc_metadata_main\n    .p2align 2\n"));
    assert!(text.contains("    .long main_sp0\n"));
    assert!(!text.contains('#'));
}

#[test]
fn dump_decodes_emitted_tables() {
    let dir = TempDir::new().unwrap();
    let input = write_module(&dir, MODULE);

    let out = render(&DumpArgs {
        input,
        target: target("x86_64"),
        color: false,
    })
    .unwrap();

    insta::assert_snapshot!(out, @r"
    main  ; @0
      callee_saves = 1
        reg 3 @ -8
      safe_points = 1
        #0 main_sp0 → @32
          stack  [16]
          regs   [0]
          spaces [0, 1]
    ");
}

#[test]
fn missing_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.json");

    let err = render(&DumpArgs {
        input,
        target: target("x86_64"),
        color: false,
    })
    .unwrap_err();

    assert!(matches!(err, CommandError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '"));
}

#[test]
fn malformed_module() {
    let dir = TempDir::new().unwrap();
    let input = write_module(&dir, "{ \"functions\": 3 }");

    let err = render(&DumpArgs {
        input,
        target: target("x86_64"),
        color: false,
    })
    .unwrap_err();

    assert!(matches!(err, CommandError::Module(_)));
    assert!(err.to_string().starts_with("invalid module description: "));
}

#[test]
fn unsupported_pointer_size() {
    let dir = TempDir::new().unwrap();
    let input = write_module(&dir, MODULE);

    let err = render(&DumpArgs {
        input,
        target: TargetArgs {
            pointer_size: Some(2),
            ..target("x86_64")
        },
        color: false,
    })
    .unwrap_err();

    assert!(matches!(
        err,
        CommandError::Emit(EmitError::UnsupportedPointerSize(2))
    ));
    assert_eq!(err.to_string(), "unsupported pointer size 2 (expected 4 or 8)");
}

#[test]
fn unknown_target_name() {
    let err = target("mips").config(true).unwrap_err();

    assert_eq!(err.to_string(), "unknown target `mips`");
}

#[test]
fn formats_listing() {
    insta::assert_snapshot!(listing(&FormatRegistry::with_builtin_formats()), @r"
    Supported formats (1):
      generic    generic collector
    ");
}
