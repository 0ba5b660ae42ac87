use frametable_core::{ConstantRef, GcModuleInfo, GlobalVariable, Initializer};
use frametable_format::PointerWidth;
use indoc::indoc;

use super::{emit_safe_point, resolve_address_space};
use crate::EmitError;
use crate::streamer::{AsmStreamer, Context};
use crate::test_utils::{SCENARIO_B, SCENARIO_C, assemble, data, module, u32s, x86_64};

fn body(module: &GcModuleInfo, function: &str, index: usize) -> Vec<u8> {
    let info = module.function_info(function).unwrap();
    let image = assemble(PointerWidth::Eight, |out| {
        emit_safe_point(module, info, index, &x86_64(), out).unwrap();
    });
    data(&image).to_vec()
}

fn emit_err(module: &GcModuleInfo, function: &str, index: usize) -> EmitError {
    let info = module.function_info(function).unwrap();
    let mut out = AsmStreamer::new(Context::default(), false);
    emit_safe_point(module, info, index, &x86_64(), &mut out).unwrap_err()
}

#[test]
fn single_stack_root_without_metadata() {
    let module = module(SCENARIO_B);

    let mut expected = u32s(&[1, 0, 24]);
    expected.push(0);
    assert_eq!(body(&module, "main", 0), expected);
}

#[test]
fn register_root_tagged_through_global() {
    let module = module(SCENARIO_C);

    let mut expected = u32s(&[0, 1]);
    expected.extend([3, 7]);
    assert_eq!(body(&module, "f", 0), expected);
}

#[test]
fn empty_safe_point_has_only_counts() {
    let module = module(r#"{ "functions": [ { "name": "f", "safe_points": [ { "label": "l" } ] } ] }"#);

    assert_eq!(body(&module, "f", 0), u32s(&[0, 0]));
}

#[test]
fn tags_follow_declaration_order_not_kind() {
    let module = module(indoc! {r#"
        {
          "globals": {
            "one": { "initializer": { "int": 1 } },
            "two": { "initializer": { "int": 2 } },
            "three": { "initializer": { "int": 3 } }
          },
          "functions": [
            {
              "name": "f",
              "safe_points": [
                {
                  "label": "f_sp0",
                  "roots": [
                    { "register": 2, "metadata": { "global": "one" } },
                    { "stack": 8 },
                    { "register": 4, "metadata": { "global": "two" } },
                    { "stack": -16, "metadata": { "global": "three" } }
                  ]
                }
              ]
            }
          ]
        }
    "#});

    let mut expected = u32s(&[2, 2, 8, (-16i32) as u32]);
    expected.extend([2, 4]);
    expected.extend([1, 0, 2, 3]);
    assert_eq!(body(&module, "f", 0), expected);
}

#[test]
fn register_roots_are_commented() {
    let module = module(SCENARIO_C);
    let info = module.function_info("f").unwrap();
    let mut out = AsmStreamer::new(Context::default(), true);

    emit_safe_point(&module, info, 0, &x86_64(), &mut out).unwrap();

    assert!(
        out.finish().contains(".byte 3 # register root at rbx\n"),
        "register comment missing"
    );
}

#[test]
fn address_space_resolution() {
    let mut module = GcModuleInfo::new();
    module.add_global("space", GlobalVariable::int_constant(7));
    module.add_global("wide", GlobalVariable::int_constant(0x107));
    module.add_global(
        "mutable",
        GlobalVariable {
            constant: false,
            initializer: Some(Initializer::Int(4)),
        },
    );
    module.add_global(
        "blob",
        GlobalVariable {
            constant: true,
            initializer: Some(Initializer::Bytes(vec![1, 2])),
        },
    );
    module.add_global("bss", GlobalVariable::default());

    let resolve = |c: Option<ConstantRef>| resolve_address_space(&module, c.as_ref());
    let global = |name: &str| Some(ConstantRef::Global(name.into()));

    assert_eq!(resolve(None), Ok(0));
    assert_eq!(resolve(Some(ConstantRef::Null)), Ok(0));
    assert_eq!(resolve(Some(ConstantRef::Int(0))), Ok(0));
    assert_eq!(resolve(global("space")), Ok(7));
    assert_eq!(resolve(global("wide")), Ok(7));
    assert_eq!(resolve(global("mutable")), Ok(4));
    assert_eq!(
        resolve(global("blob")),
        Err("global `blob` is not initialized with an integer".into())
    );
    assert_eq!(
        resolve(global("bss")),
        Err("global `bss` is not initialized with an integer".into())
    );
    assert_eq!(
        resolve(global("nope")),
        Err("global `nope` is not defined".into())
    );
    assert_eq!(
        resolve(Some(ConstantRef::Int(5))),
        Err("expected a global variable, found Int(5)".into())
    );
}

#[test]
fn invalid_metadata_names_the_safe_point() {
    let module = module(indoc! {r#"
        {
          "functions": [
            {
              "name": "f",
              "safe_points": [
                { "label": "a" },
                { "label": "b", "roots": [ { "stack": 0, "metadata": { "global": "missing" } } ] }
              ]
            }
          ]
        }
    "#});

    let err = emit_err(&module, "f", 1);

    assert_eq!(
        err,
        EmitError::InvalidRootMetadata {
            function: "f".into(),
            safe_point: 1,
            reason: "global `missing` is not defined".into(),
        }
    );
    assert_eq!(
        err.to_string(),
        "function `f`, safe point #1: invalid root metadata: global `missing` is not defined"
    );
}

#[test]
fn wide_register_root_is_rejected() {
    let module = module(r#"{ "functions": [ { "name": "f", "safe_points": [ { "label": "a", "roots": [ { "register": 300 } ] } ] } ] }"#);

    let err = emit_err(&module, "f", 0);

    assert_eq!(
        err,
        EmitError::InvalidRegisterId {
            function: "f".into(),
            register: 300,
            safe_point: Some(0),
        }
    );
    assert_eq!(
        err.to_string(),
        "function `f`, safe point #0: register id 300 does not fit in a byte"
    );
}

#[test]
fn virtual_register_root_is_rejected() {
    let module = module(r#"{ "functions": [ { "name": "f", "safe_points": [ { "label": "a", "roots": [ { "virtual_register": 42 } ] } ] } ] }"#);

    let err = emit_err(&module, "f", 0);

    assert_eq!(
        err,
        EmitError::UnassignedRegister {
            function: "f".into(),
            safe_point: 0,
            vreg: 42,
        }
    );
    assert_eq!(
        err.to_string(),
        "function `f`, safe point #0: root in virtual register %42 was never assigned a location"
    );
}
