use frametable_core::{CalleeSave, GcFunctionInfo};
use frametable_format::PointerWidth;

use super::emit_callee_saves;
use crate::EmitError;
use crate::streamer::{AsmStreamer, Context, Fragment};
use crate::test_utils::{assemble, data, x86_64};

fn with_saves(saves: &[(u32, i32)]) -> GcFunctionInfo {
    let mut info = GcFunctionInfo::new("f");
    for &(reg, offset) in saves {
        info.add_callee_save(CalleeSave::new(reg, offset));
    }
    info
}

#[test]
fn offsets_then_register_ids() {
    let info = with_saves(&[(5, 8), (9, -16)]);

    let image = assemble(PointerWidth::Eight, |out| {
        emit_callee_saves(&info, &x86_64(), out).unwrap();
    });

    assert_eq!(
        data(&image),
        &[8, 0, 0, 0, 0xf0, 0xff, 0xff, 0xff, 5, 9][..]
    );
}

#[test]
fn no_saves_emits_nothing() {
    let info = with_saves(&[]);

    let image = assemble(PointerWidth::Eight, |out| {
        emit_callee_saves(&info, &x86_64(), out).unwrap();
    });

    assert!(data(&image).is_empty());
}

#[test]
fn register_ids_are_commented() {
    let info = with_saves(&[(3, 0), (200, 4)]);
    let mut out = AsmStreamer::new(Context::default(), true);

    emit_callee_saves(&info, &x86_64(), &mut out).unwrap();

    assert_eq!(
        out.finish(),
        concat!(
            "    .long 0\n",
            "    .long 4\n",
            "    .byte 3 # callee-saved reg at rbx\n",
            "    .byte 200 # callee-saved reg at r200\n",
        )
    );
}

#[test]
fn wide_register_id_is_rejected_before_output() {
    let info = with_saves(&[(5, 8), (256, 16)]);
    let mut ctx = Context::default();
    let mut fragment = Fragment::new(&mut ctx);

    let err = emit_callee_saves(&info, &x86_64(), &mut fragment).unwrap_err();

    assert_eq!(
        err,
        EmitError::InvalidRegisterId {
            function: "f".into(),
            register: 256,
            safe_point: None,
        }
    );
    assert_eq!(
        err.to_string(),
        "function `f`, callee-saved registers: register id 256 does not fit in a byte"
    );
    assert!(fragment.finish().is_empty());
}
