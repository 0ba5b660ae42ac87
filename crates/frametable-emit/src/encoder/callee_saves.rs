use frametable_core::GcFunctionInfo;

use super::register_byte;
use crate::error::EmitError;
use crate::streamer::Streamer;
use crate::target::TargetInfo;

/// Write every callee-saved slot's stack offset, then every register id.
///
/// The count itself belongs to the function header.
pub fn emit_callee_saves(
    info: &GcFunctionInfo,
    target: &TargetInfo,
    out: &mut dyn Streamer,
) -> Result<(), EmitError> {
    let saves = info.callee_saves();

    let mut registers = Vec::with_capacity(saves.len());
    for save in saves {
        let reg = register_byte(save.reg).ok_or_else(|| EmitError::InvalidRegisterId {
            function: info.name().to_string(),
            register: save.reg,
            safe_point: None,
        })?;
        registers.push(reg);
    }

    for save in saves {
        out.emit_int32(save.stack_offset as u32);
    }
    for (save, reg) in saves.iter().zip(registers) {
        out.add_comment(&format!(
            "callee-saved reg at {}",
            target.register_name(save.reg)
        ));
        out.emit_int8(reg);
    }
    Ok(())
}
