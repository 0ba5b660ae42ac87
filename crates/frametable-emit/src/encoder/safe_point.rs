use frametable_core::{ConstantRef, GcFunctionInfo, GcModuleInfo, RootLocation};

use super::{count, register_byte};
use crate::error::EmitError;
use crate::streamer::Streamer;
use crate::target::TargetInfo;

/// Address-space tag for a root's metadata.
///
/// No metadata, null and integer zero all map to 0. Otherwise the metadata
/// must name a global initialized with an integer, whose low byte is the tag.
/// The error is a human-readable reason.
pub fn resolve_address_space(
    module: &GcModuleInfo,
    metadata: Option<&ConstantRef>,
) -> Result<u8, String> {
    match metadata {
        None => Ok(0),
        Some(constant) if constant.is_null_value() => Ok(0),
        Some(ConstantRef::Global(name)) => {
            let global = module
                .global(name)
                .ok_or_else(|| format!("global `{name}` is not defined"))?;
            let value = global
                .int_initializer()
                .ok_or_else(|| format!("global `{name}` is not initialized with an integer"))?;
            Ok(value as u8)
        }
        Some(other) => Err(format!("expected a global variable, found {other:?}")),
    }
}

/// Write the body of safe point `index`: counts, stack offsets, register
/// ids, then one tag per root.
///
/// Offsets and ids are grouped by kind, tags follow the roots as declared.
pub fn emit_safe_point(
    module: &GcModuleInfo,
    info: &GcFunctionInfo,
    index: usize,
    target: &TargetInfo,
    out: &mut dyn Streamer,
) -> Result<(), EmitError> {
    let point = &info.safe_points()[index];
    let roots = point.roots();

    let mut stack_offsets = Vec::new();
    let mut registers = Vec::new();
    for root in roots {
        match root.location {
            RootLocation::Stack(offset) => stack_offsets.push(offset),
            RootLocation::Register(reg) => {
                let byte = register_byte(reg).ok_or_else(|| EmitError::InvalidRegisterId {
                    function: info.name().to_string(),
                    register: reg,
                    safe_point: Some(index),
                })?;
                registers.push((reg, byte));
            }
            RootLocation::VirtualRegister(vreg) => {
                return Err(EmitError::UnassignedRegister {
                    function: info.name().to_string(),
                    safe_point: index,
                    vreg,
                });
            }
        }
    }
    let tags = roots
        .iter()
        .map(|root| resolve_address_space(module, root.metadata.as_ref()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|reason| EmitError::InvalidRootMetadata {
            function: info.name().to_string(),
            safe_point: index,
            reason,
        })?;

    tracing::trace!(
        function = info.name(),
        index,
        label = %point.label,
        stack_roots = stack_offsets.len(),
        register_roots = registers.len(),
        "safe point"
    );

    let stack_count = count(info, "stack roots", stack_offsets.len())?;
    let register_count = count(info, "register roots", registers.len())?;

    out.emit_int32(stack_count);
    out.emit_int32(register_count);
    for offset in stack_offsets {
        out.emit_int32(offset as u32);
    }
    for (reg, byte) in registers {
        out.add_comment(&format!("register root at {}", target.register_name(reg)));
        out.emit_int8(byte);
    }
    for tag in tags {
        out.emit_int8(tag);
    }
    Ok(())
}
