use frametable_core::{GcFunctionInfo, GcModuleInfo};
use frametable_format::metadata_symbol;

use super::{align_to_pointer, count, emit_callee_saves, emit_safe_point};
use crate::error::EmitError;
use crate::streamer::{Label, Streamer, SymbolAttr};
use crate::target::TargetInfo;

/// Write one function's complete table under its global metadata symbol.
///
/// The address table points forward at bodies that are emitted after it,
/// so each body gets a temporary label up front and is bound once reached.
pub fn emit_function(
    module: &GcModuleInfo,
    info: &GcFunctionInfo,
    target: &TargetInfo,
    out: &mut dyn Streamer,
) -> Result<(), EmitError> {
    let name = info.name();
    let callee_count = count(info, "callee-saved registers", info.callee_saves().len())?;
    let point_count = count(info, "safe points", info.safe_points().len())?;

    tracing::debug!(
        function = name,
        callee_saves = callee_count,
        safe_points = point_count,
        "emitting frame table"
    );

    out.add_comment(&format!("GC metadata for {name}"));
    let symbol = out
        .context()
        .symbol(&target.mangle(&metadata_symbol(name)));
    out.emit_symbol_attribute(symbol, SymbolAttr::Global);
    align_to_pointer(out, target);
    out.emit_label(symbol);

    out.emit_int32(callee_count);
    out.emit_int32(point_count);

    emit_callee_saves(info, target, out)?;

    let size = target.pointer_width.bytes() as u8;
    align_to_pointer(out, target);
    // Code labels first, so no body label takes a name a code label needs.
    let codes: Vec<Label> = info
        .safe_points()
        .iter()
        .map(|point| out.context().symbol(&point.label))
        .collect();
    let mut bodies: Vec<Label> = Vec::with_capacity(codes.len());
    for code in codes {
        let body = out.context().temp_label();
        out.emit_symbol_value(code, size);
        out.emit_symbol_value(body, size);
        bodies.push(body);
    }

    for (index, body) in bodies.into_iter().enumerate() {
        align_to_pointer(out, target);
        out.emit_label(body);
        emit_safe_point(module, info, index, target, out)?;
    }
    Ok(())
}
