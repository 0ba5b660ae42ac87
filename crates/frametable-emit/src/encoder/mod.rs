//! Frame table encoders.
//!
//! Each encoder writes one part of a function's table through a
//! [`Streamer`]. Encoders validate as they go and return on the first
//! error; callers that need all-or-nothing output write into a
//! [`Fragment`](crate::streamer::Fragment).

mod callee_saves;
mod function;
mod safe_point;

#[cfg(test)]
mod callee_saves_tests;
#[cfg(test)]
mod safe_point_tests;

pub use callee_saves::emit_callee_saves;
pub use function::emit_function;
pub use safe_point::{emit_safe_point, resolve_address_space};

use frametable_core::GcFunctionInfo;

use crate::error::EmitError;
use crate::streamer::Streamer;
use crate::target::TargetInfo;

/// Pad to the target's pointer alignment.
pub fn align_to_pointer(out: &mut dyn Streamer, target: &TargetInfo) {
    out.emit_alignment(target.pointer_width.align_log2());
}

/// A register id as it is stored in the table.
fn register_byte(register: u32) -> Option<u8> {
    u8::try_from(register).ok()
}

/// A table count, which must fit the format's 32-bit count fields.
fn count(info: &GcFunctionInfo, what: &'static str, n: usize) -> Result<u32, EmitError> {
    u32::try_from(n).map_err(|_| EmitError::TooManyEntries {
        function: info.name().to_string(),
        what,
        count: n,
    })
}
