//! Emission errors.

/// Everything that can abort a frame table emission.
///
/// Emission is all-or-nothing: once any of these is returned, nothing has
/// been written to the output streamer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("{}: register id {register} does not fit in a byte", register_location(.function, .safe_point))]
    InvalidRegisterId {
        function: String,
        register: u32,
        /// `None` for a callee-saved slot.
        safe_point: Option<usize>,
    },

    #[error("{}: invalid root metadata: {reason}", point_location(.function, .safe_point))]
    InvalidRootMetadata {
        function: String,
        safe_point: usize,
        reason: String,
    },

    #[error("unsupported pointer size {0} (expected 4 or 8)")]
    UnsupportedPointerSize(u32),

    #[error("{}: root in virtual register %{vreg} was never assigned a location", point_location(.function, .safe_point))]
    UnassignedRegister {
        function: String,
        safe_point: usize,
        vreg: u32,
    },

    #[error("function `{function}`: {count} {what} do not fit in a 32-bit count")]
    TooManyEntries {
        function: String,
        what: &'static str,
        count: usize,
    },

    #[error("unknown GC metadata format `{0}`")]
    UnknownFormat(String),

    #[error("GC metadata format `{0}` is already registered")]
    DuplicateFormat(String),

    #[error("label `{0}` is referenced but never defined")]
    UnboundLabel(String),

    #[error("object file: {0}")]
    Object(String),
}

fn point_location(function: &str, index: &usize) -> String {
    format!("function `{function}`, safe point #{index}")
}

fn register_location(function: &str, safe_point: &Option<usize>) -> String {
    match safe_point {
        Some(index) => point_location(function, index),
        None => format!("function `{function}`, callee-saved registers"),
    }
}

impl From<object::write::Error> for EmitError {
    fn from(err: object::write::Error) -> Self {
        EmitError::Object(err.to_string())
    }
}
