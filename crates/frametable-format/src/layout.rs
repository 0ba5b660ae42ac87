//! Field sizes and alignment rules.

/// Name under which the format is registered.
pub const FORMAT_NAME: &str = "generic";

/// Prefix of the per-function table symbol (before target mangling).
pub const SYMBOL_PREFIX: &str = "_gc_metadata_";

/// Width of every count field.
pub const COUNT_SIZE: usize = 4;

pub const STACK_OFFSET_SIZE: usize = 4;
pub const REGISTER_SIZE: usize = 1;
pub const TAG_SIZE: usize = 1;

/// Target pointer width. Only 32- and 64-bit targets are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerWidth {
    Four,
    Eight,
}

impl PointerWidth {
    /// Width for a pointer size in bytes, `None` for anything but 4 or 8.
    pub fn from_bytes(bytes: u32) -> Option<Self> {
        match bytes {
            4 => Some(PointerWidth::Four),
            8 => Some(PointerWidth::Eight),
            _ => None,
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            PointerWidth::Four => 4,
            PointerWidth::Eight => 8,
        }
    }

    /// log2 of the pointer alignment, as an assembler `.p2align` operand.
    pub fn align_log2(self) -> u8 {
        match self {
            PointerWidth::Four => 2,
            PointerWidth::Eight => 3,
        }
    }
}

/// Round up to the next multiple of `align` (a power of two).
pub fn align_up(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}

/// Unmangled table symbol for `function`.
pub fn metadata_symbol(function: &str) -> String {
    format!("{SYMBOL_PREFIX}{function}")
}
