#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Generic GC frame table format.
//!
//! This crate contains:
//! - Layout definitions (pointer widths, field sizes, symbol naming)
//! - The assembled image an emitter produces (section bytes, symbols, relocations)
//! - A reader that decodes tables back out of an image
//! - A human-readable dump of decoded tables
//!
//! Per function, the table is:
//!
//! ```text
//! u32 callee_saved_count
//! u32 safe_point_count
//! u32 callee_saved_offset[callee_saved_count]
//! u8  callee_saved_reg[callee_saved_count]
//! <pointer align>
//! { ptr code_address; ptr body; } [safe_point_count]
//! per safe point, <pointer align>:
//!     u32 stack_root_count
//!     u32 reg_root_count
//!     u32 stack_offset[stack_root_count]
//!     u8  reg[reg_root_count]
//!     u8  address_space[stack_root_count + reg_root_count]
//! ```
//!
//! `address_space` follows the roots' declaration order, while the offset and
//! register arrays are partitioned by kind. Consumers rely on this exact
//! ordering.

pub mod dump;
pub mod image;
pub mod layout;
pub mod reader;

#[cfg(test)]
mod layout_tests;

pub use dump::dump;
pub use image::{Image, ImageRelocation, ImageSymbol, RelocTarget, SectionImage, SectionKind};
pub use layout::{
    COUNT_SIZE, FORMAT_NAME, PointerWidth, REGISTER_SIZE, STACK_OFFSET_SIZE, SYMBOL_PREFIX,
    TAG_SIZE, align_up, metadata_symbol,
};
pub use reader::{
    CalleeSaveEntry, CodeAddress, DecodeError, FunctionTable, SafePointEntry, read_table,
    read_tables,
};
