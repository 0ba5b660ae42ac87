//! Decoding frame tables out of an assembled image.

use crate::image::{Image, RelocTarget, SectionImage, SectionKind};
use crate::layout::{
    COUNT_SIZE, PointerWidth, REGISTER_SIZE, STACK_OFFSET_SIZE, SYMBOL_PREFIX, TAG_SIZE,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("image has no {} section", .0.name())]
    MissingSection(SectionKind),

    #[error("table truncated: {needed} bytes needed at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("safe point body at {offset} lies outside the section")]
    BodyOutOfBounds { offset: u64 },

    #[error("safe point body at {offset} is not pointer-aligned")]
    MisalignedBody { offset: u64 },
}

/// Where a safe point's code address points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeAddress {
    /// Resolved by the linker against an external symbol.
    Symbol { name: String, addend: i64 },
    /// Offset into a section of the same image.
    Local { section: SectionKind, offset: u64 },
    /// No relocation: the field holds the address itself.
    Absolute(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalleeSaveEntry {
    pub stack_offset: i32,
    pub register: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafePointEntry {
    pub address: CodeAddress,
    /// Section offset of the body.
    pub body_offset: u64,
    pub stack_offsets: Vec<i32>,
    pub registers: Vec<u8>,
    /// One tag per root, in the roots' original order.
    pub address_spaces: Vec<u8>,
}

impl SafePointEntry {
    pub fn root_count(&self) -> usize {
        self.stack_offsets.len() + self.registers.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionTable {
    /// Function name with symbol prefixes stripped.
    pub function: String,
    /// Section offset of the table symbol.
    pub offset: u64,
    pub callee_saves: Vec<CalleeSaveEntry>,
    pub safe_points: Vec<SafePointEntry>,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let slice = self
            .pos
            .checked_add(n)
            .and_then(|end| self.bytes.get(self.pos..end))
            .ok_or(DecodeError::Truncated {
                offset: self.pos,
                needed: n,
            })?;
        self.pos += n;
        Ok(slice)
    }

    fn read_u32(&mut self, size: usize) -> Result<u32, DecodeError> {
        let b = self.take(size)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_count(&mut self) -> Result<usize, DecodeError> {
        Ok(self.read_u32(COUNT_SIZE)? as usize)
    }

    fn read_offset(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_u32(STACK_OFFSET_SIZE)? as i32)
    }

    fn read_ptr(&mut self, width: PointerWidth) -> Result<u64, DecodeError> {
        let b = self.take(width.bytes())?;
        let mut buf = [0u8; 8];
        buf[..b.len()].copy_from_slice(b);
        Ok(u64::from_le_bytes(buf))
    }

    fn align(&mut self, width: PointerWidth) {
        self.pos = crate::layout::align_up(self.pos, width.bytes());
    }
}

/// Decode the table that starts at `offset` in `section`.
///
/// The table itself does not record its function, so `function` is left
/// empty; `read_tables` fills it in from the symbol.
pub fn read_table(
    section: &SectionImage,
    width: PointerWidth,
    offset: u64,
) -> Result<FunctionTable, DecodeError> {
    let mut cur = Cursor::new(&section.bytes, offset as usize);

    let callee_count = cur.read_count()?;
    let point_count = cur.read_count()?;

    let mut stack_offsets = Vec::new();
    for _ in 0..callee_count {
        stack_offsets.push(cur.read_offset()?);
    }
    let registers = cur.take(callee_count * REGISTER_SIZE)?;
    let callee_saves = stack_offsets
        .into_iter()
        .zip(registers.iter().copied())
        .map(|(stack_offset, register)| CalleeSaveEntry {
            stack_offset,
            register,
        })
        .collect();

    cur.align(width);
    let mut entries = Vec::new();
    for _ in 0..point_count {
        let field = cur.pos as u64;
        let raw = cur.read_ptr(width)?;
        let body = cur.read_ptr(width)?;
        entries.push((code_address(section, field, raw), body));
    }

    let mut safe_points = Vec::new();
    for (address, body_offset) in entries {
        safe_points.push(read_body(section, width, address, body_offset)?);
    }

    Ok(FunctionTable {
        function: String::new(),
        offset,
        callee_saves,
        safe_points,
    })
}

fn read_body(
    section: &SectionImage,
    width: PointerWidth,
    address: CodeAddress,
    body_offset: u64,
) -> Result<SafePointEntry, DecodeError> {
    if body_offset >= section.bytes.len() as u64 {
        return Err(DecodeError::BodyOutOfBounds {
            offset: body_offset,
        });
    }
    if !body_offset.is_multiple_of(width.bytes() as u64) {
        return Err(DecodeError::MisalignedBody {
            offset: body_offset,
        });
    }

    let mut cur = Cursor::new(&section.bytes, body_offset as usize);
    let stack_count = cur.read_count()?;
    let reg_count = cur.read_count()?;

    let mut stack_offsets = Vec::new();
    for _ in 0..stack_count {
        stack_offsets.push(cur.read_offset()?);
    }
    let registers = cur.take(reg_count * REGISTER_SIZE)?.to_vec();
    let address_spaces = cur.take((stack_count + reg_count) * TAG_SIZE)?.to_vec();

    Ok(SafePointEntry {
        address,
        body_offset,
        stack_offsets,
        registers,
        address_spaces,
    })
}

fn code_address(section: &SectionImage, field: u64, raw: u64) -> CodeAddress {
    match section.relocation_at(field) {
        Some(reloc) => match &reloc.target {
            RelocTarget::Symbol(name) => CodeAddress::Symbol {
                name: name.clone(),
                addend: reloc.addend,
            },
            RelocTarget::Section(kind) => CodeAddress::Local {
                section: *kind,
                offset: reloc.addend as u64,
            },
        },
        None => CodeAddress::Absolute(raw),
    }
}

/// Decode every table in the image's data section, in symbol order.
///
/// Tables are found through their global symbols; any global prefix the
/// target mangling added in front of the metadata prefix is ignored.
pub fn read_tables(image: &Image) -> Result<Vec<FunctionTable>, DecodeError> {
    let section = image
        .section(SectionKind::Data)
        .ok_or(DecodeError::MissingSection(SectionKind::Data))?;

    let mut tables = Vec::new();
    for symbol in section.symbols.iter().filter(|s| s.global) {
        let Some((_, function)) = symbol.name.split_once(SYMBOL_PREFIX) else {
            continue;
        };
        let mut table = read_table(section, image.pointer_width, symbol.offset)?;
        table.function = function.to_string();
        tables.push(table);
    }
    Ok(tables)
}
