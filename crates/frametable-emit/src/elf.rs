//! Relocatable ELF output for an assembled image.

use std::collections::HashMap;

use frametable_format::{Image, PointerWidth, RelocTarget, SectionKind};
use object::write::{Object, Relocation, StandardSection, Symbol, SymbolId, SymbolSection};
use object::{
    Architecture, BinaryFormat, Endianness, RelocationEncoding, RelocationFlags, RelocationKind,
    SymbolFlags, SymbolKind, SymbolScope,
};

use crate::error::EmitError;
use crate::target::{TargetArch, TargetInfo};

fn architecture(target: &TargetInfo) -> Result<Architecture, EmitError> {
    match (target.arch, target.pointer_width) {
        (TargetArch::X86_64, PointerWidth::Eight) => Ok(Architecture::X86_64),
        (TargetArch::X86_64, PointerWidth::Four) => Ok(Architecture::X86_64_X32),
        (TargetArch::Aarch64, PointerWidth::Eight) => Ok(Architecture::Aarch64),
        (TargetArch::Aarch64, PointerWidth::Four) => Ok(Architecture::Aarch64_Ilp32),
        (TargetArch::X86, PointerWidth::Four) => Ok(Architecture::I386),
        (TargetArch::Arm, PointerWidth::Four) => Ok(Architecture::Arm),
        (arch, _) => Err(EmitError::Object(format!(
            "{} has no ELF variant with {}-byte pointers",
            arch.name(),
            target.pointer_width.bytes()
        ))),
    }
}

fn standard_section(kind: SectionKind) -> StandardSection {
    match kind {
        SectionKind::Text => StandardSection::Text,
        SectionKind::Data => StandardSection::Data,
        SectionKind::ReadOnlyData => StandardSection::ReadOnlyData,
    }
}

/// Write `image` as a little-endian ELF relocatable object.
///
/// Image symbols keep their section offsets; symbols the image only refers
/// to are added as undefined.
pub fn write_elf(image: &Image, target: &TargetInfo) -> Result<Vec<u8>, EmitError> {
    let mut obj = Object::new(BinaryFormat::Elf, architecture(target)?, Endianness::Little);
    let mut externals: HashMap<&str, SymbolId> = HashMap::new();

    for section in &image.sections {
        let id = obj.section_id(standard_section(section.kind));
        let base = obj.append_section_data(id, &section.bytes, section.align as u64);

        for symbol in &section.symbols {
            obj.add_symbol(Symbol {
                name: symbol.name.as_bytes().to_vec(),
                value: base + symbol.offset,
                size: 0,
                kind: SymbolKind::Data,
                scope: if symbol.global {
                    SymbolScope::Dynamic
                } else {
                    SymbolScope::Compilation
                },
                weak: false,
                section: SymbolSection::Section(id),
                flags: SymbolFlags::None,
            });
        }

        for reloc in &section.relocations {
            let (symbol, addend) = match &reloc.target {
                RelocTarget::Symbol(name) => {
                    let external = *externals.entry(name.as_str()).or_insert_with(|| {
                        obj.add_symbol(Symbol {
                            name: name.as_bytes().to_vec(),
                            value: 0,
                            size: 0,
                            kind: SymbolKind::Text,
                            scope: SymbolScope::Unknown,
                            weak: false,
                            section: SymbolSection::Undefined,
                            flags: SymbolFlags::None,
                        })
                    });
                    (external, reloc.addend)
                }
                RelocTarget::Section(kind) => {
                    let target_section = obj.section_id(standard_section(*kind));
                    (obj.section_symbol(target_section), reloc.addend)
                }
            };

            obj.add_relocation(
                id,
                Relocation {
                    offset: base + reloc.offset,
                    symbol,
                    addend,
                    flags: RelocationFlags::Generic {
                        kind: RelocationKind::Absolute,
                        encoding: RelocationEncoding::Generic,
                        size: reloc.size * 8,
                    },
                },
            )?;
        }
    }

    Ok(obj.write()?)
}
