use std::collections::{HashMap, HashSet};

use frametable_format::{
    Image, ImageRelocation, ImageSymbol, PointerWidth, RelocTarget, SectionImage, align_up,
};
use indexmap::IndexMap;

use super::{Context, Label, SectionKind, Streamer, SymbolAttr};
use crate::error::EmitError;

/// A pointer-sized hole to fill once every label is known.
#[derive(Clone, Copy, Debug)]
struct Fixup {
    section: SectionKind,
    offset: u64,
    size: u8,
    label: Label,
}

/// Assembles sections in memory.
///
/// Label references are resolved in [`finish`](Self::finish): references to
/// labels bound in this output become section-relative relocations, references
/// to named labels bound nowhere become relocations against external symbols.
pub struct BufferedStreamer {
    ctx: Context,
    pointer_width: PointerWidth,
    current: SectionKind,
    sections: IndexMap<SectionKind, SectionImage>,
    bound: HashMap<Label, (SectionKind, u64)>,
    /// Labels in binding order, for a stable symbol table.
    bind_order: Vec<Label>,
    globals: HashSet<Label>,
    fixups: Vec<Fixup>,
}

impl BufferedStreamer {
    pub fn new(ctx: Context, pointer_width: PointerWidth) -> Self {
        Self {
            ctx,
            pointer_width,
            current: SectionKind::Text,
            sections: IndexMap::new(),
            bound: HashMap::new(),
            bind_order: Vec::new(),
            globals: HashSet::new(),
            fixups: Vec::new(),
        }
    }

    fn section(&mut self) -> &mut SectionImage {
        let kind = self.current;
        self.sections
            .entry(kind)
            .or_insert_with(|| SectionImage::new(kind))
    }

    fn position(&mut self) -> u64 {
        self.section().bytes.len() as u64
    }

    pub fn finish(mut self) -> Result<Image, EmitError> {
        for fixup in std::mem::take(&mut self.fixups) {
            let (target, addend) = match self.bound.get(&fixup.label) {
                Some(&(section, offset)) => (RelocTarget::Section(section), offset),
                None if self.ctx.is_temporary(fixup.label) => {
                    return Err(EmitError::UnboundLabel(
                        self.ctx.name(fixup.label).to_string(),
                    ));
                }
                None => (
                    RelocTarget::Symbol(self.ctx.name(fixup.label).to_string()),
                    0,
                ),
            };

            let Some(section) = self.sections.get_mut(&fixup.section) else {
                continue;
            };
            let start = fixup.offset as usize;
            let size = usize::from(fixup.size);
            section.bytes[start..start + size].copy_from_slice(&addend.to_le_bytes()[..size]);
            section.relocations.push(ImageRelocation {
                offset: fixup.offset,
                size: fixup.size,
                target,
                addend: addend as i64,
            });
        }

        for label in &self.bind_order {
            if self.ctx.is_temporary(*label) {
                continue;
            }
            let (kind, offset) = self.bound[label];
            if let Some(section) = self.sections.get_mut(&kind) {
                section.symbols.push(ImageSymbol {
                    name: self.ctx.name(*label).to_string(),
                    offset,
                    global: self.globals.contains(label),
                });
            }
        }

        Ok(Image {
            pointer_width: self.pointer_width,
            sections: self.sections.into_values().collect(),
        })
    }
}

impl Streamer for BufferedStreamer {
    fn context(&mut self) -> &mut Context {
        &mut self.ctx
    }

    fn switch_section(&mut self, section: SectionKind) {
        self.current = section;
        self.section();
    }

    fn emit_symbol_attribute(&mut self, label: Label, attr: SymbolAttr) {
        match attr {
            SymbolAttr::Global => {
                self.globals.insert(label);
            }
        }
    }

    fn emit_label(&mut self, label: Label) {
        let position = self.position();
        if self.bound.contains_key(&label) {
            tracing::warn!(label = self.ctx.name(label), "label bound twice, keeping the first");
            return;
        }
        self.bound.insert(label, (self.current, position));
        self.bind_order.push(label);
    }

    fn emit_int(&mut self, value: u64, size: u8) {
        let bytes = value.to_le_bytes();
        self.section()
            .bytes
            .extend_from_slice(&bytes[..usize::from(size)]);
    }

    fn emit_symbol_value(&mut self, label: Label, size: u8) {
        let offset = self.position();
        self.fixups.push(Fixup {
            section: self.current,
            offset,
            size,
            label,
        });
        let section = self.section();
        section.bytes.resize(section.bytes.len() + usize::from(size), 0);
    }

    fn emit_alignment(&mut self, log2: u8) {
        let align = 1usize << log2;
        let section = self.section();
        let len = align_up(section.bytes.len(), align);
        section.bytes.resize(len, 0);
        section.align = section.align.max(align);
    }

    fn add_comment(&mut self, _text: &str) {}
}
