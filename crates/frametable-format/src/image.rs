//! Assembled output: section contents with their symbols and relocations.
//!
//! An image is what an in-memory streamer produces once every label has been
//! resolved. Pointer fields that refer to something outside the image (the
//! code addresses of safe points) hold zero and carry a relocation against the
//! external symbol. Pointer fields that refer into the image hold the target's
//! section offset and carry a section-relative relocation with that offset as
//! addend.

use crate::layout::PointerWidth;

/// Output sections the emitter can switch between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Text,
    /// Default writable data section.
    Data,
    ReadOnlyData,
}

impl SectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Text => ".text",
            SectionKind::Data => ".data",
            SectionKind::ReadOnlyData => ".rodata",
        }
    }
}

/// A symbol bound to an offset in a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSymbol {
    pub name: String,
    pub offset: u64,
    pub global: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelocTarget {
    /// A symbol the image does not define.
    Symbol(String),
    /// The start of a section of this image.
    Section(SectionKind),
}

/// An absolute, pointer-sized relocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRelocation {
    pub offset: u64,
    pub size: u8,
    pub target: RelocTarget,
    pub addend: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionImage {
    pub kind: SectionKind,
    pub bytes: Vec<u8>,
    /// Largest alignment requested inside the section.
    pub align: usize,
    /// Symbols in definition order.
    pub symbols: Vec<ImageSymbol>,
    /// Relocations in emission order.
    pub relocations: Vec<ImageRelocation>,
}

impl SectionImage {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            bytes: Vec::new(),
            align: 1,
            symbols: Vec::new(),
            relocations: Vec::new(),
        }
    }

    pub fn symbol(&self, name: &str) -> Option<&ImageSymbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn relocation_at(&self, offset: u64) -> Option<&ImageRelocation> {
        self.relocations.iter().find(|r| r.offset == offset)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub pointer_width: PointerWidth,
    pub sections: Vec<SectionImage>,
}

impl Image {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionImage> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}
