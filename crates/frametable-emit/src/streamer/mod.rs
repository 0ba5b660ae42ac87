//! Low-level output: sections, labels, and raw data directives.
//!
//! Encoders never produce bytes directly. They drive a [`Streamer`], which
//! either assembles an in-memory image ([`BufferedStreamer`]), prints
//! assembly ([`AsmStreamer`]), or records directives for later replay
//! ([`Fragment`]).

mod asm;
mod buffered;
mod fragment;


use std::collections::HashMap;

pub use asm::AsmStreamer;
pub use buffered::BufferedStreamer;
pub use fragment::{Fragment, Recording};
pub use frametable_format::SectionKind;

/// Handle to a symbol or temporary label in a [`Context`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u32);

#[derive(Clone, Debug)]
struct LabelInfo {
    name: String,
    temporary: bool,
}

/// Label table shared by everything writing into one output.
#[derive(Clone, Debug)]
pub struct Context {
    labels: Vec<LabelInfo>,
    by_name: HashMap<String, Label>,
    temp_count: u32,
    private_prefix: String,
}

impl Context {
    pub fn new(private_prefix: impl Into<String>) -> Self {
        Self {
            labels: Vec::new(),
            by_name: HashMap::new(),
            temp_count: 0,
            private_prefix: private_prefix.into(),
        }
    }

    /// The named symbol, created on first use.
    ///
    /// Never returns a temporary label. A temporary already using `name` is
    /// renamed so the two stay distinct in textual output.
    pub fn symbol(&mut self, name: &str) -> Label {
        if let Some(&label) = self.by_name.get(name) {
            if !self.is_temporary(label) {
                return label;
            }
            let fresh = self.fresh_temp_name();
            self.by_name.insert(fresh.clone(), label);
            self.labels[label.0 as usize].name = fresh;
        }
        self.push(name.to_string(), false)
    }

    /// A fresh assembler-local label that no other call will return.
    pub fn temp_label(&mut self) -> Label {
        let name = self.fresh_temp_name();
        self.push(name, true)
    }

    fn fresh_temp_name(&mut self) -> String {
        loop {
            let name = format!("{}tmp{}", self.private_prefix, self.temp_count);
            self.temp_count += 1;
            if !self.by_name.contains_key(&name) {
                return name;
            }
        }
    }

    fn push(&mut self, name: String, temporary: bool) -> Label {
        let label = Label(label_id(self.labels.len()));
        self.by_name.insert(name.clone(), label);
        self.labels.push(LabelInfo { name, temporary });
        label
    }

    pub fn name(&self, label: Label) -> &str {
        &self.labels[label.0 as usize].name
    }

    pub fn is_temporary(&self, label: Label) -> bool {
        self.labels[label.0 as usize].temporary
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Label ids are `u32`, so one context holds at most `u32::MAX + 1` labels.
///
/// # Panics
///
/// Panics once `index` no longer fits in a `u32`.
fn label_id(index: usize) -> u32 {
    match u32::try_from(index) {
        Ok(id) => id,
        Err(_) => panic!("label table overflow: {index} labels"),
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(".L")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolAttr {
    /// Visible to the linker outside this object.
    Global,
}

/// Sink for data directives.
pub trait Streamer {
    fn context(&mut self) -> &mut Context;

    fn switch_section(&mut self, section: SectionKind);

    fn emit_symbol_attribute(&mut self, label: Label, attr: SymbolAttr);

    /// Bind `label` to the current position.
    fn emit_label(&mut self, label: Label);

    /// Little-endian integer of `size` bytes (1, 2, 4 or 8).
    fn emit_int(&mut self, value: u64, size: u8);

    /// Address of `label`, `size` bytes wide.
    fn emit_symbol_value(&mut self, label: Label, size: u8);

    /// Pad to a `1 << log2` byte boundary.
    fn emit_alignment(&mut self, log2: u8);

    /// Attach a comment to the next directive. Only textual output keeps it.
    fn add_comment(&mut self, text: &str);

    fn emit_int8(&mut self, value: u8) {
        self.emit_int(u64::from(value), 1);
    }

    fn emit_int32(&mut self, value: u32) {
        self.emit_int(u64::from(value), 4);
    }
}

/// One recorded [`Streamer`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    SwitchSection(SectionKind),
    SymbolAttribute(Label, SymbolAttr),
    Label(Label),
    Int { value: u64, size: u8 },
    SymbolValue { label: Label, size: u8 },
    Alignment(u8),
    Comment(String),
}

impl Directive {
    pub fn apply(&self, out: &mut dyn Streamer) {
        match self {
            Directive::SwitchSection(section) => out.switch_section(*section),
            Directive::SymbolAttribute(label, attr) => out.emit_symbol_attribute(*label, *attr),
            Directive::Label(label) => out.emit_label(*label),
            Directive::Int { value, size } => out.emit_int(*value, *size),
            Directive::SymbolValue { label, size } => out.emit_symbol_value(*label, *size),
            Directive::Alignment(log2) => out.emit_alignment(*log2),
            Directive::Comment(text) => out.add_comment(text),
        }
    }
}
