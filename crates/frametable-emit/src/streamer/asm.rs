use std::fmt::Write as _;

use super::{Context, Label, SectionKind, Streamer, SymbolAttr};

const INDENT: &str = "    ";

/// Prints GNU assembler syntax.
pub struct AsmStreamer {
    ctx: Context,
    comments: bool,
    pending_comment: Option<String>,
    out: String,
}

impl AsmStreamer {
    pub fn new(ctx: Context, comments: bool) -> Self {
        Self {
            ctx,
            comments,
            pending_comment: None,
            out: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        if let Some(comment) = self.pending_comment.take() {
            write!(self.out, " # {comment}").unwrap();
        }
        self.out.push('\n');
    }

    fn directive(&mut self, text: &str) {
        self.line(&format!("{INDENT}{text}"));
    }

    pub fn finish(mut self) -> String {
        if let Some(comment) = self.pending_comment.take() {
            writeln!(self.out, "{INDENT}# {comment}").unwrap();
        }
        self.out
    }
}

fn data_directive(size: u8) -> &'static str {
    match size {
        1 => ".byte",
        2 => ".short",
        4 => ".long",
        _ => ".quad",
    }
}

impl Streamer for AsmStreamer {
    fn context(&mut self) -> &mut Context {
        &mut self.ctx
    }

    fn switch_section(&mut self, section: SectionKind) {
        match section {
            SectionKind::Text | SectionKind::Data => self.directive(section.name()),
            SectionKind::ReadOnlyData => {
                self.directive(&format!(".section {}", section.name()))
            }
        }
    }

    fn emit_symbol_attribute(&mut self, label: Label, attr: SymbolAttr) {
        let name = self.ctx.name(label).to_string();
        match attr {
            SymbolAttr::Global => self.directive(&format!(".globl {name}")),
        }
    }

    fn emit_label(&mut self, label: Label) {
        let name = self.ctx.name(label).to_string();
        self.line(&format!("{name}:"));
    }

    fn emit_int(&mut self, value: u64, size: u8) {
        self.directive(&format!("{} {value}", data_directive(size)));
    }

    fn emit_symbol_value(&mut self, label: Label, size: u8) {
        let name = self.ctx.name(label).to_string();
        self.directive(&format!("{} {name}", data_directive(size)));
    }

    fn emit_alignment(&mut self, log2: u8) {
        self.directive(&format!(".p2align {log2}"));
    }

    fn add_comment(&mut self, text: &str) {
        if !self.comments {
            return;
        }
        if let Some(previous) = self.pending_comment.replace(text.to_string()) {
            writeln!(self.out, "{INDENT}# {previous}").unwrap();
        }
    }
}
