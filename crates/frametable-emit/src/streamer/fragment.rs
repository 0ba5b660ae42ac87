use super::{Context, Directive, Label, SectionKind, Streamer, SymbolAttr};

/// Records directives instead of writing them.
///
/// Labels are allocated in the borrowed context, so a finished
/// [`Recording`] replays into whichever streamer owns that context.
pub struct Fragment<'a> {
    ctx: &'a mut Context,
    directives: Vec<Directive>,
}

impl<'a> Fragment<'a> {
    pub fn new(ctx: &'a mut Context) -> Self {
        Self {
            ctx,
            directives: Vec::new(),
        }
    }

    pub fn finish(self) -> Recording {
        Recording {
            directives: self.directives,
        }
    }
}

impl Streamer for Fragment<'_> {
    fn context(&mut self) -> &mut Context {
        &mut *self.ctx
    }

    fn switch_section(&mut self, section: SectionKind) {
        self.directives.push(Directive::SwitchSection(section));
    }

    fn emit_symbol_attribute(&mut self, label: Label, attr: SymbolAttr) {
        self.directives.push(Directive::SymbolAttribute(label, attr));
    }

    fn emit_label(&mut self, label: Label) {
        self.directives.push(Directive::Label(label));
    }

    fn emit_int(&mut self, value: u64, size: u8) {
        self.directives.push(Directive::Int { value, size });
    }

    fn emit_symbol_value(&mut self, label: Label, size: u8) {
        self.directives.push(Directive::SymbolValue { label, size });
    }

    fn emit_alignment(&mut self, log2: u8) {
        self.directives.push(Directive::Alignment(log2));
    }

    fn add_comment(&mut self, text: &str) {
        self.directives.push(Directive::Comment(text.to_string()));
    }
}

/// Directives captured by a [`Fragment`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recording {
    directives: Vec<Directive>,
}

impl Recording {
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn replay(&self, out: &mut dyn Streamer) {
        for directive in &self.directives {
            directive.apply(out);
        }
    }
}
