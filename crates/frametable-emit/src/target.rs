//! Target description: pointer width, register names, symbol mangling.

use frametable_format::PointerWidth;

use crate::error::EmitError;

/// Architectures the emitter knows register names and ELF machine types for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetArch {
    X86_64,
    Aarch64,
    X86,
    Arm,
}

const X86_64_REGS: &[&str] = &[
    "rax", "rdx", "rcx", "rbx", "rsi", "rdi", "rbp", "rsp", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];

const AARCH64_REGS: &[&str] = &[
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11", "x12", "x13", "x14",
    "x15", "x16", "x17", "x18", "x19", "x20", "x21", "x22", "x23", "x24", "x25", "x26", "x27",
    "x28", "x29", "x30", "sp",
];

const X86_REGS: &[&str] = &["eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi"];

const ARM_REGS: &[&str] = &[
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "sp", "lr",
    "pc",
];

impl TargetArch {
    pub const ALL: [TargetArch; 4] = [
        TargetArch::X86_64,
        TargetArch::Aarch64,
        TargetArch::X86,
        TargetArch::Arm,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|arch| arch.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetArch::X86_64 => "x86_64",
            TargetArch::Aarch64 => "aarch64",
            TargetArch::X86 => "x86",
            TargetArch::Arm => "arm",
        }
    }

    pub fn pointer_width(self) -> PointerWidth {
        match self {
            TargetArch::X86_64 | TargetArch::Aarch64 => PointerWidth::Eight,
            TargetArch::X86 | TargetArch::Arm => PointerWidth::Four,
        }
    }

    /// Register names indexed by DWARF register number.
    fn register_names(self) -> &'static [&'static str] {
        match self {
            TargetArch::X86_64 => X86_64_REGS,
            TargetArch::Aarch64 => AARCH64_REGS,
            TargetArch::X86 => X86_REGS,
            TargetArch::Arm => ARM_REGS,
        }
    }
}

/// Everything target-specific the encoders need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetInfo {
    pub arch: TargetArch,
    pub pointer_width: PointerWidth,
    /// Prepended to every global symbol (`_` on Mach-O style targets).
    pub global_prefix: String,
    /// Prefix of assembler-local labels.
    pub private_prefix: String,
}

impl TargetInfo {
    pub fn new(arch: TargetArch) -> Self {
        Self {
            arch,
            pointer_width: arch.pointer_width(),
            global_prefix: String::new(),
            private_prefix: ".L".to_string(),
        }
    }

    /// Override the architecture's pointer size.
    pub fn with_pointer_size(mut self, bytes: u32) -> Result<Self, EmitError> {
        self.pointer_width =
            PointerWidth::from_bytes(bytes).ok_or(EmitError::UnsupportedPointerSize(bytes))?;
        Ok(self)
    }

    pub fn with_global_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.global_prefix = prefix.into();
        self
    }

    /// Apply the global symbol prefix.
    pub fn mangle(&self, name: &str) -> String {
        format!("{}{name}", self.global_prefix)
    }

    /// Printable name of a register, `r<id>` when the target has none.
    pub fn register_name(&self, id: u32) -> String {
        self.arch
            .register_names()
            .get(id as usize)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("r{id}"))
    }
}

impl Default for TargetInfo {
    fn default() -> Self {
        Self::new(TargetArch::X86_64)
    }
}
