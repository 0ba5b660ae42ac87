//! ANSI escapes for the frame table dump.
//!
//! The dump only distinguishes three things: symbol names, literal values, and
//! everything structural (section headers, counts, arrows), which is dimmed.

/// Escape sequences used when rendering dumps.
///
/// `Colors::OFF` holds empty strings so callers can interpolate the fields
/// unconditionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub symbol: &'static str,
    pub value: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        symbol: "\x1b[34m",
        value: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        symbol: "",
        value: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wrap `text` in the symbol color.
    pub fn paint_symbol(&self, text: &str) -> String {
        format!("{}{text}{}", self.symbol, self.reset)
    }

    /// Wrap `text` in the value color.
    pub fn paint_value(&self, text: impl std::fmt::Display) -> String {
        format!("{}{text}{}", self.value, self.reset)
    }
}
