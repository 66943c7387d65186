//! ANSI styling for listings and traces.
//!
//! | field | used for |
//! |---|---|
//! | `blue` | mnemonics, section headers |
//! | `green` | literals, registers, branch targets |
//! | `red` | decode and runtime failures |
//! | `dim` | offsets, separators |

/// Escape sequences, or empty strings when styling is off.
///
/// Only the basic 16-color codes are used, so output stays legible on both
/// light and dark terminals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}
