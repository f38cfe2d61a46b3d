//! ANSI color codes for terminal output.
//!
//! Semantic colors used by plan dumps and CLI messages:
//! - Blue: element and type names
//! - Green: element kinds, encoded keys
//! - Red: errors
//! - Dim: structure (edges, punctuation)

/// ANSI color palette for CLI output.
///
/// Only standard 16-color ANSI codes, so dumps read fine on light and dark
/// terminals alike.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
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
