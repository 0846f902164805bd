//! ANSI escape sequences for styled terminal output.
//!
//! [`Termcaps`] builds the strings that switch colors and attributes on and
//! off, move the cursor and clear the screen. Styling can be toggled per
//! instance, and setting `ANSI_COLORS_DISABLED` in the environment turns it
//! off everywhere.
//!
//! # Example
//!
//! ```rust
//! use waypoint::termcaps::{Attribute, Color, Termcaps};
//!
//! let caps = Termcaps::new(true).ignore_env();
//! let banner = format!(
//!     "{}ready{}",
//!     caps.start(Some(Color::Green), None, Some(Attribute::Bold)),
//!     caps.default(),
//! );
//! assert_eq!(banner, "\x1b[32;1mready\x1b[0m");
//! ```

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable that disables all styling when set to any value.
pub const COLORS_DISABLED_VAR: &str = "ANSI_COLORS_DISABLED";

const ESCAPE: &str = "\x1b[";

/// Terminal colors usable as foreground or background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Default,
}

impl Color {
    fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::Red => '1',
            Self::Green => '2',
            Self::Yellow => '3',
            Self::Blue => '4',
            Self::Magenta => '5',
            Self::Cyan => '6',
            Self::White => '7',
            Self::Default => '9',
        }
    }
}

/// Text attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Default,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    BlinkFast,
    Reverse,
    Conceal,
    Crossed,
}

impl Attribute {
    fn code(self) -> char {
        match self {
            Self::Default => '0',
            Self::Bold => '1',
            Self::Dim => '2',
            Self::Italic => '3',
            Self::Underline => '4',
            Self::Blink => '5',
            Self::BlinkFast => '6',
            Self::Reverse => '7',
            Self::Conceal => '8',
            Self::Crossed => '9',
        }
    }
}

/// Escape sequence builder with an on/off switch for styling.
#[derive(Clone, Debug)]
pub struct Termcaps {
    styles: bool,
    respect_env: bool,
}

impl Termcaps {
    pub fn new(styles: bool) -> Self {
        Self {
            styles,
            respect_env: true,
        }
    }

    /// Stop consulting `ANSI_COLORS_DISABLED`.
    pub fn ignore_env(mut self) -> Self {
        self.respect_env = false;
        self
    }

    pub fn styles_on(&mut self) {
        self.styles = true;
    }

    pub fn styles_off(&mut self) {
        self.styles = false;
    }

    /// Whether `start` and `end` currently produce anything.
    pub fn styles_enabled(&self) -> bool {
        self.styles && !self.disabled_by_env()
    }

    /// Sequence that switches on the given colors and attribute.
    pub fn start(&self, fg: Option<Color>, bg: Option<Color>, attr: Option<Attribute>) -> String {
        if !self.styles_enabled() {
            return String::new();
        }

        let mut parts = Vec::with_capacity(3);
        if let Some(fg) = fg {
            parts.push(format!("3{}", fg.code()));
        }
        if let Some(bg) = bg {
            parts.push(format!("4{}", bg.code()));
        }
        if let Some(attr) = attr {
            parts.push(attr.code().to_string());
        }
        select_graphic(&parts)
    }

    /// Sequence that resets the foreground and background to their defaults
    /// and switches off the given attribute.
    pub fn end(&self, fg: bool, bg: bool, attr: Option<Attribute>) -> String {
        if !self.styles_enabled() {
            return String::new();
        }

        let mut parts = Vec::with_capacity(3);
        if fg {
            parts.push(format!("3{}", Color::Default.code()));
        }
        if bg {
            parts.push(format!("4{}", Color::Default.code()));
        }
        if let Some(attr) = attr {
            parts.push(format!("2{}", attr.code()));
        }
        select_graphic(&parts)
    }

    /// Sequence that resets every style. Only the environment switch
    /// silences it.
    pub fn default(&self) -> String {
        if self.disabled_by_env() {
            return String::new();
        }
        format!("{ESCAPE}0m")
    }

    pub fn clear(&self) -> String {
        format!("{ESCAPE}2J")
    }

    pub fn move_cursor(&self, x: u32, y: u32) -> String {
        format!("{ESCAPE}{x};{y}H")
    }

    pub fn reset_cursor(&self) -> String {
        format!("{ESCAPE};H")
    }

    /// Clear the screen and home the cursor.
    pub fn reset_screen(&self) -> String {
        format!("{}{}", self.clear(), self.reset_cursor())
    }

    fn disabled_by_env(&self) -> bool {
        self.respect_env && env::var_os(COLORS_DISABLED_VAR).is_some()
    }
}

fn select_graphic(parts: &[String]) -> String {
    format!("{ESCAPE}{}m", parts.join(";"))
}
