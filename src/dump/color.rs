//! Terminal colors for dump output.

use crossterm::style::{ContentStyle, Stylize};
use std::fmt::Display;

/// What a piece of output is, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Type names.
    Type,
    /// Attribute names.
    AttName,
    /// Variable names.
    VarName,
    /// Dimension names.
    DimName,
    /// Numbers and string contents.
    Value,
    /// Quotes around strings.
    Quote,
    /// Headings such as the file name.
    Heading,
}

impl Role {
    fn style(self) -> ContentStyle {
        let style = ContentStyle::new();
        match self {
            Role::Type => style.cyan().bold(),
            Role::AttName => style.dark_yellow(),
            Role::VarName => style.dark_green(),
            Role::DimName => style.dark_magenta(),
            Role::Value => style.blue().bold(),
            Role::Quote => style.dark_blue(),
            Role::Heading => style.bold(),
        }
    }
}

/// Applies role colors, or nothing when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Create a palette.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// `text` wrapped in the escapes for `role`.
    pub fn paint(&self, role: Role, text: impl Display) -> String {
        if self.enabled {
            role.style().apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Like [`Palette::paint`], restarting the color after every newline so
    /// pagers that reset attributes per line keep it.
    pub fn paint_lines(&self, role: Role, text: &str) -> String {
        text.split('\n')
            .map(|line| self.paint(role, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_palette_is_plain() {
        let palette = Palette::new(false);
        assert_eq!(palette.paint(Role::VarName, "temp"), "temp");
        assert_eq!(palette.paint_lines(Role::Value, "a\nb"), "a\nb");
    }

    #[test]
    fn enabled_palette_wraps_in_sgr_sequences() {
        let painted = Palette::new(true).paint(Role::Value, 42);
        assert!(painted.starts_with("\x1b["));
        assert!(painted.contains("42"));
        assert!(painted.ends_with('m'));
    }

    #[test]
    fn every_line_is_recolored() {
        let painted = Palette::new(true).paint_lines(Role::Value, "a\nb");
        let (first, second) = painted.split_once('\n').unwrap();
        assert!(first.starts_with("\x1b["));
        assert!(second.starts_with("\x1b["));
    }
}
