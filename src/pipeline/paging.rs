//! Deciding whether a block of output overflows the terminal.

use std::io::{self, IsTerminal};
use unicode_width::UnicodeWidthChar;

/// Visible size of the controlling terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Visible rows.
    pub rows: u16,
    /// Visible columns.
    pub cols: u16,
}

impl TerminalGeometry {
    /// Geometry of standard output, or `None` when it is not a terminal
    /// or the size cannot be read.
    pub fn query() -> Option<Self> {
        if !io::stdout().is_terminal() {
            return None;
        }
        let (cols, rows) = crossterm::terminal::size().ok()?;
        (rows > 0 && cols > 0).then_some(Self { rows, cols })
    }

    /// Lines that fit with room left for a prompt and a pager status line.
    fn usable_lines(self) -> usize {
        usize::from(self.rows).saturating_sub(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Text,
    /// After `ESC`.
    Escape,
    /// Inside `ESC [`, up to a final byte.
    Csi,
    /// Inside `ESC ]`, up to `BEL` or `ESC \`.
    Osc,
    /// `ESC` seen inside an OSC string.
    OscEscape,
}

/// Whether `bytes` would scroll past the usable part of the terminal.
///
/// Escape sequences take no columns. A line that reaches the last column
/// wraps, and a wide character with no room left starts the next row. Scanning stops as soon as the limit is passed.
pub fn should_page(bytes: &[u8], geometry: TerminalGeometry) -> bool {
    let limit = geometry.usable_lines();
    let cols = usize::from(geometry.cols);

    let mut line = 0usize;
    let mut column = 0usize;
    let mut state = Scan::Text;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        state = match state {
            Scan::Escape => match byte {
                b'[' => Scan::Csi,
                b']' => Scan::Osc,
                _ => Scan::Text,
            },
            Scan::Csi if (0x40..=0x7e).contains(&byte) => Scan::Text,
            Scan::Csi => Scan::Csi,
            Scan::Osc => match byte {
                0x07 => Scan::Text,
                0x1b => Scan::OscEscape,
                _ => Scan::Osc,
            },
            Scan::OscEscape if byte == b'\\' => Scan::Text,
            Scan::OscEscape => Scan::Osc,
            Scan::Text => match byte {
                0x1b => Scan::Escape,
                b'\n' => {
                    line += 1;
                    column = 0;
                    Scan::Text
                }
                b'\r' => {
                    column = 0;
                    Scan::Text
                }
                _ => {
                    let (width, len) = visible_char(&bytes[i..]);
                    i += len - 1;
                    if column > 0 && column + width > cols {
                        // does not fit in what is left of the row
                        line += 1;
                        column = 0;
                        if line > limit {
                            return true;
                        }
                    }
                    column += width;
                    if column >= cols {
                        line += 1;
                        column = 0;
                    }
                    Scan::Text
                }
            },
        };

        if line > limit {
            return true;
        }
        i += 1;
    }
    false
}

/// Display width and byte length of the character starting `bytes`.
///
/// Bytes that do not start a valid UTF-8 sequence are one column wide.
fn visible_char(bytes: &[u8]) -> (usize, usize) {
    let len = match bytes[0] {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    };
    let decoded = bytes
        .get(..len)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next());

    match decoded {
        Some(c) => (c.width().unwrap_or(1), len),
        None => (1, 1),
    }
}
