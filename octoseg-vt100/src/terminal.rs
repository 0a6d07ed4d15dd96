//! VT100 escape sequence writer
//!
//! Every call writes its sequence straight to the UART; nothing is
//! buffered across calls. Positions are zero-based on this side and
//! converted to the terminal's one-based coordinates on the wire.

use core::fmt::{self, Write as _};

use heapless::String;
use octoseg_hal::UartTx;

use crate::style::{Attrs, Color, Style};

/// Longest sequence we format is `ESC [ 256 ; 256 H`
const SEQ_LEN: usize = 16;

/// Escape sequence writer over a UART
pub struct Terminal<T> {
    tx: T,
    current: Style,
    saved: Style,
}

impl<T: UartTx> Terminal<T> {
    /// Wrap a transmitter; nothing is sent until [`Terminal::reset`]
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            current: Style::default(),
            saved: Style::default(),
        }
    }

    /// Give back the underlying transmitter
    pub fn release(self) -> T {
        self.tx
    }

    pub fn style(&self) -> Style {
        self.current
    }

    /// Restore default colors and attributes, clear the screen, home the
    /// cursor and save that as the restore point
    pub fn reset(&mut self) -> Result<(), T::Error> {
        self.reset_color()?;
        self.reset_attrs()?;
        self.reset_scroll_region()?;
        self.clear()?;
        self.home()?;
        self.save()
    }

    /// Write text as-is
    pub fn write_str(&mut self, text: &str) -> Result<(), T::Error> {
        self.tx.write_blocking(text.as_bytes())
    }

    fn seq(&mut self, args: fmt::Arguments<'_>) -> Result<(), T::Error> {
        let mut buf: String<SEQ_LEN> = String::new();
        // Sequences are bounded by SEQ_LEN, formatting cannot overflow
        let _ = buf.write_fmt(args);
        self.tx.write_blocking(buf.as_bytes())
    }

    // ---- cursor ----

    /// Move the cursor to column `x`, row `y`
    pub fn goto(&mut self, x: u8, y: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{};{}H", u16::from(y) + 1, u16::from(x) + 1))
    }

    pub fn goto_x(&mut self, x: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{}`", u16::from(x) + 1))
    }

    pub fn goto_y(&mut self, y: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{}d", u16::from(y) + 1))
    }

    pub fn home(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[H")
    }

    pub fn up(&mut self, n: u8) -> Result<(), T::Error> {
        self.relative(n, 'A')
    }

    pub fn down(&mut self, n: u8) -> Result<(), T::Error> {
        self.relative(n, 'B')
    }

    pub fn right(&mut self, n: u8) -> Result<(), T::Error> {
        self.relative(n, 'C')
    }

    pub fn left(&mut self, n: u8) -> Result<(), T::Error> {
        self.relative(n, 'D')
    }

    /// Move relative to the current position, negative is left/up
    pub fn move_by(&mut self, dx: i8, dy: i8) -> Result<(), T::Error> {
        if dx < 0 {
            self.left(dx.unsigned_abs())?;
        } else {
            self.right(dx as u8)?;
        }
        if dy < 0 {
            self.up(dy.unsigned_abs())
        } else {
            self.down(dy as u8)
        }
    }

    fn relative(&mut self, n: u8, dir: char) -> Result<(), T::Error> {
        // ESC[0A would move by one on most terminals
        if n == 0 {
            return Ok(());
        }
        self.seq(format_args!("\x1b[{}{}", n, dir))
    }

    // ---- scrolling ----

    /// Scroll by `lines`; negative scrolls the content up
    pub fn scroll(&mut self, lines: i8) -> Result<(), T::Error> {
        let step: &[u8] = if lines < 0 { b"\x1bD" } else { b"\x1bM" };
        for _ in 0..lines.unsigned_abs() {
            self.tx.write_blocking(step)?;
        }
        Ok(())
    }

    /// Restrict scrolling to rows `from..=to` (terminal numbering)
    pub fn set_scroll_region(&mut self, from: u8, to: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{};{}r", from, to))
    }

    pub fn reset_scroll_region(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[r")
    }

    // ---- style ----

    /// Save cursor position and the current style
    pub fn save(&mut self) -> Result<(), T::Error> {
        self.saved = self.current;
        self.tx.write_blocking(b"\x1b[s")
    }

    /// Restore cursor position and the style from the last [`Terminal::save`]
    ///
    /// Only the tracked style is restored; the terminal keeps drawing with
    /// whatever it had until the next style change is applied.
    pub fn restore(&mut self) -> Result<(), T::Error> {
        self.current = self.saved;
        self.tx.write_blocking(b"\x1b[u")
    }

    /// Turn attribute flags on or off and re-send the full style
    pub fn set_attr(&mut self, attrs: Attrs, on: bool) -> Result<(), T::Error> {
        self.current.attrs.set(attrs, on);
        self.apply_style()
    }

    /// Clear all attributes, keeping colors
    pub fn reset_attrs(&mut self) -> Result<(), T::Error> {
        self.current.attrs = Attrs::empty();
        self.apply_style()
    }

    pub fn set_color(&mut self, fg: Color, bg: Color) -> Result<(), T::Error> {
        self.current.fg = fg;
        self.current.bg = bg;
        self.apply_color()
    }

    pub fn set_fg(&mut self, fg: Color) -> Result<(), T::Error> {
        self.current.fg = fg;
        self.apply_color()
    }

    pub fn set_bg(&mut self, bg: Color) -> Result<(), T::Error> {
        self.current.bg = bg;
        self.apply_color()
    }

    /// White on black
    pub fn reset_color(&mut self) -> Result<(), T::Error> {
        self.set_color(Color::White, Color::Black)
    }

    fn apply_style(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[m")?;
        for sgr in self.current.attrs.sgr_codes() {
            self.seq(format_args!("\x1b[{}m", sgr))?;
        }
        self.apply_color()
    }

    fn apply_color(&mut self) -> Result<(), T::Error> {
        let (fg, bg) = (self.current.fg.fg_code(), self.current.bg.bg_code());
        self.seq(format_args!("\x1b[{};{}m", fg, bg))
    }

    // ---- editing ----

    /// Insert blank lines above the cursor line
    pub fn insert_lines(&mut self, count: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{}L", count))
    }

    /// Delete lines from the cursor line down
    pub fn delete_lines(&mut self, count: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{}M", count))
    }

    /// Insert blanks at the cursor
    pub fn insert_chars(&mut self, count: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{}@", count))
    }

    /// Delete characters at the cursor
    pub fn delete_chars(&mut self, count: u8) -> Result<(), T::Error> {
        self.seq(format_args!("\x1b[{}P", count))
    }

    pub fn clear(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[2J")
    }

    /// Erase from the cursor to the end of the line
    pub fn erase_forth(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[K")
    }

    /// Erase from the start of the line to the cursor
    pub fn erase_back(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[1K")
    }

    pub fn erase_line(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[2K")
    }

    pub fn erase_above(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[1J")
    }

    pub fn erase_below(&mut self) -> Result<(), T::Error> {
        self.tx.write_blocking(b"\x1b[J")
    }
}

impl<T: UartTx> fmt::Write for Terminal<T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Terminal::write_str(self, s).map_err(|_| fmt::Error)
    }
}
