//! VT100 terminal support for serial consoles
//!
//! Two halves, both running over the `octoseg-hal` UART traits:
//!
//! - [`terminal::Terminal`] writes the fixed escape sequences for cursor
//!   movement, scrolling, colors, text attributes and erasing.
//! - [`keys::KeyDecoder`] turns the bytes a terminal sends for keypresses
//!   back into key events, telling a lone ESC apart from the start of an
//!   arrow or function key sequence with a short timeout
//!   (see [`input::handle_key`]).
//!
//! Only a fixed set of special keys is recognized; anything else inside an
//! escape sequence is handed to the application as literal bytes.

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod keys;
pub mod style;
pub mod terminal;

pub use input::{handle_key, read_key, ESC_TIMEOUT_MS};
pub use keys::{KeyDecoder, KeyEvent, KeyHandler, KeyState, SpecialKey};
pub use style::{Attrs, Color, Style};
pub use terminal::Terminal;
