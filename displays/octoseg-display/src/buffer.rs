//! Live display state
//!
//! The staging half of the double buffer lives inside
//! [`octoseg_protocol::CommandDecoder`]; what is kept here is only what
//! the refresh loop needs to draw.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use octoseg_protocol::segments::SYM_BLANK;
use octoseg_protocol::{Brightness, Digits, DisplayUpdate, DIGIT_COUNT};

/// Digits currently shown plus the brightness they are shown at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    digits: Digits,
    brightness: Brightness,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    /// Power-on state: all digits blank, full brightness
    pub const fn new() -> Self {
        Self {
            digits: [SYM_BLANK; DIGIT_COUNT],
            brightness: Brightness::MAX,
        }
    }

    pub fn digits(&self) -> &Digits {
        &self.digits
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Delay step at which lit digits are forced dark
    pub fn threshold(&self) -> u8 {
        self.brightness.threshold()
    }

    pub fn is_blank(&self) -> bool {
        self.digits.iter().all(|&d| d == SYM_BLANK)
    }

    /// Apply a decoded command
    pub fn apply(&mut self, update: DisplayUpdate) {
        match update {
            DisplayUpdate::Commit(digits) => self.digits = digits,
            DisplayUpdate::Blank => self.digits = [SYM_BLANK; DIGIT_COUNT],
            DisplayUpdate::Brightness(level) => self.brightness = level,
        }
    }
}

/// Display state shared between the receive interrupt and the refresh loop
///
/// Every access runs inside a critical section and copies the whole
/// buffer, so readers never see a torn update.
pub struct SharedDisplay {
    inner: Mutex<CriticalSectionRawMutex, Cell<DisplayBuffer>>,
}

impl Default for SharedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedDisplay {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(DisplayBuffer::new())),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DisplayBuffer {
        self.inner.lock(|cell| cell.get())
    }

    /// Apply a decoded command atomically
    pub fn apply(&self, update: DisplayUpdate) {
        self.inner.lock(|cell| {
            let mut buffer = cell.get();
            buffer.apply(update);
            cell.set(buffer);
        });
    }
}
